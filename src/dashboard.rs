//! Page model for the growth dashboard: headline cards, trend charts and the
//! raw row for the selected week. Everything here is derived from a
//! [`WeekView`] and the table; nothing is computed beyond formatting.

use crate::format::{format_delta, format_new, format_value};
use crate::models::{Metric, MetricKind, WeekRecord, WeekView};
use crate::table::MetricsTable;
use chrono::NaiveDate;
use serde::Serialize;

pub const TITLE: &str = "Soullab Growth Dashboard";

/// What a card shows underneath its value.
#[derive(Debug, Clone, Copy)]
enum Annotation {
    /// Week-over-week delta of the given metric.
    Change(Metric),
    /// The metric's own current value, shown as "+N new".
    New(Metric),
}

struct CardSpec {
    label: &'static str,
    value: Metric,
    annotation: Annotation,
}

const fn change(label: &'static str, metric: Metric) -> CardSpec {
    CardSpec {
        label,
        value: metric,
        annotation: Annotation::Change(metric),
    }
}

const SECTIONS: &[(&str, &[CardSpec])] = &[
    (
        "Lifetime Totals",
        &[
            CardSpec {
                label: "Total App Downloads",
                value: Metric::TotalDownloads,
                annotation: Annotation::New(Metric::NewDownloads),
            },
            change("Total Active Devices", Metric::TotalActiveDevices),
            CardSpec {
                label: "Total YouTube Subscribers",
                value: Metric::TotalSubs,
                annotation: Annotation::New(Metric::NewSubs),
            },
        ],
    ),
    (
        "App Performance Overview (Weekly)",
        &[
            change("App Downloads", Metric::NewDownloads),
            change("New Sign-ups", Metric::NewSignUps),
            change("Avg Daily Active Users", Metric::AvgDau),
        ],
    ),
    (
        "In-App Engagement (Weekly)",
        &[
            change("Total Audios Played", Metric::TotalPlays),
            change("Masterclasses Played", Metric::MasterclassesPlayed),
            change("Daily Journal Entries", Metric::DailyJournalEntries),
            change("Weekly Workshop", Metric::WeeklyWorkshop),
            change("Content Likes", Metric::ContentLikes),
            change("Content Shares", Metric::ContentShares),
        ],
    ),
    (
        "YouTube Performance (Weekly)",
        &[
            change("Watch Time (Hours)", Metric::YtWatchTime),
            change("Video Views", Metric::YtViews),
            change("Likes", Metric::YtLikes),
            change("Subscribers Gained", Metric::NewSubs),
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    Bar,
    Line,
}

struct ChartSpec {
    tab: &'static str,
    title: &'static str,
    style: ChartStyle,
    metric: Metric,
}

const CHARTS: &[ChartSpec] = &[
    ChartSpec {
        tab: "Subscriber Growth",
        title: "Weekly New Subscribers",
        style: ChartStyle::Bar,
        metric: Metric::NewSubs,
    },
    ChartSpec {
        tab: "App Activity",
        title: "Daily Active Users Trend",
        style: ChartStyle::Line,
        metric: Metric::AvgDau,
    },
    ChartSpec {
        tab: "YouTube Views",
        title: "Weekly YouTube Views",
        style: ChartStyle::Bar,
        metric: Metric::YtViews,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub label: String,
    /// Lifetime total or this week's flow, for labelling only.
    pub kind: MetricKind,
    pub value: String,
    pub delta: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub week: String,
    pub end_date: NaiveDate,
    pub value: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub tab: String,
    pub title: String,
    pub style: ChartStyle,
    pub metric: Metric,
    pub points: Vec<ChartPoint>,
    pub highlight_start: NaiveDate,
    pub highlight_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawRow {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardPage {
    pub title: String,
    pub reporting_period: String,
    pub weeks: Vec<String>,
    pub comparison_label: String,
    pub sections: Vec<Section>,
    pub charts: Vec<TrendChart>,
    pub raw: Vec<RawRow>,
}

pub fn build_page(table: &MetricsTable, view: &WeekView) -> DashboardPage {
    DashboardPage {
        title: TITLE.to_string(),
        reporting_period: view.current.label.clone(),
        weeks: table.list_week_labels(),
        comparison_label: view.comparison_label.clone(),
        sections: SECTIONS
            .iter()
            .map(|(title, cards)| Section {
                title: title.to_string(),
                cards: cards.iter().map(|spec| build_card(view, spec)).collect(),
            })
            .collect(),
        charts: CHARTS
            .iter()
            .map(|spec| build_chart(table, &view.current, spec))
            .collect(),
        raw: raw_rows(&view.current),
    }
}

fn build_card(view: &WeekView, spec: &CardSpec) -> Card {
    let value = format_value(view.current.value(spec.value), spec.value.is_percentage());
    let (delta, caption) = match spec.annotation {
        Annotation::New(metric) => (Some(format_new(view.current.value(metric))), None),
        Annotation::Change(metric) => {
            let delta = view
                .deltas
                .get(&metric)
                .and_then(|delta| format_delta(*delta, metric.is_percentage()));
            (delta, Some(view.comparison_label.clone()))
        }
    };

    Card {
        label: spec.label.to_string(),
        kind: spec.value.kind(),
        value,
        delta,
        caption,
    }
}

fn build_chart(table: &MetricsTable, current: &WeekRecord, spec: &ChartSpec) -> TrendChart {
    TrendChart {
        tab: spec.tab.to_string(),
        title: spec.title.to_string(),
        style: spec.style,
        metric: spec.metric,
        points: table
            .records()
            .iter()
            .map(|record| ChartPoint {
                week: record.label.clone(),
                end_date: record.end_date,
                value: record.value(spec.metric),
                selected: record.label == current.label,
            })
            .collect(),
        highlight_start: current.start_date,
        highlight_end: current.end_date,
    }
}

/// The selected record transposed into field/value rows, in dataset column order.
fn raw_rows(record: &WeekRecord) -> Vec<RawRow> {
    let row = |field: &str, value: String| RawRow {
        field: field.to_string(),
        value,
    };

    let mut rows = vec![
        row("Week", record.label.clone()),
        row("Start Date", record.start_date.to_string()),
        row("End Date", record.end_date.to_string()),
    ];
    rows.extend(
        Metric::ALL
            .iter()
            .map(|metric| row(metric.name(), record.value(*metric).to_string())),
    );
    rows.push(row("Top Track", record.top_track.clone()));
    rows
}
