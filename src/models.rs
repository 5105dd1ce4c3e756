use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Whether a metric is a running lifetime total or a per-week flow.
///
/// Both kinds go through the same delta computation; the distinction only
/// affects how the dashboard labels a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Cumulative,
    Flow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Total Subs")]
    TotalSubs,
    #[serde(rename = "New Subs")]
    NewSubs,
    #[serde(rename = "Avg DAU")]
    AvgDau,
    #[serde(rename = "Total Plays")]
    TotalPlays,
    #[serde(rename = "Total Downloads")]
    TotalDownloads,
    #[serde(rename = "New Downloads")]
    NewDownloads,
    #[serde(rename = "Total Active Devices")]
    TotalActiveDevices,
    #[serde(rename = "New Sign-ups")]
    NewSignUps,
    #[serde(rename = "Masterclasses Played")]
    MasterclassesPlayed,
    #[serde(rename = "Daily Journal Entries")]
    DailyJournalEntries,
    #[serde(rename = "Weekly Workshop")]
    WeeklyWorkshop,
    #[serde(rename = "Content Likes")]
    ContentLikes,
    #[serde(rename = "Content Shares")]
    ContentShares,
    #[serde(rename = "YT Views")]
    YtViews,
    #[serde(rename = "YT Watch Time")]
    YtWatchTime,
    #[serde(rename = "YT Likes")]
    YtLikes,
}

impl Metric {
    /// Every numeric field, in the column order of the dataset.
    pub const ALL: [Metric; 16] = [
        Metric::TotalSubs,
        Metric::NewSubs,
        Metric::AvgDau,
        Metric::TotalPlays,
        Metric::TotalDownloads,
        Metric::NewDownloads,
        Metric::TotalActiveDevices,
        Metric::NewSignUps,
        Metric::MasterclassesPlayed,
        Metric::DailyJournalEntries,
        Metric::WeeklyWorkshop,
        Metric::ContentLikes,
        Metric::ContentShares,
        Metric::YtViews,
        Metric::YtWatchTime,
        Metric::YtLikes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::TotalSubs => "Total Subs",
            Metric::NewSubs => "New Subs",
            Metric::AvgDau => "Avg DAU",
            Metric::TotalPlays => "Total Plays",
            Metric::TotalDownloads => "Total Downloads",
            Metric::NewDownloads => "New Downloads",
            Metric::TotalActiveDevices => "Total Active Devices",
            Metric::NewSignUps => "New Sign-ups",
            Metric::MasterclassesPlayed => "Masterclasses Played",
            Metric::DailyJournalEntries => "Daily Journal Entries",
            Metric::WeeklyWorkshop => "Weekly Workshop",
            Metric::ContentLikes => "Content Likes",
            Metric::ContentShares => "Content Shares",
            Metric::YtViews => "YT Views",
            Metric::YtWatchTime => "YT Watch Time",
            Metric::YtLikes => "YT Likes",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Metric::TotalSubs | Metric::TotalDownloads | Metric::TotalActiveDevices => {
                MetricKind::Cumulative
            }
            _ => MetricKind::Flow,
        }
    }

    /// Percentage fields format their delta as `+1.5%` instead of `+1,500`.
    /// The current metric set has none.
    pub fn is_percentage(self) -> bool {
        false
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the metrics table, covering one calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRecord {
    #[serde(rename = "Week")]
    pub label: String,
    #[serde(rename = "Start Date")]
    pub start_date: NaiveDate,
    #[serde(rename = "End Date")]
    pub end_date: NaiveDate,
    #[serde(rename = "Top Track")]
    pub top_track: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<Metric, f64>,
}

impl WeekRecord {
    /// Value of a metric; a validated table always carries every metric.
    pub fn value(&self, metric: Metric) -> f64 {
        self.metrics.get(&metric).copied().unwrap_or_default()
    }
}

/// Week-over-week change of one metric.
///
/// `Unavailable` is returned when there is no previous week; it never
/// collapses into a zero change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Delta {
    Change { value: f64 },
    Unavailable,
}

impl Delta {
    pub fn value(self) -> Option<f64> {
        match self {
            Delta::Change { value } => Some(value),
            Delta::Unavailable => None,
        }
    }

    pub fn is_unavailable(self) -> bool {
        matches!(self, Delta::Unavailable)
    }
}

/// Everything needed to render one selected week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub current: WeekRecord,
    pub previous: Option<WeekRecord>,
    pub deltas: BTreeMap<Metric, Delta>,
    pub comparison_label: String,
}

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekListResponse {
    pub weeks: Vec<String>,
    pub default_week: String,
}
