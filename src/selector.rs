use crate::errors::TableError;
use crate::models::{Delta, Metric, WeekView};
use crate::table::MetricsTable;
use tracing::debug;

pub const COMPARISON_LABEL: &str = "vs last week";
pub const NO_COMPARISON_LABEL: &str = "(no previous data)";

/// Resolves a selected week label into its record, its predecessor and the
/// per-metric week-over-week deltas.
///
/// The predecessor is the previous row of the table, regardless of dates.
/// The first week has no predecessor, so every delta is `Delta::Unavailable`.
pub fn resolve_week(table: &MetricsTable, label: &str) -> Result<WeekView, TableError> {
    let position = table.index_of(label)?;
    let current = table.records()[position].clone();
    let previous = position
        .checked_sub(1)
        .and_then(|prev| table.get(prev))
        .cloned();

    let deltas = Metric::ALL
        .iter()
        .map(|&metric| {
            let delta = match &previous {
                Some(prev) => Delta::Change {
                    value: current.value(metric) - prev.value(metric),
                },
                None => Delta::Unavailable,
            };
            (metric, delta)
        })
        .collect();

    let comparison_label = if previous.is_some() {
        COMPARISON_LABEL
    } else {
        NO_COMPARISON_LABEL
    };

    debug!(week = %current.label, position, "resolved week");

    Ok(WeekView {
        current,
        previous,
        deltas,
        comparison_label: comparison_label.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builtin_table;
    use crate::table::tests::week;
    use chrono::{Duration, NaiveDate};

    const WEEK_0: &str = "Week 0: Dec 01 - Dec 07, 2025";
    const WEEK_3: &str = "Week 3: Dec 22 - Dec 28, 2025";
    const WEEK_5: &str = "Week 5: Jan 05 - Jan 11, 2026";

    #[test]
    fn resolves_previous_row_and_deltas_for_every_later_week() {
        let table = builtin_table().unwrap();
        for (position, record) in table.records().iter().enumerate().skip(1) {
            let view = resolve_week(&table, &record.label).unwrap();
            let previous = view.previous.as_ref().expect("missing previous week");
            assert_eq!(previous, &table.records()[position - 1]);
            for metric in Metric::ALL {
                assert_eq!(
                    view.deltas[&metric],
                    Delta::Change {
                        value: record.value(metric) - previous.value(metric)
                    },
                    "{metric} in {}",
                    record.label
                );
            }
        }
    }

    #[test]
    fn first_week_has_no_comparison() {
        let table = builtin_table().unwrap();
        let view = resolve_week(&table, WEEK_0).unwrap();
        assert!(view.previous.is_none());
        assert_eq!(view.deltas.len(), Metric::ALL.len());
        assert!(view.deltas.values().all(|delta| delta.is_unavailable()));
        assert_eq!(view.deltas[&Metric::AvgDau], Delta::Unavailable);
        assert_ne!(view.deltas[&Metric::AvgDau], Delta::Change { value: 0.0 });
        assert_eq!(view.comparison_label, "(no previous data)");
    }

    #[test]
    fn total_subs_delta_for_week_three() {
        let table = builtin_table().unwrap();
        let view = resolve_week(&table, WEEK_3).unwrap();
        assert_eq!(view.deltas[&Metric::TotalSubs].value(), Some(16144.0));
        assert_eq!(view.comparison_label, "vs last week");
    }

    #[test]
    fn decreasing_metric_keeps_its_sign() {
        let table = builtin_table().unwrap();
        let view = resolve_week(&table, WEEK_5).unwrap();
        assert_eq!(view.deltas[&Metric::AvgDau].value(), Some(-263.0));
    }

    #[test]
    fn unknown_label_is_not_found() {
        let table = builtin_table().unwrap();
        let err = resolve_week(&table, "does-not-exist").unwrap_err();
        assert!(matches!(err, TableError::NotFound { .. }));
    }

    #[test]
    fn resolving_twice_gives_equal_views() {
        let table = builtin_table().unwrap();
        assert_eq!(
            resolve_week(&table, WEEK_3).unwrap(),
            resolve_week(&table, WEEK_3).unwrap()
        );
    }

    #[test]
    fn previous_week_is_positional_with_equal_values() {
        let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let table = MetricsTable::new(vec![
            week("first", start, 5.0),
            week("second", start + Duration::days(7), 5.0),
        ])
        .unwrap();
        let view = resolve_week(&table, "second").unwrap();
        assert_eq!(view.previous.unwrap().label, "first");
        assert!(view
            .deltas
            .values()
            .all(|delta| *delta == Delta::Change { value: 0.0 }));
    }
}
