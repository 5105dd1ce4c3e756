use crate::errors::TableError;
use crate::table::MetricsTable;

const WEEKS_JSON: &str = include_str!("../data/weeks.json");

/// Loads and validates the compiled-in weekly dataset.
pub fn builtin_table() -> Result<MetricsTable, TableError> {
    MetricsTable::from_json(WEEKS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metric;

    #[test]
    fn builtin_dataset_is_valid() {
        let table = builtin_table().unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.records()[0].label, "Week 0: Dec 01 - Dec 07, 2025");
        assert_eq!(table.latest().label, "Week 7: Jan 19 - Jan 25, 2026");
    }

    #[test]
    fn builtin_dataset_keeps_top_track_and_values() {
        let table = builtin_table().unwrap();
        let week = table.get_by_label("Week 3: Dec 22 - Dec 28, 2025").unwrap();
        assert_eq!(week.top_track, "Prashanti Ke Pal");
        assert_eq!(week.value(Metric::TotalSubs), 682685.0);
        assert_eq!(week.start_date.to_string(), "2025-12-22");
        assert_eq!(week.end_date.to_string(), "2025-12-28");
    }
}
