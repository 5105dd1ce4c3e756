use crate::errors::TableError;
use crate::models::{Metric, WeekRecord};
use chrono::Duration;
use std::collections::HashMap;

/// The fixed, chronologically ordered list of weekly records.
///
/// Built once and never mutated. Order is significant: the week before a
/// record is the one at the preceding index.
#[derive(Debug, Clone)]
pub struct MetricsTable {
    records: Vec<WeekRecord>,
    index: HashMap<String, usize>,
}

impl MetricsTable {
    pub fn new(records: Vec<WeekRecord>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::Empty);
        }

        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            validate_record(record)?;
            if index.insert(record.label.clone(), position).is_some() {
                return Err(TableError::DuplicateLabel {
                    label: record.label.clone(),
                });
            }
        }

        for pair in records.windows(2) {
            let expected = pair[0].end_date + Duration::days(1);
            if pair[1].start_date != expected {
                return Err(TableError::NonContiguous {
                    label: pair[1].label.clone(),
                    start: pair[1].start_date,
                    expected,
                });
            }
        }

        Ok(Self { records, index })
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let records: Vec<WeekRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Labels in table order, for populating a week selector.
    pub fn list_week_labels(&self) -> Vec<String> {
        self.records.iter().map(|record| record.label.clone()).collect()
    }

    pub fn get_by_label(&self, label: &str) -> Result<&WeekRecord, TableError> {
        self.index_of(label).map(|position| &self.records[position])
    }

    pub fn index_of(&self, label: &str) -> Result<usize, TableError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| TableError::not_found(label))
    }

    pub fn records(&self) -> &[WeekRecord] {
        &self.records
    }

    pub fn get(&self, position: usize) -> Option<&WeekRecord> {
        self.records.get(position)
    }

    pub fn latest(&self) -> &WeekRecord {
        // `new` rejects empty tables.
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_record(record: &WeekRecord) -> Result<(), TableError> {
    if record.start_date > record.end_date {
        return Err(TableError::InvertedRange {
            label: record.label.clone(),
            start: record.start_date,
            end: record.end_date,
        });
    }

    for metric in Metric::ALL {
        let Some(&value) = record.metrics.get(&metric) else {
            return Err(TableError::MissingMetric {
                label: record.label.clone(),
                metric: metric.name(),
            });
        };
        if !value.is_finite() || value < 0.0 {
            return Err(TableError::InvalidValue {
                label: record.label.clone(),
                metric: metric.name(),
                value,
            });
        }
    }

    Ok(())
}
