use crate::errors::TableError;
use crate::table::MetricsTable;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub table: Arc<MetricsTable>,
    pub default_week: String,
}

impl AppState {
    /// Fails if a configured default week is not in the table.
    pub fn new(table: MetricsTable, default_week: Option<String>) -> Result<Self, TableError> {
        let default_week = match default_week {
            Some(label) => table.get_by_label(&label)?.label.clone(),
            None => table.latest().label.clone(),
        };

        Ok(Self {
            table: Arc::new(table),
            default_week,
        })
    }

    /// The requested week, or the default one when the request names none.
    pub fn selected_week<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.default_week)
    }
}
