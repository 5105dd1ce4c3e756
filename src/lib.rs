pub mod app;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod selector;
pub mod state;
pub mod table;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use dataset::builtin_table;
pub use errors::TableError;
pub use selector::resolve_week;
pub use state::AppState;
pub use table::MetricsTable;
