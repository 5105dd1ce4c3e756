use crate::dashboard::{build_page, DashboardPage};
use crate::errors::{AppError, TableError};
use crate::models::{WeekListResponse, WeekQuery, WeekView};
use crate::selector::resolve_week;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::warn;

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Html<String>, AppError> {
    let page = dashboard_for(&state, query.week.as_deref())?;
    Ok(Html(render_index(&page)))
}

pub async fn list_weeks(State(state): State<AppState>) -> Json<WeekListResponse> {
    Json(WeekListResponse {
        weeks: state.table.list_week_labels(),
        default_week: state.default_week.clone(),
    })
}

pub async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<WeekView>, AppError> {
    Ok(Json(view_for(&state, query.week.as_deref())?))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<DashboardPage>, AppError> {
    Ok(Json(dashboard_for(&state, query.week.as_deref())?))
}

fn view_for(state: &AppState, requested: Option<&str>) -> Result<WeekView, TableError> {
    let label = state.selected_week(requested);
    resolve_week(&state.table, label).inspect_err(|err| warn!("week lookup failed: {err}"))
}

fn dashboard_for(state: &AppState, requested: Option<&str>) -> Result<DashboardPage, TableError> {
    let view = view_for(state, requested)?;
    Ok(build_page(&state.table, &view))
}
