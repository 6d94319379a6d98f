//! Weekly view endpoint

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use famboard_core::DayEvents;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/week", get(get_week))
}

#[derive(Deserialize)]
pub struct WeekQuery {
    /// Reference date (YYYY-MM-DD); defaults to today.
    pub date: Option<NaiveDate>,
}

/// GET /week - The seven days of the week containing `date`
async fn get_week(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Vec<DayEvents>>, AppError> {
    let days = state.planner().week(query.date).await?;
    Ok(Json(days))
}
