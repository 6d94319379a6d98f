//! Family member listing endpoint

use axum::{Json, Router, extract::State, routing::get};

use famboard_core::household::{FamilyMember, HouseholdStore};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/members", get(list_members))
}

/// GET /members - List the configured family members
///
/// Read-only: the presentation layer needs names and colors for the
/// legend, but nothing is ever written back through this server.
async fn list_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<FamilyMember>>, AppError> {
    let members = state.planner().store().family_members()?;
    Ok(Json(members))
}
