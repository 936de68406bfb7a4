//! Trial-balance report endpoint.

use axum::{Extension, Json, extract::State};
use engine::TrialBalance;

use crate::{ServerError, server::ServerState, user};

/// Consolidated financial report across every project owned by the acting
/// builder.
pub async fn get_report(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<TrialBalance>, ServerError> {
    let report = state.engine.trial_balance(&user.username).await?;

    Ok(Json(report))
}
