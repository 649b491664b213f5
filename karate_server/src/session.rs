use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use karate_entities::domain::UserRole;
use karate_entities::schema::{organization, player};
use karate_entities::queries;
use sea_orm::prelude::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::auth::ExtractAuthenticatedUser;
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub uuid: Uuid,
    pub full_name: String,
    pub role: UserRole,
    pub organization: Option<organization::Model>,
    pub players: Vec<player::Model>,
}

/// The page-load fetch: resolve the caller's role, then the players
/// visible to that role. Anything without a known role gets a 403 before
/// any player query runs.
pub async fn get_session_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<SessionResponse>, APIError> {
    let profile = user
        .profile(&db)
        .await
        .map_err(handle_error_dyn)?
        .ok_or((StatusCode::FORBIDDEN, "No profile for this user"))?;

    let role = UserRole::from_str(&profile.role)
        .map_err(|_| (StatusCode::FORBIDDEN, "Role is not authorized"))?;

    let organization = match profile.organization_id {
        Some(organization_id) => organization::Entity::find_by_id(organization_id)
            .one(&db)
            .await
            .map_err(handle_error)?,
        None => None,
    };

    let players = queries::visible_players(&db, role, user.uuid)
        .await
        .map_err(handle_error)?;

    Ok(Json(SessionResponse {
        uuid: profile.uuid,
        full_name: profile.full_name,
        role,
        organization,
        players,
    }))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/session", get(get_session_handler))
}
