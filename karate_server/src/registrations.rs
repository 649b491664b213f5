use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use karate_entities::domain::UserRole;
use karate_entities::queries::{self, NewRegistration, RegistrationRow};
use karate_entities::schema::player;
use sea_orm::prelude::*;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::auth::ExtractAuthenticatedUser;
use crate::periods::parse_kind;
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleRegistrationRequest {
    pub period_id: Uuid,
    pub player_id: Uuid,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListRegistrationsQuery {
    pub period_id: Option<Uuid>,
    pub coach_id: Option<Uuid>,
}

/// Registers a player into a period for the acting coach, snapshotting
/// the player's current name, birth date and belt.
pub async fn register_player_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(kind): Path<String>,
    Json(request): Json<ToggleRegistrationRequest>,
) -> Result<Json<RegistrationRow>, APIError> {
    let kind = parse_kind(&kind)?;
    if user.role(&db).await.map_err(handle_error_dyn)? != Some(UserRole::Coach) {
        return Err((StatusCode::FORBIDDEN, "Only coaches register players").into());
    }

    let period = queries::find_period(&db, kind, request.period_id)
        .await
        .map_err(handle_error)?;
    if period.is_none() {
        return Err((StatusCode::NOT_FOUND, "Period not found").into());
    }

    let player = player::Entity::find_by_id(request.player_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Player not found"))?;
    if player.coach_id != user.uuid {
        return Err((StatusCode::FORBIDDEN, "Player does not belong to the acting coach").into());
    }

    let existing = queries::find_registration(
        &db,
        kind,
        request.period_id,
        request.player_id,
        user.uuid,
    )
    .await
    .map_err(handle_error)?;
    if existing.is_some() {
        return Err((StatusCode::CONFLICT, "Player is already registered").into());
    }

    let registration = queries::insert_registration(
        &db,
        kind,
        NewRegistration {
            period_id: request.period_id,
            player_id: player.uuid,
            coach_id: user.uuid,
            player_name: player.full_name,
            birth_date: player.birth_date,
            last_belt: Some(player.belt),
        },
    )
    .await
    .map_err(handle_error)?;

    Ok(Json(registration))
}

/// Removes the registration matching (period, player, acting coach).
pub async fn unregister_player_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(kind): Path<String>,
    Json(request): Json<ToggleRegistrationRequest>,
) -> Result<(), APIError> {
    let kind = parse_kind(&kind)?;
    if user.role(&db).await.map_err(handle_error_dyn)? != Some(UserRole::Coach) {
        return Err((StatusCode::FORBIDDEN, "Only coaches register players").into());
    }

    let deleted = queries::delete_registration(
        &db,
        kind,
        request.period_id,
        request.player_id,
        user.uuid,
    )
    .await
    .map_err(handle_error)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Registration not found").into());
    }
    Ok(())
}

pub async fn list_registrations_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(kind): Path<String>,
    Query(query): Query<ListRegistrationsQuery>,
) -> Result<Json<Vec<RegistrationRow>>, APIError> {
    let kind = parse_kind(&kind)?;
    let role = user
        .role(&db)
        .await
        .map_err(handle_error_dyn)?
        .ok_or(APIError::from((StatusCode::FORBIDDEN, "Role is not authorized")))?;

    // A coach never sees rows of another coach; an admin filters freely.
    let coach_filter = match role {
        UserRole::Admin => query.coach_id,
        UserRole::Coach => {
            if query.coach_id.is_some() && query.coach_id != Some(user.uuid) {
                return Err(
                    (StatusCode::FORBIDDEN, "Coaches only see their own registrations").into(),
                );
            }
            Some(user.uuid)
        }
    };

    let registrations = queries::list_registrations(&db, kind, query.period_id, coach_filter)
        .await
        .map_err(handle_error)?;
    Ok(Json(registrations))
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/registrations/:kind",
        get(list_registrations_handler)
            .post(register_player_handler)
            .delete(unregister_player_handler),
    )
}
