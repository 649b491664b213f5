use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::NaiveDate;
use karate_entities::domain::{Belt, UserRole};
use karate_entities::queries;
use karate_entities::schema::player;
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthenticatedUser, ExtractAuthenticatedUser};
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerInput {
    pub full_name: String,
    pub belt: Belt,
    pub birth_date: Option<NaiveDate>,
    pub file_number: Option<i32>,
    pub coach_id: Uuid,
    pub organization_id: Option<Uuid>,
}

async fn require_role(
    db: &DatabaseConnection,
    user: &AuthenticatedUser,
) -> Result<UserRole, APIError> {
    user.role(db)
        .await
        .map_err(handle_error_dyn)?
        .ok_or((StatusCode::FORBIDDEN, "Role is not authorized").into())
}

/// Admin sees all players, a coach exactly their own roster.
pub async fn list_players_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<Vec<player::Model>>, APIError> {
    let role = require_role(&db, &user).await?;
    let players = queries::visible_players(&db, role, user.uuid)
        .await
        .map_err(handle_error)?;
    Ok(Json(players))
}

pub async fn create_player_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Json(request): Json<PlayerInput>,
) -> Result<Json<player::Model>, APIError> {
    let role = require_role(&db, &user).await?;
    // A coach can only create players bound to their own identifier.
    if role == UserRole::Coach && request.coach_id != user.uuid {
        return Err((StatusCode::FORBIDDEN, "Players must belong to the acting coach").into());
    }

    let model = player::ActiveModel {
        uuid: ActiveValue::Set(Uuid::new_v4()),
        full_name: ActiveValue::Set(request.full_name),
        belt: ActiveValue::Set(request.belt.as_str().to_string()),
        birth_date: ActiveValue::Set(request.birth_date),
        file_number: ActiveValue::Set(request.file_number),
        coach_id: ActiveValue::Set(request.coach_id),
        organization_id: ActiveValue::Set(request.organization_id),
        created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
    };
    let player = model.insert(&db).await.map_err(handle_error)?;
    Ok(Json(player))
}

pub async fn update_player_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(player_id): Path<Uuid>,
    Json(request): Json<PlayerInput>,
) -> Result<Json<player::Model>, APIError> {
    let role = require_role(&db, &user).await?;

    let existing = player::Entity::find_by_id(player_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Player not found"))?;

    if role == UserRole::Coach && (existing.coach_id != user.uuid || request.coach_id != user.uuid)
    {
        return Err((StatusCode::FORBIDDEN, "Players must belong to the acting coach").into());
    }

    let mut model: player::ActiveModel = existing.into();
    model.full_name = ActiveValue::Set(request.full_name);
    model.belt = ActiveValue::Set(request.belt.as_str().to_string());
    model.birth_date = ActiveValue::Set(request.birth_date);
    model.file_number = ActiveValue::Set(request.file_number);
    model.coach_id = ActiveValue::Set(request.coach_id);
    model.organization_id = ActiveValue::Set(request.organization_id);
    let player = model.update(&db).await.map_err(handle_error)?;
    Ok(Json(player))
}

pub async fn delete_player_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(player_id): Path<Uuid>,
) -> Result<(), APIError> {
    let role = require_role(&db, &user).await?;

    let existing = player::Entity::find_by_id(player_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Player not found"))?;

    if role == UserRole::Coach && existing.coach_id != user.uuid {
        return Err((StatusCode::FORBIDDEN, "Players must belong to the acting coach").into());
    }

    player::Entity::delete_by_id(player_id)
        .exec(&db)
        .await
        .map_err(handle_error)?;
    Ok(())
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players_handler).post(create_player_handler))
        .route(
            "/players/:player_id",
            patch(update_player_handler).delete(delete_player_handler),
        )
}
