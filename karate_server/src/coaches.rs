use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use itertools::Itertools;
use karate_entities::domain::UserRole;
use karate_entities::schema::{organization, profile, user};
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, QueryOrder, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, ExtractAuthenticatedUser};
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CoachSummary {
    pub uuid: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub organization: Option<organization::Model>,
    pub created_at: DateTime,
}

/// Coach creation provisions a login identity along with the profile row,
/// which is why it is not a plain table insert.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCoachRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub organization_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCoachResponse {
    pub success: bool,
    pub uuid: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCoachRequest {
    pub full_name: String,
    pub organization_id: Option<Uuid>,
}

pub async fn list_coaches_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<Vec<CoachSummary>>, APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let coaches = profile::Entity::find()
        .filter(profile::Column::Role.eq(UserRole::Coach.as_str()))
        .find_also_related(organization::Entity)
        .order_by_desc(profile::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(handle_error)?;

    let coach_ids = coaches.iter().map(|(p, _)| p.uuid).collect_vec();
    let emails: HashMap<Uuid, String> = user::Entity::find()
        .filter(user::Column::Uuid.is_in(coach_ids))
        .all(&db)
        .await
        .map_err(handle_error)?
        .into_iter()
        .map(|u| (u.uuid, u.email))
        .collect();

    let out = coaches
        .into_iter()
        .map(|(profile, organization)| CoachSummary {
            email: emails.get(&profile.uuid).cloned(),
            uuid: profile.uuid,
            full_name: profile.full_name,
            organization,
            created_at: profile.created_at,
        })
        .collect_vec();
    Ok(Json(out))
}

pub async fn create_coach_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Json(request): Json<CreateCoachRequest>,
) -> Result<Json<CreateCoachResponse>, APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }
    if request.email.is_empty() || request.password.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Email and password are required").into());
    }

    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.clone()))
        .one(&db)
        .await
        .map_err(handle_error)?;
    if existing.is_some() {
        return Err((StatusCode::CONFLICT, "A user with this email already exists").into());
    }

    let new_uuid = Uuid::new_v4();
    let password_hash = hash_password(request.password).map_err(handle_error_dyn)?;

    let transaction = db.begin().await.map_err(handle_error)?;
    user::ActiveModel {
        uuid: ActiveValue::Set(new_uuid),
        email: ActiveValue::Set(request.email),
        password_hash: ActiveValue::Set(password_hash),
    }
    .insert(&transaction)
    .await
    .map_err(handle_error)?;
    profile::ActiveModel {
        uuid: ActiveValue::Set(new_uuid),
        full_name: ActiveValue::Set(request.full_name),
        role: ActiveValue::Set(UserRole::Coach.as_str().to_string()),
        organization_id: ActiveValue::Set(request.organization_id),
        created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
    }
    .insert(&transaction)
    .await
    .map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;

    Ok(Json(CreateCoachResponse {
        success: true,
        uuid: new_uuid,
    }))
}

pub async fn update_coach_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(coach_id): Path<Uuid>,
    Json(request): Json<UpdateCoachRequest>,
) -> Result<Json<profile::Model>, APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let existing = profile::Entity::find_by_id(coach_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Coach not found"))?;

    let mut model: profile::ActiveModel = existing.into();
    model.full_name = ActiveValue::Set(request.full_name);
    model.organization_id = ActiveValue::Set(request.organization_id);
    let profile = model.update(&db).await.map_err(handle_error)?;
    Ok(Json(profile))
}

/// Removes the coach profile and its login user. Players referencing the
/// coach are left untouched.
pub async fn delete_coach_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(coach_id): Path<Uuid>,
) -> Result<(), APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let transaction = db.begin().await.map_err(handle_error)?;
    let res = profile::Entity::delete_by_id(coach_id)
        .exec(&transaction)
        .await
        .map_err(handle_error)?;
    if res.rows_affected == 0 {
        transaction.rollback().await.map_err(handle_error)?;
        return Err((StatusCode::NOT_FOUND, "Coach not found").into());
    }
    // Access keys cascade via the user foreign key.
    user::Entity::delete_by_id(coach_id)
        .exec(&transaction)
        .await
        .map_err(handle_error)?;
    transaction.commit().await.map_err(handle_error)?;
    Ok(())
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/coaches",
            get(list_coaches_handler).post(create_coach_handler),
        )
        .route(
            "/coaches/:coach_id",
            patch(update_coach_handler).delete(delete_coach_handler),
        )
}
