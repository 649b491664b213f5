use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use karate_entities::domain::OrganizationType;
use karate_entities::schema::organization;
use sea_orm::{prelude::*, ActiveValue, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::auth::ExtractAuthenticatedUser;
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct OrganizationInput {
    pub name: String,
    pub organization_type: OrganizationType,
}

pub async fn list_organizations_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<Vec<organization::Model>>, APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let organizations = organization::Entity::find()
        .order_by_desc(organization::Column::CreatedAt)
        .all(&db)
        .await
        .map_err(handle_error)?;
    Ok(Json(organizations))
}

pub async fn create_organization_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Json(request): Json<OrganizationInput>,
) -> Result<Json<organization::Model>, APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let model = organization::ActiveModel {
        uuid: ActiveValue::Set(Uuid::new_v4()),
        name: ActiveValue::Set(request.name),
        organization_type: ActiveValue::Set(request.organization_type.as_str().to_string()),
        created_at: ActiveValue::Set(chrono::Utc::now().naive_utc()),
    };
    let organization = model.insert(&db).await.map_err(handle_error)?;
    Ok(Json(organization))
}

pub async fn update_organization_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(organization_id): Path<Uuid>,
    Json(request): Json<OrganizationInput>,
) -> Result<Json<organization::Model>, APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let existing = organization::Entity::find_by_id(organization_id)
        .one(&db)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Organization not found"))?;

    let mut model: organization::ActiveModel = existing.into();
    model.name = ActiveValue::Set(request.name);
    model.organization_type = ActiveValue::Set(request.organization_type.as_str().to_string());
    let organization = model.update(&db).await.map_err(handle_error)?;
    Ok(Json(organization))
}

/// Deletes exactly this row. Players and profiles keep their (now
/// dangling) organization reference.
pub async fn delete_organization_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(organization_id): Path<Uuid>,
) -> Result<(), APIError> {
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }

    let res = organization::Entity::delete_by_id(organization_id)
        .exec(&db)
        .await
        .map_err(handle_error)?;
    if res.rows_affected == 0 {
        return Err((StatusCode::NOT_FOUND, "Organization not found").into());
    }
    Ok(())
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations",
            get(list_organizations_handler).post(create_organization_handler),
        )
        .route(
            "/organizations/:organization_id",
            patch(update_organization_handler).delete(delete_organization_handler),
        )
}
