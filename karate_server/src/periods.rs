use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use karate_entities::domain::PeriodKind;
use karate_entities::queries::{self, Period, PeriodInput};
use sea_orm::prelude::*;
use sea_orm::DatabaseConnection;

use crate::auth::ExtractAuthenticatedUser;
use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

pub(crate) fn parse_kind(kind: &str) -> Result<PeriodKind, APIError> {
    PeriodKind::from_str(kind)
        .map_err(|_| (StatusCode::NOT_FOUND, format!("Unknown period kind {}", kind)).into())
}

pub async fn list_periods_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(kind): Path<String>,
) -> Result<Json<Vec<Period>>, APIError> {
    let kind = parse_kind(&kind)?;
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }
    let periods = queries::list_periods(&db, kind).await.map_err(handle_error)?;
    Ok(Json(periods))
}

/// The period whose date range brackets today, if any. Every
/// authenticated role may ask; coaches need it to know whether the
/// registration toggle is available.
pub async fn get_active_period_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(_user): ExtractAuthenticatedUser,
    Path(kind): Path<String>,
) -> Result<Json<Option<Period>>, APIError> {
    let kind = parse_kind(&kind)?;
    let today = chrono::Utc::now().date_naive();
    let period = queries::find_active_period(&db, kind, today).await?;
    Ok(Json(period))
}

pub async fn create_period_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path(kind): Path<String>,
    Json(request): Json<PeriodInput>,
) -> Result<Json<Period>, APIError> {
    let kind = parse_kind(&kind)?;
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }
    if request.end_date < request.start_date {
        return Err((StatusCode::BAD_REQUEST, "Period ends before it starts").into());
    }
    let period = queries::insert_period(&db, kind, request)
        .await
        .map_err(handle_error)?;
    Ok(Json(period))
}

pub async fn update_period_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path((kind, period_id)): Path<(String, Uuid)>,
    Json(request): Json<PeriodInput>,
) -> Result<Json<Period>, APIError> {
    let kind = parse_kind(&kind)?;
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }
    if request.end_date < request.start_date {
        return Err((StatusCode::BAD_REQUEST, "Period ends before it starts").into());
    }
    let period = queries::update_period(&db, kind, period_id, request)
        .await
        .map_err(handle_error)?
        .ok_or((StatusCode::NOT_FOUND, "Period not found"))?;
    Ok(Json(period))
}

pub async fn delete_period_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
    Path((kind, period_id)): Path<(String, Uuid)>,
) -> Result<(), APIError> {
    let kind = parse_kind(&kind)?;
    if !user.check_is_admin(&db).await.map_err(handle_error_dyn)? {
        return Err((StatusCode::FORBIDDEN, "Administration requires the admin role").into());
    }
    let deleted = queries::delete_period(&db, kind, period_id)
        .await
        .map_err(handle_error)?;
    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Period not found").into());
    }
    Ok(())
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/periods/:kind",
            get(list_periods_handler).post(create_period_handler),
        )
        .route("/periods/:kind/active", get(get_active_period_handler))
        .route(
            "/periods/:kind/:period_id",
            axum::routing::patch(update_period_handler).delete(delete_period_handler),
        )
}
