use std::error::Error;
use std::str::FromStr;

use argon2::Argon2;
use axum::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::headers::authorization::{Basic, Bearer};
use axum::headers::Authorization;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router, TypedHeader};
use base64::Engine;
use hyper::http::request::Parts;
use karate_entities::domain::UserRole;
use karate_entities::schema::{profile, user, user_access_key};
use rand::{thread_rng, Rng};
use sea_orm::{prelude::*, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use crate::response::{handle_error, handle_error_dyn, APIError};
use crate::state::AppState;

use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

#[derive(Debug)]
pub struct AuthenticatedUser {
    pub uuid: Uuid,
}

impl AuthenticatedUser {
    pub async fn profile<C>(&self, db: &C) -> Result<Option<profile::Model>, Box<dyn Error>>
    where
        C: ConnectionTrait,
    {
        Ok(profile::Entity::find_by_id(self.uuid).one(db).await?)
    }

    /// The caller's role, or None when there is no profile or the stored
    /// role string is not one of the known roles.
    pub async fn role<C>(&self, db: &C) -> Result<Option<UserRole>, Box<dyn Error>>
    where
        C: ConnectionTrait,
    {
        let profile = self.profile(db).await?;
        Ok(profile.and_then(|p| UserRole::from_str(&p.role).ok()))
    }

    pub async fn check_is_admin<C>(&self, db: &C) -> Result<bool, Box<dyn Error>>
    where
        C: ConnectionTrait,
    {
        Ok(self.role(db).await? == Some(UserRole::Admin))
    }

}

pub struct ExtractAuthenticatedUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<AppState> for ExtractAuthenticatedUser {
    type Rejection = APIError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let basic_header = TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state).await;

        if let Ok(basic_header) = basic_header {
            let decoded = basic_header.0;
            let user_name = decoded.username();
            let password = decoded.password();

            // The login identity is the email; uuids are accepted too so
            // tests and scripts can avoid the email lookup.
            let user = match Uuid::from_str(user_name) {
                Ok(user_uuid) => user::Entity::find_by_id(user_uuid)
                    .one(&state.db)
                    .await
                    .map_err(handle_error)?,
                Err(_) => user::Entity::find()
                    .filter(user::Column::Email.eq(user_name))
                    .one(&state.db)
                    .await
                    .map_err(handle_error)?,
            };

            let user = user.ok_or((StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            let password_hash = PasswordHash::new(&user.password_hash)
                .map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;
            let algs: &[&dyn PasswordVerifier] = &[&Argon2::default()];

            password_hash
                .verify_password(algs, password)
                .map_err(|_| (StatusCode::UNAUTHORIZED, "User not found or password incorrect"))?;

            Ok(ExtractAuthenticatedUser(AuthenticatedUser { uuid: user.uuid }))
        } else {
            let TypedHeader(bearer_header) =
                TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                    .await
                    .map_err(|_| (StatusCode::UNAUTHORIZED, "No valid authorization header found"))?;
            let key = base64::engine::general_purpose::STANDARD_NO_PAD
                .decode(bearer_header.0.token())
                .map_err(|_| (StatusCode::UNAUTHORIZED, "No valid authorization header found"))?;
            let hashed_key = hash_key(&key)
                .map_err(|_| APIError::from((StatusCode::UNAUTHORIZED, "No valid authorization header found")))?;

            let key = user_access_key::Entity::find_by_id(hashed_key)
                .one(&state.db)
                .await
                .map_err(handle_error)?;

            let key = key.ok_or((StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;

            Ok(ExtractAuthenticatedUser(AuthenticatedUser { uuid: key.user_id }))
        }
    }
}

pub fn hash_password(pwd: String) -> Result<String, Box<dyn Error>> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let pwd = Argon2::default().hash_password(pwd.as_bytes(), &salt);

    Ok(pwd?.to_string())
}

// Access keys are high-entropy, so a fixed salt is enough to make the
// stored hash a lookup key.
fn hash_key(key: &[u8]) -> Result<String, password_hash::Error> {
    let salt = SaltString::from_b64("bXlzYWx0bXlzYWx0")?;
    Ok(Argon2::default().hash_password(key, &salt)?.to_string())
}

pub fn create_key(key: &[u8], user_id: Uuid) -> Result<user_access_key::Model, Box<dyn Error>> {
    Ok(user_access_key::Model {
        key_hash: hash_key(key)?,
        user_id,
    })
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetTokenResponse {
    pub token: String,
}

/// Sign-in: authenticate (normally with Basic email:password) and mint a
/// bearer access key.
pub async fn create_token_handler(
    State(db): State<DatabaseConnection>,
    ExtractAuthenticatedUser(user): ExtractAuthenticatedUser,
) -> Result<Json<GetTokenResponse>, APIError> {
    let key: [u8; 32] = thread_rng().gen::<[u8; 32]>();

    let token = create_key(&key, user.uuid).map_err(handle_error_dyn)?;
    token.into_active_model().insert(&db).await.map_err(handle_error)?;

    Ok(GetTokenResponse {
        token: base64::engine::general_purpose::STANDARD_NO_PAD.encode(key),
    }
    .into())
}

/// Sign-out: revoke the presented bearer key.
pub async fn revoke_token_handler(
    State(db): State<DatabaseConnection>,
    TypedHeader(bearer_header): TypedHeader<Authorization<Bearer>>,
) -> Result<(), APIError> {
    let key = base64::engine::general_purpose::STANDARD_NO_PAD
        .decode(bearer_header.0.token())
        .map_err(|_| (StatusCode::UNAUTHORIZED, "Bearer token invalid"))?;
    let hashed_key = hash_key(&key)
        .map_err(|_| APIError::from((StatusCode::UNAUTHORIZED, "Bearer token invalid")))?;

    user_access_key::Entity::delete_by_id(hashed_key)
        .exec(&db)
        .await
        .map_err(handle_error)?;

    Ok(())
}

pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/tokens",
        post(create_token_handler).delete(revoke_token_handler),
    )
}
