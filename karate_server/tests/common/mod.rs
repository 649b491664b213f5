use std::{borrow::BorrowMut, future::Future};

use axum::{
    body::Body,
    http::{request::Builder, Request},
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use http_body::{combinators::UnsyncBoxBody, Body as _};
use karate_entities::domain::UserRole;
use karate_entities::mock::{self, MockData, MockOption};
use karate_server::auth::{create_key, hash_password};
use karate_server::state::AppState;
use sea_orm::{prelude::Uuid, ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use tower::Service;

pub const ADMIN_UUID: u128 = 900_000;
pub const PASSWORD: &str = "testtest";

#[derive(Default)]
pub struct FixtureOptions {
    pub mock_default_data: bool,
    pub use_admin_account: bool,
}

pub struct Fixture {
    pub app: axum::Router,
    pub auth: Auth,
    pub mock_data: Option<MockData>,
}

#[allow(dead_code)]
pub enum Auth {
    None,
    Basic { username: String, password: String },
    Bearer { token: String },
}

pub struct APIResponse {
    response: Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>,
}

impl APIResponse {
    pub fn status(&self) -> axum::http::StatusCode {
        self.response.status()
    }

    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<String> {
        self.response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
    }

    pub async fn bytes(&mut self) -> Vec<u8> {
        let mut buf = Vec::new();
        let body = self.response.body_mut();
        while let Some(next) = body.data().await {
            buf.extend_from_slice(&next.unwrap());
        }
        buf
    }

    #[allow(dead_code)]
    pub async fn json<T: serde::de::DeserializeOwned>(&mut self) -> T {
        let buf = self.bytes().await;
        serde_json::from_slice(&buf).unwrap()
    }

    #[allow(dead_code)]
    pub async fn text(&mut self) -> String {
        String::from_utf8(self.bytes().await).unwrap()
    }
}

impl From<Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>> for APIResponse {
    fn from(response: Response<UnsyncBoxBody<axum::body::Bytes, axum::Error>>) -> Self {
        Self { response }
    }
}

impl Fixture {
    pub async fn new(options: FixtureOptions) -> Self {
        Self::new_with_setup(options, |_| async {}).await
    }

    /// Seeds organizations, coach profiles and players, plus login users
    /// for the first coach and a separate admin account. The fixture's
    /// auth is a bearer token for whichever account the options select.
    pub async fn new_with_setup<F, Fut>(options: FixtureOptions, setup_func: F) -> Self
    where
        F: FnOnce(DatabaseConnection) -> Fut,
        Fut: Future<Output = ()>,
    {
        let state = AppState::new_test_app().await;
        let mut auth = Auth::None;
        let mut mock_data = None;

        if options.mock_default_data {
            let data = mock::set_up_mock_data(
                &state.db,
                MockOption {
                    deterministic_uuids: true,
                    ..Default::default()
                },
            )
            .await
            .unwrap();

            let pwd = hash_password(PASSWORD.to_string()).unwrap();
            let coach_user = karate_entities::schema::user::Model {
                uuid: data.coach_uuids[0],
                email: "coach@example.org".to_string(),
                password_hash: pwd.clone(),
            };
            coach_user.into_active_model().insert(&state.db).await.unwrap();

            let admin_uuid = Uuid::from_u128(ADMIN_UUID);
            let admin_user = karate_entities::schema::user::Model {
                uuid: admin_uuid,
                email: "admin@example.org".to_string(),
                password_hash: pwd,
            };
            admin_user.into_active_model().insert(&state.db).await.unwrap();
            let admin_profile = karate_entities::schema::profile::Model {
                uuid: admin_uuid,
                full_name: "Admin".to_string(),
                role: UserRole::Admin.as_str().to_string(),
                organization_id: None,
                created_at: chrono::Utc::now().naive_utc(),
            };
            admin_profile
                .into_active_model()
                .insert(&state.db)
                .await
                .unwrap();

            let account_uuid = if options.use_admin_account {
                admin_uuid
            } else {
                data.coach_uuids[0]
            };
            let raw_key = account_uuid.as_u128().to_be_bytes();
            let key = create_key(&raw_key, account_uuid).unwrap();
            key.into_active_model().insert(&state.db).await.unwrap();
            auth = Auth::Bearer {
                token: general_purpose::STANDARD_NO_PAD.encode(raw_key),
            };
            mock_data = Some(data);
        }

        setup_func(state.db.clone()).await;

        Self {
            app: karate_server::app_with_state(state),
            auth,
            mock_data,
        }
    }

    #[allow(dead_code)]
    pub async fn default() -> Self {
        Self::new(FixtureOptions::default()).await
    }

    #[allow(dead_code)]
    pub fn with_auth(self, auth: Auth) -> Self {
        Self { auth, ..self }
    }

    #[allow(dead_code)]
    pub fn coach_uuid(&self, index: usize) -> Uuid {
        self.mock_data.as_ref().unwrap().coach_uuids[index]
    }

    #[allow(dead_code)]
    pub fn player_uuid(&self, coach_index: usize, player_index: usize) -> Uuid {
        let data = self.mock_data.as_ref().unwrap();
        data.players_of(3, coach_index)[player_index]
    }

    fn get_base_request(&self) -> Builder {
        let builder = Request::builder();

        match &self.auth {
            Auth::None => builder,
            Auth::Basic { username, password } => builder.header(
                "Authorization",
                format!(
                    "Basic {}",
                    general_purpose::STANDARD.encode(format!("{}:{}", username, password))
                ),
            ),
            Auth::Bearer { token } => {
                builder.header("Authorization", format!("Bearer {}", token))
            }
        }
    }

    #[allow(dead_code)]
    pub async fn get(&mut self, path: &str) -> APIResponse {
        let request = self
            .get_base_request()
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn post_json<T>(&mut self, path: &str, body: T) -> APIResponse
    where
        T: serde::Serialize,
    {
        self.send_json("POST", path, body).await
    }

    #[allow(dead_code)]
    pub async fn post_json_no_body(&mut self, path: &str) -> APIResponse {
        let request = self
            .get_base_request()
            .method("POST")
            .header("Content-Type", "application/json")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn patch_json<T>(&mut self, path: &str, body: T) -> APIResponse
    where
        T: serde::Serialize,
    {
        self.send_json("PATCH", path, body).await
    }

    #[allow(dead_code)]
    pub async fn delete(&mut self, path: &str) -> APIResponse {
        let request = self
            .get_base_request()
            .method("DELETE")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }

    #[allow(dead_code)]
    pub async fn delete_json<T>(&mut self, path: &str, body: T) -> APIResponse
    where
        T: serde::Serialize,
    {
        self.send_json("DELETE", path, body).await
    }

    async fn send_json<T>(&mut self, method: &str, path: &str, body: T) -> APIResponse
    where
        T: serde::Serialize,
    {
        let request = self
            .get_base_request()
            .method(method)
            .header("Content-Type", "application/json")
            .uri(path)
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        self.app.borrow_mut().call(request).await.unwrap().into()
    }
}
