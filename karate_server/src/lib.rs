use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod coaches;
pub mod config;
pub mod db;
pub mod export;
pub mod organizations;
pub mod periods;
pub mod players;
pub mod registrations;
pub mod response;
pub mod session;
pub mod state;

pub use config::Config;
pub use state::AppState;

pub fn app_with_state(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(session::router())
        .merge(organizations::router())
        .merge(coaches::router())
        .merge(players::router())
        .merge(periods::router())
        .merge(registrations::router())
        .merge(export::router());
    // The admin UI is a browser client served from elsewhere.
    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn app(config: &Config) -> Router {
    let state = AppState::new(config).await;
    app_with_state(state)
}
