use std::net::SocketAddr;

use karate_server::{app, config::read_config};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let config = read_config();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.logging_config))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = app(&config).await;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid host/port in config");
    tracing::info!("Listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .expect("Server failed");
}
