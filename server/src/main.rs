#![recursion_limit = "256"]

mod config;
mod routes;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::PortalConfig::from_env().expect("invalid portal configuration");
    let app = routes::leptos_app().expect("leptos configuration failed");

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .expect("failed to bind");

    tracing::info!(addr = %config.addr(), "krishi portal listening");
    axum::serve(listener, app).await.expect("server failed");
}
