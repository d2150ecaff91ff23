use academy_api::config::AppConfig;
use academy_api::{app, database, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, ACADEMY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Academy API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .unwrap_or_else(|e| panic!("failed to connect database: {}", e));

    let app = app(AppState::new(pool, config));

    // Allow tests or deployments to override port via env
    let port = std::env::var("ACADEMY_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Academy API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
