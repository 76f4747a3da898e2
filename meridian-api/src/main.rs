use meridian_api::{config::read_config, router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian_api=debug,tower_http=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = read_config().expect("Failed to read configuration");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(config.database.with_db())
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );
    let listener = TcpListener::bind(&address)
        .await
        .expect("Failed to bind address");
    tracing::info!("listening on {address}");

    let app = router::create(pool, config);
    axum::serve(listener, app).await.expect("Server error");
}
