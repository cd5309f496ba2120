use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use storage::{Database, repository::user::UserRepository};
use tower_http::cors::{AllowOrigin, CorsLayer};

use matchday_web::config::Config;
use matchday_web::session::create_session_layer;

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600));

    let Some(origins) = &config.cors_origins else {
        return Ok(layer.allow_origin(AllowOrigin::mirror_request()).allow_credentials(true));
    };

    let origins = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect::<Result<Vec<_>, _>>()
        .context("CORS_ORIGIN must be a comma-separated list of origins")?;

    Ok(layer.allow_origin(origins).allow_credentials(true))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Matchday API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = match &config.database_url {
        Some(database_url) => {
            tracing::info!(
                "Connecting to database at: {}",
                database_url.split('@').next_back().unwrap_or("unknown")
            );
            let db = Database::new(database_url)
                .await
                .context("Failed to initialize database")?;
            tracing::info!("Database connection established");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");
            Database::in_memory()
        }
    };

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    if let Some(admin) = &config.admin {
        UserRepository::new(db.store())
            .ensure_admin(&admin.email, &admin.password)
            .await
            .context("Failed to seed the admin account")?;
    }

    let app = matchday_web::app(db, create_session_layer(config.session_secure))
        .layer(cors_layer(&config)?);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
