//! Burrow server entry point.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use burrow::adapters::auth::IdentityClient;
use burrow::adapters::http::auth::AuthHandlers;
use burrow::adapters::http::catalog::CatalogHandlers;
use burrow::adapters::http::middleware::{SessionContext, SessionCookies};
use burrow::adapters::http::profile::ProfileHandlers;
use burrow::adapters::http::rental::RentalHandlers;
use burrow::adapters::http::app_router;
use burrow::adapters::postgres::{
    PostgresCategoryReader, PostgresItemReader, PostgresItemRepository, PostgresProfileReader,
    PostgresProfileRepository, PostgresRentalRequestReader, PostgresRentalRequestRepository,
    PostgresReviewReader, PostgresReviewRepository,
};
use burrow::application::handlers::catalog::{
    AddReviewHandler, BrowseItemsHandler, CreateListingHandler, GetItemHandler,
    ListMyListingsHandler, UpdateListingHandler,
};
use burrow::application::handlers::profile::{GetProfileHandler, UpdateProfileHandler};
use burrow::application::handlers::rental::{
    CancelRequestHandler, CompleteRequestHandler, CreateRequestHandler, ListRequestsHandler,
    RespondToRequestHandler,
};
use burrow::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        "Starting burrow"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let identity = Arc::new(IdentityClient::new(&config.auth));
    let item_reader = Arc::new(PostgresItemReader::new(pool.clone()));
    let item_repository = Arc::new(PostgresItemRepository::new(pool.clone()));
    let category_reader = Arc::new(PostgresCategoryReader::new(pool.clone()));
    let review_reader = Arc::new(PostgresReviewReader::new(pool.clone()));
    let review_repository = Arc::new(PostgresReviewRepository::new(pool.clone()));
    let request_reader = Arc::new(PostgresRentalRequestReader::new(pool.clone()));
    let request_repository = Arc::new(PostgresRentalRequestRepository::new(pool.clone()));
    let profile_reader = Arc::new(PostgresProfileReader::new(pool.clone()));
    let profile_repository = Arc::new(PostgresProfileRepository::new(pool));

    // Application handlers
    let catalog = CatalogHandlers::new(
        Arc::new(BrowseItemsHandler::new(
            item_reader.clone(),
            category_reader,
            review_reader.clone(),
        )),
        Arc::new(GetItemHandler::new(
            item_reader.clone(),
            review_reader,
            profile_reader.clone(),
        )),
        Arc::new(ListMyListingsHandler::new(
            item_reader,
            request_reader.clone(),
        )),
        Arc::new(CreateListingHandler::new(item_repository.clone())),
        Arc::new(UpdateListingHandler::new(item_repository.clone())),
        Arc::new(AddReviewHandler::new(item_repository.clone(), review_repository)),
    );

    let rental = RentalHandlers::new(
        Arc::new(ListRequestsHandler::new(request_reader)),
        Arc::new(CreateRequestHandler::new(
            item_repository,
            request_repository.clone(),
        )),
        Arc::new(RespondToRequestHandler::new(request_repository.clone())),
        Arc::new(CancelRequestHandler::new(request_repository.clone())),
        Arc::new(CompleteRequestHandler::new(request_repository)),
    );

    let profile = ProfileHandlers::new(
        Arc::new(GetProfileHandler::new(profile_reader)),
        Arc::new(UpdateProfileHandler::new(profile_repository)),
    );

    let cookies = SessionCookies::from_config(&config.auth, config.is_production());
    let auth = AuthHandlers::new(identity.clone(), cookies);
    let session = SessionContext::new(&config.auth, identity, config.is_production());

    let app = app_router(catalog, rental, profile, auth, session)
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config)?);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::new());
    }

    let origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
