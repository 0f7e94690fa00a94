use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::{header, header::HeaderMap, header::HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod graphql;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;

pub use error::{ApiError, ApiResult, ErrorResponse};

use graphql::{build_schema, InkwellSchema};
use middleware::{
    build_session_cookie, clear_session_cookie, extract_session_cookie, Session,
    SessionCookieConfig, SessionState,
};
use models::SessionRecord;
use repositories::{SessionStore, UserRepository};
use routes::{health_router, HealthState};
use services::AuthService;

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
///
/// Credentials are always allowed for configured origins; the session
/// cookie has to travel with cross-origin GraphQL requests.
fn build_cors_layer(config: &config::Config) -> CorsLayer {
    let is_production = config.is_production();

    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            // Parse configured origins
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                    .allow_credentials(true)
                    .max_age(std::time::Duration::from_secs(3600))
            }
        }
        _ if is_production => {
            // Production without configured origins: strict CORS (no origins allowed)
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            // Development without configured origins: permissive for convenience
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// Restore the session named by the client's cookie
///
/// A missing cookie, an unknown or expired token, and a store failure all
/// yield an anonymous session; the failure is logged, never fatal.
async fn restore_session(
    headers: &HeaderMap,
    session_store: &SessionStore,
    cookie_name: &str,
) -> Session {
    let Some(token) = extract_session_cookie(headers, cookie_name) else {
        return Session::anonymous();
    };

    match session_store.load(&token).await {
        Ok(Some(record)) => Session::restored(token, record.user_id),
        Ok(None) => Session::anonymous(),
        Err(e) => {
            tracing::warn!(error = %e, "Session load failed, treating request as anonymous");
            Session::anonymous()
        }
    }
}

/// Persist session changes made during execution and emit cookie headers
///
/// A dirty session is written back with a fresh TTL (issuing a token and
/// cookie if the client had none); a destroyed session only needs its
/// cookie cleared, the resolver already removed the record.
async fn commit_session(
    response: &mut Response,
    session: &Session,
    session_store: &SessionStore,
    cookie_config: &SessionCookieConfig,
) {
    let cookie = match session.state() {
        SessionState::Clean => return,
        SessionState::Dirty => {
            let token = session.token_or_generate();
            let record = SessionRecord {
                user_id: session.user_id(),
            };
            if let Err(e) = session_store.save(&token, &record).await {
                tracing::error!(error = %e, "Failed to persist session record");
            }
            build_session_cookie(
                &cookie_config.name,
                &token,
                cookie_config.ttl_secs,
                cookie_config.secure,
            )
        }
        SessionState::Destroyed => clear_session_cookie(&cookie_config.name, cookie_config.secure),
    };

    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => {
            tracing::error!(error = %e, "Session cookie is not a valid header value");
        }
    }
}

/// GraphQL handler that executes queries against the schema
///
/// This handler restores the session addressed by the client's session
/// cookie and injects it into the GraphQL context, so queries like
/// `currentUser` and mutations like `login` and `logout` can read and
/// mutate the session. After execution, session changes are written back
/// to the store and surfaced to the client as Set-Cookie headers.
async fn graphql_handler(
    Extension(schema): Extension<InkwellSchema>,
    Extension(session_store): Extension<SessionStore>,
    Extension(cookie_config): Extension<SessionCookieConfig>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> Response {
    let session = restore_session(&headers, &session_store, &cookie_config.name).await;

    let request = req.into_inner().data(session.clone());
    let gql_response = schema.execute(request).await;

    let mut response = GraphQLResponse::from(gql_response).into_response();
    commit_session(&mut response, &session, &session_store, &cookie_config).await;

    response
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkwell_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting Inkwell API server on port {}", config.port);

    // Initialize database pool
    let database_url = &config.common.database.url;
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(config.common.database.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.common.database.connect_timeout_secs,
        ))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations completed successfully");

    // Create UserRepository for centralized user database operations
    let user_repo = UserRepository::new(pool.clone());
    tracing::info!("UserRepository initialized");

    // Create AuthService
    let auth_service = AuthService::new(user_repo);
    tracing::info!("AuthService initialized");

    // Initialize the Redis client backing the session store
    let redis_url = config.common.redis.connection_url();
    let redis_client = redis::Client::open(redis_url.as_str())?;

    // Test the connection; sessions are unusable without Redis, but the
    // server still starts so health checks can report the outage
    match redis_client.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let pong: Result<String, _> = redis::cmd("PING").query_async(&mut conn).await;
            if pong.is_ok() {
                tracing::info!("Redis connected for session storage");
            } else {
                tracing::warn!("Redis ping failed, sessions will not work until it recovers");
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Redis connection failed, sessions will not work until it recovers");
        }
    }

    let session_store = SessionStore::new(redis_client, config.session_ttl_secs);
    tracing::info!("SessionStore initialized (TTL {}s)", config.session_ttl_secs);

    // Build GraphQL schema
    let schema = build_schema(pool.clone(), auth_service, session_store.clone());
    tracing::info!("GraphQL schema built");

    // Create health check state
    let health_state = HealthState::new(pool.clone(), session_store.clone());

    // Session cookie settings shared by all handlers
    let cookie_config = SessionCookieConfig {
        name: config.session_cookie_name.clone(),
        ttl_secs: config.session_ttl_secs,
        secure: config.is_production(),
    };

    // Build the CORS layer from configuration
    let cors_layer = build_cors_layer(&config);

    // Build the router
    let app = Router::new()
        .route("/", get(root))
        // GraphQL endpoints
        .route("/graphql", post(graphql_handler))
        .route("/graphql/playground", get(graphql_playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(health_state))
        // Add services as extensions for the GraphQL handler
        .layer(Extension(schema))
        .layer(Extension(session_store))
        .layer(Extension(cookie_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        "GraphQL Playground available at http://{}:{}/graphql/playground",
        addr.ip(),
        addr.port()
    );

    axum::serve(listener, app).await?;

    Ok(())
}

async fn root() -> &'static str {
    "Welcome to Inkwell - Blogging for humans"
}
