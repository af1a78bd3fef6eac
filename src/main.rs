use library_app::{
    adapters::{
        memory::{InMemoryBookStore, InMemoryLoanHistoryStore},
        postgres::{PostgresBookStore, PostgresLoanHistoryStore},
    },
    api::{handlers::AppState, router::create_router},
    application::book::ServiceDependencies,
    config::AppConfig,
    ports::{BookStore, LoanHistoryStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_app=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Initialize adapters
    let (book_store, loan_history_store) = match &config.database_url {
        Some(database_url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(config.db_acquire_timeout)
                .connect(database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run migrations");

            tracing::info!(
                max_connections = config.db_max_connections,
                "Using PostgreSQL stores"
            );
            (
                Arc::new(PostgresBookStore::new(pool.clone())) as Arc<dyn BookStore>,
                Arc::new(PostgresLoanHistoryStore::new(pool)) as Arc<dyn LoanHistoryStore>,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, using in-memory stores");
            (
                Arc::new(InMemoryBookStore::new()) as Arc<dyn BookStore>,
                Arc::new(InMemoryLoanHistoryStore::new()) as Arc<dyn LoanHistoryStore>,
            )
        }
    };

    // Create application state
    let app_state = Arc::new(AppState {
        service_deps: ServiceDependencies {
            book_store,
            loan_history_store,
        },
    });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
