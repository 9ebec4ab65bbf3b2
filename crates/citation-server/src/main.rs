//! Citation Ledger Server Binary
//!
//! Runs the HTTP server for the citation lifecycle service.

use std::env;
use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use citation_auth::TokenSigner;
use citation_server::{
    create_router, storage, AppState, CitationStore, MemoryStore, ServerConfig,
};

#[tokio::main]
async fn main() {
    // Initialize logging
    let log_level = env::var("CITATION_LOG_LEVEL")
        .unwrap_or_else(|_| "info".into())
        .parse()
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    // Configuration
    let port: u16 = env::var("CITATION_PORT")
        .unwrap_or_else(|_| "8080".into())
        .parse()
        .expect("CITATION_PORT must be a valid port number");

    let owner_email_domain =
        env::var("CITATION_OWNER_DOMAIN").unwrap_or_else(|_| "traffic.example".into());

    let token_secret = match env::var("CITATION_TOKEN_SECRET") {
        Ok(secret) => secret.into_bytes(),
        Err(_) => {
            warn!("CITATION_TOKEN_SECRET not set; using an ephemeral signing secret, tokens will not survive a restart");
            rand::thread_rng().gen::<[u8; 32]>().to_vec()
        }
    };

    // Initialize storage
    let store = build_store().await;

    storage::seed_reference_data(store.as_ref())
        .await
        .expect("Failed to seed reference data");

    let config = ServerConfig {
        owner_email_domain: owner_email_domain.clone(),
    };

    info!(owner_domain = %owner_email_domain, port = port, "Starting citation ledger server");

    // Create application state
    let state = Arc::new(AppState {
        store,
        tokens: TokenSigner::new(&token_secret),
        config,
    });

    // Build router
    let app = create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!(addr = %addr, "Citation ledger listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}

/// Pick the storage backend: PostgreSQL when compiled with the `postgres`
/// feature and `CITATION_DATABASE_URL` is set, in-memory otherwise.
async fn build_store() -> Arc<dyn CitationStore> {
    #[cfg(feature = "postgres")]
    {
        if let Ok(url) = env::var("CITATION_DATABASE_URL") {
            let store = citation_server::PostgresStore::new(&url)
                .await
                .expect("Failed to connect to PostgreSQL");
            return Arc::new(store);
        }
    }

    Arc::new(MemoryStore::new())
}
