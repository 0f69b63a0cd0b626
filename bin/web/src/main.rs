#[cfg(feature = "serve")]
#[tokio::main]
async fn main() {
    use axum::{Router, routing::get};
    use groupdesk_web::config::ServeConfig;
    use tower_http::services::{ServeDir, ServeFile};
    use tower_http::trace::TraceLayer;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServeConfig::from_env().expect("failed to load configuration");
    tracing::info!(site_root = %config.site_root.display(), "Loaded configuration");

    // Unknown paths fall back to index.html so client-side routes resolve.
    let site = ServeDir::new(&config.site_root).fallback(ServeFile::new(config.index_file()));

    let app = Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .fallback_service(site)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.addr);

    axum::serve(listener, app).await.expect("server error");
}

#[cfg(all(feature = "csr", not(feature = "serve")))]
fn main() {
    groupdesk_web::mount();
}

#[cfg(not(any(feature = "csr", feature = "serve")))]
fn main() {
    // Build with `csr` for the browser bundle or `serve` for the file server.
}
