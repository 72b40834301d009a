use stockboard_server::{api::app_router, build_state, config::Config, init_tracing};
use tower_http::services::{ServeDir, ServeFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(&config).await?;

    let mut router = app_router(state, &config);
    if let Some(static_dir) = &config.static_dir {
        let static_dir = std::path::PathBuf::from(static_dir);
        let index_file = static_dir.join("index.html");
        router = router
            .fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index_file)));
    }

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
