use clap::Parser;
use tokio::net::TcpListener;

use flatwiki::logger::Logger;
use flatwiki::{app, AppState, Config, PageStore, TemplateService, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    let config = Config::parse();
    if let Err(e) = Logger::init(config.severity(), config.log_file.as_deref()) {
        eprintln!("Failed to initialize logger: {e}");
    }

    // The service is useless without its templates, so this is fatal
    let templates = TemplateService::load(&config.template_dir).inspect_err(|e| {
        log::error!("Cannot start without templates: {}", e);
    })?;
    let store = PageStore::new(config.data_dir.clone());
    let state = AppState::new(store, templates);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    log::info!("Wiki listening on http://{}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WikiError::from)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
