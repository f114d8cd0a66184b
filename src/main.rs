use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use knowall_site::cli::{
    commands::{Cli, Commands},
    run_cli,
};
use knowall_site::config::AppConfig;
use knowall_site::llm::ProviderFactory;
use knowall_site::store::{FileTranscriptStore, TranscriptStore};
use std::sync::Arc;
use tracing::{error, info};

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

async fn index() -> impl Responder {
    let html = include_str!("../static/index.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

async fn admin_logs_page() -> impl Responder {
    let html = include_str!("../static/admin.html");
    HttpResponse::Ok().content_type("text/html").body(html)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if !matches!(cli.command, Commands::Serve) {
        run_cli(cli.command, cli.config).await;
        return Ok(());
    }

    info!("Starting KnowAll.ai site server...");

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn TranscriptStore> =
        Arc::new(FileTranscriptStore::new(config.storage.path.clone()));

    let provider = match ProviderFactory::create_default(&config) {
        Some(p) => p,
        None => {
            error!("Failed to initialize LLM provider from config.yaml mapping");
            std::process::exit(1);
        }
    };

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(provider.clone()))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(knowall_site::api::routes::json_error_handler),
            )
            .route("/", web::get().to(index))
            .route("/admin/logs", web::get().to(admin_logs_page))
            .route("/health", web::get().to(health))
            .configure(knowall_site::api::routes::configure)
            .configure(knowall_site::api::logs::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
