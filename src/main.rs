//! QA Dashboard Server - Main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{App, HttpRequest, HttpServer, Result as ActixResult, http::header, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use qa_dashboard_lib::api::{self, ApiDoc};
use qa_dashboard_lib::config::Config;
use qa_dashboard_lib::middleware::RequestLogger;
use qa_dashboard_lib::services::{
    DemoHistory, EventBroadcaster, ProjectStore, RunOrchestrator, SessionStore,
    SimulatedExecutor, seed_demo_projects,
};

/// Static directory handed to the SPA fallback.
#[derive(Clone)]
struct StaticDir(PathBuf);

/// SPA fallback - serves index.html for client-side routing.
async fn spa_fallback(req: HttpRequest) -> ActixResult<NamedFile> {
    let dir = req
        .app_data::<web::Data<StaticDir>>()
        .ok_or_else(|| actix_web::error::ErrorNotFound("static files not configured"))?;
    Ok(NamedFile::open(dir.0.join("index.html"))?)
}

/// Perform health check (for Docker healthcheck).
fn health_check() -> bool {
    Config::from_env().is_ok()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    // Check for --health-check flag (used by Docker HEALTHCHECK)
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(if health_check() { 0 } else { 1 });
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, QAD_SESSION_FILE must be set");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  QA Dashboard Server");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Session flags
    let session = match &config.session_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            SessionStore::open(path.clone(), config.default_language)
                .await
                .map_err(std::io::Error::other)?
        }
        None => {
            info!("No session file configured, session flags are kept in memory");
            SessionStore::in_memory(config.default_language)
        }
    };

    // In-memory state and run orchestration
    let broadcaster = EventBroadcaster::new();
    let store = ProjectStore::new(broadcaster.clone());

    if config.seed_demo {
        seed_demo_projects(&store)
            .await
            .map_err(std::io::Error::other)?;
    }

    let project_names: Vec<String> = store
        .list_projects()
        .await
        .into_iter()
        .map(|p| p.name)
        .collect();
    let history = DemoHistory::generate(&project_names);
    info!(runs = history.runs().len(), "Generated demo run history");

    let orchestrator = RunOrchestrator::new(
        store.clone(),
        Arc::new(SimulatedExecutor::new()),
        broadcaster.clone(),
    );

    let bind_address = config.bind_address();
    let static_dir = config.static_dir.clone();
    let is_development = config.is_development();

    let session = web::Data::new(session);
    let store = web::Data::new(store);
    let orchestrator = web::Data::new(orchestrator);
    let history = web::Data::new(history);
    let broadcaster = web::Data::new(broadcaster);

    if static_dir.is_some() {
        info!("Static file serving enabled from {:?}", static_dir);
    }

    let worker_count = if is_development {
        info!(
            "Starting server at http://{} (4 workers - development mode)",
            bind_address
        );
        4
    } else {
        let cpus = num_cpus::get();
        info!(
            "Starting server at http://{} ({} workers)",
            bind_address, cpus
        );
        cpus
    };

    let server = HttpServer::new(move || {
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_origin("http://localhost:5173")
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .expose_headers(vec![header::CONTENT_DISPOSITION])
                .max_age(3600)
        } else {
            // Same-origin only
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
                .max_age(3600)
        };

        let mut app = App::new()
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(session.clone())
            .app_data(store.clone())
            .app_data(orchestrator.clone())
            .app_data(history.clone())
            .app_data(broadcaster.clone())
            .service(web::scope("/api/v1").configure(api::configure_api))
            .configure(api::configure_websocket_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );

        if let Some(ref dir) = static_dir {
            app = app
                .app_data(web::Data::new(StaticDir(dir.clone())))
                .service(Files::new("/assets", dir.join("assets")).prefer_utf8(true))
                .service(Files::new("/favicon", dir.clone()).index_file("favicon.ico"))
                .default_service(web::route().to(spa_fallback));
        }

        app
    });

    server
        .workers(worker_count)
        .bind(&bind_address)?
        .run()
        .await
}
