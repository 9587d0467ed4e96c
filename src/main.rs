//! QuestionDesk server
//!
//! Main application entry point

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use question_desk::{
    config::Settings,
    database::{connection::{create_pool, run_migrations}, DatabaseService},
    server,
    services::{build_mailer, MailQueue, MailWorker, TemplateRegistry},
    state::AppContext,
    utils::logging,
};

const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {} v{}...", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await?;

    if settings.database.run_migrations {
        info!("Running database migrations...");
        run_migrations(&db_pool).await?;
    }

    let database_service = DatabaseService::new(db_pool);

    // Start the mail worker
    let (queue, receiver) = MailQueue::channel(settings.mail.queue_capacity);
    let mailer = Arc::from(build_mailer(&settings.mail)?);
    let worker = MailWorker::new(receiver, mailer, TemplateRegistry::with_defaults(), &settings.mail).spawn();
    info!(backend = ?settings.mail.backend, capacity = settings.mail.queue_capacity, "Mail worker ready");

    let address = format!("{}:{}", settings.server.bind_address, settings.server.port);
    let app = AppContext::new(settings, database_service, Arc::new(queue))?;

    let listener = TcpListener::bind(&address).await?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
    };

    server::serve(app, listener, shutdown).await?;

    // Dropping the last queue handle lets the worker drain and stop
    match tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker).await {
        Ok(Err(e)) => error!(error = %e, "Mail worker terminated abnormally"),
        Err(_) => warn!("Mail worker still busy at shutdown, pending emails dropped"),
        Ok(Ok(())) => {}
    }

    info!("QuestionDesk has been shut down.");

    Ok(())
}
