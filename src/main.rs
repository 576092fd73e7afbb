//! CRM server entry point: configuration, logging, database, wiring.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use crm_api::state::AppState;
use crm_core::config::AppConfig;
use crm_core::error::AppError;
use crm_core::traits::blob::BlobStore;
use crm_database::repositories::{
    AttachmentRepository, BusinessExpenseRepository, ExpenseRepository, FolderRepository,
    PaymentRepository, ProjectRepository, TaskRepository, TaxTrackerRepository, VisitRepository,
};
use crm_entity::attachment::store::AttachmentStore;
use crm_entity::folder::store::FolderStore;
use crm_service::{
    ArchiveService, AttachmentService, BusinessExpenseService, ExpenseService,
    FinanceReportService, HierarchyService, PaymentService, ProjectService, TaskService,
    TaxReportService, VisitService,
};
use crm_storage::LocalBlobStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("CRM_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with the configured level and format.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CRM server v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = crm_database::create_pool(&config.database).await?;
    crm_database::migration::run_migrations(&db_pool).await?;

    let blobs: Arc<dyn BlobStore> =
        Arc::new(LocalBlobStore::new(&config.storage.uploads_root).await?);

    let folder_store: Arc<dyn FolderStore> =
        Arc::new(FolderRepository::new(db_pool.clone()));
    let attachment_store: Arc<dyn AttachmentStore> =
        Arc::new(AttachmentRepository::new(db_pool.clone()));
    let project_repo = ProjectRepository::new(db_pool.clone());
    let payment_repo = PaymentRepository::new(db_pool.clone());
    let expense_repo = ExpenseRepository::new(db_pool.clone());
    let task_repo = TaskRepository::new(db_pool.clone());
    let visit_repo = VisitRepository::new(db_pool.clone());
    let business_expense_repo = BusinessExpenseRepository::new(db_pool.clone());
    let tax_repo = TaxTrackerRepository::new(db_pool.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        hierarchy: Arc::new(HierarchyService::new(
            Arc::clone(&folder_store),
            Arc::clone(&attachment_store),
            Arc::clone(&blobs),
        )),
        archive: Arc::new(ArchiveService::new(
            Arc::clone(&folder_store),
            Arc::clone(&attachment_store),
            Arc::clone(&blobs),
        )),
        attachments: Arc::new(AttachmentService::new(
            Arc::clone(&folder_store),
            Arc::clone(&attachment_store),
            Arc::clone(&blobs),
        )),
        projects: Arc::new(ProjectService::new(
            project_repo,
            payment_repo.clone(),
            Arc::clone(&attachment_store),
            Arc::clone(&blobs),
        )),
        payments: Arc::new(PaymentService::new(payment_repo.clone())),
        expenses: Arc::new(ExpenseService::new(expense_repo)),
        tasks: Arc::new(TaskService::new(task_repo)),
        visits: Arc::new(VisitService::new(visit_repo)),
        business_expenses: Arc::new(BusinessExpenseService::new(
            business_expense_repo.clone(),
            Arc::clone(&blobs),
        )),
        reports: Arc::new(FinanceReportService::new(
            payment_repo,
            business_expense_repo,
            tax_repo.clone(),
        )),
        tax: Arc::new(TaxReportService::new(tax_repo)),
    };

    let app = crm_api::build_router(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CRM server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
    }
    tracing::info!("Shutdown signal received");
}
