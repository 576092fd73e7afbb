//! Route definitions for the CRM HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(project_routes())
        .merge(payment_routes())
        .merge(expense_routes())
        .merge(task_routes())
        .merge(visit_routes())
        .merge(business_expense_routes())
        .merge(report_routes())
        .merge(tax_routes())
        .merge(folder_routes())
        .merge(attachment_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Project CRUD.
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(handlers::project::list_projects))
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{id}", get(handlers::project::get_project))
        .route("/projects/{id}", patch(handlers::project::update_project))
        .route("/projects/{id}", delete(handlers::project::delete_project))
}

/// Payments, nested under their project for listing and creation.
fn payment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/payments",
            get(handlers::payment::list_payments),
        )
        .route(
            "/projects/{id}/payments",
            post(handlers::payment::create_payment),
        )
        .route("/payments/{id}", delete(handlers::payment::delete_payment))
}

/// Expenses, same shape as payments.
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/expenses",
            get(handlers::expense::list_expenses),
        )
        .route(
            "/projects/{id}/expenses",
            post(handlers::expense::create_expense),
        )
        .route("/expenses/{id}", delete(handlers::expense::delete_expense))
}

/// Company-wide to-do tasks.
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks", post(handlers::task::create_task))
        .route("/tasks/{id}/toggle", patch(handlers::task::toggle_task))
        .route("/tasks/{id}", delete(handlers::task::delete_task))
}

/// Site visits, nested under their project for listing and creation.
fn visit_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/visits", get(handlers::visit::list_visits))
        .route("/projects/{id}/visits", post(handlers::visit::create_visit))
        .route("/visits/upcoming", get(handlers::visit::upcoming_visits))
        .route("/visits/{id}", delete(handlers::visit::delete_visit))
}

/// Company-wide expenses with receipts and tax reports.
fn business_expense_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/business-expenses",
            get(handlers::business_expense::list_expenses),
        )
        .route(
            "/business-expenses",
            post(handlers::business_expense::create_expense),
        )
        .route(
            "/projects/{id}/business-expenses",
            get(handlers::business_expense::list_by_project),
        )
        .route(
            "/business-expenses/yearly-report/{year}",
            get(handlers::business_expense::yearly_report),
        )
        .route(
            "/business-expenses/monthly-breakdown/{year}",
            get(handlers::business_expense::monthly_breakdown),
        )
        .route(
            "/business-expenses/receipts/{year}",
            get(handlers::business_expense::download_receipts_archive),
        )
        .route(
            "/business-expenses/{id}/receipt",
            post(handlers::business_expense::upload_receipt),
        )
        .route(
            "/business-expenses/{id}/receipt",
            get(handlers::business_expense::download_receipt),
        )
        .route(
            "/business-expenses/{id}",
            patch(handlers::business_expense::update_expense),
        )
        .route(
            "/business-expenses/{id}",
            delete(handlers::business_expense::delete_expense),
        )
}

/// Month-level finance summaries.
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/monthly", get(handlers::report::monthly_summary))
        .route(
            "/reports/breakdown",
            get(handlers::report::monthly_breakdown),
        )
}

/// Running VAT tracker.
fn tax_routes() -> Router<AppState> {
    Router::new()
        .route("/tax", get(handlers::tax::get_summary))
        .route("/tax/payment", post(handlers::tax::add_payment))
        .route("/tax/percentage", patch(handlers::tax::set_percentage))
        .route("/tax/reset", post(handlers::tax::reset))
}

/// Folder tree operations.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/folders",
            post(handlers::folder::create_folder),
        )
        .route("/folders/{id}", patch(handlers::folder::rename_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
}

/// Attachment listing, upload, rename, delete, and downloads.
fn attachment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/attachments",
            get(handlers::attachment::list_contents),
        )
        .route(
            "/projects/{id}/attachments",
            post(handlers::attachment::upload),
        )
        .route(
            "/attachments/download",
            get(handlers::attachment::download),
        )
        .route(
            "/attachments/{id}/download",
            get(handlers::attachment::download_one),
        )
        .route("/attachments/{id}", patch(handlers::attachment::rename))
        .route("/attachments/{id}", delete(handlers::attachment::delete))
}
