//! Rendering shared by the GEMS and GPF pages.

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header::ContentDisposition;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::record::TransactionRecord;
use crate::export::{EMPTY_EXPORT_NOTICE, export_file_name};
use crate::forms::filters::FilterQuery;
use crate::middleware::SIGNIN_PATH;
use crate::models::auth::AuthenticatedUser;
use crate::repository::TransactionReader;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::dashboard::{export_transactions, load_dashboard};

fn expire_session(session: &Session) -> HttpResponse {
    session.purge();
    FlashMessage::warning("Your session has expired. Please sign in again.").send();
    redirect(SIGNIN_PATH)
}

pub(crate) async fn show_dashboard<Q, D>(
    reader: &D,
    query: Q,
    user: &AuthenticatedUser,
    session: &Session,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
    page_size: usize,
) -> HttpResponse
where
    Q: FilterQuery,
    D: TransactionReader<Q::Record>,
{
    let data = match load_dashboard(reader, query, page_size).await {
        Ok(data) => data,
        Err(ServiceError::Unauthorized) => return expire_session(session),
        Err(err) => {
            log::error!("Failed to load the dashboard: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let chart_json = match serde_json::to_string(&data.chart) {
        Ok(json) => json,
        Err(err) => {
            log::error!("Failed to serialize chart data: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(flash_messages, Some(user), data.endpoint);
    context.insert("dashboard", &data);
    context.insert("chart_json", &chart_json);

    render_template(tera, "dashboard/index.html", &context)
}

pub(crate) async fn download_csv<Q, D>(reader: &D, query: Q, session: &Session) -> HttpResponse
where
    Q: FilterQuery,
    D: TransactionReader<Q::Record>,
{
    match export_transactions(reader, &query).await {
        Ok(Some(bytes)) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(ContentDisposition::attachment(export_file_name::<
                Q::Record,
            >()))
            .body(bytes),
        Ok(None) => {
            FlashMessage::info(EMPTY_EXPORT_NOTICE).send();
            let path = format!("/{}", <Q::Record as TransactionRecord>::ENDPOINT);
            match serde_html_form::to_string(&query.without_page()) {
                Ok(qs) if !qs.is_empty() => redirect(&format!("{path}?{qs}")),
                _ => redirect(&path),
            }
        }
        Err(ServiceError::Unauthorized) => expire_session(session),
        Err(err) => {
            log::error!("Failed to export transactions: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
