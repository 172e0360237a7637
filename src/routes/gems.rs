use actix_session::Session;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::forms::filters::GemsFilterQuery;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::models::data_source::DataSource;
use crate::routes::dashboard::{download_csv, show_dashboard};

#[get("/gems")]
pub async fn show_gems(
    user: AuthenticatedUser,
    query: web::Query<GemsFilterQuery>,
    data_source: web::Data<DataSource>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let reader = data_source.gems(user.session_context());
    show_dashboard(
        &reader,
        query.into_inner(),
        &user,
        &session,
        &flash_messages,
        &tera,
        server_config.page_size,
    )
    .await
}

#[get("/gems/export")]
pub async fn export_gems(
    user: AuthenticatedUser,
    query: web::Query<GemsFilterQuery>,
    data_source: web::Data<DataSource>,
    session: Session,
) -> impl Responder {
    let reader = data_source.gems(user.session_context());
    download_csv(&reader, query.into_inner(), &session).await
}
