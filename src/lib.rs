//! Monitoring dashboards for GEMS and GPF transactions.
//!
//! The `data` feature carries the reusable core: filtering, status summaries,
//! pagination, the debounced dashboard controller and the data sources. The
//! `server` feature adds the actix-web application serving the dashboards.

pub mod dashboard;
pub mod domain;
pub mod engine;
pub mod export;
pub mod forms;
pub mod pagination;
pub mod repository;
pub mod session;

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::middleware::RedirectUnauthorized;
    use crate::models::config::ServerConfig;
    use crate::models::data_source::{AuthBackend, DataSource};
    use crate::routes::auth::{logout, show_signin, show_signup, signin, signup};
    use crate::routes::gems::{export_gems, show_gems};
    use crate::routes::gpf::{export_gpf, show_gpf};
    use crate::routes::index;

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let data_source = DataSource::from_config(&server_config)
            .map_err(|e| std::io::Error::other(format!("Failed to set up data source: {e}")))?;
        let auth_backend = AuthBackend::from_config(&server_config).map_err(|e| {
            std::io::Error::other(format!("Failed to set up authentication: {e}"))
        })?;

        let data_source = web::Data::new(data_source);
        let auth_backend = web::Data::new(auth_backend);

        // Keys and stores for identity, sessions, and flash messages.
        let secret_key = Key::try_from(server_config.secret.as_bytes())
            .map_err(|e| std::io::Error::other(format!("Invalid secret: {e}")))?;

        let message_store = CookieMessageStore::builder(secret_key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();

        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Starting HRMS dashboard on {}:{}",
            server_config.address,
            server_config.port
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(message_framework.clone())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false) // set to true in prod
                        .cookie_domain(Some(server_config.domain.clone()))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(Files::new("/assets", "./assets"))
                .service(show_signin)
                .service(signin)
                .service(show_signup)
                .service(signup)
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(index)
                        .service(show_gems)
                        .service(export_gems)
                        .service(show_gpf)
                        .service(export_gpf)
                        .service(logout),
                )
                .app_data(web::Data::new(tera.clone()))
                .app_data(data_source.clone())
                .app_data(auth_backend.clone())
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
