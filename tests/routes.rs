use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use actix_web::{App, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use tera::Tera;

use hrms_dashboard::middleware::RedirectUnauthorized;
use hrms_dashboard::models::config::{AuthConfig, DataSourceConfig, ServerConfig};
use hrms_dashboard::models::data_source::{AuthBackend, DataSource};
use hrms_dashboard::repository::synthetic::SyntheticDataset;
use hrms_dashboard::routes::alert_level_to_str;
use hrms_dashboard::routes::auth::signin;
use hrms_dashboard::routes::gems::{export_gems, show_gems};

const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        templates_dir: "templates/**/*".to_string(),
        secret: SECRET.to_string(),
        page_size: 10,
        data_source: DataSourceConfig::default(),
        auth: AuthConfig::default(),
    }
}

macro_rules! dashboard_app {
    () => {
        dashboard_app!(server_config())
    };
    ($config:expr) => {{
        let config: ServerConfig = $config;
        let key = Key::from(config.secret.as_bytes());
        let messages = FlashMessagesFramework::builder(
            CookieMessageStore::builder(key.clone()).build(),
        )
        .build();

        actix_test::init_service(
            App::new()
                .wrap(messages)
                .wrap(IdentityMiddleware::default())
                .wrap(SessionMiddleware::new(CookieSessionStore::default(), key))
                .app_data(web::Data::new(DataSource::Synthetic(
                    SyntheticDataset::generate(7),
                )))
                .app_data(web::Data::new(AuthBackend::from_config(&config).unwrap()))
                .app_data(web::Data::new(Tera::new("templates/**/*").unwrap()))
                .app_data(web::Data::new(config))
                .service(signin)
                .service(
                    web::scope("")
                        .wrap(RedirectUnauthorized)
                        .service(show_gems)
                        .service(export_gems),
                ),
        )
        .await
    }};
}

macro_rules! sign_in {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = actix_test::TestRequest::post()
            .uri("/auth/signin")
            .set_form([("username", $username), ("password", $password)])
            .to_request();
        let resp = actix_test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/gems");

        let cookies: Vec<_> = resp
            .response()
            .cookies()
            // Like a client, drop removal cookies (`Max-Age=0`) instead of echoing them back.
            .filter(|cookie| cookie.max_age() != Some(actix_web::cookie::time::Duration::ZERO))
            .map(|cookie| cookie.into_owned())
            .collect();
        assert!(!cookies.is_empty());
        cookies
    }};
}

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn dashboard_routes_require_sign_in() {
    let app = dashboard_app!();

    let req = actix_test::TestRequest::get().uri("/gems/export").to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}

#[actix_web::test]
async fn signed_in_users_download_the_filtered_rows() {
    let app = dashboard_app!();

    let cookies = sign_in!(app, "admin", "password123");

    let mut req = actix_test::TestRequest::get().uri("/gems/export?status=HRMS_REJECTED");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("gems_transactions.csv"));

    let body = actix_test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("transactionId,geNumber"));
    assert_eq!(lines.count(), 15);
}

#[actix_web::test]
async fn wrong_password_returns_to_the_sign_in_page() {
    let app = dashboard_app!();

    let req = actix_test::TestRequest::post()
        .uri("/auth/signin")
        .set_form([("username", "admin"), ("password", "wrong")])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}

#[actix_web::test]
async fn expired_demo_sessions_are_sent_back_to_sign_in() {
    let mut config = server_config();
    config.auth.token_ttl_secs = -3600;
    let app = dashboard_app!(config);

    let cookies = sign_in!(app, "admin", "password123");

    let mut req = actix_test::TestRequest::get().uri("/gems/export");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, req.to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
}

#[actix_web::test]
async fn dashboard_page_renders_cards_charts_and_the_selected_rows() {
    let app = dashboard_app!();
    let cookies = sign_in!(app, "hrms", "hrms2024");

    let mut req = actix_test::TestRequest::get().uri("/gems?status=HRMS_REJECTED");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let resp = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = actix_test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("id=\"status-cards\""));
    assert!(html.contains("Distribution Overview"));
    assert!(html.contains("Transaction Volume"));
    assert!(html.contains("Showing 1-10 of 15"));
}
