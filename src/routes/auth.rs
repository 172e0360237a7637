use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::domain::user::AuthSession;
use crate::forms::FieldErrors;
use crate::forms::auth::{LoginForm, SignupForm};
use crate::middleware::SIGNIN_PATH;
use crate::models::auth::store_auth_session;
use crate::models::config::{AuthKind, ServerConfig};
use crate::models::data_source::AuthBackend;
use crate::repository::credentials::DemoCredentials;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth as auth_service;

const HOME_PATH: &str = "/gems";
const SIGNUP_PATH: &str = "/auth/signup";

fn signin_context(
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    username: &str,
    errors: &FieldErrors,
) -> Context {
    let mut context = base_context(flash_messages, None, "signin");
    context.insert("username", username);
    context.insert("errors", errors);
    if server_config.auth.kind == AuthKind::Demo {
        let accounts = DemoCredentials::demo()
            .all()
            .iter()
            .map(|c| (c.username.clone(), c.password.clone()))
            .collect::<Vec<_>>();
        context.insert("demo_accounts", &accounts);
    }
    context
}

fn complete_sign_in(
    request: &HttpRequest,
    session: &Session,
    auth_session: AuthSession,
) -> HttpResponse {
    session.renew();

    if let Err(err) = store_auth_session(session, &auth_session) {
        log::error!("Failed to store the session: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    if let Err(err) = Identity::login(&request.extensions(), auth_session.user.username.clone()) {
        log::error!("Failed to attach the identity: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    log::info!("User {} signed in", auth_session.user.username);
    redirect(HOME_PATH)
}

#[get("/auth/signin")]
pub async fn show_signin(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let context = signin_context(&flash_messages, &server_config, "", &FieldErrors::new());
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/auth/signin")]
pub async fn signin(
    request: HttpRequest,
    session: Session,
    auth: web::Data<AuthBackend>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let username = form.username.clone();

    match auth_service::login(auth.get_ref(), form).await {
        Ok(auth_session) => complete_sign_in(&request, &session, auth_session),
        Err(ServiceError::Validation(errors)) => {
            let context = signin_context(&flash_messages, &server_config, &username, &errors);
            render_template(&tera, "auth/signin.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(SIGNIN_PATH)
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/auth/signup")]
pub async fn show_signup(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, None, "signup");
    context.insert("username", "");
    context.insert("errors", &FieldErrors::new());
    render_template(&tera, "auth/signup.html", &context)
}

#[post("/auth/signup")]
pub async fn signup(
    request: HttpRequest,
    session: Session,
    auth: web::Data<AuthBackend>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    let username = form.username.clone();

    match auth_service::signup(auth.get_ref(), form).await {
        Ok(auth_session) => {
            FlashMessage::success("Account created.").send();
            complete_sign_in(&request, &session, auth_session)
        }
        Err(ServiceError::Validation(errors)) => {
            let mut context = base_context(&flash_messages, None, "signup");
            context.insert("username", &username);
            context.insert("errors", &errors);
            render_template(&tera, "auth/signup.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(SIGNUP_PATH)
        }
        Err(err) => {
            log::error!("Failed to sign up: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: Identity, session: Session) -> impl Responder {
    if let Ok(username) = user.id() {
        log::info!("User {username} signed out");
    }
    user.logout();
    session.purge();
    redirect(SIGNIN_PATH)
}
