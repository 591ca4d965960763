//! Sign-up, login and logout views.
//!
//! ```text
//! GET|POST /auth/signup/
//! GET|POST /auth/login/?next=/add/
//! GET|POST /auth/logout/
//! ```

use actix_web::{HttpResponse, get, post, route, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::form::REQUIRED_MESSAGE;
use crate::domain::{Error, FormErrors, LoginCredentials, SignupRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::LOGIN_PATH;
use crate::inbound::http::forms::{FormContext, LoginForm, SignupForm};
use crate::inbound::http::pages::{
    FormPage, LoginPage, MessagePage, is_local_path, redirect, render, rerender_invalid,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// `?next=` carried by the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Render the empty signup form.
#[utoipa::path(
    get,
    path = "/auth/signup/",
    responses((status = 200, description = "Signup form", body = FormPage)),
    tags = ["auth"],
    operation_id = "signupPage",
    security([])
)]
#[get("/auth/signup/")]
pub async fn signup_page() -> HttpResponse {
    render(&FormPage {
        form: FormContext::blank(),
    })
}

/// Register a new account, then send the user to the login page.
#[utoipa::path(
    post,
    path = "/auth/signup/",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Account created; redirect to login"),
        (status = 200, description = "Form re-rendered with errors", body = FormPage),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup/")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let outcome = match SignupRequest::validate(&form.username, &form.password1, &form.password2) {
        Ok(request) => state.accounts.sign_up(request).await,
        Err(errors) => Err(Error::validation(errors)),
    };
    match outcome {
        Ok(_) => Ok(redirect(LOGIN_PATH)),
        Err(error) => rerender_invalid(error, |errors| {
            Ok(render(&FormPage {
                form: form.context().with_errors(errors),
            }))
        }),
    }
}

/// Render the login form.
#[utoipa::path(
    get,
    path = "/auth/login/",
    params(("next" = Option<String>, Query, description = "Path to return to after login")),
    responses((status = 200, description = "Login form", body = LoginPage)),
    tags = ["auth"],
    operation_id = "loginPage",
    security([])
)]
#[get("/auth/login/")]
pub async fn login_page(query: web::Query<NextQuery>) -> HttpResponse {
    render(&LoginPage {
        form: FormContext::blank(),
        next: query.into_inner().next,
    })
}

fn credential_errors(form: &LoginForm) -> Result<LoginCredentials, Error> {
    LoginCredentials::try_from_parts(&form.username, &form.password).map_err(|err| {
        let mut errors = FormErrors::default();
        errors.add(err.field(), REQUIRED_MESSAGE);
        Error::validation(errors)
    })
}

/// Authenticate and establish a session.
///
/// On success the client goes to `next` when it is a local path, otherwise
/// to the site root.
#[utoipa::path(
    post,
    path = "/auth/login/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 200, description = "Form re-rendered with errors", body = LoginPage),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let next = form.next.clone().or_else(|| query.into_inner().next);
    let outcome = match credential_errors(&form) {
        Ok(credentials) => state.accounts.authenticate(&credentials).await,
        Err(error) => Err(error),
    };
    match outcome {
        Ok(user) => {
            session.persist_user(user.id())?;
            info!(user_id = %user.id(), "user logged in");
            let target = next.filter(|path| is_local_path(path));
            Ok(redirect(target.as_deref().unwrap_or("/")))
        }
        Err(error) => rerender_invalid(error, |errors| {
            Ok(render(&LoginPage {
                form: form.context().with_errors(errors),
                next,
            }))
        }),
    }
}

/// End the session.
#[utoipa::path(
    get,
    path = "/auth/logout/",
    responses((status = 200, description = "Logged out", body = MessagePage)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[route("/auth/logout/", method = "GET", method = "POST")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    render(&MessagePage {
        message: "Вы вышли из своей учётной записи.".to_owned(),
    })
}

/// Register the authentication views.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(signup_page)
        .service(signup)
        .service(login_page)
        .service(login)
        .service(logout);
}
