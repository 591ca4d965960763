//! Shared helpers for the HTTP integration suites.
//!
//! Each suite drives the real route table through `actix_web::test` on top
//! of the in-memory adapter, so no database is needed.

#![expect(dead_code, reason = "each suite uses a different subset of the helpers")]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use chrono::{DateTime, Duration, Utc};

use noticeboard::domain::ports::{AccountCommand, NewsCommand, NoteCommand};
use noticeboard::domain::{News, NewsDraft, Note, NoteDraft, SignupRequest, User};
use noticeboard::inbound::http::routes::site_app;
use noticeboard::inbound::http::session_config::SESSION_COOKIE_NAME;
use noticeboard::settings::Site;
use noticeboard::test_support::{InMemoryBackend, fixture_timestamp, test_session_middleware};

pub const PASSWORD: &str = "correct-horse-battery";

/// App for `site` over `backend`, with a fresh session key.
pub fn app(
    backend: &InMemoryBackend,
    site: Site,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    site_app(
        web::Data::new(backend.state.clone()),
        test_session_middleware(),
        site,
    )
}

/// Create an account directly through the account service.
pub async fn register(backend: &InMemoryBackend, username: &str) -> User {
    let request = SignupRequest::validate(username, PASSWORD, PASSWORD).expect("valid signup");
    backend
        .state
        .accounts
        .sign_up(request)
        .await
        .expect("account created")
}

/// Urlencoded POST of `fields` to `uri`.
pub fn form_post(uri: &str, fields: &[(&str, &str)]) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_form(fields)
}

/// Login submission for `username` with the shared password.
pub fn login_request(username: &str) -> test::TestRequest {
    form_post(
        "/auth/login/",
        &[("username", username), ("password", PASSWORD)],
    )
}

/// Session cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie")
}

/// `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_owned()
}

/// Decode a JSON page context.
pub async fn json_body<B>(res: ServiceResponse<B>) -> serde_json::Value
where
    B: MessageBody,
{
    test::read_body_json(res).await
}

/// Log `$username` in through the login view, evaluating to the session
/// cookie.
macro_rules! sign_in {
    ($app:expr, $username:expr) => {{
        let res = actix_web::test::call_service(
            &$app,
            crate::support::login_request($username).to_request(),
        )
        .await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FOUND);
        crate::support::session_cookie(&res)
    }};
}
pub(crate) use sign_in;

/// Store a note for `author` through the note service.
pub async fn seed_note(backend: &InMemoryBackend, author: &User, slug: &str) -> Note {
    let draft = NoteDraft::validate("Заголовок", "Текст заметки", slug).expect("valid draft");
    backend
        .state
        .notes
        .create(author.id(), draft)
        .await
        .expect("note stored")
}

/// Publish a news item dated `days_ago` days before the fixture clock.
pub async fn seed_news(backend: &InMemoryBackend, title: &str, days_ago: i64) -> News {
    backend
        .state
        .news
        .publish(NewsDraft {
            title: title.to_owned(),
            text: "Просто текст.".to_owned(),
            date: Some(news_date(days_ago)),
        })
        .await
        .expect("news published")
}

/// Fixture clock shifted back by `days_ago` days.
pub fn news_date(days_ago: i64) -> DateTime<Utc> {
    fixture_timestamp() - Duration::days(days_ago)
}
