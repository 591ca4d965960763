//! Signup, login and logout through the HTTP layer.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;

use noticeboard::settings::Site;
use noticeboard::test_support::InMemoryBackend;
use support::{PASSWORD, app, form_post, json_body, location, register, sign_in};

#[rstest]
#[case("/auth/signup/")]
#[case("/auth/login/")]
#[case("/auth/logout/")]
#[actix_rt::test]
async fn auth_pages_are_public(#[case] uri: &str) {
    let backend = InMemoryBackend::default();
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn signup_creates_account_and_redirects_to_login() {
    let backend = InMemoryBackend::default();
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(
        &app,
        form_post(
            "/auth/signup/",
            &[
                ("username", "new_user"),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/auth/login/");

    let _cookie = sign_in!(app, "new_user");
}

#[actix_rt::test]
async fn signup_rejects_taken_username() {
    let backend = InMemoryBackend::default();
    register(&backend, "taken").await;
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(
        &app,
        form_post(
            "/auth/signup/",
            &[
                ("username", "taken"),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ],
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["form"]["data"]["username"], "taken");
    assert_eq!(
        body["form"]["errors"]["username"][0],
        "A user with that username already exists."
    );
}

#[actix_rt::test]
async fn signup_reports_mismatched_passwords_without_echoing_them() {
    let backend = InMemoryBackend::default();
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(
        &app,
        form_post(
            "/auth/signup/",
            &[
                ("username", "someone"),
                ("password1", PASSWORD),
                ("password2", "something-else"),
            ],
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert!(body["form"]["errors"]["password2"].is_array());
    assert!(body["form"]["data"].get("password1").is_none());
}

#[actix_rt::test]
async fn wrong_password_rerenders_login_with_form_error() {
    let backend = InMemoryBackend::default();
    register(&backend, "author").await;
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(
        &app,
        form_post(
            "/auth/login/",
            &[("username", "author"), ("password", "nope")],
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
    let body = json_body(res).await;
    assert!(body["form"]["errors"]["__all__"].is_array());
}

#[rstest]
#[case("/notes/", "/notes/")]
#[case("//evil.example/", "/")]
#[case("https://evil.example/", "/")]
#[case("/\t/evil.example/", "/")]
#[case("/\r\n/evil.example/", "/")]
#[actix_rt::test]
async fn login_follows_only_local_next(#[case] next: &str, #[case] expected: &str) {
    let backend = InMemoryBackend::default();
    register(&backend, "author").await;
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(
        &app,
        form_post(
            "/auth/login/",
            &[
                ("username", "author"),
                ("password", PASSWORD),
                ("next", next),
            ],
        )
        .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), expected);
}

#[actix_rt::test]
async fn login_page_echoes_next() {
    let backend = InMemoryBackend::default();
    let app = test::init_service(app(&backend, Site::Notes)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/login/?next=/add/")
            .to_request(),
    )
    .await;
    let body = json_body(res).await;
    assert_eq!(body["next"], "/add/");
}

#[actix_rt::test]
async fn logout_ends_the_session() {
    let backend = InMemoryBackend::default();
    register(&backend, "author").await;
    let app = test::init_service(app(&backend, Site::Notes)).await;
    let cookie = sign_in!(app, "author");

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/logout/")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let cleared = support::session_cookie(&res);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/notes/")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/auth/login/?next=/notes/");
}
