//! Route availability on the news site.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;

use noticeboard::domain::ports::NewsCommand;
use noticeboard::domain::{Comment, NewsId};
use noticeboard::settings::Site;
use noticeboard::test_support::InMemoryBackend;
use support::{app, location, register, seed_news, sign_in};

async fn seed_comment(backend: &InMemoryBackend) -> Comment {
    let author = register(backend, "author").await;
    let news = seed_news(backend, "Заголовок", 0).await;
    backend
        .state
        .news
        .add_comment(author.id(), news.id, "Текст комментария")
        .await
        .expect("comment added")
}

#[actix_rt::test]
async fn home_and_detail_are_public() {
    let backend = InMemoryBackend::default();
    let news = seed_news(&backend, "Заголовок", 0).await;
    let app = test::init_service(app(&backend, Site::News)).await;

    for uri in ["/".to_owned(), format!("/news/{}/", news.id)] {
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}

#[actix_rt::test]
async fn unknown_news_is_not_found() {
    let backend = InMemoryBackend::default();
    let app = test::init_service(app(&backend, Site::News)).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/news/{}/", NewsId::new(404)))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("edit_comment")]
#[case("delete_comment")]
#[actix_rt::test]
async fn anonymous_visitors_are_sent_to_login(#[case] view: &str) {
    let backend = InMemoryBackend::default();
    let comment = seed_comment(&backend).await;
    let app = test::init_service(app(&backend, Site::News)).await;
    let uri = format!("/{view}/{}/", comment.id);

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/auth/login/?next={uri}"));
}

#[rstest]
#[case("author", StatusCode::OK)]
#[case("reader", StatusCode::NOT_FOUND)]
#[actix_rt::test]
async fn comment_pages_are_available_only_to_their_author(
    #[case] username: &str,
    #[case] expected: StatusCode,
) {
    let backend = InMemoryBackend::default();
    let comment = seed_comment(&backend).await;
    register(&backend, "reader").await;
    let app = test::init_service(app(&backend, Site::News)).await;
    let cookie = sign_in!(app, username);

    for view in ["edit_comment", "delete_comment"] {
        let uri = format!("/{view}/{}/", comment.id);
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&uri)
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected, "{uri}");
    }
}

#[actix_rt::test]
async fn notes_views_are_not_mounted_on_news_site() {
    let backend = InMemoryBackend::default();
    let app = test::init_service(app(&backend, Site::News)).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/notes/").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
