//! Tests for the news service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::User;
use crate::domain::ports::{MockCommentRepository, MockNewsRepository};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

type Service = NewsService<MockNewsRepository, MockCommentRepository>;

fn make_service(news: MockNewsRepository, comments: MockCommentRepository) -> Service {
    make_service_with_page_size(news, comments, 2)
}

fn make_service_with_page_size(
    news: MockNewsRepository,
    comments: MockCommentRepository,
    page_size: usize,
) -> Service {
    NewsService::new(
        Arc::new(news),
        Arc::new(comments),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
        NewsSettings {
            page_size,
            ..NewsSettings::default()
        },
    )
}

fn sample_news(id: i64, minutes_ago: i64) -> News {
    News {
        id: NewsId::new(id),
        title: format!("Sample News {id}"),
        text: format!("Sample news content {id}"),
        date: fixture_timestamp() - Duration::minutes(minutes_ago),
    }
}

#[fixture]
fn author() -> User {
    User::try_from_strings(UserId::random().as_ref(), "news_author").expect("user")
}

fn sample_comment(author: &User) -> Comment {
    Comment {
        id: CommentId::new(5),
        news: NewsId::new(1),
        author: author.clone(),
        text: "Original comment".to_owned(),
        created: fixture_timestamp(),
    }
}

fn existing_news() -> MockNewsRepository {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id()
        .returning(|id| Ok(Some(sample_news(id.get(), 0))));
    news
}

#[rstest]
#[tokio::test]
async fn home_page_overfetches_and_emits_cursor() {
    let mut news = MockNewsRepository::new();
    news.expect_list_page()
        .with(eq(3_usize), eq(None))
        .times(1)
        .return_once(|_, _| Ok(vec![sample_news(3, 0), sample_news(2, 1), sample_news(1, 2)]));

    let page = make_service(news, MockCommentRepository::new())
        .home_page(None)
        .await
        .expect("page");
    assert_eq!(page.items.len(), 2);
    let cursor = page.next.expect("more pages");
    let key = Cursor::<NewsCursorKey>::decode(&cursor)
        .expect("decodes")
        .into_key();
    assert_eq!(key, sample_news(2, 1).cursor_key());
}

#[rstest]
#[tokio::test]
async fn home_page_passes_decoded_cursor_to_repository() {
    let key = sample_news(2, 1).cursor_key();
    let token = Cursor::new(key).encode().expect("encode");
    let mut news = MockNewsRepository::new();
    news.expect_list_page()
        .with(eq(3_usize), eq(Some(key)))
        .times(1)
        .return_once(|_, _| Ok(vec![sample_news(1, 2)]));

    let page = make_service(news, MockCommentRepository::new())
        .home_page(Some(token))
        .await
        .expect("page");
    assert_eq!(page.items.len(), 1);
    assert!(page.next.is_none());
}

#[rstest]
#[tokio::test]
async fn unbounded_page_size_fetches_everything() {
    let mut news = MockNewsRepository::new();
    news.expect_list_page()
        .with(eq(usize::MAX), eq(None))
        .times(1)
        .return_once(|_, _| Ok(vec![sample_news(2, 0), sample_news(1, 1)]));

    let page = make_service_with_page_size(news, MockCommentRepository::new(), usize::MAX)
        .home_page(None)
        .await
        .expect("page");
    assert_eq!(page.items.len(), 2);
    assert!(page.next.is_none());
}

#[rstest]
#[tokio::test]
async fn malformed_cursor_is_invalid_request() {
    let mut news = MockNewsRepository::new();
    news.expect_list_page().times(0);

    let err = make_service(news, MockCommentRepository::new())
        .home_page(Some("%%%".to_owned()))
        .await
        .expect_err("bad cursor");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn detail_of_unknown_news_is_not_found() {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().return_once(|_| Ok(None));
    let mut comments = MockCommentRepository::new();
    comments.expect_list_for_news().times(0);

    let err = make_service(news, comments)
        .detail(NewsId::new(404))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn add_comment_stamps_author_and_time(author: User) {
    let mut comments = MockCommentRepository::new();
    let expected_author = author.id().clone();
    comments
        .expect_insert()
        .withf(move |news, owner, text, created| {
            *news == NewsId::new(1)
                && owner == &expected_author
                && text == "User comment"
                && *created == fixture_timestamp()
        })
        .times(1)
        .returning({
            let author = author.clone();
            move |news, _, text, created| {
                Ok(Comment {
                    id: CommentId::new(9),
                    news,
                    author: author.clone(),
                    text: text.to_owned(),
                    created,
                })
            }
        });

    let comment = make_service(existing_news(), comments)
        .add_comment(author.id(), NewsId::new(1), "  User comment ")
        .await
        .expect("comment added");
    assert_eq!(comment.author, author);
}

#[rstest]
#[tokio::test]
async fn banned_words_prevent_persistence(author: User) {
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().times(0);

    let err = make_service(existing_news(), comments)
        .add_comment(author.id(), NewsId::new(1), "Comment with редиска")
        .await
        .expect_err("rejected");
    let errors = err.form_errors().expect("form errors");
    assert_eq!(errors.field("text"), ["Не ругайтесь!"]);
}

#[rstest]
#[tokio::test]
async fn comments_on_missing_news_are_not_found(author: User) {
    let mut news = MockNewsRepository::new();
    news.expect_find_by_id().return_once(|_| Ok(None));
    let mut comments = MockCommentRepository::new();
    comments.expect_insert().times(0);

    let err = make_service(news, comments)
        .add_comment(author.id(), NewsId::new(2), "hello")
        .await
        .expect_err("missing news");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn strangers_cannot_edit_or_delete(author: User) {
    let comment = sample_comment(&author);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(Some(comment.clone())));
    comments.expect_update_text().times(0);
    comments.expect_delete().times(0);

    let service = make_service(MockNewsRepository::new(), comments);
    let stranger = UserId::random();
    let edit = service
        .edit_comment(&stranger, CommentId::new(5), "Attempted edit")
        .await
        .expect_err("hidden");
    let delete = service
        .delete_comment(&stranger, CommentId::new(5))
        .await
        .expect_err("hidden");
    assert_eq!(edit.code(), ErrorCode::NotFound);
    assert_eq!(delete.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn author_edits_with_banned_word_filter(author: User) {
    let comment = sample_comment(&author);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(move |_| Ok(Some(comment.clone())));
    comments.expect_update_text().times(0);

    let err = make_service(MockNewsRepository::new(), comments)
        .edit_comment(author.id(), CommentId::new(5), "негодяй")
        .await
        .expect_err("rejected");
    assert!(err.form_errors().is_some());
}

#[rstest]
#[tokio::test]
async fn author_deletes_own_comment(author: User) {
    let comment = sample_comment(&author);
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(comment)));
    comments
        .expect_delete()
        .with(eq(CommentId::new(5)))
        .times(1)
        .return_once(|_| Ok(true));

    let deleted = make_service(MockNewsRepository::new(), comments)
        .delete_comment(author.id(), CommentId::new(5))
        .await
        .expect("deleted");
    assert_eq!(deleted.news, NewsId::new(1));
}

#[rstest]
#[tokio::test]
async fn publish_defaults_date_to_clock() {
    let mut news = MockNewsRepository::new();
    news.expect_insert()
        .withf(|title, _, date| title == "Headline" && *date == fixture_timestamp())
        .times(1)
        .returning(|title, text, date| {
            Ok(News {
                id: NewsId::new(1),
                title: title.to_owned(),
                text: text.to_owned(),
                date,
            })
        });

    let published = make_service(news, MockCommentRepository::new())
        .publish(NewsDraft {
            title: "Headline".to_owned(),
            text: "Body".to_owned(),
            date: None,
        })
        .await
        .expect("published");
    assert_eq!(published.date, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn publish_rejects_overlong_titles() {
    let mut news = MockNewsRepository::new();
    news.expect_insert().times(0);

    let err = make_service(news, MockCommentRepository::new())
        .publish(NewsDraft {
            title: "з".repeat(NEWS_TITLE_MAX + 1),
            text: "Body".to_owned(),
            date: None,
        })
        .await
        .expect_err("title too long");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let fields = err.form_errors().expect("field errors");
    assert_eq!(fields.field("title").len(), 1);
}
