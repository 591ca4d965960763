//! News and comment views.
//!
//! ```text
//! GET  /?cursor=...                 latest news, anonymous allowed
//! GET  /news/{id}/                  detail with comments
//! POST /news/{id}/                  add a comment
//! GET  /edit_comment/{id}/  POST    edit own comment
//! GET  /delete_comment/{id}/ POST   delete own comment
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{Comment, CommentId, NewsId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{CommentForm, FormContext};
use crate::inbound::http::pages::{
    CommentContext, NewsDetailContext, NewsListContext, redirect, render,
};
use crate::inbound::http::session::{CurrentUser, MaybeUser};
use crate::inbound::http::state::HttpState;

/// Query parameter carrying the home page cursor.
pub const CURSOR_PARAM: &str = "cursor";

/// Home page query string.
#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
    pub cursor: Option<String>,
}

/// Anchor of the comment list on a news page.
fn comments_anchor(news: NewsId) -> String {
    format!("/news/{news}/#comments")
}

/// Latest news, newest first.
#[utoipa::path(
    get,
    path = "/",
    params(("cursor" = Option<String>, Query, description = "Opaque cursor from a previous page")),
    responses(
        (status = 200, description = "News page", body = NewsListContext),
        (status = 400, description = "Malformed cursor", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "newsHome",
    security([])
)]
#[get("/")]
pub async fn home(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<HomeQuery>,
) -> ApiResult<HttpResponse> {
    let page = state.news_query.home_page(query.into_inner().cursor).await?;
    let next = page
        .next_link(&req.full_url(), CURSOR_PARAM)
        .map(String::from);
    Ok(render(&NewsListContext {
        news_list: page.items,
        next,
    }))
}

/// A news item with its comments; signed-in users also get a comment form.
#[utoipa::path(
    get,
    path = "/news/{id}/",
    params(("id" = i64, Path, description = "News identifier")),
    responses(
        (status = 200, description = "News detail", body = NewsDetailContext),
        (status = 404, description = "Unknown news", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "newsDetail",
    security([])
)]
#[get("/news/{id}/")]
pub async fn detail(
    state: web::Data<HttpState>,
    user: MaybeUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let news = state.news_query.detail(NewsId::new(id.into_inner())).await?;
    let form = user.0.map(|_| FormContext::blank());
    Ok(render(&NewsDetailContext { news, form }))
}

/// Post a comment on a news item.
#[utoipa::path(
    post,
    path = "/news/{id}/",
    params(("id" = i64, Path, description = "News identifier")),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Comment added; redirect to the comment list"),
        (status = 200, description = "Page re-rendered with form errors", body = NewsDetailContext),
        (status = 404, description = "Unknown news", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "addComment"
)]
#[post("/news/{id}/")]
pub async fn add_comment(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let news_id = NewsId::new(id.into_inner());
    let form = form.into_inner();
    match state.news.add_comment(user.id(), news_id, &form.text).await {
        Ok(_) => Ok(redirect(comments_anchor(news_id))),
        Err(error) => {
            let Some(errors) = error.form_errors() else {
                return Err(error);
            };
            let news = state.news_query.detail(news_id).await?;
            Ok(render(&NewsDetailContext {
                news,
                form: Some(form.context().with_errors(errors)),
            }))
        }
    }
}

fn comment_page(comment: Comment, form: Option<FormContext>) -> HttpResponse {
    render(&CommentContext { comment, form })
}

/// Comment form prefilled for editing.
#[utoipa::path(
    get,
    path = "/edit_comment/{id}/",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 200, description = "Prefilled form", body = CommentContext),
        (status = 404, description = "Missing or not owned", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "editCommentPage"
)]
#[get("/edit_comment/{id}/")]
pub async fn edit_comment_page(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let comment = state
        .news_query
        .owned_comment(user.id(), CommentId::new(id.into_inner()))
        .await?;
    let form = CommentForm::from_comment(&comment).context();
    Ok(comment_page(comment, Some(form)))
}

/// Replace the text of an own comment.
#[utoipa::path(
    post,
    path = "/edit_comment/{id}/",
    params(("id" = i64, Path, description = "Comment identifier")),
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Saved; redirect to the comment list"),
        (status = 200, description = "Form re-rendered with errors", body = CommentContext),
        (status = 404, description = "Missing or not owned", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "editComment"
)]
#[post("/edit_comment/{id}/")]
pub async fn edit_comment(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> ApiResult<HttpResponse> {
    let comment_id = CommentId::new(id.into_inner());
    let form = form.into_inner();
    match state
        .news
        .edit_comment(user.id(), comment_id, &form.text)
        .await
    {
        Ok(comment) => Ok(redirect(comments_anchor(comment.news))),
        Err(error) => {
            let Some(errors) = error.form_errors() else {
                return Err(error);
            };
            let comment = state.news_query.owned_comment(user.id(), comment_id).await?;
            Ok(comment_page(
                comment,
                Some(form.context().with_errors(errors)),
            ))
        }
    }
}

/// Deletion confirmation.
#[utoipa::path(
    get,
    path = "/delete_comment/{id}/",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 200, description = "Confirmation page", body = CommentContext),
        (status = 404, description = "Missing or not owned", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "deleteCommentPage"
)]
#[get("/delete_comment/{id}/")]
pub async fn delete_comment_page(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let comment = state
        .news_query
        .owned_comment(user.id(), CommentId::new(id.into_inner()))
        .await?;
    Ok(comment_page(comment, None))
}

/// Delete an own comment.
#[utoipa::path(
    post,
    path = "/delete_comment/{id}/",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 302, description = "Deleted; redirect to the comment list"),
        (status = 404, description = "Missing or not owned", body = crate::domain::Error)
    ),
    tags = ["news"],
    operation_id = "deleteComment"
)]
#[post("/delete_comment/{id}/")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    user: CurrentUser,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let comment = state
        .news
        .delete_comment(user.id(), CommentId::new(id.into_inner()))
        .await?;
    Ok(redirect(comments_anchor(comment.news)))
}

/// Register the news views.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(detail)
        .service(add_comment)
        .service(edit_comment_page)
        .service(edit_comment)
        .service(delete_comment_page)
        .service(delete_comment);
}
