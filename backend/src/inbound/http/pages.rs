//! Page contexts and response helpers shared by the views.
//!
//! Every view answers with one of three shapes: a `200` JSON context, a
//! `302` redirect after a successful mutation, or an error handled by the
//! [`ResponseError`](actix_web::ResponseError) adapter.

use actix_web::HttpResponse;
use actix_web::http::header;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::ports::NewsDetail;
use crate::domain::{Comment, Error, FormErrors, News, Note, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::FormContext;

/// Home page of either site.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeContext {
    /// Signed-in user, `null` for anonymous visitors.
    pub user: Option<User>,
}

/// Notes owned by the requester.
#[derive(Debug, Serialize, ToSchema)]
pub struct NoteListContext {
    pub object_list: Vec<Note>,
}

/// Single note (detail and delete confirmation).
#[derive(Debug, Serialize, ToSchema)]
pub struct NoteContext {
    pub note: Note,
}

/// Page holding a single form.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormPage {
    pub form: FormContext,
}

/// Login page; `next` is echoed so the form can post it back.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPage {
    pub form: FormContext,
    pub next: Option<String>,
}

/// Plain confirmation page.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessagePage {
    pub message: String,
}

/// News home page.
#[derive(Debug, Serialize, ToSchema)]
pub struct NewsListContext {
    pub news_list: Vec<News>,
    /// Link to the following page, absent on the last page.
    pub next: Option<String>,
}

/// News detail with its comments.
#[derive(Debug, Serialize, ToSchema)]
pub struct NewsDetailContext {
    pub news: NewsDetail,
    /// Comment form, only for signed-in users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormContext>,
}

/// Single comment (edit and delete confirmation).
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentContext {
    pub comment: Comment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormContext>,
}

/// `200 OK` with `context` as JSON.
pub(crate) fn render<T: Serialize>(context: &T) -> HttpResponse {
    HttpResponse::Ok().json(context)
}

/// `302 Found` to `location`.
pub(crate) fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

/// Turn a validation failure into a re-rendered page; pass other errors on.
pub(crate) fn rerender_invalid<F>(error: Error, page: F) -> ApiResult<HttpResponse>
where
    F: FnOnce(FormErrors) -> ApiResult<HttpResponse>,
{
    match error.form_errors() {
        Some(errors) => page(errors),
        None => Err(error),
    }
}

/// Whether `target` stays on this site.
///
/// Only absolute paths are accepted; scheme-relative (`//host`) and
/// backslash tricks are refused. Browsers drop tabs and newlines from a
/// `Location`, so whitespace and control characters are refused as well.
pub(crate) fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target
            .chars()
            .any(|c| c == '\\' || c.is_whitespace() || c.is_control())
}
