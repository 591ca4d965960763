//! Personal notes views.
//!
//! ```text
//! GET  /                      home, anonymous allowed
//! GET  /notes/                own notes
//! GET  /add/  POST /add/      create
//! GET  /done/                 success page
//! GET  /note/{slug}/          detail
//! GET  /edit/{slug}/  POST    edit
//! GET  /delete/{slug}/ POST   delete
//! ```
//!
//! Everything except the home page needs a signed-in user; notes belonging
//! to someone else answer `404`.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, FormErrors, NoteDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{FormContext, NoteForm};
use crate::inbound::http::pages::{
    FormPage, HomeContext, MessagePage, NoteContext, NoteListContext, redirect, render,
    rerender_invalid,
};
use crate::inbound::http::session::{CurrentUser, MaybeUser};
use crate::inbound::http::state::HttpState;

/// Where successful mutations land.
pub const SUCCESS_PATH: &str = "/done/";

fn validate(form: &NoteForm) -> Result<NoteDraft, Error> {
    NoteDraft::validate(&form.title, &form.text, &form.slug).map_err(Error::validation)
}

fn form_page(form: &NoteForm, errors: FormErrors) -> ApiResult<HttpResponse> {
    Ok(render(&FormPage {
        form: form.context().with_errors(errors),
    }))
}

/// Home page of the notes site.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home page", body = HomeContext)),
    tags = ["notes"],
    operation_id = "notesHome",
    security([])
)]
#[get("/")]
pub async fn home(state: web::Data<HttpState>, user: MaybeUser) -> ApiResult<HttpResponse> {
    let user = match user.0 {
        Some(id) => state.accounts.find_user(&id).await?,
        None => None,
    };
    Ok(render(&HomeContext { user }))
}

/// Notes written by the requester.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "Own notes", body = NoteListContext),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes/")]
pub async fn list(state: web::Data<HttpState>, user: CurrentUser) -> ApiResult<HttpResponse> {
    let object_list = state.notes_query.list(user.id()).await?;
    Ok(render(&NoteListContext { object_list }))
}

/// Empty note form.
#[utoipa::path(
    get,
    path = "/add/",
    responses(
        (status = 200, description = "Note form", body = FormPage),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "addNotePage"
)]
#[get("/add/")]
pub async fn add_page(_user: CurrentUser) -> HttpResponse {
    render(&FormPage {
        form: FormContext::blank(),
    })
}

/// Create a note; a blank slug is derived from the title.
#[utoipa::path(
    post,
    path = "/add/",
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Created; redirect to the success page"),
        (status = 200, description = "Form re-rendered with errors", body = FormPage)
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/add/")]
pub async fn add(
    state: web::Data<HttpState>,
    user: CurrentUser,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let outcome = match validate(&form) {
        Ok(draft) => state.notes.create(user.id(), draft).await.map(|_| ()),
        Err(error) => Err(error),
    };
    match outcome {
        Ok(()) => Ok(redirect(SUCCESS_PATH)),
        Err(error) => rerender_invalid(error, |errors| form_page(&form, errors)),
    }
}

/// Confirmation shown after a create, edit or delete.
#[utoipa::path(
    get,
    path = "/done/",
    responses((status = 200, description = "Success page", body = MessagePage)),
    tags = ["notes"],
    operation_id = "notesDone"
)]
#[get("/done/")]
pub async fn done(_user: CurrentUser) -> HttpResponse {
    render(&MessagePage {
        message: "Успешно!".to_owned(),
    })
}

/// A single note of the requester.
#[utoipa::path(
    get,
    path = "/note/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note", body = NoteContext),
        (status = 404, description = "Missing or not owned", body = Error)
    ),
    tags = ["notes"],
    operation_id = "noteDetail"
)]
#[get("/note/{slug}/")]
pub async fn detail(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let note = state.notes_query.get_owned(user.id(), &slug).await?;
    Ok(render(&NoteContext { note }))
}

/// Note form prefilled for editing.
#[utoipa::path(
    get,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Prefilled form", body = FormPage),
        (status = 404, description = "Missing or not owned", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNotePage"
)]
#[get("/edit/{slug}/")]
pub async fn edit_page(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let note = state.notes_query.get_owned(user.id(), &slug).await?;
    Ok(render(&FormPage {
        form: NoteForm::from_note(&note).context(),
    }))
}

/// Apply an edit; the author never changes.
#[utoipa::path(
    post,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Saved; redirect to the success page"),
        (status = 200, description = "Form re-rendered with errors", body = FormPage),
        (status = 404, description = "Missing or not owned", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[post("/edit/{slug}/")]
pub async fn edit(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    // Strangers get 404 before their submission is looked at.
    state.notes_query.get_owned(user.id(), &slug).await?;
    let form = form.into_inner();
    let outcome = match validate(&form) {
        Ok(draft) => state.notes.update(user.id(), &slug, draft).await.map(|_| ()),
        Err(error) => Err(error),
    };
    match outcome {
        Ok(()) => Ok(redirect(SUCCESS_PATH)),
        Err(error) => rerender_invalid(error, |errors| form_page(&form, errors)),
    }
}

/// Deletion confirmation.
#[utoipa::path(
    get,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Confirmation page", body = NoteContext),
        (status = 404, description = "Missing or not owned", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNotePage"
)]
#[get("/delete/{slug}/")]
pub async fn delete_page(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let note = state.notes_query.get_owned(user.id(), &slug).await?;
    Ok(render(&NoteContext { note }))
}

/// Delete a note.
#[utoipa::path(
    post,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted; redirect to the success page"),
        (status = 404, description = "Missing or not owned", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[post("/delete/{slug}/")]
pub async fn delete(
    state: web::Data<HttpState>,
    user: CurrentUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.notes.delete(user.id(), &slug).await?;
    Ok(redirect(SUCCESS_PATH))
}

/// Register the notes views.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(list)
        .service(add_page)
        .service(add)
        .service(done)
        .service(detail)
        .service(edit_page)
        .service(edit)
        .service(delete_page)
        .service(delete);
}
