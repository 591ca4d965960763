//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] carries the views every deployment serves (authentication and
//! health probes). The notes and news views both own `/`, so each site's
//! views live in their own document and [`ApiDoc::for_site`] merges the one
//! that is actually mounted.
//!
//! The generated document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::NewsDetail;
use crate::domain::{Comment, Error, ErrorCode, FormErrors, News, Note, User};
use crate::inbound::http::forms::{CommentForm, FormContext, LoginForm, NoteForm, SignupForm};
use crate::inbound::http::pages::{
    CommentContext, FormPage, HomeContext, LoginPage, MessagePage, NewsDetailContext,
    NewsListContext, NoteContext, NoteListContext,
};
use crate::settings::Site;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

/// Shared part of the API document.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Noticeboard",
        description = "Personal notes or a commented news feed behind cookie sessions. \
                       Views answer with JSON page contexts; forms post urlencoded bodies."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::signup_page,
        crate::inbound::http::accounts::signup,
        crate::inbound::http::accounts::login_page,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FormErrors,
        FormContext,
        FormPage,
        LoginPage,
        MessagePage,
        HomeContext,
        User,
        SignupForm,
        LoginForm,
    )),
    tags(
        (name = "auth", description = "Signup, login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::notes::home,
        crate::inbound::http::notes::list,
        crate::inbound::http::notes::add_page,
        crate::inbound::http::notes::add,
        crate::inbound::http::notes::done,
        crate::inbound::http::notes::detail,
        crate::inbound::http::notes::edit_page,
        crate::inbound::http::notes::edit,
        crate::inbound::http::notes::delete_page,
        crate::inbound::http::notes::delete,
    ),
    components(schemas(Note, NoteForm, NoteContext, NoteListContext)),
    tags((name = "notes", description = "Per-user notes addressed by slug"))
)]
struct NotesApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::news::home,
        crate::inbound::http::news::detail,
        crate::inbound::http::news::add_comment,
        crate::inbound::http::news::edit_comment_page,
        crate::inbound::http::news::edit_comment,
        crate::inbound::http::news::delete_comment_page,
        crate::inbound::http::news::delete_comment,
    ),
    components(schemas(
        News,
        NewsDetail,
        Comment,
        CommentForm,
        CommentContext,
        NewsListContext,
        NewsDetailContext,
    )),
    tags((name = "news", description = "News feed and comments"))
)]
struct NewsApi;

impl ApiDoc {
    /// Full document for the views mounted by `site`.
    ///
    /// # Examples
    /// ```
    /// use noticeboard::ApiDoc;
    /// use noticeboard::settings::Site;
    ///
    /// let doc = ApiDoc::for_site(Site::News);
    /// assert!(doc.paths.paths.contains_key("/news/{id}/"));
    /// ```
    #[must_use]
    pub fn for_site(site: Site) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        match site {
            Site::Notes => doc.merge(NotesApi::openapi()),
            Site::News => doc.merge(NewsApi::openapi()),
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    //! Tests verifying the merged documents and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(Site::Notes, "/edit/{slug}/", "/news/{id}/")]
    #[case(Site::News, "/delete_comment/{id}/", "/notes/")]
    fn site_document_only_lists_mounted_views(
        #[case] site: Site,
        #[case] present: &str,
        #[case] absent: &str,
    ) {
        let doc = ApiDoc::for_site(site);
        assert!(doc.paths.paths.contains_key(present));
        assert!(doc.paths.paths.contains_key("/auth/login/"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
        assert!(!doc.paths.paths.contains_key(absent));
    }

    #[test]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
