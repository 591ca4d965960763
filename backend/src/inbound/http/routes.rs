//! Route table for the selected site.
//!
//! Authentication views are mounted for both sites; the notes or the news
//! views own `/` depending on [`Site`].

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::settings::Site;

use super::state::HttpState;
use super::{accounts, news, notes};

/// Register the views of `site` plus the authentication views.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use noticeboard::inbound::http::routes::configure_site;
/// use noticeboard::settings::Site;
///
/// let _app = App::new().configure(|cfg: &mut web::ServiceConfig| configure_site(cfg, Site::News));
/// ```
pub fn configure_site(cfg: &mut web::ServiceConfig, site: Site) {
    cfg.configure(accounts::configure);
    match site {
        Site::Notes => cfg.configure(notes::configure),
        Site::News => cfg.configure(news::configure),
    };
}

/// Assemble the application for `site` with session and trace middleware.
///
/// Further services registered on the returned [`App`] (health probes, API
/// docs) sit behind the same middleware.
pub fn site_app(
    state: web::Data<HttpState>,
    session: SessionMiddleware<CookieSessionStore>,
    site: Site,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(|cfg| configure_site(cfg, site))
        .wrap(session)
        .wrap(Trace)
}
