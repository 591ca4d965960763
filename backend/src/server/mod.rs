//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{build_health_state, build_http_state};

use actix_web::HttpServer;
use actix_web::dev::Server;
use tracing::info;

use noticeboard::inbound::http::health::{live, ready};
use noticeboard::inbound::http::routes::site_app;
#[cfg(debug_assertions)]
use noticeboard::ApiDoc;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Construct an Actix HTTP server for the configured site.
///
/// Readiness flips to ready once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let health_state = build_health_state(&config);
    let server_health_state = health_state.clone();
    let ServerConfig {
        session,
        bind_addr,
        site,
        ..
    } = config;
    session.log_summary();

    let server = HttpServer::new(move || {
        let app = site_app(http_state.clone(), session.middleware(), site)
            .app_data(server_health_state.clone())
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::for_site(site)),
        );

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, %site, "noticeboard listening");
    health_state.mark_ready();
    Ok(server)
}
