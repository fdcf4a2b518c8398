//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::Trace;
use crate::inbound::http::handles::{check_handle, suggest_handles};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::profiles::{current_profile, register_profile};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryProfileRepository;

/// Assemble the application state shared by all workers.
#[must_use]
pub fn build_state() -> HttpState {
    HttpState::new(Arc::new(InMemoryProfileRepository::new()))
}

/// Build the application: session middleware on the API scope, trace
/// correlation everywhere, health probes, and Swagger UI in debug builds.
pub fn build_app(
    state: HttpState,
    health: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(check_handle)
        .service(suggest_handles)
        .service(register_profile)
        .service(current_profile);

    let mut app = App::new()
        .app_data(web::Data::new(state))
        .app_data(health)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Bind and run the HTTP server, flipping readiness once bound.
///
/// # Errors
/// Returns [`std::io::Error`] when binding fails or metrics registration
/// (behind the `metrics` feature) cannot be set up.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = build_state();
    let health = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health = health.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = metrics::build()?;

    let server = HttpServer::new(move || {
        let app = build_app(
            state.clone(),
            server_health.clone(),
            key.clone(),
            cookie_secure,
            same_site,
        );
        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());
        app
    })
    .bind(bind_addr)?;

    health.mark_ready();
    server.run().await
}
