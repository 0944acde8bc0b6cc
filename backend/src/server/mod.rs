//! Server construction and middleware wiring.

mod config;

pub use config::{AppConfig, ConfigError};

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};

use placeholder_backend::inbound::http::health::{live, ready, HealthState};
use placeholder_backend::inbound::http::refresh::run_refresh;
use placeholder_backend::inbound::http::users::{
    create_user, delete_all_users, delete_user, get_user, list_users,
};
use placeholder_backend::inbound::http::HttpState;
use placeholder_backend::Trace;
#[cfg(debug_assertions)]
use placeholder_backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Bind the HTTP server and return it ready to be awaited.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the listener cannot bind.
pub fn run(
    config: &AppConfig,
    http_state: HttpState,
    health_state: web::Data<HealthState>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server = HttpServer::new(move || {
        let api = web::scope("/api/v1")
            .service(run_refresh)
            .service(list_users)
            .service(get_user)
            .service(create_user)
            .service(delete_user)
            .service(delete_all_users);

        let app = App::new()
            .app_data(health_state.clone())
            .app_data(http_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(config.bind_addr)?
    .run();
    Ok(server)
}
