//! Server construction and middleware wiring.

mod config;
pub mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use catalog::Trace;
#[cfg(debug_assertions)]
use catalog::doc::ApiDoc;
use catalog::inbound::http::configure;
use catalog::inbound::http::health::{HealthState, live, ready};
use catalog::inbound::http::state::HttpState;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over the configured store.
///
/// Signal handling is left to the caller, which should call [`drain`] on
/// shutdown.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .disable_signals()
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness, then stop accepting connections and let in-flight
/// requests finish.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    //! Bootstrap coverage: readiness signalling and the assembled app.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready(health_state: web::Data<HealthState>) {
        assert!(!health_state.is_ready(), "state should start unready");
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("address"));
        let _server = create_server(health_state.clone(), config).expect("server should build");
        assert!(health_state.is_ready(), "server creation should mark readiness");
    }

    #[rstest]
    #[actix_rt::test]
    async fn drain_fails_liveness_and_stops_the_server(health_state: web::Data<HealthState>) {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("address"));
        let server = create_server(health_state.clone(), config).expect("server should build");
        let handle = server.handle();
        let running = actix_rt::spawn(server);

        drain(health_state.clone(), handle).await;

        assert!(!health_state.is_alive(), "draining should fail liveness");
        running
            .await
            .expect("server task should join")
            .expect("server should stop cleanly");
    }

    #[rstest]
    #[actix_rt::test]
    async fn assembled_app_serves_pages_with_trace_ids(health_state: web::Data<HealthState>) {
        let config = ServerConfig::new("127.0.0.1:0".parse().expect("address"));
        let app = test::init_service(build_app(health_state, build_http_state(&config))).await;

        let saved = test::call_service(
            &app,
            test::TestRequest::get().uri("/article/save").to_request(),
        )
        .await;
        assert_eq!(saved.status(), StatusCode::OK);
        assert!(saved.headers().contains_key("trace-id"));

        let probe = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(probe.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
