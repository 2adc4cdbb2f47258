//! HTTP host for the server: mounts module routers under a shared middleware
//! stack, adds the ambient endpoints and owns the listening socket.

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::http::StatusCode;
use axum::{middleware::from_fn, routing::get, Router, ServiceExt};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Owns the HTTP server: builds the outer router and serves it.
#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Wrap the module routes with the ambient endpoints and the middleware stack.
    pub fn build_router(&self, modules: Router) -> Router {
        tracing::debug!("Building ingress router");

        let mut router = modules
            .route("/health", get(web::health_check))
            .route("/ping", get(web::ping))
            .route("/headers", get(web::echo_headers));

        // Layers are listed innermost first; the last one added sees the request first.
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        let x_request_id = request_id::header();
        router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.request_timeout,
            ))
            .layer(CatchPanicLayer::custom(web::panic_response))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// `/users/` and `/users` route the same; trimming has to happen before routing,
    /// so it wraps the router instead of being a `Router::layer`.
    pub fn normalize(router: Router) -> NormalizePath<Router> {
        NormalizePathLayer::trim_trailing_slash().layer(router)
    }

    /// Bind `bind_addr` and serve until `cancel` fires.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{}'", self.config.bind_addr))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        Self::serve_on(listener, router, cancel).await
    }

    /// Serve on an already bound listener (graceful shutdown on cancel).
    pub async fn serve_on(
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        let app = Self::normalize(router);
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")
    }
}
