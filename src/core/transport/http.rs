//! HTTP transport implementation.
//!
//! Serves the discovery routes held in a [`RouteTable`] over HTTP. Routes are
//! resolved per request rather than baked into the axum router, so resources
//! declared after the listener starts are reachable as soon as the registry
//! binds them.

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use http::{HeaderMap, Method, StatusCode, Uri};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::RouteTable;
use crate::domains::catalog::DiscoveryRequest;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    routes: RouteTable,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Build the axum router serving `routes`.
    pub fn router(&self, routes: RouteTable) -> Router {
        let mut app = Router::new()
            .route("/health", get(health_check))
            .fallback(handle_discovery)
            .with_state(AppState { routes })
            .layer(TraceLayer::new_for_http());

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, routes: RouteTable) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());

        let addr = self.address();
        let paths = routes.paths();
        let app = self.router(routes);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        for path in &paths {
            info!("  → Discovery: GET {}", path);
        }
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Resolve the request path against the route table.
#[instrument(skip_all, fields(path = %uri.path()))]
async fn handle_discovery(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path();

    if !state.routes.contains(path) {
        return error_response(StatusCode::NOT_FOUND, format!("No discovery route for {}", path));
    }

    if method != Method::GET {
        return error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("{} is not supported on discovery routes", method),
        );
    }

    match state.routes.dispatch(path, &discovery_request(&headers)) {
        Some(Ok(document)) => (StatusCode::OK, Json(document)).into_response(),
        Some(Err(e)) => {
            error!("Failed to render discovery document: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        None => error_response(StatusCode::NOT_FOUND, format!("No discovery route for {}", path)),
    }
}

/// Copy the request headers the catalog may read.
fn discovery_request(headers: &HeaderMap) -> DiscoveryRequest {
    headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .fold(DiscoveryRequest::new(), |request, (name, value)| {
            request.header_value(name, value)
        })
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::{
        DiscoveryOptions, Operation, Registry, ResourceOptions, declare_all_resources,
    };
    use axum::body::Body;
    use http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn transport() -> HttpTransport {
        HttpTransport::new(HttpConfig::default())
    }

    async fn get_json(app: Router, path: &str, host: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(path);
        if let Some(host) = host {
            builder = builder.header("host", host);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_catalog_served_with_request_host() {
        let routes = RouteTable::new();
        let registry = Registry::new();
        registry.configure(Arc::new(routes.clone()), DiscoveryOptions::default());
        declare_all_resources(&registry);

        let app = transport().router(routes);
        let (status, body) = get_json(app, "/resources.json", Some("docs.local:8080")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["swaggerVersion"], "1.0");
        assert_eq!(body["basePath"], "http://docs.local:8080");
        assert_eq!(
            body["apis"],
            json!([
                {"path": "/pet", "description": ""},
                {"path": "/store", "description": ""}
            ])
        );
    }

    #[tokio::test]
    async fn test_resource_declared_after_router_is_served() {
        let routes = RouteTable::with_version("4.0.0");
        let registry = Registry::new();
        registry.configure(
            Arc::new(routes.clone()),
            DiscoveryOptions::new()
                .swagger_path("/docs")
                .base_path("http://api.test"),
        );
        let app = transport().router(routes);

        let users = registry.create_resource(
            "/users",
            ResourceOptions::new().model("User", json!({"id": "User"})),
        );
        users.get("/users", Some("List users"), Operation::new().response_class("List[User]"));

        let (status, body) = get_json(app, "/docs/users", Some("ignored.host")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "swaggerVersion": "1.0",
                "apiVersion": "4.0.0",
                "basePath": "http://api.test",
                "resourcePath": "/users",
                "apis": [{
                    "path": "/users",
                    "description": "",
                    "operations": [{
                        "httpMethod": "GET",
                        "summary": "List users",
                        "responseClass": "List[User]"
                    }]
                }],
                "models": {"User": {"id": "User"}}
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = transport().router(RouteTable::new());
        let (status, body) = get_json(app, "/missing.json", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("/missing.json"));
    }

    #[tokio::test]
    async fn test_non_get_is_rejected() {
        let routes = RouteTable::new();
        Registry::new().configure(Arc::new(routes.clone()), DiscoveryOptions::default());

        let response = transport()
            .router(routes)
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/resources.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_dropped_registry_is_server_error() {
        let routes = RouteTable::new();
        {
            let registry = Registry::new();
            registry.configure(Arc::new(routes.clone()), DiscoveryOptions::default());
        }

        let (status, _) = get_json(transport().router(routes), "/resources.json", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get_json(transport().router(RouteTable::new()), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[test]
    fn test_discovery_request_copies_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("host", "example.org".parse().unwrap());
        let request = discovery_request(&headers);
        assert_eq!(request.host(), Some("example.org"));
    }
}
