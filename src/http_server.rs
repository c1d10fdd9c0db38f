use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::IconError;
use crate::gateway::IconGateway;
use crate::models::GenerationRequest;
use crate::styles::{self, StylePreset};

#[derive(Clone)]
pub struct AppState {
    pub gateway: IconGateway,
}

impl IntoResponse for IconError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

/// Any origin; GET/OPTIONS/POST. OPTIONS on any path is answered here with an empty 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn create_server(gateway: IconGateway) -> Router {
    let state = AppState { gateway };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/styles", get(list_styles))
        .route(
            "/api/generate",
            post(handle_generate).fallback(method_not_allowed),
        )
        .layer(cors_layer())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_styles() -> Json<&'static [StylePreset]> {
    Json(styles::get_styles())
}

async fn method_not_allowed(method: Method) -> (StatusCode, Json<Value>) {
    warn!("Rejected {} on /api/generate", method);
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

async fn handle_generate(State(state): State<AppState>, body: Bytes) -> Response {
    let request_id = uuid::Uuid::new_v4();

    info!("[{}] 📥 Generation request received | Body length: {}", request_id, body.len());

    let request: GenerationRequest = if body.iter().all(u8::is_ascii_whitespace) {
        GenerationRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                error!("[{}] ❌ Failed to parse request body: {}", request_id, e);
                return IconError::Validation("Request body must be valid JSON".to_string())
                    .into_response();
            }
        }
    };

    debug!(
        "[{}] 📝 Generation request: prompt='{}' style='{}' colors={:?}",
        request_id, request.theme, request.style, request.colors
    );

    match state.gateway.generate(request).await {
        Ok(response) => {
            info!("[{}] ✅ Returning {} icons", request_id, response.icons.len());
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("[{}] ❌ Generation error ({}): {}", request_id, e.status_code(), e);
            e.into_response()
        }
    }
}

pub async fn start_http_server(config: Config) -> Result<()> {
    let app = create_server(IconGateway::from_config(&config));
    let port = config.port;

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port))
        .await
        .map_err(|e| anyhow!("Failed to bind to port {}: {}", port, e))?;

    info!("HTTP server starting on port {}", port);
    info!("Generation endpoint: http://0.0.0.0:{}/api/generate", port);
    info!("Health endpoint: http://0.0.0.0:{}/api/health", port);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
