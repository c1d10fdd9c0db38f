//! Single-request transport.
//!
//! Drives exactly one request through the same router the long-running server
//! uses, then renders the response in CGI form (`Status:` line, headers, blank
//! line, body).

use anyhow::{anyhow, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use log::{debug, info};
use tower::ServiceExt;

use crate::config::Config;
use crate::gateway::IconGateway;
use crate::http_server::create_server;

pub const DEFAULT_PATH: &str = "/api/generate";

/// A fully buffered response
#[derive(Debug, Clone)]
pub struct OnceResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Build the router from the environment as it is at invocation time
pub fn router_from_env() -> Result<Router> {
    let config = Config::from_env()?;
    info!("🔑 Replicate API token: {}", config.masked_token());
    Ok(create_server(IconGateway::from_config(&config)))
}

pub async fn handle_once(router: Router, method: &str, path: &str, body: Vec<u8>) -> Result<OnceResponse> {
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|e| anyhow!("Invalid request method '{}': {}", method, e))?;
    let path = if path.is_empty() { DEFAULT_PATH } else { path };

    debug!("Handling single {} {} | Body length: {}", method, path, body.len());

    let request = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;

    let response = router
        .oneshot(request)
        .await
        .map_err(|e| anyhow!("Request failed: {}", e))?;

    buffer(response).await
}

async fn buffer(response: Response<Body>) -> Result<OnceResponse> {
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| anyhow!("Failed to read response body: {}", e))?
        .to_vec();

    Ok(OnceResponse { status, headers, body })
}

impl OnceResponse {
    pub fn to_cgi(&self) -> Vec<u8> {
        let mut output = format!(
            "Status: {} {}\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        );
        for (name, value) in &self.headers {
            output.push_str(&format!("{}: {}\r\n", name, value));
        }
        output.push_str("\r\n");

        let mut bytes = output.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::MockProvider;
    use crate::image_gen::ImageProvider;
    use std::sync::Arc;

    fn router(provider: Option<Arc<MockProvider>>) -> Router {
        create_server(IconGateway::new(provider.map(|p| p as Arc<dyn ImageProvider>)))
    }

    #[tokio::test]
    async fn test_options_returns_empty_200_with_cors() {
        let response = handle_once(router(None), "OPTIONS", "/api/generate", Vec::new())
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.is_empty());
        assert!(response
            .headers
            .iter()
            .any(|(k, v)| k == "access-control-allow-origin" && v == "*"));
    }

    #[tokio::test]
    async fn test_post_generates_through_shared_gateway() {
        let provider = Arc::new(MockProvider::new());
        let response = handle_once(
            router(Some(provider.clone())),
            "POST",
            "",
            br#"{"prompt":"Food","style":"Clay Cute"}"#.to_vec(),
        )
        .await
        .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
        assert_eq!(body["icons"].as_array().unwrap().len(), 4);
        assert_eq!(provider.calls(), 4);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let response = handle_once(
            router(None),
            "POST",
            "/api/generate",
            br#"{"prompt":"Food","style":"Clay Cute"}"#.to_vec(),
        )
        .await
        .unwrap();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_put_is_405() {
        let response = handle_once(router(None), "PUT", "/api/generate", Vec::new())
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_to_cgi_format() {
        let response = OnceResponse {
            status: StatusCode::BAD_REQUEST,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: br#"{"error":"x"}"#.to_vec(),
        };
        let cgi = String::from_utf8(response.to_cgi()).unwrap();
        assert_eq!(
            cgi,
            "Status: 400 Bad Request\r\ncontent-type: application/json\r\n\r\n{\"error\":\"x\"}"
        );
    }
}
