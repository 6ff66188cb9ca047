mod cli;

pub use cli::ServeOptions;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRequest, Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use scaffold_core::models::CatalogEntry;
use scaffold_core::request::GenerateBody;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::dispatcher::Dispatcher;
use crate::prelude::{eprintln, *};
use crate::providers::Registry;

#[derive(Debug, Serialize)]
struct GenerateResponse {
    result: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProvidersResponse {
    providers: Vec<CatalogEntry>,
}

/// Generation body sent either as JSON or as an urlencoded form
struct Payload(GenerateBody);

impl<S: Send + Sync> FromRequest<S> for Payload {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(body) = Form::<GenerateBody>::from_request(req, state)
                .await
                .map_err(|rejection| rejection_response(rejection.status(), rejection.body_text()))?;
            return Ok(Payload(body));
        }

        let Json(body) = Json::<GenerateBody>::from_request(req, state)
            .await
            .map_err(|rejection| rejection_response(rejection.status(), rejection.body_text()))?;
        Ok(Payload(body))
    }
}

pub async fn run(options: ServeOptions, global: crate::Global) -> Result<()> {
    let dispatcher = Arc::new(Dispatcher::new(Registry::from_endpoints(
        &options.endpoints,
    )));

    let app_router = router(dispatcher, &options)?;
    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!("Generate endpoint: http://{}/api/generate", addr);
        if let Some(dir) = &options.static_dir {
            eprintln!("Serving front-end from {}", dir.display());
        }
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server running on port {}", options.port);

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

/// Build the application router.
///
/// `/api/*` routes are always present; the static front-end is mounted as the
/// fallback only when `options.static_dir` is set, with unknown paths
/// answered by its `index.html`.
pub fn router(dispatcher: Arc<Dispatcher>, options: &ServeOptions) -> Result<Router> {
    let cors = cors_layer(&options.cors_origins)?;

    let mut app_router = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/api/providers", get(providers_handler))
        .layer(DefaultBodyLimit::max(options.body_limit))
        .with_state(dispatcher);

    if let Some(dir) = &options.static_dir {
        let index = ServeFile::new(dir.join("index.html"));
        app_router = app_router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    Ok(app_router.layer(cors))
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| eyre!("Invalid CORS origin {}: {}", origin, e))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

async fn generate_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    Payload(body): Payload,
) -> Response {
    match dispatcher.generate(body).await {
        Ok(result) => Json(GenerateResponse { result }).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn providers_handler(State(dispatcher): State<Arc<Dispatcher>>) -> Json<ProvidersResponse> {
    Json(ProvidersResponse {
        providers: dispatcher
            .providers()
            .into_iter()
            .map(CatalogEntry::new)
            .collect(),
    })
}

/// Unreadable bodies are a 400, except oversized ones which keep their 413.
fn rejection_response(status: StatusCode, message: String) -> Response {
    let status = match status {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    };

    let body = ErrorResponse {
        error: message,
        details: None,
    };

    (status, Json(body)).into_response()
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            let body = ErrorResponse {
                error: self.to_string(),
                details: None,
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        let body = ErrorResponse {
            error: "Failed to generate code".to_string(),
            details: Some(self.to_string()),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::StubAdapter;
    use crate::providers::ProviderEndpoints;
    use scaffold_core::request::Provider;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn options() -> ServeOptions {
        ServeOptions {
            port: 0,
            host: "127.0.0.1".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            body_limit: 1024,
            static_dir: None,
            endpoints: ProviderEndpoints::default(),
        }
    }

    fn dispatcher() -> Arc<Dispatcher> {
        let registry = Registry::new()
            .with(Arc::new(StubAdapter::ok(
                Provider::OpenAI,
                "```python:app.py\nprint(1)\n```",
            )))
            .with(Arc::new(StubAdapter::failing(
                Provider::Anthropic,
                "Anthropic API error: Overloaded",
            )));
        Arc::new(Dispatcher::new(registry))
    }

    async fn spawn(app_router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app_router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn post_generate(base: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_generate_ok() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let (status, body) = post_generate(
            &base,
            json!({"prompt": "p", "model": "gpt-4o", "apiKey": "sk", "provider": "openai"}),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body, json!({"result": "```python:app.py\nprint(1)\n```"}));
    }

    #[tokio::test]
    async fn test_generate_missing_parameters() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let (status, body) = post_generate(&base, json!({"prompt": "p"})).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({"error": "Missing required parameters"}));
    }

    #[tokio::test]
    async fn test_generate_unavailable_provider() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let (status, body) = post_generate(
            &base,
            json!({"prompt": "p", "model": "command", "apiKey": "k", "provider": "cohere"}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(
            body["error"],
            "Cohere models are not available on this server."
        );
    }

    #[tokio::test]
    async fn test_generate_provider_failure() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let (status, body) = post_generate(
            &base,
            json!({"prompt": "p", "model": "claude", "apiKey": "k", "provider": "anthropic"}),
        )
        .await;

        assert_eq!(status, 500);
        assert_eq!(
            body,
            json!({"error": "Failed to generate code", "details": "Anthropic API error: Overloaded"})
        );
    }

    #[tokio::test]
    async fn test_generate_malformed_json() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_generate_body_too_large() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let (status, _) = post_generate(
            &base,
            json!({"prompt": "x".repeat(4096), "model": "m", "apiKey": "k", "provider": "openai"}),
        )
        .await;

        assert_eq!(status, 413);
    }

    #[tokio::test]
    async fn test_providers_lists_registered_adapters() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let body: Value = reqwest::get(format!("{base}/api/providers"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["providers"][0]["id"], "openai");
        assert_eq!(body["providers"][0]["name"], "OpenAI");
        assert_eq!(
            body["providers"][0]["models"][0],
            json!({"id": "gpt-4o", "name": "GPT-4o"})
        );
        assert_eq!(body["providers"][1]["id"], "anthropic");
        assert_eq!(body["providers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_accepts_form_body() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .header("content-type", "application/x-www-form-urlencoded")
            .body("prompt=p&model=gpt-4o&apiKey=sk&provider=openai")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"result": "```python:app.py\nprint(1)\n```"}));
    }

    #[tokio::test]
    async fn test_generate_form_missing_fields() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/api/generate"))
            .header("content-type", "application/x-www-form-urlencoded")
            .body("prompt=p&provider=openai")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Missing required parameters"}));
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/providers"))
            .header("origin", "http://localhost:3000")
            .send()
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }

    #[tokio::test]
    async fn test_cors_ignores_other_origins() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let response = reqwest::Client::new()
            .get(format!("{base}/api/providers"))
            .header("origin", "https://evil.example")
            .send()
            .await
            .unwrap();

        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }

    #[test]
    fn test_invalid_cors_origin() {
        let mut options = options();
        options.cors_origins = vec!["bad\norigin".to_string()];

        assert!(router(dispatcher(), &options).is_err());
    }

    #[tokio::test]
    async fn test_static_fallback_serves_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('app')").unwrap();

        let mut options = options();
        options.static_dir = Some(dir.path().to_path_buf());
        let base = spawn(router(dispatcher(), &options).unwrap()).await;

        let asset = reqwest::get(format!("{base}/app.js")).await.unwrap();
        assert_eq!(asset.text().await.unwrap(), "console.log('app')");

        let route = reqwest::get(format!("{base}/projects/42")).await.unwrap();
        assert_eq!(route.status().as_u16(), 200);
        assert_eq!(route.text().await.unwrap(), "<div id=\"root\"></div>");
    }

    #[tokio::test]
    async fn test_no_static_dir_returns_404() {
        let base = spawn(router(dispatcher(), &options()).unwrap()).await;

        let response = reqwest::get(format!("{base}/projects/42")).await.unwrap();
        assert_eq!(response.status().as_u16(), 404);
    }
}
