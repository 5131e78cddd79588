// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod api;
mod extract;
mod state;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use serde_json::json;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Fallible;
use crate::server::api::average_handler;
use crate::server::api::cgpa_handler;
use crate::server::api::sgpa_handler;
use crate::server::extract::extract_handler;
use crate::server::state::ServerState;

/// Room for the JSON envelope around a base64 image.
const BODY_OVERHEAD: usize = 64 * 1024;

pub async fn start_server(config: Config) -> Fallible<()> {
    let state = ServerState::new(&config)?;
    let app = router(state);
    let bind = config.server.bind.as_str();

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    println!("Listening on http://{bind}/");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: ServerState) -> Router {
    let limit = body_limit(state.max_image_bytes);
    let app = Router::new();
    let app = app.route("/api/extract-cgpa", post(extract_handler));
    let app = app.route("/api/cgpa", post(cgpa_handler));
    let app = app.route("/api/sgpa", post(sgpa_handler));
    let app = app.route("/api/sgpa/average", post(average_handler));
    let app = app.fallback(not_found_handler);
    let app = app.layer(DefaultBodyLimit::max(limit));
    app.with_state(state)
}

/// Largest request body that can still carry an image of `max_image_bytes`
/// once base64-encoded.
fn body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(BODY_OVERHEAD)
}

pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::debug!("Shutting down.");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::extract::State;
    use axum::http::HeaderMap;
    use serde_json::Value;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use super::*;
    use crate::config::ExtractionConfig;
    use crate::config::ServerConfig;

    const API_KEY: &str = "test-key";

    #[derive(Clone)]
    struct Upstream {
        status: StatusCode,
        body: String,
    }

    async fn upstream_handler(
        State(upstream): State<Upstream>,
        headers: HeaderMap,
    ) -> (StatusCode, String) {
        let authorized = headers
            .get("x-goog-api-key")
            .is_some_and(|key| key == API_KEY);
        if !authorized {
            return (StatusCode::UNAUTHORIZED, String::new());
        }
        (upstream.status, upstream.body)
    }

    /// Starts a fake Gemini API that answers every request with `body`.
    async fn spawn_upstream(status: StatusCode, body: String) -> String {
        let port = portpicker::pick_unused_port().unwrap();
        let listener = TcpListener::bind(("127.0.0.1", port)).await.unwrap();
        let app = Router::new()
            .fallback(upstream_handler)
            .with_state(Upstream { status, body });
        spawn(async move { axum::serve(listener, app).await });
        format!("http://127.0.0.1:{port}")
    }

    /// Wraps the model's answer in a `generateContent` response.
    fn model_answer(text: &str) -> String {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
    }

    async fn spawn_server(api_base: &str, max_image_bytes: usize) -> String {
        let port = portpicker::pick_unused_port().unwrap();
        let bind = format!("127.0.0.1:{port}");
        let config = Config {
            server: ServerConfig { bind: bind.clone() },
            extraction: ExtractionConfig {
                api_base: api_base.to_string(),
                max_image_bytes,
                api_key: Some(API_KEY.to_string()),
                ..ExtractionConfig::default()
            },
        };
        spawn(async move { start_server(config).await });
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        format!("http://{bind}")
    }

    async fn post_json(url: &str, body: Value) -> Fallible<(StatusCode, Value)> {
        let response = reqwest::Client::new().post(url).json(&body).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        Ok((status, body))
    }

    #[test]
    fn test_body_limit() {
        assert_eq!(body_limit(3), 4 + BODY_OVERHEAD);
        assert_eq!(body_limit(10), 16 + BODY_OVERHEAD);
        assert_eq!(body_limit(usize::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn test_cgpa() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let body = json!({ "semesters": [
            { "subjects": [
                { "name": "Maths", "credits": "4", "gradePoint": "8" },
                { "name": "Physics", "credits": 3, "gradePoint": 9 }
            ] },
            { "subjects": [] }
        ] });
        let (status, body) = post_json(&format!("{base}/api/cgpa"), body).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display"], "8.43");
        assert_eq!(body["label"], "Excellent");
        assert_eq!(body["tier"], "excellent");
        assert_eq!(body["semesters"][0]["sgpa"], "8.43");
        assert_eq!(body["semesters"][1]["sgpa"], "0.00");
        Ok(())
    }

    #[tokio::test]
    async fn test_cgpa_validation_error() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let body = json!({ "semesters": [{ "subjects": [{ "credits": "11", "gradePoint": "8" }] }] });
        let (status, body) = post_json(&format!("{base}/api/cgpa"), body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Credits must be whole numbers between 1 and 10"
        );

        let (status, body) =
            post_json(&format!("{base}/api/cgpa"), json!({ "semesters": [] })).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No valid data to calculate CGPA");
        Ok(())
    }

    #[tokio::test]
    async fn test_sgpa_preview() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let body = json!({ "subjects": [{ "credits": "x", "gradePoint": "9" }] });
        let (status, body) = post_json(&format!("{base}/api/sgpa"), body).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sgpa"], "0.00");
        Ok(())
    }

    #[tokio::test]
    async fn test_average() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let url = format!("{base}/api/sgpa/average");

        let (status, body) = post_json(&url, json!({ "values": ["8.5", "9.0", "7.5"] })).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display"], "8.33");
        assert_eq!(body["label"], "Excellent");

        let (status, body) = post_json(&url, json!({ "values": ["11"] })).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "SGPA values must be between 0 and 10");

        let (status, body) = post_json(&url, json!({ "values": ["", " "] })).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please enter at least one SGPA value");
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_body() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        for route in ["/api/cgpa", "/api/sgpa", "/api/sgpa/average"] {
            let response = reqwest::Client::new()
                .post(format!("{base}{route}"))
                .body("{ not json")
                .send()
                .await?;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{route}");
            let body: Value = response.json().await?;
            assert_eq!(body["error"], "Invalid request body", "{route}");
        }

        let body = json!({ "semesters": [{ "subjects": [{ "credits": [4] }] }] });
        let (status, body) = post_json(&format!("{base}/api/cgpa"), body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await?;
        assert_eq!(body["error"], "Not Found");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract() -> Fallible<()> {
        let answer = r#"{"semesters": [{"subjects": [
            {"name": "Mathematics", "credits": "3-1-0", "gradePoint": 8.6},
            {"name": "Physics", "credits": 3}
        ]}]}"#;
        let upstream = spawn_upstream(StatusCode::OK, model_answer(answer)).await;
        let base = spawn_server(&upstream, 1024).await;
        let body = json!({ "image": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "semesters": [{ "subjects": [
                { "name": "Mathematics", "credits": "3", "gradePoint": "9" },
                { "name": "Physics", "credits": "3", "gradePoint": "" }
            ] }] })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_no_image() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let url = format!("{base}/api/extract-cgpa");
        for body in [json!({}), json!({ "image": null }), json!({ "image": "" })] {
            let (status, body) = post_json(&url, body).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "No image provided");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_invalid_body() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 1024).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/extract-cgpa"))
            .body("this is not json")
            .send()
            .await?;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json().await?;
        assert_eq!(body["error"], "Failed to process image");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_image_too_large() -> Fallible<()> {
        let base = spawn_server("http://127.0.0.1:9", 6).await;
        let body = json!({ "image": "QUJDREVGR0hJ" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "Image is too large");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_model_rejects_image() -> Fallible<()> {
        let answer = r#"{"error": "No academic subjects found."}"#;
        let upstream = spawn_upstream(StatusCode::OK, model_answer(answer)).await;
        let base = spawn_server(&upstream, 1024).await;
        let body = json!({ "image": "/9j/4AAQSkZJRg==" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No academic subjects found.");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_no_subjects() -> Fallible<()> {
        let upstream =
            spawn_upstream(StatusCode::OK, model_answer(r#"{"semesters": []}"#)).await;
        let base = spawn_server(&upstream, 1024).await;
        let body = json!({ "image": "/9j/4AAQSkZJRg==" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Could not find any subjects in the image. Please upload a clear marksheet."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_empty_model_response() -> Fallible<()> {
        let upstream = spawn_upstream(StatusCode::OK, json!({ "candidates": [] }).to_string()).await;
        let base = spawn_server(&upstream, 1024).await;
        let body = json!({ "image": "/9j/4AAQSkZJRg==" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "No response from AI. Please try again.");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_upstream_failure() -> Fallible<()> {
        let upstream =
            spawn_upstream(StatusCode::SERVICE_UNAVAILABLE, "overloaded".to_string()).await;
        let base = spawn_server(&upstream, 1024).await;
        let body = json!({ "image": "/9j/4AAQSkZJRg==" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process image");
        Ok(())
    }

    #[tokio::test]
    async fn test_extract_malformed_model_output() -> Fallible<()> {
        let upstream = spawn_upstream(StatusCode::OK, model_answer("not json at all")).await;
        let base = spawn_server(&upstream, 1024).await;
        let body = json!({ "image": "/9j/4AAQSkZJRg==" });
        let (status, body) = post_json(&format!("{base}/api/extract-cgpa"), body).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to process image");
        Ok(())
    }
}
