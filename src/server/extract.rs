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

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Deserialize;

use crate::extract::ExtractError;
use crate::extract::ImagePayload;
use crate::server::error_response;
use crate::server::state::ServerState;

#[derive(Deserialize)]
struct ExtractRequest {
    #[serde(default)]
    image: Option<String>,
}

pub async fn extract_handler(State(state): State<ServerState>, body: Bytes) -> Response {
    match extract(&state, &body).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                ExtractError::Internal(_) => log::error!("Error processing image: {e}"),
                _ => log::debug!("Extraction rejected: {e}"),
            }
            error_response(e.status(), &e.message())
        }
    }
}

async fn extract(state: &ServerState, body: &[u8]) -> Result<Response, ExtractError> {
    let request: ExtractRequest = serde_json::from_slice(body)
        .map_err(|e| ExtractError::Internal(format!("invalid request body: {e}")))?;
    let image = request.image.ok_or(ExtractError::NoImage)?;
    let image = ImagePayload::parse(&image, state.max_image_bytes)?;
    let record = state.extractor.extract(&image).await?;
    let subject_count: usize = record.semesters.iter().map(|s| s.subjects.len()).sum();
    log::debug!(
        "Extracted {} semesters, {subject_count} subjects.",
        record.semesters.len()
    );
    Ok((StatusCode::OK, Json(record)).into_response())
}
