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

use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use serde::Serialize;

use crate::config::API_KEY_VAR;
use crate::config::ExtractionConfig;
use crate::error::Fallible;
use crate::extract::error::ExtractError;
use crate::extract::image::ImagePayload;
use crate::extract::normalize::ExtractedRecord;
use crate::extract::normalize::parse_model_output;
use crate::extract::prompt::EXTRACTION_PROMPT;

/// A client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ExtractionConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// The concatenated text of the first candidate, if it has any.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiClient {
    pub fn new(config: ExtractionConfig) -> Fallible<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Asks the model to read a marksheet and normalizes its answer.
    pub async fn extract(&self, image: &ImagePayload) -> Result<ExtractedRecord, ExtractError> {
        let text = self.generate(image).await?;
        parse_model_output(&text)
    }

    async fn generate(&self, image: &ImagePayload) -> Result<String, ExtractError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ExtractError::Internal(format!("{API_KEY_VAR} is not set")))?;
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(EXTRACTION_PROMPT),
                    Part::InlineData(InlineData {
                        mime_type: &image.mime_type,
                        data: &image.data,
                    }),
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: self.config.temperature,
            },
        };

        log::debug!(
            "Sending {} image to {}...",
            image.mime_type,
            self.config.model
        );
        let start = Instant::now();
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractError::Internal(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| ExtractError::Internal(format!("upstream error: {e}")))?;
        let response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Internal(format!("invalid upstream response: {e}")))?;
        let duration = start.elapsed().as_millis();
        log::debug!("Model answered in {duration}ms.");

        response.text().ok_or(ExtractError::EmptyResponse)
    }
}
