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

use std::fmt::Display;
use std::fmt::Formatter;

use axum::http::StatusCode;

/// Everything that can go wrong while extracting a marksheet.
#[derive(Debug, PartialEq)]
pub enum ExtractError {
    /// The request carried no image.
    NoImage,
    /// The decoded image would exceed the configured cap.
    ImageTooLarge,
    /// The model answered without any text.
    EmptyResponse,
    /// The model itself reported that it found no academic data.
    Rejected(String),
    /// The model's answer held no semesters.
    NoSubjects,
    /// Anything else: upstream transport or status failures, unparseable
    /// output, missing credentials. The detail is logged, never returned.
    Internal(String),
}

impl ExtractError {
    pub fn status(&self) -> StatusCode {
        match self {
            ExtractError::NoImage => StatusCode::BAD_REQUEST,
            ExtractError::ImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ExtractError::EmptyResponse => StatusCode::INTERNAL_SERVER_ERROR,
            ExtractError::Rejected(_) => StatusCode::BAD_REQUEST,
            ExtractError::NoSubjects => StatusCode::BAD_REQUEST,
            ExtractError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the user.
    pub fn message(&self) -> String {
        match self {
            ExtractError::NoImage => "No image provided".to_string(),
            ExtractError::ImageTooLarge => "Image is too large".to_string(),
            ExtractError::EmptyResponse => "No response from AI. Please try again.".to_string(),
            ExtractError::Rejected(message) => message.clone(),
            ExtractError::NoSubjects => {
                "Could not find any subjects in the image. Please upload a clear marksheet."
                    .to_string()
            }
            ExtractError::Internal(_) => "Failed to process image".to_string(),
        }
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Internal(detail) => write!(f, "extraction failed: {detail}"),
            _ => write!(f, "{}", self.message()),
        }
    }
}
