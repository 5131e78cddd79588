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
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::grade::classify_performance;
use crate::grade::compute_semester_sgpa;
use crate::grade::format_gpa;
use crate::record::Record;
use crate::record::SgpaList;
use crate::server::error_response;
use crate::types::performance::Tier;
use crate::types::subject::Semester;

#[derive(Serialize)]
struct GpaSummary {
    cgpa: f64,
    display: String,
    label: &'static str,
    tier: Tier,
}

impl GpaSummary {
    fn new(cgpa: f64) -> Self {
        let performance = classify_performance(cgpa);
        Self {
            cgpa,
            display: format_gpa(cgpa),
            label: performance.label,
            tier: performance.tier,
        }
    }
}

#[derive(Serialize)]
struct SemesterSummary {
    sgpa: String,
}

#[derive(Serialize)]
struct CgpaResponse {
    #[serde(flatten)]
    summary: GpaSummary,
    semesters: Vec<SemesterSummary>,
}

/// Decodes a JSON request body. A malformed body is logged and yields
/// `None`; callers answer it with [`invalid_body`].
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Option<T> {
    match serde_json::from_slice(body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Invalid request body: {e}");
            None
        }
    }
}

fn invalid_body() -> Response {
    error_response(StatusCode::BAD_REQUEST, "Invalid request body")
}

/// `POST /api/cgpa`: the credit-weighted CGPA of a whole record.
pub async fn cgpa_handler(body: Bytes) -> Response {
    let Some(record) = parse_body::<Record>(&body) else {
        return invalid_body();
    };
    match record.cgpa() {
        Ok(cgpa) => {
            let semesters = record
                .sgpa_preview()
                .into_iter()
                .map(|sgpa| SemesterSummary {
                    sgpa: format_gpa(sgpa),
                })
                .collect();
            let response = CgpaResponse {
                summary: GpaSummary::new(cgpa),
                semesters,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.message()),
    }
}

/// `POST /api/sgpa`: the live SGPA preview of one semester. Never fails for
/// a well-formed body.
pub async fn sgpa_handler(body: Bytes) -> Response {
    let Some(semester) = parse_body::<Semester>(&body) else {
        return invalid_body();
    };
    let sgpa = compute_semester_sgpa(&semester);
    let response = SemesterSummary {
        sgpa: format_gpa(sgpa),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// `POST /api/sgpa/average`: the plain average of a list of SGPAs.
pub async fn average_handler(body: Bytes) -> Response {
    let Some(list) = parse_body::<SgpaList>(&body) else {
        return invalid_body();
    };
    match list.average() {
        Ok(cgpa) => (StatusCode::OK, Json(GpaSummary::new(cgpa))).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.message()),
    }
}
