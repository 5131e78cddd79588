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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::extract::error::ExtractError;
use crate::grade::parse_number;
use crate::types::subject::Subject;

/// The extraction response body, and the only shape the model's answer is
/// allowed to reach the caller in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub semesters: Vec<ExtractedSemester>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSemester {
    pub subjects: Vec<Subject>,
}

/// Interprets the model's JSON answer.
///
/// The model may report its own error, may omit fields, and may write
/// numbers as strings or as numbers. Credits and grade points are rounded
/// to whole numbers; a value that rounds to zero or cannot be read at all
/// is left blank.
pub fn parse_model_output(text: &str) -> Result<ExtractedRecord, ExtractError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ExtractError::Internal(format!("model output is not JSON: {e}")))?;
    if let Some(error) = value.get("error") {
        if is_truthy(error) {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return Err(ExtractError::Rejected(message));
        }
    }
    let semesters = match value.get("semesters") {
        Some(Value::Array(semesters)) if !semesters.is_empty() => semesters,
        _ => return Err(ExtractError::NoSubjects),
    };
    let semesters = semesters.iter().map(normalize_semester).collect();
    Ok(ExtractedRecord { semesters })
}

fn normalize_semester(semester: &Value) -> ExtractedSemester {
    let subjects = match semester.get("subjects") {
        Some(Value::Array(subjects)) => subjects.iter().map(normalize_subject).collect(),
        _ => Vec::new(),
    };
    ExtractedSemester { subjects }
}

fn normalize_subject(subject: &Value) -> Subject {
    let name = match subject.get("name") {
        Some(name) if is_truthy(name) => stringify(name),
        _ => String::new(),
    };
    Subject {
        name,
        credits: round_field(subject.get("credits")),
        grade_point: round_field(subject.get("gradePoint")),
    }
}

fn round_field(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => "0".to_string(),
        Some(value) => stringify(value),
    };
    match parse_number(&text) {
        Some(x) => {
            let rounded = (x + 0.5).floor();
            if rounded == 0.0 || !rounded.is_finite() {
                String::new()
            } else {
                format!("{}", rounded as i64)
            }
        }
        None => String::new(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
