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

use crate::types::raw_text::deserialize_raw_text;

/// One row of an academic record. Numeric fields hold the raw text the user
/// entered, so they may be blank or non-numeric.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_raw_text")]
    pub credits: String,
    #[serde(
        default,
        rename = "gradePoint",
        deserialize_with = "deserialize_raw_text"
    )]
    pub grade_point: String,
}

impl Subject {
    pub fn new(name: &str, credits: &str, grade_point: &str) -> Self {
        Self {
            name: name.to_string(),
            credits: credits.to_string(),
            grade_point: grade_point.to_string(),
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: SubjectField, value: String) {
        match field {
            SubjectField::Name => self.name = value,
            SubjectField::Credits => self.credits = value,
            SubjectField::GradePoint => self.grade_point = value,
        }
    }
}

/// The editable fields of a [`Subject`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubjectField {
    Name,
    Credits,
    GradePoint,
}

/// An ordered collection of subjects taken in one term.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Semester {
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self { subjects }
    }

    /// A semester holding a single blank subject, which is how new
    /// semesters start out.
    pub fn blank() -> Self {
        Self {
            subjects: vec![Subject::blank()],
        }
    }
}
