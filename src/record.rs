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

//! Editable calculator state. These values are owned by whoever drives the
//! calculator (the CLI, an API client, a UI) and are handed by reference to
//! the functions in [`crate::grade`].

use serde::Deserialize;
use serde::Serialize;

use crate::extract::normalize::ExtractedRecord;
use crate::grade::compute_average_sgpa;
use crate::grade::compute_semester_sgpa;
use crate::grade::compute_weighted_cgpa;
use crate::types::subject::Semester;
use crate::types::subject::Subject;
use crate::types::subject::SubjectField;
use crate::types::validation::ValidationError;

const DEFAULT_SGPA_ROWS: usize = 4;

/// A marksheet: semesters of subjects, as entered so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// A sheet with one semester holding one blank subject.
    pub fn new() -> Self {
        Self {
            semesters: vec![Semester::blank()],
        }
    }

    pub fn add_semester(&mut self) {
        self.semesters.push(Semester::blank());
    }

    /// Removes a semester. The last remaining semester is never removed.
    pub fn remove_semester(&mut self, index: usize) {
        if self.semesters.len() > 1 && index < self.semesters.len() {
            self.semesters.remove(index);
        }
    }

    pub fn add_subject(&mut self, semester: usize) {
        if let Some(semester) = self.semesters.get_mut(semester) {
            semester.subjects.push(Subject::blank());
        }
    }

    /// Removes a subject. A semester always keeps at least one subject.
    pub fn remove_subject(&mut self, semester: usize, subject: usize) {
        if let Some(semester) = self.semesters.get_mut(semester) {
            if semester.subjects.len() > 1 && subject < semester.subjects.len() {
                semester.subjects.remove(subject);
            }
        }
    }

    pub fn update_subject(
        &mut self,
        semester: usize,
        subject: usize,
        field: SubjectField,
        value: impl Into<String>,
    ) {
        if let Some(row) = self
            .semesters
            .get_mut(semester)
            .and_then(|semester| semester.subjects.get_mut(subject))
        {
            row.set(field, value.into());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Builds a sheet from extracted data. Extracted credits are only a
    /// suggestion, so they are left blank for the user to confirm.
    pub fn from_extraction(extracted: ExtractedRecord) -> Self {
        let semesters = extracted
            .semesters
            .into_iter()
            .map(|semester| {
                Semester::new(
                    semester
                        .subjects
                        .into_iter()
                        .map(|subject| Subject {
                            name: subject.name,
                            credits: String::new(),
                            grade_point: subject.grade_point,
                        })
                        .collect(),
                )
            })
            .collect();
        Self { semesters }
    }

    /// The live SGPA of every semester, in order.
    pub fn sgpa_preview(&self) -> Vec<f64> {
        self.semesters.iter().map(compute_semester_sgpa).collect()
    }

    pub fn cgpa(&self) -> Result<f64, ValidationError> {
        compute_weighted_cgpa(&self.semesters)
    }
}

/// The standalone SGPA-to-CGPA converter's list of entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SgpaList {
    #[serde(default)]
    pub values: Vec<String>,
}

impl Default for SgpaList {
    fn default() -> Self {
        Self::new()
    }
}

impl SgpaList {
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); DEFAULT_SGPA_ROWS],
        }
    }

    pub fn add(&mut self) {
        self.values.push(String::new());
    }

    /// Removes an entry. The list always keeps at least one entry.
    pub fn remove(&mut self, index: usize) {
        if self.values.len() > 1 && index < self.values.len() {
            self.values.remove(index);
        }
    }

    pub fn update(&mut self, index: usize, value: impl Into<String>) {
        if let Some(entry) = self.values.get_mut(index) {
            *entry = value.into();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn average(&self) -> Result<f64, ValidationError> {
        compute_average_sgpa(&self.values)
    }
}
