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

/// Reasons a grade computation can reject its input. Every variant is
/// user-correctable; the `Display` text is the message shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A subject has a blank credits or grade point field.
    MissingValue,
    /// Credits are not a whole number in 1..=10.
    CreditsOutOfRange,
    /// The grade point is not a whole number in 0..=10.
    GradePointOutOfRange,
    /// Nothing contributed any credits.
    NoData,
    /// An SGPA entry is not a number in 0..=10.
    SgpaOutOfRange,
    /// The SGPA list holds only blank entries.
    NoSgpaValues,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingValue => "Please fill in all credits and grade points",
            ValidationError::CreditsOutOfRange => "Credits must be whole numbers between 1 and 10",
            ValidationError::GradePointOutOfRange => {
                "Grade points must be whole numbers between 0 and 10"
            }
            ValidationError::NoData => "No valid data to calculate CGPA",
            ValidationError::SgpaOutOfRange => "SGPA values must be between 0 and 10",
            ValidationError::NoSgpaValues => "Please enter at least one SGPA value",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
