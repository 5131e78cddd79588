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

//! Grade aggregation: weighted CGPA, per-semester SGPA previews, the plain
//! average of a list of SGPAs, and performance bands.
//!
//! Everything here is a pure function of its input.

use crate::types::performance::Performance;
use crate::types::performance::Tier;
use crate::types::subject::Semester;
use crate::types::subject::Subject;
use crate::types::validation::ValidationError;

const MIN_CREDITS: f64 = 1.0;
const MAX_CREDITS: f64 = 10.0;
const MIN_GRADE_POINT: f64 = 0.0;
const MAX_GRADE_POINT: f64 = 10.0;
const MIN_SGPA: f64 = 0.0;
const MAX_SGPA: f64 = 10.0;

/// Lower bounds of each band, highest first.
const BANDS: [(f64, Tier); 5] = [
    (9.0, Tier::Outstanding),
    (8.0, Tier::Excellent),
    (7.0, Tier::VeryGood),
    (6.0, Tier::Good),
    (5.0, Tier::Average),
];

/// Reads the finite number at the start of `text`. Leading whitespace is
/// skipped and anything after the number is ignored, so `"3cr"` reads as
/// `3` and `"3-1-0"` as `3`.
pub fn parse_number(text: &str) -> Option<f64> {
    let candidate: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .collect();
    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .filter(|x| x.is_finite())
}

fn is_whole_in(value: f64, min: f64, max: f64) -> bool {
    value.fract() == 0.0 && value >= min && value <= max
}

/// Checks a single subject, returning its `(credits, grade point)` pair.
fn validate_subject(subject: &Subject) -> Result<(f64, f64), ValidationError> {
    if subject.credits.is_empty() || subject.grade_point.is_empty() {
        return Err(ValidationError::MissingValue);
    }
    let credits = match parse_number(&subject.credits) {
        Some(c) if is_whole_in(c, MIN_CREDITS, MAX_CREDITS) => c,
        _ => return Err(ValidationError::CreditsOutOfRange),
    };
    let grade_point = match parse_number(&subject.grade_point) {
        Some(g) if is_whole_in(g, MIN_GRADE_POINT, MAX_GRADE_POINT) => g,
        _ => return Err(ValidationError::GradePointOutOfRange),
    };
    Ok((credits, grade_point))
}

/// Computes the credit-weighted CGPA across every subject of every
/// semester.
///
/// Subjects are checked in order and the first invalid one aborts the whole
/// computation, so exactly one error is ever reported. Blank fields are
/// reported before range problems.
pub fn compute_weighted_cgpa(semesters: &[Semester]) -> Result<f64, ValidationError> {
    let mut total_credits = 0.0;
    let mut total_weighted = 0.0;
    for semester in semesters {
        for subject in &semester.subjects {
            let (credits, grade_point) = validate_subject(subject)?;
            total_credits += credits;
            total_weighted += credits * grade_point;
        }
    }
    if total_credits == 0.0 {
        return Err(ValidationError::NoData);
    }
    Ok(total_weighted / total_credits)
}

/// Computes a best-effort SGPA for one semester, rounded to two decimals.
///
/// Subjects that do not parse, or that carry no positive credits, are
/// skipped. With nothing to weigh the result is `0.0`.
pub fn compute_semester_sgpa(semester: &Semester) -> f64 {
    let mut total_credits = 0.0;
    let mut total_weighted = 0.0;
    for subject in &semester.subjects {
        let credits = parse_number(&subject.credits);
        let grade_point = parse_number(&subject.grade_point);
        if let (Some(credits), Some(grade_point)) = (credits, grade_point) {
            if credits > 0.0 {
                total_credits += credits;
                total_weighted += credits * grade_point;
            }
        }
    }
    if total_credits > 0.0 {
        round_to_hundredths(total_weighted / total_credits)
    } else {
        0.0
    }
}

/// Computes the unweighted mean of a list of SGPA entries. Blank entries
/// are skipped.
pub fn compute_average_sgpa<S: AsRef<str>>(values: &[S]) -> Result<f64, ValidationError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        let value = value.as_ref();
        if value.trim().is_empty() {
            continue;
        }
        match parse_number(value) {
            Some(sgpa) if (MIN_SGPA..=MAX_SGPA).contains(&sgpa) => {
                sum += sgpa;
                count += 1;
            }
            _ => return Err(ValidationError::SgpaOutOfRange),
        }
    }
    if count == 0 {
        return Err(ValidationError::NoSgpaValues);
    }
    Ok(sum / count as f64)
}

/// Maps a grade average to its performance band. Bounds are inclusive and
/// the value is compared as-is, without rounding.
pub fn classify_performance(value: f64) -> Performance {
    let tier = BANDS
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::BelowAverage);
    Performance::from(tier)
}

/// Renders a grade average with exactly two fractional digits.
pub fn format_gpa(value: f64) -> String {
    format!("{value:.2}")
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
