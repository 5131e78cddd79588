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

use std::fs::read_to_string;
use std::path::Path;

use crate::error::Fallible;
use crate::error::fail;
use crate::grade::classify_performance;
use crate::grade::format_gpa;
use crate::record::Record;

/// Reads a record file. TOML files are recognized by their extension;
/// everything else is read as JSON.
pub fn load_record(path: &Path) -> Fallible<Record> {
    if !path.exists() {
        return fail("record file does not exist.");
    }
    let content = read_to_string(path)?;
    let record: Record = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    log::debug!("Loaded {} semesters.", record.semesters.len());
    Ok(record)
}

/// One line per semester with its live SGPA.
fn sgpa_lines(record: &Record) -> Vec<String> {
    record
        .sgpa_preview()
        .into_iter()
        .enumerate()
        .map(|(index, sgpa)| format!("Semester {}: SGPA {}", index + 1, format_gpa(sgpa)))
        .collect()
}

fn cgpa_line(cgpa: f64) -> String {
    let performance = classify_performance(cgpa);
    format!("CGPA: {} ({})", format_gpa(cgpa), performance.label)
}

pub fn print_cgpa(path: &Path) -> Fallible<()> {
    let record = load_record(path)?;
    for line in sgpa_lines(&record) {
        println!("{line}");
    }
    match record.cgpa() {
        Ok(cgpa) => {
            println!("{}", cgpa_line(cgpa));
            Ok(())
        }
        Err(e) => fail(e.message()),
    }
}
