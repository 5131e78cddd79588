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
use serde::Deserializer;

/// Record files and API clients may write numeric fields either as strings
/// or as bare numbers. Either way the value is kept as the text the user
/// would have typed.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
}

pub fn deserialize_raw_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawText> = Option::deserialize(deserializer)?;
    let text = match raw {
        None => String::new(),
        Some(RawText::Text(text)) => text,
        Some(RawText::Integer(n)) => n.to_string(),
        Some(RawText::Float(x)) => x.to_string(),
    };
    Ok(text)
}
