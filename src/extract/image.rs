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

use crate::extract::error::ExtractError;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Leading base64 characters of each supported image format's magic bytes.
const SIGNATURES: [(&str, &str); 4] = [
    ("/9j/", "image/jpeg"),
    ("iVBORw0KGgo", "image/png"),
    ("R0lGOD", "image/gif"),
    ("UklGR", "image/webp"),
];

/// A base64-encoded image ready to be forwarded upstream.
#[derive(Debug, PartialEq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Validates the image field of an extraction request.
    ///
    /// Accepts either bare base64 or a `data:` URL. The MIME type is taken
    /// from the data URL when present, otherwise sniffed from the payload.
    pub fn parse(raw: &str, max_bytes: usize) -> Result<Self, ExtractError> {
        let raw = raw.trim();
        let (declared, data) = match raw.strip_prefix("data:") {
            Some(rest) => match rest.split_once(',') {
                Some((header, data)) => (declared_mime_type(header), data.trim()),
                None => (None, ""),
            },
            None => (None, raw),
        };
        if data.is_empty() {
            return Err(ExtractError::NoImage);
        }
        if decoded_len(data) > max_bytes {
            return Err(ExtractError::ImageTooLarge);
        }
        let mime_type = declared
            .or_else(|| sniff_mime_type(data))
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }
}

fn declared_mime_type(header: &str) -> Option<&str> {
    let mime = header.split(';').next()?;
    if mime.starts_with("image/") {
        Some(mime)
    } else {
        None
    }
}

fn sniff_mime_type(data: &str) -> Option<&'static str> {
    SIGNATURES
        .iter()
        .find(|(prefix, _)| data.starts_with(prefix))
        .map(|(_, mime)| *mime)
}

/// Size in bytes of the decoded payload.
fn decoded_len(data: &str) -> usize {
    let len = data.len();
    let padding = data.bytes().rev().take_while(|b| *b == b'=').count();
    (len / 4 * 3 + (len % 4) * 3 / 4).saturating_sub(padding)
}
