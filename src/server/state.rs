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

use crate::config::Config;
use crate::error::Fallible;
use crate::extract::GeminiClient;

#[derive(Clone)]
pub struct ServerState {
    pub extractor: GeminiClient,
    pub max_image_bytes: usize,
}

impl ServerState {
    pub fn new(config: &Config) -> Fallible<Self> {
        Ok(Self {
            extractor: GeminiClient::new(config.extraction.clone())?,
            max_image_bytes: config.extraction.max_image_bytes,
        })
    }
}
