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

use serde::Serialize;

/// Performance bands, ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    BelowAverage,
    Average,
    Good,
    VeryGood,
    Excellent,
    Outstanding,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::BelowAverage => "Below Average",
            Tier::Average => "Average",
            Tier::Good => "Good",
            Tier::VeryGood => "Very Good",
            Tier::Excellent => "Excellent",
            Tier::Outstanding => "Outstanding",
        }
    }
}

/// A grade average's descriptive band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Performance {
    pub label: &'static str,
    pub tier: Tier,
}

impl From<Tier> for Performance {
    fn from(tier: Tier) -> Self {
        Self {
            label: tier.label(),
            tier,
        }
    }
}
