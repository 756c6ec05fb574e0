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

use serde::Deserialize;

use crate::compose::interleave::ShuffleMode;
use crate::error::Fallible;

pub const CONFIG_FILE: &str = "recall.toml";

/// Collection settings, read from `recall.toml`. Every key is optional.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub feedback: FeedbackConfig,
    pub compose: ComposeConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedbackConfig {
    /// Answers faster than this count as fast.
    pub fast_response_ms: u64,
    /// The latency assumed when none was measured.
    pub default_response_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            fast_response_ms: 8000,
            default_response_ms: 10_000,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    pub max_cards: usize,
    pub tolerance: u8,
    /// Absent means uncapped.
    pub per_deck_cap: Option<usize>,
    pub shuffle: ShuffleMode,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            max_cards: 20,
            tolerance: 0,
            per_deck_cap: None,
            shuffle: ShuffleMode::RoundRobin,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Topics at or above this accuracy are strong.
    pub strong_accuracy: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            strong_accuracy: 0.8,
        }
    }
}

impl Config {
    /// Load `recall.toml` from the collection directory, or the defaults if
    /// the file does not exist.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} found, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
