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

//! Immediate feedback on a single answer, from its correctness, latency and
//! the learner's current streak.

use serde::Serialize;

use crate::config::FeedbackConfig;
use crate::types::card::Difficulty;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    Struggling,
    NeedsReview,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub tier: Tier,
    pub message: &'static str,
    pub suggested_action: &'static str,
    /// The difficulty to aim for in the next card.
    pub recommended_difficulty: Difficulty,
}

/// Classify one answer with the default thresholds.
///
/// `response_time_ms` and `streak` default to 10 seconds and zero when the
/// caller does not know them.
pub fn classify(is_correct: bool, response_time_ms: Option<u64>, streak: Option<u32>) -> Feedback {
    classify_with(&FeedbackConfig::default(), is_correct, response_time_ms, streak)
}

pub fn classify_with(
    config: &FeedbackConfig,
    is_correct: bool,
    response_time_ms: Option<u64>,
    streak: Option<u32>,
) -> Feedback {
    let response_time_ms = response_time_ms.unwrap_or(config.default_response_ms);
    let streak = streak.unwrap_or(0);
    let fast = response_time_ms < config.fast_response_ms;
    match (is_correct, fast) {
        (true, true) if streak >= 2 => Feedback {
            tier: Tier::Excellent,
            message: "Excellent! Quick and correct, and the streak keeps growing.",
            suggested_action: "Move on to something more challenging.",
            recommended_difficulty: Difficulty::Easy,
        },
        (true, true) => Feedback {
            tier: Tier::Good,
            message: "Correct, and quickly too.",
            suggested_action: "Keep going.",
            recommended_difficulty: Difficulty::Easy,
        },
        (true, false) => Feedback {
            tier: Tier::Good,
            message: "Correct, but it took a while.",
            suggested_action: "Review this card again soon to build fluency.",
            recommended_difficulty: Difficulty::Medium,
        },
        (false, _) if streak == 0 => Feedback {
            tier: Tier::Struggling,
            message: "This one is giving you trouble.",
            suggested_action: "Re-read the answer. This card is now marked hard.",
            recommended_difficulty: Difficulty::Hard,
        },
        (false, _) => Feedback {
            tier: Tier::NeedsReview,
            message: "Not quite. This card needs another look.",
            suggested_action: "Study the answer and retry it later in the session.",
            recommended_difficulty: Difficulty::Medium,
        },
    }
}
