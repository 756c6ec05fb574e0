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
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::deck::DeckId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// One answer given by the learner. Consumed once by the scheduler and the
/// feedback classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    pub deck_id: DeckId,
    pub card_id: CardId,
    pub quality: Quality,
    pub reviewed_at: Timestamp,
    /// How long the learner took to answer, if measured.
    #[serde(default)]
    pub response_time_ms: Option<u64>,
    /// Whether the answer was correct, if known separately from the grade.
    #[serde(default)]
    pub correct: Option<bool>,
}

impl ReviewEvent {
    pub fn new(deck_id: DeckId, card_id: CardId, quality: Quality, reviewed_at: Timestamp) -> Self {
        Self {
            deck_id,
            card_id,
            quality,
            reviewed_at,
            response_time_ms: None,
            correct: None,
        }
    }

    pub fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    pub fn with_correct(mut self, correct: bool) -> Self {
        self.correct = Some(correct);
        self
    }

    /// Explicit correctness when given, otherwise a passing grade.
    pub fn is_correct(&self) -> bool {
        self.correct.unwrap_or_else(|| self.quality.is_pass())
    }
}
