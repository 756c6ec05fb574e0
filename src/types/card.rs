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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::invalid;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// The ease factor a new card starts with.
pub const DEFAULT_EASE: f64 = 2.5;

/// The ease factor never drops below this.
pub const MIN_EASE: f64 = 1.3;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Higher is more severe: hard > medium > easy.
    pub fn severity(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => invalid(format!("Invalid difficulty: {s}")),
        }
    }
}

/// The scheduling state of a card.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    /// Multiplier applied to the interval on each successful review.
    pub ease_factor: f64,
    /// Days until the next review.
    pub interval_days: u32,
    /// The number of consecutive successful reviews.
    pub repetitions: u32,
    /// When the card is next due.
    pub due_at: Timestamp,
    pub last_reviewed_at: Option<Timestamp>,
    pub difficulty: Difficulty,
}

impl ReviewState {
    /// The state of a card that has never been reviewed: due at `created_at`.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            ease_factor: DEFAULT_EASE,
            interval_days: 1,
            repetitions: 0,
            due_at: created_at,
            last_reviewed_at: None,
            difficulty: Difficulty::Medium,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    front: String,
    back: String,
    #[serde(default)]
    tags: Vec<String>,
    state: ReviewState,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>, created_at: Timestamp) -> Self {
        let front = front.into().trim().to_string();
        let back = back.into().trim().to_string();
        let id = CardId::of_content(&front, &back);
        Self {
            id,
            front,
            back,
            tags: Vec::new(),
            state: ReviewState::new(created_at),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_state(mut self, state: ReviewState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    /// Replace the review state. Only the library calls this, with a state
    /// computed by the scheduler.
    pub(crate) fn set_state(&mut self, state: ReviewState) {
        self.state = state;
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.state.due_at <= now
    }
}
