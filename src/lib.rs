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

//! recall: adaptive spaced repetition.
//!
//! This library provides:
//! - SM-2 scheduling of individual cards
//! - Due-card selection and study ordering
//! - Weakness analysis across decks
//! - Deliberate-practice and interleaved study sets
//! - Immediate feedback on answers, and metacognition checklists

pub mod cli;
mod cmd;
pub mod collection;
pub mod compose;
pub mod config;
pub mod db;
pub mod error;
pub mod feedback;
#[cfg(test)]
mod helper;
pub mod library;
pub mod metacognition;
pub mod queue;
pub mod session;
pub mod sm2;
pub mod store;
pub mod types;
pub mod weakness;

pub use error::ErrorKind;
pub use error::ErrorReport;
pub use error::Fallible;
pub use library::Library;
pub use store::DeckStore;
pub use types::card::Card;
pub use types::card::Difficulty;
pub use types::card::ReviewState;
pub use types::card_id::CardId;
pub use types::deck::CardRef;
pub use types::deck::Deck;
pub use types::deck::DeckId;
pub use types::deck::DerivedDeck;
pub use types::quality::Quality;
pub use types::review::ReviewEvent;
pub use types::timestamp::Timestamp;
