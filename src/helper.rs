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

use chrono::Duration;
use chrono::TimeZone;
use chrono::Utc;

use crate::types::card::Card;
use crate::types::card::Difficulty;
use crate::types::card::ReviewState;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

/// Midnight UTC, `day` days after 2025-01-01.
pub fn at_day(day: i64) -> Timestamp {
    let epoch = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Timestamp::new(epoch + Duration::days(day))
}

/// A card with the given due date, difficulty and ease.
pub fn card_with(front: &str, due_at: Timestamp, difficulty: Difficulty, ease: f64) -> Card {
    let mut state = ReviewState::new(at_day(0));
    state.due_at = due_at;
    state.difficulty = difficulty;
    state.ease_factor = ease;
    Card::new(front, format!("back of {front}"), at_day(0)).with_state(state)
}

/// A card that has been reviewed `repetitions` times and settled at `ease`.
pub fn reviewed_card(front: &str, repetitions: u32, ease: f64) -> Card {
    let mut state = ReviewState::new(at_day(0));
    state.repetitions = repetitions;
    state.ease_factor = ease;
    Card::new(front, format!("back of {front}"), at_day(0)).with_state(state)
}

/// A deck with id `id` holding `count` new cards, "<id> 0", "<id> 1", ...
pub fn numbered_deck(id: &str, count: usize) -> Deck {
    let cards = (0..count)
        .map(|i| Card::new(format!("{id} {i}"), format!("answer {i}"), at_day(0)))
        .collect();
    Deck::new(id, format!("Deck {id}"), at_day(0)).with_cards(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_deck_has_distinct_cards() {
        let deck = numbered_deck("a", 4);
        let mut ids: Vec<_> = deck.cards.iter().map(|c| c.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        assert!(deck.cards.iter().all(|c| c.is_due(at_day(0))));
    }
}
