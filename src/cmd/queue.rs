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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::library::Library;
use crate::types::card::Difficulty;
use crate::types::card_id::CardId;
use crate::types::deck::DeckId;
use crate::types::timestamp::Timestamp;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueueEntry<'a> {
    deck_id: &'a DeckId,
    card_id: CardId,
    front: &'a str,
    due_at: Timestamp,
    difficulty: Difficulty,
    ease_factor: f64,
}

pub fn print_queue(directory: Option<String>, deck: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let deck = deck.map(DeckId::from);
    let entries = queue_entries(&coll.library, deck.as_ref(), Timestamp::now());
    if entries.is_empty() {
        println!("No cards due.");
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn queue_entries<'a>(
    library: &'a Library,
    deck: Option<&DeckId>,
    now: Timestamp,
) -> Vec<QueueEntry<'a>> {
    library
        .study_queue(deck, now)
        .iter()
        .filter_map(|card_ref| {
            let deck = library.deck(&card_ref.deck_id)?;
            let card = deck.card(card_ref.card_id)?;
            Some(QueueEntry {
                deck_id: &deck.id,
                card_id: card.id(),
                front: card.front(),
                due_at: card.state().due_at,
                difficulty: card.state().difficulty,
                ease_factor: card.state().ease_factor,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::at_day;
    use crate::helper::numbered_deck;

    #[test]
    fn test_queue_entries() {
        let library = Library::new(vec![numbered_deck("a", 2), numbered_deck("b", 1)]);
        let entries = queue_entries(&library, Some(&DeckId::from("a")), at_day(0));
        let fronts: Vec<&str> = entries.iter().map(|e| e.front).collect();
        assert_eq!(fronts, vec!["a 0", "a 1"]);
        assert!(queue_entries(&library, None, at_day(-1)).is_empty());
    }
}
