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

//! Composing derived study sets from a pool of decks.

pub mod interleave;
pub mod practice;

use crate::types::card::Card;
use crate::types::deck::CardRef;
use crate::types::deck::Deck;

/// Every card in the pool, with the deck it came from, in encounter order.
fn pool_cards(decks: &[Deck]) -> impl Iterator<Item = (&Deck, &Card)> {
    decks
        .iter()
        .flat_map(|deck| deck.cards.iter().map(move |card| (deck, card)))
}

fn card_ref(deck: &Deck, card: &Card) -> CardRef {
    CardRef {
        deck_id: deck.id.clone(),
        card_id: card.id(),
    }
}
