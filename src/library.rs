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

use crate::error::Fallible;
use crate::error::invalid;
use crate::queue::prioritize_by;
use crate::sm2::next_state;
use crate::types::card::Card;
use crate::types::card::ReviewState;
use crate::types::deck::CardRef;
use crate::types::deck::Deck;
use crate::types::deck::DeckId;
use crate::types::deck::DerivedDeck;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The collection of source decks. Every card has exactly one canonical copy
/// here, and reviews, whether reached directly or through a derived deck,
/// update that copy.
pub struct Library {
    decks: Vec<Deck>,
}

impl Library {
    pub fn new(decks: Vec<Deck>) -> Self {
        Self { decks }
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn into_decks(self) -> Vec<Deck> {
        self.decks
    }

    pub fn deck(&self, id: &DeckId) -> Option<&Deck> {
        self.decks.iter().find(|deck| &deck.id == id)
    }

    pub fn card(&self, card_ref: &CardRef) -> Option<&Card> {
        self.deck(&card_ref.deck_id)
            .and_then(|deck| deck.card(card_ref.card_id))
    }

    pub fn card_count(&self) -> usize {
        self.decks.iter().map(|deck| deck.cards.len()).sum()
    }

    /// Add a deck, replacing any existing deck with the same id. Cards the
    /// two versions share keep their review state.
    pub fn upsert(&mut self, mut deck: Deck) {
        match self.decks.iter_mut().find(|d| d.id == deck.id) {
            Some(existing) => {
                let mut kept = 0;
                for card in deck.cards.iter_mut() {
                    if let Some(previous) = existing.card(card.id()) {
                        card.set_state(previous.state().clone());
                        kept += 1;
                    }
                }
                log::debug!("Kept the progress of {kept} cards in deck {}.", deck.id);
                deck.created_at = existing.created_at;
                *existing = deck;
            }
            None => self.decks.push(deck),
        }
    }

    /// Review a card and store its new state. Fails if the card does not
    /// exist.
    pub fn apply_review(
        &mut self,
        card_ref: &CardRef,
        quality: Quality,
        now: Timestamp,
    ) -> Fallible<ReviewState> {
        let Some(deck) = self.decks.iter_mut().find(|d| d.id == card_ref.deck_id) else {
            return invalid(format!("No deck with id {}", card_ref.deck_id));
        };
        let Some(card) = deck.card_mut(card_ref.card_id) else {
            return invalid(format!(
                "No card {} in deck {}",
                card_ref.card_id, card_ref.deck_id
            ));
        };
        let state = next_state(card.state(), quality, now);
        card.set_state(state.clone());
        deck.updated_at = now;
        Ok(state)
    }

    /// The due cards of every deck, or of one deck, in study order.
    pub fn study_queue(&self, deck: Option<&DeckId>, now: Timestamp) -> Vec<CardRef> {
        let mut due: Vec<(&Deck, &Card)> = self
            .decks
            .iter()
            .filter(|d| deck.is_none_or(|id| &d.id == id))
            .flat_map(|d| {
                d.cards
                    .iter()
                    .filter(move |card| card.is_due(now))
                    .map(move |card| (d, card))
            })
            .collect();
        prioritize_by(&mut due, |&(_, card)| card);
        due.into_iter()
            .map(|(d, card)| CardRef {
                deck_id: d.id.clone(),
                card_id: card.id(),
            })
            .collect()
    }

    /// The due cards of a derived deck, in study order.
    pub fn derived_queue(&self, derived: &DerivedDeck, now: Timestamp) -> Vec<CardRef> {
        let mut due: Vec<(&CardRef, &Card)> = derived
            .entries
            .iter()
            .filter_map(|entry| self.card(entry).map(|card| (entry, card)))
            .filter(|(_, card)| card.is_due(now))
            .collect();
        prioritize_by(&mut due, |&(_, card)| card);
        due.into_iter().map(|(entry, _)| entry.clone()).collect()
    }
}
