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

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(String);

impl DeckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeckId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DeckId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for DeckId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for DeckId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

impl FromSql for DeckId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        Ok(DeckId(string))
    }
}

/// A source deck: the canonical owner of its cards.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    /// The topic of the deck. Optional; the name stands in when absent.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Deck {
    pub fn new(id: impl Into<DeckId>, name: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            cards: Vec::new(),
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the deck's cards. A card with the same content as an earlier one
    /// is dropped, so card ids are unique within a deck.
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        let mut seen = HashSet::new();
        self.cards = cards
            .into_iter()
            .filter(|card| {
                let fresh = seen.insert(card.id());
                if !fresh {
                    log::debug!("Dropping duplicate card {} in deck {}", card.id(), self.id);
                }
                fresh
            })
            .collect();
        self
    }

    /// The label used to group this deck's cards by topic: the category,
    /// falling back to the deck name.
    pub fn topic(&self) -> &str {
        match &self.category {
            Some(category) if !category.trim().is_empty() => category,
            _ => &self.name,
        }
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == id)
    }

    pub fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id() == id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.card(id).is_some()
    }
}

/// A pointer to a canonical card inside a source deck.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRef {
    pub deck_id: DeckId,
    pub card_id: CardId,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DerivedKind {
    DeliberatePractice,
    Interleaved,
}

/// A study set built from other decks. It holds references, so reviewing one
/// of its cards updates the card in its source deck.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedDeck {
    pub name: String,
    pub kind: DerivedKind,
    pub created_at: Timestamp,
    pub entries: Vec<CardRef>,
}

impl DerivedDeck {
    pub fn new(name: impl Into<String>, kind: DerivedKind, created_at: Timestamp) -> Self {
        Self {
            name: name.into(),
            kind,
            created_at,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the canonical cards behind this deck's entries, in order.
    /// Entries whose deck or card no longer exists are skipped.
    pub fn resolve<'a>(&self, decks: &'a [Deck]) -> Vec<&'a Card> {
        let mut cards = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let card = decks
                .iter()
                .find(|deck| deck.id == entry.deck_id)
                .and_then(|deck| deck.card(entry.card_id));
            match card {
                Some(card) => cards.push(card),
                None => log::debug!(
                    "Skipping dangling entry {}/{} in {}",
                    entry.deck_id,
                    entry.card_id,
                    self.name
                ),
            }
        }
        cards
    }
}
