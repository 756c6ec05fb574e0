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

use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::error::Fallible;
use crate::types::deck::Deck;

/// Where decks live between sessions.
pub trait DeckStore {
    fn load_decks(&self) -> Fallible<Vec<Deck>>;

    fn save_decks(&self, decks: &[Deck]) -> Fallible<()>;
}

/// Load every deck, treating a storage failure as an empty collection.
pub fn load_or_empty(store: &dyn DeckStore) -> Vec<Deck> {
    match store.load_decks() {
        Ok(decks) => {
            log::debug!("Loaded {} decks.", decks.len());
            decks
        }
        Err(e) => {
            log::warn!("Failed to load decks, continuing with none: {e}");
            Vec::new()
        }
    }
}

/// Save every deck, logging rather than propagating a storage failure.
/// Returns whether the save succeeded.
pub fn save_or_log(store: &dyn DeckStore, decks: &[Deck]) -> bool {
    match store.save_decks(decks) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to save {} decks: {e}", decks.len());
            false
        }
    }
}

/// An in-memory store, for tests and for callers that persist elsewhere.
#[derive(Default)]
pub struct MemoryStore {
    decks: Mutex<Vec<Deck>>,
}

impl MemoryStore {
    pub fn new(decks: Vec<Deck>) -> Self {
        Self {
            decks: Mutex::new(decks),
        }
    }

    fn acquire(&self) -> MutexGuard<'_, Vec<Deck>> {
        // A panic while holding the lock cannot leave a half-written Vec.
        self.decks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DeckStore for MemoryStore {
    fn load_decks(&self) -> Fallible<Vec<Deck>> {
        Ok(self.acquire().clone())
    }

    fn save_decks(&self, decks: &[Deck]) -> Fallible<()> {
        *self.acquire() = decks.to_vec();
        Ok(())
    }
}
