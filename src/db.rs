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

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Transaction;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::DeckStore;
use crate::types::card_id::CardId;
use crate::types::deck::Deck;
use crate::types::deck::DeckId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

pub const DATABASE_FILE: &str = "recall.db";

/// A SQLite-backed deck store. Each deck is stored as one JSON document
/// keyed by its id, next to an append-only log of reviews.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

/// One row of the review log.
#[derive(Clone, PartialEq, Debug)]
pub struct ReviewRecord {
    pub deck_id: DeckId,
    pub card_id: CardId,
    pub reviewed_at: Timestamp,
    pub quality: Quality,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub due_at: Timestamp,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Open the store of a collection directory.
    pub fn open_in(directory: &Path) -> Fallible<Self> {
        let db_path = directory.join(DATABASE_FILE);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        Self::new(db_path)
    }

    /// Append a review to the log.
    pub fn log_review(&self, record: &ReviewRecord) -> Fallible<()> {
        let conn = self.acquire();
        let sql = "insert into reviews (deck_id, card_id, reviewed_at, quality, ease_factor, interval_days, due_at) values (?, ?, ?, ?, ?, ?, ?);";
        conn.execute(
            sql,
            (
                &record.deck_id,
                record.card_id,
                record.reviewed_at,
                record.quality,
                record.ease_factor,
                record.interval_days,
                record.due_at,
            ),
        )?;
        Ok(())
    }

    /// The number of reviews in the log.
    pub fn review_count(&self) -> Fallible<usize> {
        let conn = self.acquire();
        let count: i64 = conn.query_row("select count(*) from reviews;", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// The logged reviews of a card, oldest first.
    pub fn card_reviews(&self, card_id: CardId) -> Fallible<Vec<ReviewRecord>> {
        let conn = self.acquire();
        let sql = "select deck_id, card_id, reviewed_at, quality, ease_factor, interval_days, due_at from reviews where card_id = ? order by review_id;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([card_id])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(ReviewRecord {
                deck_id: row.get(0)?,
                card_id: row.get(1)?,
                reviewed_at: row.get(2)?,
                quality: row.get(3)?,
                ease_factor: row.get(4)?,
                interval_days: row.get(5)?,
                due_at: row.get(6)?,
            });
        }
        Ok(records)
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DeckStore for SqliteStore {
    fn load_decks(&self) -> Fallible<Vec<Deck>> {
        let conn = self.acquire();
        let mut stmt = conn.prepare("select body from decks order by position;")?;
        let mut rows = stmt.query([])?;
        let mut decks = Vec::new();
        while let Some(row) = rows.next()? {
            let body: String = row.get(0)?;
            let deck: Deck = serde_json::from_str(&body)?;
            decks.push(deck);
        }
        Ok(decks)
    }

    /// Replace the stored collection with `decks`.
    fn save_decks(&self, decks: &[Deck]) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        tx.execute("delete from decks;", [])?;
        for (position, deck) in decks.iter().enumerate() {
            insert_deck(&tx, position, deck)?;
        }
        tx.commit()?;
        log::debug!("Saved {} decks.", decks.len());
        Ok(())
    }
}

fn insert_deck(tx: &Transaction, position: usize, deck: &Deck) -> Fallible<()> {
    let body = serde_json::to_string(deck)?;
    let sql = "insert into decks (deck_id, position, body) values (?, ?, ?);";
    tx.execute(sql, (&deck.id, position as i64, body))?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["decks"], |row| row.get(0))?;
    Ok(count > 0)
}
