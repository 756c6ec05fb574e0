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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// The identity of a card: a blake3 hash of its content. Needed as a wrapper
/// because blake3 does not implement Ord and PartialOrd.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CardId {
    inner: blake3::Hash,
}

impl CardId {
    /// Derive the identity of a card from its front and back.
    pub fn of_content(front: &str, back: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"Card");
        hasher.update(front.as_bytes());
        // Separator so that ("ab", "c") and ("a", "bc") differ.
        hasher.update(&[0]);
        hasher.update(back.as_bytes());
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::invalid_argument(format!("invalid card id: {s}")))?;
        Ok(Self { inner })
    }
}

impl PartialOrd for CardId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.as_bytes().cmp(other.inner.as_bytes())
    }
}

impl ToSql for CardId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_hex()))
    }
}

impl FromSql for CardId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        CardId::from_hex(&string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for CardId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        CardId::from_hex(&string).map_err(serde::de::Error::custom)
    }
}
