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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::invalid;

/// A self-assessed recall grade.
///
/// - 0: total blank.
/// - 1: barely recalled.
/// - 2: incorrect, but recognized on seeing the answer.
/// - 3: correct, with difficulty.
/// - 4: correct, easily.
/// - 5: perfect.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Fallible<Self> {
        if value > Self::MAX {
            return invalid(format!(
                "quality must be between 0 and {}, got {value}",
                Self::MAX
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Grades below 3 are failed recalls.
    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<u8> for Quality {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Quality::new(value)
    }
}

impl From<Quality> for u8 {
    fn from(value: Quality) -> Self {
        value.0
    }
}

impl Display for Quality {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Quality {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Quality {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let value: u8 = FromSql::column_result(value)?;
        Quality::new(value).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
