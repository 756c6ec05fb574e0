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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::db::SqliteStore;
use crate::error::Fallible;
use crate::error::fail;
use crate::library::Library;
use crate::store::load_or_empty;
use crate::store::save_or_log;

/// A collection directory: its settings, its store and its decks.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: SqliteStore,
    pub library: Library,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;
        let store = SqliteStore::open_in(&directory)?;

        let library = {
            log::debug!("Loading decks...");
            let start = Instant::now();
            let decks = load_or_empty(&store);
            let duration = start.elapsed().as_millis();
            log::debug!("Decks loaded in {duration}ms.");
            Library::new(decks)
        };

        Ok(Self {
            directory,
            config,
            store,
            library,
        })
    }

    /// Persist the decks. A failure is logged, not returned.
    pub fn save(&self) -> bool {
        save_or_log(&self.store, self.library.decks())
    }
}
