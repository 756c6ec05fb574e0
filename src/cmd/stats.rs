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
use crate::types::timestamp::Timestamp;

pub fn print_stats(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = Stats {
        review_count: coll.store.review_count()?,
        ..Stats::of(&coll.library, Timestamp::now())
    };
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{}", stats_json);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    deck_count: usize,
    card_count: usize,
    due_count: usize,
    review_count: usize,
}

impl Stats {
    fn of(library: &Library, now: Timestamp) -> Self {
        Self {
            deck_count: library.decks().len(),
            card_count: library.card_count(),
            due_count: library.study_queue(None, now).len(),
            review_count: 0,
        }
    }
}
