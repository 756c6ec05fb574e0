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

use rand::SeedableRng;
use rand::thread_rng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::collection::Collection;
use crate::compose::interleave::InterleaveRequest;
use crate::compose::interleave::ShuffleMode;
use crate::compose::interleave::distribution_of;
use crate::compose::interleave::interleave;
use crate::compose::practice::PracticeRequest;
use crate::compose::practice::deliberate_practice;
use crate::error::Fallible;
use crate::types::card::Difficulty;
use crate::types::deck::Deck;
use crate::types::deck::DeckId;
use crate::types::deck::DerivedDeck;
use crate::types::timestamp::Timestamp;
use crate::weakness::analyze_with;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComposedDeck<'a> {
    deck: &'a DerivedDeck,
    fronts: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distribution: Option<Vec<(DeckId, usize)>>,
}

impl<'a> ComposedDeck<'a> {
    fn new(deck: &'a DerivedDeck, decks: &'a [Deck]) -> Self {
        let fronts = deck.resolve(decks).into_iter().map(|c| c.front()).collect();
        Self {
            deck,
            fronts,
            distribution: None,
        }
    }
}

pub fn print_practice(
    directory: Option<String>,
    topics: Vec<String>,
    difficulty: Option<Difficulty>,
    max: Option<usize>,
    tolerance: Option<u8>,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let decks = coll.library.decks();
    let mut request = PracticeRequest::from_config(&coll.config.compose);
    if topics.is_empty() {
        let report = analyze_with(&coll.config.analysis, decks);
        request.focus_topics = report.weak_topic_names();
        log::debug!("Focusing on weak topics: {:?}", request.focus_topics);
    } else {
        request.focus_topics = topics;
    }
    request.target_difficulty = difficulty;
    if let Some(max) = max {
        request.max_cards = max;
    }
    if let Some(tolerance) = tolerance {
        request.tolerance = tolerance;
    }
    let derived = deliberate_practice(decks, &request, Timestamp::now());
    let output = ComposedDeck::new(&derived, decks);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_interleaved(
    directory: Option<String>,
    deck_ids: Vec<String>,
    cap: Option<usize>,
    shuffle: Option<ShuffleMode>,
    seed: Option<u64>,
) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let decks = coll.library.decks();
    let mut request = InterleaveRequest::from_config(&coll.config.compose);
    if !deck_ids.is_empty() {
        request.deck_ids = Some(deck_ids.into_iter().map(DeckId::from).collect());
    }
    if cap.is_some() {
        request.per_deck_cap = cap;
    }
    if let Some(mode) = shuffle {
        request.mode = mode;
    }
    let now = Timestamp::now();
    let derived = match seed {
        Some(seed) => interleave(decks, &request, &mut ChaCha8Rng::seed_from_u64(seed), now)?,
        None => interleave(decks, &request, &mut thread_rng(), now)?,
    };
    let mut output = ComposedDeck::new(&derived, decks);
    output.distribution = Some(distribution_of(&derived, decks));
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
