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
use crate::db::ReviewRecord;
use crate::error::Fallible;
use crate::error::fail;
use crate::feedback::Feedback;
use crate::feedback::classify_with;
use crate::types::card::ReviewState;
use crate::types::card_id::CardId;
use crate::types::deck::CardRef;
use crate::types::deck::DeckId;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewOutput {
    state: ReviewState,
    feedback: Feedback,
}

pub fn review_card(
    directory: Option<String>,
    deck: String,
    card: &str,
    quality: u8,
    response_time_ms: Option<u64>,
    streak: Option<u32>,
) -> Fallible<()> {
    let quality = Quality::new(quality)?;
    let card_ref = CardRef {
        deck_id: DeckId::from(deck),
        card_id: CardId::from_hex(card)?,
    };
    let mut coll = Collection::new(directory)?;
    let now = Timestamp::now();
    let state = coll.library.apply_review(&card_ref, quality, now)?;
    coll.store.log_review(&ReviewRecord {
        deck_id: card_ref.deck_id.clone(),
        card_id: card_ref.card_id,
        reviewed_at: now,
        quality,
        ease_factor: state.ease_factor,
        interval_days: state.interval_days,
        due_at: state.due_at,
    })?;
    if !coll.save() {
        return fail("could not save the review.");
    }
    log::debug!("Reviewed {}/{}.", card_ref.deck_id, card_ref.card_id);
    let feedback = classify_with(
        &coll.config.feedback,
        quality.is_pass(),
        response_time_ms,
        streak,
    );
    let output = ReviewOutput { state, feedback };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
