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

use crate::compose::card_ref;
use crate::compose::pool_cards;
use crate::config::ComposeConfig;
use crate::types::card::Card;
use crate::types::card::Difficulty;
use crate::types::deck::Deck;
use crate::types::deck::DerivedDeck;
use crate::types::deck::DerivedKind;
use crate::types::timestamp::Timestamp;
use crate::weakness::WeaknessReport;

/// What a deliberate-practice set should contain.
#[derive(Clone, Debug, PartialEq)]
pub struct PracticeRequest {
    /// Keep only cards matching one of these topics. Empty keeps everything.
    pub focus_topics: Vec<String>,
    pub target_difficulty: Option<Difficulty>,
    pub max_cards: usize,
    /// How far a card's difficulty rank may be from the target's.
    pub tolerance: u8,
}

impl PracticeRequest {
    pub fn new(max_cards: usize) -> Self {
        Self {
            focus_topics: Vec::new(),
            target_difficulty: None,
            max_cards,
            tolerance: 0,
        }
    }

    pub fn from_config(config: &ComposeConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            ..Self::new(config.max_cards)
        }
    }

    /// Focus on the weak topics of an analysis, most urgent first.
    pub fn for_weaknesses(report: &WeaknessReport, max_cards: usize) -> Self {
        Self {
            focus_topics: report.weak_topic_names(),
            ..Self::new(max_cards)
        }
    }
}

/// Build a focused practice set. Cards keep their pool order; an empty
/// result is a valid, empty deck.
pub fn deliberate_practice(
    decks: &[Deck],
    request: &PracticeRequest,
    now: Timestamp,
) -> DerivedDeck {
    let focus: Vec<String> = request
        .focus_topics
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    let name = if focus.is_empty() {
        "Deliberate practice".to_string()
    } else {
        format!("Deliberate practice: {}", request.focus_topics.join(", "))
    };
    let mut derived = DerivedDeck::new(name, DerivedKind::DeliberatePractice, now);
    derived.entries = pool_cards(decks)
        .filter(|(deck, card)| focus.is_empty() || matches_focus(deck, card, &focus))
        .filter(|(_, card)| match request.target_difficulty {
            Some(target) => within_tolerance(card, target, request.tolerance),
            None => true,
        })
        .take(request.max_cards)
        .map(|(deck, card)| card_ref(deck, card))
        .collect();
    log::debug!(
        "Deliberate practice: {} cards selected from {} decks.",
        derived.len(),
        decks.len()
    );
    derived
}

fn matches_focus(deck: &Deck, card: &Card, focus: &[String]) -> bool {
    let deck_topic = deck.topic().to_lowercase();
    let labels = card
        .tags()
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .chain(std::iter::once(deck_topic))
        .filter(|label| !label.is_empty());
    for label in labels {
        if focus
            .iter()
            .any(|topic| label.contains(topic.as_str()) || topic.contains(label.as_str()))
        {
            return true;
        }
    }
    false
}

/// The difficulty rank implied by a card's ease factor: low ease means hard.
fn rank_of_ease(ease: f64) -> u8 {
    if ease < 2.0 {
        3
    } else if ease < 2.5 {
        2
    } else {
        1
    }
}

fn within_tolerance(card: &Card, target: Difficulty, tolerance: u8) -> bool {
    rank_of_ease(card.state().ease_factor).abs_diff(target.severity()) <= tolerance
}
