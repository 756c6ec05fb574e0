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
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

use crate::compose::card_ref;
use crate::config::ComposeConfig;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::invalid;
use crate::types::deck::CardRef;
use crate::types::deck::Deck;
use crate::types::deck::DeckId;
use crate::types::deck::DerivedDeck;
use crate::types::deck::DerivedKind;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleMode {
    /// Take one card from each deck in turn.
    RoundRobin,
    /// Uniform shuffle of all selected cards.
    Random,
}

impl Display for ShuffleMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShuffleMode::RoundRobin => write!(f, "round-robin"),
            ShuffleMode::Random => write!(f, "random"),
        }
    }
}

impl FromStr for ShuffleMode {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round-robin" => Ok(ShuffleMode::RoundRobin),
            "random" => Ok(ShuffleMode::Random),
            _ => invalid(format!("Invalid shuffle mode: {s}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterleaveRequest {
    /// Restrict to these decks. `None` selects every deck in the pool.
    pub deck_ids: Option<Vec<DeckId>>,
    /// The most cards taken from any one deck. `None` takes all.
    pub per_deck_cap: Option<usize>,
    pub mode: ShuffleMode,
}

impl InterleaveRequest {
    pub fn new(mode: ShuffleMode) -> Self {
        Self {
            deck_ids: None,
            per_deck_cap: None,
            mode,
        }
    }

    pub fn from_config(config: &ComposeConfig) -> Self {
        Self {
            deck_ids: None,
            per_deck_cap: config.per_deck_cap,
            mode: config.shuffle,
        }
    }
}

/// Mix cards from several decks into one study set. Naming a deck id that
/// is not in the pool is an error.
pub fn interleave<R>(
    decks: &[Deck],
    request: &InterleaveRequest,
    rng: &mut R,
    now: Timestamp,
) -> Fallible<DerivedDeck>
where
    R: Rng + ?Sized,
{
    let selected: Vec<&Deck> = match &request.deck_ids {
        None => decks.iter().collect(),
        Some(ids) => {
            for id in ids {
                if !decks.iter().any(|deck| &deck.id == id) {
                    return invalid(format!("No deck with id {id}"));
                }
            }
            decks.iter().filter(|deck| ids.contains(&deck.id)).collect()
        }
    };
    let groups: Vec<Vec<CardRef>> = selected
        .iter()
        .map(|deck| {
            let cap = request.per_deck_cap.unwrap_or(deck.cards.len());
            deck.cards
                .iter()
                .take(cap)
                .map(|card| card_ref(deck, card))
                .collect()
        })
        .collect();

    let entries = match request.mode {
        ShuffleMode::RoundRobin => round_robin(groups),
        ShuffleMode::Random => {
            let mut entries: Vec<CardRef> = groups.into_iter().flatten().collect();
            entries.shuffle(rng);
            entries
        }
    };
    let name = format!("Interleaved ({} decks)", selected.len());
    let mut derived = DerivedDeck::new(name, DerivedKind::Interleaved, now);
    derived.entries = entries;
    log::debug!(
        "Interleaved {} cards from {} decks ({}).",
        derived.len(),
        selected.len(),
        request.mode
    );
    Ok(derived)
}

/// Index 0 of every group, then index 1 of every group, and so on. Groups
/// that run out are skipped.
fn round_robin(groups: Vec<Vec<CardRef>>) -> Vec<CardRef> {
    let total = groups.iter().map(Vec::len).sum();
    let mut iters: Vec<_> = groups.into_iter().map(Vec::into_iter).collect();
    let mut entries = Vec::with_capacity(total);
    while entries.len() < total {
        for iter in iters.iter_mut() {
            if let Some(entry) = iter.next() {
                entries.push(entry);
            }
        }
    }
    entries
}

/// How many cards of a derived deck came from each original deck. An entry
/// counts toward the deck it references; if that deck is not among
/// `originals`, it counts toward the first original holding the same card.
/// Every original deck is listed, in order, even when its count is zero.
pub fn distribution_of(derived: &DerivedDeck, originals: &[Deck]) -> Vec<(DeckId, usize)> {
    let mut counts: Vec<(DeckId, usize)> =
        originals.iter().map(|deck| (deck.id.clone(), 0)).collect();
    for entry in &derived.entries {
        let origin = originals
            .iter()
            .position(|deck| deck.id == entry.deck_id)
            .or_else(|| originals.iter().position(|deck| deck.contains(entry.card_id)));
        if let Some(i) = origin {
            counts[i].1 += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::helper::at_day;
    use crate::helper::numbered_deck;
    use crate::types::card::Card;

    fn pool() -> Vec<Deck> {
        vec![
            numbered_deck("a", 2),
            numbered_deck("b", 3),
            numbered_deck("c", 1),
        ]
    }

    fn sources(derived: &DerivedDeck) -> Vec<&str> {
        derived.entries.iter().map(|e| e.deck_id.as_str()).collect()
    }

    #[test]
    fn test_round_robin_two_three_one() -> Fallible<()> {
        let decks = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let request = InterleaveRequest::new(ShuffleMode::RoundRobin);
        let derived = interleave(&decks, &request, &mut rng, at_day(0))?;
        assert_eq!(derived.len(), 6);
        assert_eq!(sources(&derived), vec!["a", "b", "c", "a", "b", "b"]);
        // The only repeat is at the tail, once deck b is the only one left.
        let src = sources(&derived);
        for (i, pair) in src.windows(2).enumerate() {
            if pair[0] == pair[1] {
                assert_eq!(i, 4);
            }
        }
        assert_eq!(*src.last().unwrap(), "b");
        Ok(())
    }

    #[test]
    fn test_per_deck_cap_and_subset() -> Fallible<()> {
        let decks = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let request = InterleaveRequest {
            deck_ids: Some(vec![DeckId::from("b"), DeckId::from("a")]),
            per_deck_cap: Some(1),
            mode: ShuffleMode::RoundRobin,
        };
        let derived = interleave(&decks, &request, &mut rng, at_day(0))?;
        assert_eq!(sources(&derived), vec!["a", "b"]);
        let fronts: Vec<&str> = derived.resolve(&decks).into_iter().map(|c| c.front()).collect();
        assert_eq!(fronts, vec!["a 0", "b 0"]);
        Ok(())
    }

    #[test]
    fn test_unknown_deck_id() {
        let decks = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let request = InterleaveRequest {
            deck_ids: Some(vec![DeckId::from("zzz")]),
            per_deck_cap: None,
            mode: ShuffleMode::Random,
        };
        let err = interleave(&decks, &request, &mut rng, at_day(0)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_random_is_a_permutation() -> Fallible<()> {
        let decks = pool();
        let request = InterleaveRequest::new(ShuffleMode::Random);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let first = interleave(&decks, &request, &mut rng, at_day(0))?;
        assert_eq!(first.len(), 6);
        let mut ids: Vec<_> = first.entries.iter().map(|e| e.card_id).collect();
        ids.sort();
        let mut expected: Vec<_> = decks
            .iter()
            .flat_map(|d| d.cards.iter().map(|c| c.id()))
            .collect();
        expected.sort();
        assert_eq!(ids, expected);

        // Same seed, same order.
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let second = interleave(&decks, &request, &mut rng, at_day(0))?;
        assert_eq!(first.entries, second.entries);
        Ok(())
    }

    #[test]
    fn test_random_shuffle_is_roughly_uniform() -> Fallible<()> {
        // Where the first card of deck "c" lands, over many shuffles.
        let decks = pool();
        let target = decks[2].cards[0].id();
        let request = InterleaveRequest::new(ShuffleMode::Random);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut positions = [0usize; 6];
        let trials = 6000;
        for _ in 0..trials {
            let derived = interleave(&decks, &request, &mut rng, at_day(0))?;
            let i = derived
                .entries
                .iter()
                .position(|e| e.card_id == target)
                .unwrap();
            positions[i] += 1;
        }
        for count in positions {
            assert!((800..1200).contains(&count), "count = {count}");
        }
        Ok(())
    }

    #[test]
    fn test_empty_pool() -> Fallible<()> {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let request = InterleaveRequest::new(ShuffleMode::RoundRobin);
        let derived = interleave(&[], &request, &mut rng, at_day(0))?;
        assert!(derived.is_empty());
        Ok(())
    }

    #[test]
    fn test_distribution_of() -> Fallible<()> {
        let decks = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let request = InterleaveRequest {
            deck_ids: Some(vec![DeckId::from("a"), DeckId::from("b")]),
            per_deck_cap: Some(2),
            mode: ShuffleMode::Random,
        };
        let derived = interleave(&decks, &request, &mut rng, at_day(0))?;
        assert_eq!(
            distribution_of(&derived, &decks),
            vec![
                (DeckId::from("a"), 2),
                (DeckId::from("b"), 2),
                (DeckId::from("c"), 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_distribution_follows_entry_deck() -> Fallible<()> {
        let shared = |id: &str| {
            Deck::new(id, id, at_day(0)).with_cards(vec![Card::new("2+2", "4", at_day(0))])
        };
        let decks = vec![shared("math"), shared("arith")];
        let request = InterleaveRequest::new(ShuffleMode::RoundRobin);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let derived = interleave(&decks, &request, &mut rng, at_day(0))?;
        assert_eq!(
            distribution_of(&derived, &decks),
            vec![(DeckId::from("math"), 1), (DeckId::from("arith"), 1)]
        );

        // An entry whose deck is not listed falls back to card identity.
        let renamed = vec![shared("maths")];
        assert_eq!(
            distribution_of(&derived, &renamed),
            vec![(DeckId::from("maths"), 2)]
        );
        Ok(())
    }

    #[test]
    fn test_shuffle_mode_parse() {
        assert_eq!("random".parse::<ShuffleMode>().unwrap(), ShuffleMode::Random);
        assert_eq!(
            "round-robin".parse::<ShuffleMode>().unwrap(),
            ShuffleMode::RoundRobin
        );
        assert!(
            "sideways"
                .parse::<ShuffleMode>()
                .unwrap_err()
                .is_invalid_argument()
        );
    }
}
