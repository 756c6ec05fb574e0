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

//! Building the study queue: which cards are due, and in what order to study
//! them.

use std::cmp::Ordering;

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// The cards whose next review is at or before `now`, in input order.
pub fn due_cards<'a, I>(cards: I, now: Timestamp) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().filter(|card| card.is_due(now)).collect()
}

/// Order cards for study: oldest due first, then harder cards, then lower
/// ease. The sort is stable, so cards with equal keys keep their input order.
pub fn prioritize<'a, I>(cards: I) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut cards: Vec<&Card> = cards.into_iter().collect();
    prioritize_by(&mut cards, |card| *card);
    cards
}

/// Sort items in study order, by the card each one stands for.
pub fn prioritize_by<T, F>(items: &mut [T], card_of: F)
where
    F: Fn(&T) -> &Card,
{
    items.sort_by(|a, b| study_order(card_of(a), card_of(b)));
}

/// The due subset of `cards`, prioritized.
pub fn build_queue<'a, I>(cards: I, now: Timestamp) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    prioritize(due_cards(cards, now))
}

fn study_order(a: &Card, b: &Card) -> Ordering {
    let (a, b) = (a.state(), b.state());
    a.due_at
        .cmp(&b.due_at)
        .then_with(|| b.difficulty.severity().cmp(&a.difficulty.severity()))
        .then_with(|| a.ease_factor.total_cmp(&b.ease_factor))
}
