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

//! A full study loop through the public API: analyze, compose, review,
//! persist, reload.

use chrono::TimeZone;
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use recall::Card;
use recall::Deck;
use recall::DeckStore;
use recall::Fallible;
use recall::Library;
use recall::Quality;
use recall::ReviewEvent;
use recall::ReviewState;
use recall::Timestamp;
use recall::compose::interleave::InterleaveRequest;
use recall::compose::interleave::ShuffleMode;
use recall::compose::interleave::distribution_of;
use recall::compose::interleave::interleave;
use recall::compose::practice::PracticeRequest;
use recall::compose::practice::deliberate_practice;
use recall::db::SqliteStore;
use recall::feedback::Tier;
use recall::session::StudySession;
use recall::weakness::Priority;
use recall::weakness::analyze;
use tempfile::tempdir;

fn day(n: u32) -> Timestamp {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    Timestamp::new(start).plus_days(n)
}

fn deck(id: &str, category: &str, count: usize, ease: f64) -> Deck {
    let cards = (0..count)
        .map(|i| {
            let state = ReviewState {
                ease_factor: ease,
                interval_days: 2,
                repetitions: 10,
                ..ReviewState::new(day(0))
            };
            Card::new(format!("{id} question {i}"), format!("{id} answer {i}"), day(0))
                .with_state(state)
        })
        .collect();
    Deck::new(id, format!("{category} deck"), day(0))
        .with_category(category)
        .with_cards(cards)
}

#[test]
fn test_study_loop() -> Fallible<()> {
    let dir = tempdir()?;
    let store = SqliteStore::open_in(dir.path())?;
    store.save_decks(&[deck("bio", "Biology", 3, 1.5), deck("chem", "Chemistry", 2, 2.6)])?;

    let mut library = Library::new(store.load_decks()?);
    let report = analyze(library.decks());
    assert_eq!(report.weak_topic_names(), vec!["Biology".to_string()]);
    assert_eq!(report.weak_topics[0].priority, Some(Priority::High));
    assert_eq!(report.strong_topics[0].topic, "Chemistry");

    let request = PracticeRequest::for_weaknesses(&report, 10);
    let practice = deliberate_practice(library.decks(), &request, day(1));
    assert_eq!(practice.len(), 3);

    let now = day(1);
    let queue = library.derived_queue(&practice, now);
    assert_eq!(queue.len(), 3);
    let mut session = StudySession::new(queue, now);
    let mut tiers = Vec::new();
    while let Some(card) = session.current().cloned() {
        let event = ReviewEvent::new(card.deck_id, card.card_id, Quality::new(5)?, now)
            .with_response_time(1500);
        tiers.push(session.answer(&mut library, &event)?.feedback.tier);
    }
    assert_eq!(tiers, vec![Tier::Good, Tier::Good, Tier::Excellent]);

    for review in session.into_reviews() {
        store.log_review(&review.into_record())?;
    }
    store.save_decks(library.decks())?;

    let reloaded = SqliteStore::open_in(dir.path())?.load_decks()?;
    assert_eq!(store.review_count()?, 3);
    let bio = &reloaded[0];
    for card in &bio.cards {
        assert_eq!(card.state().repetitions, 11);
        assert_eq!(card.state().interval_days, 3);
        assert!((card.state().ease_factor - 1.6).abs() < 1e-9);
        assert_eq!(card.state().last_reviewed_at, Some(now));
        assert!(!card.is_due(now));
    }
    let chem = &reloaded[1];
    assert!(chem.cards.iter().all(|c| c.state().repetitions == 10));
    Ok(())
}

#[test]
fn test_seeded_interleave_is_reproducible() -> Fallible<()> {
    let decks = vec![
        deck("bio", "Biology", 4, 2.5),
        deck("chem", "Chemistry", 3, 2.5),
        deck("phys", "Physics", 2, 2.5),
    ];
    let request = InterleaveRequest::new(ShuffleMode::Random);
    let first = interleave(&decks, &request, &mut ChaCha8Rng::seed_from_u64(9), day(0))?;
    let second = interleave(&decks, &request, &mut ChaCha8Rng::seed_from_u64(9), day(0))?;
    assert_eq!(first.entries, second.entries);

    let counts: Vec<usize> = distribution_of(&first, &decks)
        .into_iter()
        .map(|(_, count)| count)
        .collect();
    assert_eq!(counts, vec![4, 3, 2]);
    Ok(())
}
