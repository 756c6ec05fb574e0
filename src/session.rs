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

use std::collections::VecDeque;

use crate::config::FeedbackConfig;
use crate::db::ReviewRecord;
use crate::error::Fallible;
use crate::error::invalid;
use crate::feedback::Feedback;
use crate::feedback::classify_with;
use crate::library::Library;
use crate::types::card::ReviewState;
use crate::types::deck::CardRef;
use crate::types::quality::Quality;
use crate::types::review::ReviewEvent;
use crate::types::timestamp::Timestamp;

/// A study session over a queue of cards.
pub struct StudySession {
    started_at: Timestamp,
    feedback: FeedbackConfig,
    queue: VecDeque<CardRef>,
    /// Consecutive correct answers.
    streak: u32,
    reviews: Vec<Review>,
}

#[derive(Clone, Debug)]
pub struct Review {
    pub card: CardRef,
    pub reviewed_at: Timestamp,
    pub quality: Quality,
    pub state: ReviewState,
}

impl Review {
    /// Failed cards come back later in the same session.
    pub fn should_repeat(&self) -> bool {
        !self.quality.is_pass()
    }

    pub fn into_record(self) -> ReviewRecord {
        ReviewRecord {
            deck_id: self.card.deck_id,
            card_id: self.card.card_id,
            reviewed_at: self.reviewed_at,
            quality: self.quality,
            ease_factor: self.state.ease_factor,
            interval_days: self.state.interval_days,
            due_at: self.state.due_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ReviewOutcome {
    pub state: ReviewState,
    pub feedback: Feedback,
}

impl StudySession {
    pub fn new(queue: Vec<CardRef>, started_at: Timestamp) -> Self {
        Self::with_feedback(queue, started_at, FeedbackConfig::default())
    }

    pub fn with_feedback(
        queue: Vec<CardRef>,
        started_at: Timestamp,
        feedback: FeedbackConfig,
    ) -> Self {
        Self {
            started_at,
            feedback,
            queue: queue.into(),
            streak: 0,
            reviews: Vec::new(),
        }
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// The card to study next.
    pub fn current(&self) -> Option<&CardRef> {
        self.queue.front()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn into_reviews(self) -> Vec<Review> {
        self.reviews
    }

    /// Answer the current card.
    pub fn answer(
        &mut self,
        library: &mut Library,
        event: &ReviewEvent,
    ) -> Fallible<ReviewOutcome> {
        let card = match self.queue.front() {
            Some(card) if card.deck_id == event.deck_id && card.card_id == event.card_id => {
                card.clone()
            }
            Some(card) => {
                return invalid(format!(
                    "Answered card {} but the current card is {}",
                    event.card_id, card.card_id
                ));
            }
            None => return invalid("The session is already finished."),
        };
        let state = library.apply_review(&card, event.quality, event.reviewed_at)?;
        let correct = event.is_correct();
        let feedback = classify_with(
            &self.feedback,
            correct,
            event.response_time_ms,
            Some(self.streak),
        );
        self.streak = if correct { self.streak + 1 } else { 0 };

        self.queue.pop_front();
        let review = Review {
            card,
            reviewed_at: event.reviewed_at,
            quality: event.quality,
            state: state.clone(),
        };
        if review.should_repeat() {
            self.queue.push_back(review.card.clone());
        }
        self.reviews.push(review);
        Ok(ReviewOutcome { state, feedback })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::Tier;
    use crate::helper::at_day;
    use crate::helper::numbered_deck;

    fn event(card: &CardRef, quality: u8, ms: u64) -> ReviewEvent {
        ReviewEvent::new(
            card.deck_id.clone(),
            card.card_id,
            Quality::new(quality).unwrap(),
            at_day(0),
        )
        .with_response_time(ms)
    }

    #[test]
    fn test_full_session() -> Fallible<()> {
        let mut library = Library::new(vec![numbered_deck("a", 3)]);
        let queue = library.study_queue(None, at_day(0));
        let mut session = StudySession::new(queue, at_day(0));
        assert_eq!(session.remaining(), 3);

        let first = session.current().unwrap().clone();
        let outcome = session.answer(&mut library, &event(&first, 5, 2000))?;
        assert_eq!(outcome.feedback.tier, Tier::Good);
        assert_eq!(session.streak(), 1);

        let second = session.current().unwrap().clone();
        let outcome = session.answer(&mut library, &event(&second, 4, 2000))?;
        assert_eq!(outcome.feedback.tier, Tier::Good);

        let third = session.current().unwrap().clone();
        let outcome = session.answer(&mut library, &event(&third, 4, 2000))?;
        // Two correct answers before this one.
        assert_eq!(outcome.feedback.tier, Tier::Excellent);
        assert_eq!(session.streak(), 3);
        assert!(session.is_finished());
        assert_eq!(session.reviews().len(), 3);
        Ok(())
    }

    #[test]
    fn test_failed_card_is_repeated() -> Fallible<()> {
        let mut library = Library::new(vec![numbered_deck("a", 2)]);
        let queue = library.study_queue(None, at_day(0));
        let mut session = StudySession::new(queue, at_day(0));
        let first = session.current().unwrap().clone();
        let outcome = session.answer(&mut library, &event(&first, 1, 3000))?;
        assert_eq!(outcome.feedback.tier, Tier::Struggling);
        assert_eq!(outcome.state.repetitions, 0);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.remaining(), 2);

        let second = session.current().unwrap().clone();
        session.answer(&mut library, &event(&second, 3, 3000))?;
        assert_eq!(session.current(), Some(&first));
        let outcome = session.answer(&mut library, &event(&first, 2, 3000))?;
        // Wrong after one correct answer.
        assert_eq!(outcome.feedback.tier, Tier::NeedsReview);
        assert_eq!(session.remaining(), 1);
        Ok(())
    }

    #[test]
    fn test_answer_out_of_order() {
        let mut library = Library::new(vec![numbered_deck("a", 2)]);
        let queue = library.study_queue(None, at_day(0));
        let second = queue[1].clone();
        let mut session = StudySession::new(queue, at_day(0));
        let err = session
            .answer(&mut library, &event(&second, 4, 1000))
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(session.remaining(), 2);
    }

    #[test]
    fn test_explicit_correctness_wins() -> Fallible<()> {
        let mut library = Library::new(vec![numbered_deck("a", 1)]);
        let queue = library.study_queue(None, at_day(0));
        let mut session = StudySession::new(queue, at_day(0));
        let card = session.current().unwrap().clone();
        let outcome = session.answer(&mut library, &event(&card, 3, 1000).with_correct(false))?;
        assert_eq!(outcome.feedback.tier, Tier::Struggling);
        assert_eq!(session.streak(), 0);
        Ok(())
    }

    #[test]
    fn test_into_record() -> Fallible<()> {
        let mut library = Library::new(vec![numbered_deck("a", 1)]);
        let queue = library.study_queue(None, at_day(0));
        let mut session = StudySession::new(queue, at_day(0));
        let card = session.current().unwrap().clone();
        session.answer(&mut library, &event(&card, 4, 1000))?;
        let record = session.into_reviews().remove(0).into_record();
        assert_eq!(record.card_id, card.card_id);
        assert_eq!(record.interval_days, 1);
        assert_eq!(record.due_at, at_day(1));
        Ok(())
    }
}
