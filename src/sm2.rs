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

//! SM-2 scheduling: maps a card's review state and a quality grade to the
//! card's next review state.

use crate::error::Fallible;
use crate::types::card::Difficulty;
use crate::types::card::MIN_EASE;
use crate::types::card::ReviewState;
use crate::types::quality::Quality;
use crate::types::timestamp::Timestamp;

/// The interval after the first successful review.
const FIRST_INTERVAL: u32 = 1;

/// The interval after the second successful review.
const SECOND_INTERVAL: u32 = 6;

/// Compute the state of a card after a review graded `quality` at `now`.
pub fn next_state(state: &ReviewState, quality: Quality, now: Timestamp) -> ReviewState {
    let q = quality.value();
    let (interval_days, repetitions) = if quality.is_pass() {
        let interval = match state.repetitions {
            0 => FIRST_INTERVAL,
            1 => SECOND_INTERVAL,
            _ => next_interval(state.interval_days, state.ease_factor),
        };
        (interval, state.repetitions + 1)
    } else {
        (FIRST_INTERVAL, 0)
    };
    ReviewState {
        ease_factor: new_ease(state.ease_factor, q),
        interval_days,
        repetitions,
        due_at: now.plus_days(interval_days),
        last_reviewed_at: Some(now),
        difficulty: difficulty_of(q),
    }
}

/// Like [`next_state`], for a raw grade that has not been validated yet.
pub fn next_state_raw(state: &ReviewState, quality: u8, now: Timestamp) -> Fallible<ReviewState> {
    let quality = Quality::new(quality)?;
    Ok(next_state(state, quality, now))
}

fn new_ease(ease: f64, q: u8) -> f64 {
    let miss = f64::from(5 - q);
    let ease = ease + (0.1 - miss * (0.08 + miss * 0.02));
    ease.max(MIN_EASE)
}

fn next_interval(interval: u32, ease: f64) -> u32 {
    let days = (f64::from(interval) * ease).round();
    // Intervals are at least a day, and saturate rather than wrap.
    days.clamp(1.0, f64::from(u32::MAX)) as u32
}

fn difficulty_of(q: u8) -> Difficulty {
    if q >= 4 {
        Difficulty::Easy
    } else if q == 3 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn state(ease_factor: f64, interval_days: u32, repetitions: u32) -> ReviewState {
        let mut state = ReviewState::new(Timestamp::now());
        state.ease_factor = ease_factor;
        state.interval_days = interval_days;
        state.repetitions = repetitions;
        state
    }

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    #[test]
    fn test_failure_resets() {
        let now = Timestamp::now();
        for grade in 0..3 {
            let next = next_state(&state(2.5, 40, 7), q(grade), now);
            assert_eq!(next.repetitions, 0);
            assert_eq!(next.interval_days, 1);
            assert_eq!(next.difficulty, Difficulty::Hard);
        }
    }

    #[test]
    fn test_success_intervals() {
        let now = Timestamp::now();
        for grade in 3..=5 {
            assert_eq!(next_state(&state(2.5, 1, 0), q(grade), now).interval_days, 1);
            assert_eq!(next_state(&state(2.5, 1, 1), q(grade), now).interval_days, 6);
            assert_eq!(next_state(&state(2.1, 10, 4), q(grade), now).interval_days, 21);
        }
    }

    #[test]
    fn test_concrete_scenario() {
        let now = Timestamp::now();
        let next = next_state(&state(2.5, 6, 2), q(4), now);
        assert!((next.ease_factor - 2.5).abs() < 1e-9);
        assert_eq!(next.interval_days, 15);
        assert_eq!(next.repetitions, 3);
        assert_eq!(next.difficulty, Difficulty::Easy);
        assert_eq!(next.due_at, now.plus_days(15));
        assert_eq!(next.last_reviewed_at, Some(now));
    }

    #[test]
    fn test_ease_updates() {
        let now = Timestamp::now();
        // q=5: +0.1
        let next = next_state(&state(2.5, 1, 0), q(5), now);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
        // q=3: -0.14
        let next = next_state(&state(2.5, 1, 0), q(3), now);
        assert!((next.ease_factor - 2.36).abs() < 1e-9);
        assert_eq!(next.difficulty, Difficulty::Medium);
        // q=0: -0.8, applied on failure too.
        let next = next_state(&state(2.5, 1, 0), q(0), now);
        assert!((next.ease_factor - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_ease_floor() {
        let now = Timestamp::now();
        let mut current = state(2.5, 1, 0);
        for _ in 0..1000 {
            current = next_state(&current, q(0), now);
            assert!(current.ease_factor >= MIN_EASE);
        }
        assert_eq!(current.ease_factor, MIN_EASE);
    }

    #[test]
    fn test_raw_quality_out_of_range() {
        let result = next_state_raw(&state(2.5, 1, 0), 6, Timestamp::now());
        assert!(result.unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_raw_quality_in_range() -> Fallible<()> {
        let next = next_state_raw(&state(2.5, 1, 0), 4, Timestamp::now())?;
        assert_eq!(next.repetitions, 1);
        Ok(())
    }

    #[test]
    fn test_input_not_mutated() {
        let before = state(2.5, 6, 2);
        let copy = before.clone();
        let _ = next_state(&before, q(1), Timestamp::now());
        assert_eq!(before, copy);
    }
}
