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

//! Weakness analysis: per-topic accuracy estimated from scheduling state.
//!
//! Decks do not keep a full answer history, so accuracy is estimated from
//! each card's repetition count and ease factor. The ease-to-success-rate
//! buckets below are a coarse heuristic, not a measurement. The thresholds
//! are fixed so that reports stay comparable across versions.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::types::card::Card;
use crate::types::deck::Deck;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicStat {
    pub topic: String,
    pub attempted: u64,
    /// Estimated, see the module docs.
    pub correct: u64,
    pub accuracy: f64,
    /// Only weak topics have a priority.
    pub priority: Option<Priority>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessReport {
    pub overall_accuracy: f64,
    pub strong_topics: Vec<TopicStat>,
    /// Highest priority first.
    pub weak_topics: Vec<TopicStat>,
    pub trend: Trend,
    pub recommendations: Vec<String>,
}

impl WeaknessReport {
    pub fn weak_topic_names(&self) -> Vec<String> {
        self.weak_topics.iter().map(|t| t.topic.clone()).collect()
    }
}

pub fn analyze(decks: &[Deck]) -> WeaknessReport {
    analyze_with(&AnalysisConfig::default(), decks)
}

pub fn analyze_with(config: &AnalysisConfig, decks: &[Deck]) -> WeaknessReport {
    let mut tallies: Vec<(String, u64, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for deck in decks {
        let topic = deck.topic();
        let i = *index.entry(topic.to_string()).or_insert_with(|| {
            tallies.push((topic.to_string(), 0, 0));
            tallies.len() - 1
        });
        for card in &deck.cards {
            let (attempted, correct) = estimate(card);
            tallies[i].1 += attempted;
            tallies[i].2 += correct;
        }
    }

    let mut strong_topics = Vec::new();
    let mut weak_topics = Vec::new();
    let mut total_attempted = 0;
    let mut total_correct = 0;
    for (topic, attempted, correct) in tallies {
        if attempted == 0 {
            continue;
        }
        total_attempted += attempted;
        total_correct += correct;
        let accuracy = correct as f64 / attempted as f64;
        if accuracy >= config.strong_accuracy {
            strong_topics.push(TopicStat {
                topic,
                attempted,
                correct,
                accuracy,
                priority: None,
            });
        } else {
            weak_topics.push(TopicStat {
                topic,
                attempted,
                correct,
                accuracy,
                priority: Some(priority_of(1.0 - accuracy)),
            });
        }
    }
    // Stable, so topics keep their encounter order within a tier.
    weak_topics.sort_by_key(|t| t.priority);

    let overall_accuracy = if total_attempted == 0 {
        0.0
    } else {
        total_correct as f64 / total_attempted as f64
    };
    let trend = trend_of(weak_topics.len(), strong_topics.len() + weak_topics.len());
    let recommendations = recommend(&strong_topics, &weak_topics);
    log::debug!(
        "Analyzed {} decks: {} strong topics, {} weak topics.",
        decks.len(),
        strong_topics.len(),
        weak_topics.len()
    );
    WeaknessReport {
        overall_accuracy,
        strong_topics,
        weak_topics,
        trend,
        recommendations,
    }
}

/// The attempted count of a card, and the estimated number of those attempts
/// that were correct.
fn estimate(card: &Card) -> (u64, u64) {
    let attempted = u64::from(card.state().repetitions);
    let correct = (attempted as f64 * success_rate(card.state().ease_factor)).round() as u64;
    (attempted, correct)
}

fn success_rate(ease: f64) -> f64 {
    if ease >= 2.5 {
        0.8
    } else if ease >= 2.0 {
        0.5
    } else {
        0.2
    }
}

fn priority_of(error_rate: f64) -> Priority {
    if error_rate >= 0.6 {
        Priority::High
    } else if error_rate >= 0.4 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn trend_of(weak: usize, total: usize) -> Trend {
    if total == 0 {
        // Nothing attempted yet.
        return Trend::Stable;
    }
    let ratio = weak as f64 / total as f64;
    if ratio < 0.3 {
        Trend::Improving
    } else if ratio < 0.6 {
        Trend::Stable
    } else {
        Trend::Declining
    }
}

fn recommend(strong: &[TopicStat], weak: &[TopicStat]) -> Vec<String> {
    let mut lines: Vec<String> = weak
        .iter()
        .map(|t| {
            format!(
                "Focus on {}: accuracy {}%",
                t.topic,
                (t.accuracy * 100.0).round()
            )
        })
        .collect();
    if weak.is_empty() && !strong.is_empty() {
        lines.push("Keep reviewing to maintain your strong topics.".to_string());
    }
    lines
}
