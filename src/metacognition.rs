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

//! Metacognition checklists: short self-report questionnaires given before,
//! during and after a session, and a 0-100 confidence score over the
//! answers. The score is informational only; nothing schedules from it.

use std::collections::HashMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::invalid;

/// The scale of a rating question that does not name one.
pub const DEFAULT_SCALE: u32 = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Pre,
    Mid,
    Post,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Pre => write!(f, "pre"),
            Phase::Mid => write!(f, "mid"),
            Phase::Post => write!(f, "post"),
        }
    }
}

impl FromStr for Phase {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Phase::Pre),
            "mid" => Ok(Phase::Mid),
            "post" => Ok(Phase::Post),
            _ => invalid(format!("Invalid checklist phase: {s}")),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    Rating {
        #[serde(default)]
        scale: Option<u32>,
    },
    YesNo,
    /// Options are listed best answer first.
    SingleSelect { options: Vec<String> },
    FreeText,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    fn new(id: &str, prompt: &str, kind: QuestionKind) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            kind,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Checklist {
    pub phase: Phase,
    pub questions: Vec<Question>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    YesNo(bool),
    Rating(u32),
    Text(String),
}

/// The checklist for a phase of a session. Built fresh on every call.
pub fn checklist(phase: Phase) -> Checklist {
    let select = |options: &[&str]| QuestionKind::SingleSelect {
        options: options.iter().map(|o| o.to_string()).collect(),
    };
    let rating = QuestionKind::Rating { scale: None };
    let questions = match phase {
        Phase::Pre => vec![
            Question::new(
                "pre-confidence",
                "How confident are you about this material?",
                rating,
            ),
            Question::new(
                "pre-goal",
                "Have you set a goal for this session?",
                QuestionKind::YesNo,
            ),
            Question::new(
                "pre-time",
                "How long do you plan to study?",
                select(&["45 minutes or more", "About 30 minutes", "15 minutes or less"]),
            ),
            Question::new(
                "pre-intent",
                "What do you want to get out of this session?",
                QuestionKind::FreeText,
            ),
        ],
        Phase::Mid => vec![
            Question::new(
                "mid-understanding",
                "How well are you following the material so far?",
                rating,
            ),
            Question::new("mid-focus", "Are you still focused?", QuestionKind::YesNo),
            Question::new(
                "mid-strategy",
                "Which best describes how you are studying right now?",
                select(&["Testing myself", "Re-reading answers", "Guessing"]),
            ),
        ],
        Phase::Post => vec![
            Question::new(
                "post-learning",
                "How well do you think you learned today's material?",
                rating,
            ),
            Question::new(
                "post-goal",
                "Did you meet your session goal?",
                QuestionKind::YesNo,
            ),
            Question::new(
                "post-next",
                "What will you do next?",
                select(&[
                    "Review weak topics",
                    "Move on to new material",
                    "Take a break",
                ]),
            ),
            Question::new(
                "post-hardest",
                "What was the hardest part?",
                QuestionKind::FreeText,
            ),
        ],
    };
    Checklist { phase, questions }
}

/// Score answers to a list of questions on a 0-100 scale. Unanswered
/// questions, and answers of the wrong type, count neither for nor against.
pub fn score(answers: &HashMap<String, Answer>, questions: &[Question]) -> u32 {
    let mut numerator: u64 = 0;
    let mut denominator: u64 = 0;
    for question in questions {
        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        if matches!(answer, Answer::Text(text) if text.is_empty()) {
            continue;
        }
        let contribution = match (&question.kind, answer) {
            (QuestionKind::Rating { scale }, Answer::Rating(value)) => {
                let scale = scale.unwrap_or(DEFAULT_SCALE);
                Some((u64::from((*value).min(scale)), u64::from(scale)))
            }
            (QuestionKind::Rating { scale }, Answer::Text(text)) => {
                let scale = scale.unwrap_or(DEFAULT_SCALE);
                text.trim()
                    .parse::<u32>()
                    .ok()
                    .map(|value| (u64::from(value.min(scale)), u64::from(scale)))
            }
            (QuestionKind::YesNo, Answer::YesNo(yes)) => Some((u64::from(*yes), 1)),
            (QuestionKind::SingleSelect { options }, Answer::Text(selected)) => {
                let n = options.len() as u64;
                match options.iter().position(|o| o == selected) {
                    Some(i) => Some((n - i as u64, n)),
                    None => Some((0, n)),
                }
            }
            (QuestionKind::FreeText, Answer::Text(_)) => Some((1, 1)),
            _ => None,
        };
        match contribution {
            Some((n, d)) => {
                numerator += n;
                denominator += d;
            }
            None => log::debug!("Ignoring mismatched answer to {}.", question.id),
        }
    }
    if denominator == 0 {
        return 0;
    }
    (100.0 * numerator as f64 / denominator as f64).round() as u32
}
