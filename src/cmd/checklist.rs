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

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use crate::error::Fallible;
use crate::error::fail;
use crate::metacognition::Answer;
use crate::metacognition::Phase;
use crate::metacognition::checklist;
use crate::metacognition::score;

pub fn print_checklist(phase: Phase) -> Fallible<()> {
    println!("{}", serde_json::to_string_pretty(&checklist(phase))?);
    Ok(())
}

pub fn print_score(phase: Phase, answers: &Path) -> Fallible<()> {
    if !answers.exists() {
        return fail("answers file does not exist.");
    }
    let content = read_to_string(answers)?;
    let answers: HashMap<String, Answer> = serde_json::from_str(&content)?;
    let questions = checklist(phase).questions;
    println!("{}", score(&answers, &questions));
    Ok(())
}
