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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::cmd::analyze::print_analysis;
use crate::cmd::checklist::print_checklist;
use crate::cmd::checklist::print_score;
use crate::cmd::compose::print_interleaved;
use crate::cmd::compose::print_practice;
use crate::cmd::import::import_decks;
use crate::cmd::queue::print_queue;
use crate::cmd::review::review_card;
use crate::cmd::stats::print_stats;
use crate::compose::interleave::ShuffleMode;
use crate::error::Fallible;
use crate::metacognition::Phase;
use crate::types::card::Difficulty;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the collection directory. Defaults to the current directory.
    #[arg(long, short, global = true)]
    directory: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add or replace decks from a JSON file.
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },
    /// Print the cards due now, in study order.
    Queue {
        /// Only this deck.
        #[arg(long)]
        deck: Option<String>,
    },
    /// Review one card.
    Review {
        deck: String,
        /// The card id, in hex.
        card: String,
        /// The recall grade, 0 to 5.
        quality: u8,
        /// How long the answer took, in milliseconds.
        #[arg(long)]
        ms: Option<u64>,
        /// The current streak of correct answers.
        #[arg(long)]
        streak: Option<u32>,
    },
    /// Print per-topic strengths and weaknesses.
    Analyze,
    /// Print a deliberate-practice set.
    Practice {
        /// Focus on these topics. Defaults to the weak topics.
        #[arg(long = "topic")]
        topics: Vec<String>,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        tolerance: Option<u8>,
    },
    /// Print an interleaved set.
    Interleave {
        /// Only these decks.
        #[arg(long = "deck")]
        decks: Vec<String>,
        /// At most this many cards per deck.
        #[arg(long)]
        cap: Option<usize>,
        /// `round-robin` or `random`.
        #[arg(long)]
        shuffle: Option<ShuffleMode>,
        /// Seed for the random shuffle.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the metacognition checklist of a session phase.
    Checklist {
        /// `pre`, `mid` or `post`.
        phase: Phase,
    },
    /// Score answers to a metacognition checklist.
    Score {
        phase: Phase,
        /// Path to a JSON object mapping question ids to answers.
        answers: PathBuf,
    },
    /// Print collection statistics.
    Stats,
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let directory = cli.directory;
    match cli.command {
        Command::Import { file } => import_decks(directory, &file),
        Command::Queue { deck } => print_queue(directory, deck),
        Command::Review {
            deck,
            card,
            quality,
            ms,
            streak,
        } => review_card(directory, deck, &card, quality, ms, streak),
        Command::Analyze => print_analysis(directory),
        Command::Practice {
            topics,
            difficulty,
            max,
            tolerance,
        } => print_practice(directory, topics, difficulty, max, tolerance),
        Command::Interleave {
            decks,
            cap,
            shuffle,
            seed,
        } => print_interleaved(directory, decks, cap, shuffle, seed),
        Command::Checklist { phase } => print_checklist(phase),
        Command::Score { phase, answers } => print_score(phase, &answers),
        Command::Stats => print_stats(directory),
    }
}
