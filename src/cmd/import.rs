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

use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::error::invalid;
use crate::types::card::Card;
use crate::types::deck::Deck;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckImport {
    id: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    cards: Vec<CardImport>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardImport {
    front: String,
    back: String,
    #[serde(default)]
    tags: Vec<String>,
}

pub fn import_decks(directory: Option<String>, file: &Path) -> Fallible<()> {
    if !file.exists() {
        return fail("import file does not exist.");
    }
    let content = read_to_string(file)?;
    let decks = parse_import(&content, Timestamp::now())?;
    let mut coll = Collection::new(directory)?;
    let count = decks.len();
    for deck in decks {
        coll.library.upsert(deck);
    }
    if !coll.save() {
        return fail("could not save the imported decks.");
    }
    println!("Imported {count} decks.");
    Ok(())
}

/// Parse a JSON array of decks. Imported cards start out new and due now.
fn parse_import(content: &str, now: Timestamp) -> Fallible<Vec<Deck>> {
    let imports: Vec<DeckImport> = serde_json::from_str(content)?;
    let mut decks = Vec::with_capacity(imports.len());
    for import in imports {
        let cards: Vec<Card> = import
            .cards
            .into_iter()
            .map(|c| Card::new(c.front, c.back, now).with_tags(c.tags))
            .collect();
        let mut seen = HashSet::new();
        if let Some(dup) = cards.iter().find(|card| !seen.insert(card.id())) {
            return invalid(format!(
                "Deck {} has the card \"{}\" more than once",
                import.id,
                dup.front()
            ));
        }
        let deck = Deck::new(import.id, import.name, now).with_cards(cards);
        decks.push(match import.category {
            Some(category) => deck.with_category(category),
            None => deck,
        });
    }
    Ok(decks)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::cmd::review::review_card;
    use crate::db::SqliteStore;
    use crate::error::ErrorKind;
    use crate::helper::at_day;
    use crate::store::DeckStore;
    use crate::types::card_id::CardId;

    #[test]
    fn test_parse_import() -> Fallible<()> {
        let json = r#"[
            {
                "id": "greek",
                "name": "Greek",
                "category": "Languages",
                "cards": [
                    {"front": "alpha", "back": "a", "tags": ["letters"]},
                    {"front": "beta", "back": "b"}
                ]
            }
        ]"#;
        let decks = parse_import(json, at_day(2))?;
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].topic(), "Languages");
        assert_eq!(decks[0].cards.len(), 2);
        assert_eq!(decks[0].cards[0].tags(), ["letters".to_string()]);
        assert!(decks[0].cards[1].is_due(at_day(2)));
        Ok(())
    }

    #[test]
    fn test_parse_import_rejects_duplicate_cards() {
        let json = r#"[
            {
                "id": "d",
                "name": "D",
                "cards": [
                    {"front": "q", "back": "a"},
                    {"front": "q", "back": "a"}
                ]
            }
        ]"#;
        let err = parse_import(json, at_day(0)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_reimport_keeps_progress() -> Fallible<()> {
        let dir = tempdir()?;
        let file = dir.path().join("decks.json");
        std::fs::write(
            &file,
            r#"[{"id": "d", "name": "D", "cards": [{"front": "q", "back": "a"}]}]"#,
        )?;
        let directory = dir.path().to_str().map(str::to_string);
        import_decks(directory.clone(), &file)?;
        let card = CardId::of_content("q", "a").to_hex();
        review_card(directory.clone(), "d".to_string(), &card, 5, None, None)?;
        review_card(directory.clone(), "d".to_string(), &card, 5, None, None)?;

        import_decks(directory, &file)?;
        let decks = SqliteStore::open_in(dir.path())?.load_decks()?;
        assert_eq!(decks[0].cards[0].state().repetitions, 2);
        Ok(())
    }

    #[test]
    fn test_parse_import_invalid() {
        let err = parse_import("{", at_day(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }
}
