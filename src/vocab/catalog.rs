use rand::Rng;
use rand::seq::SliceRandom;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::vocab::book::{Book, Unit};

#[derive(Embed)]
#[folder = "assets/vocab/"]
struct VocabAssets;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocab {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub phonetic: String,
    pub book: Book,
    pub unit: Unit,
}

impl Vocab {
    pub fn new(word: &str, meaning: &str, phonetic: &str, book: Book, unit: Unit) -> Self {
        Self {
            word: word.to_string(),
            meaning: meaning.to_string(),
            phonetic: phonetic.to_string(),
            book,
            unit,
        }
    }

    pub fn in_selection(&self, selection: &[(Book, Unit)]) -> bool {
        selection.iter().any(|&(b, u)| b == self.book && u == self.unit)
    }
}

/// On-disk shape of the bundled catalogs: words grouped by (book, unit).
#[derive(Deserialize)]
struct UnitGroup {
    book: Book,
    unit: Unit,
    words: Vec<WordEntry>,
}

#[derive(Deserialize)]
struct WordEntry {
    word: String,
    meaning: String,
    #[serde(default)]
    phonetic: String,
}

fn parse_groups(json: &str) -> Vec<Vocab> {
    let groups: Vec<UnitGroup> = match serde_json::from_str(json) {
        Ok(groups) => groups,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable vocabulary catalog, using empty list");
            Vec::new()
        }
    };
    groups
        .into_iter()
        .flat_map(|g| {
            let (book, unit) = (g.book, g.unit);
            g.words.into_iter().map(move |w| Vocab {
                word: w.word,
                meaning: w.meaning,
                phonetic: w.phonetic,
                book,
                unit,
            })
        })
        .collect()
}

fn load_asset(name: &str) -> Vec<Vocab> {
    match VocabAssets::get(name) {
        Some(file) => match std::str::from_utf8(file.data.as_ref()) {
            Ok(content) => parse_groups(content),
            Err(e) => {
                tracing::warn!(asset = name, error = %e, "vocabulary asset is not UTF-8");
                Vec::new()
            }
        },
        None => {
            tracing::warn!(asset = name, "vocabulary asset missing");
            Vec::new()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VocabRepository {
    entries: Vec<Vocab>,
    extras: Vec<Vocab>,
}

impl VocabRepository {
    pub fn load() -> Self {
        let entries = load_asset("catalog.json");
        let extras = load_asset("extra.json");
        tracing::debug!(entries = entries.len(), extras = extras.len(), "vocabulary catalog loaded");
        Self { entries, extras }
    }

    pub fn from_entries(entries: Vec<Vocab>, extras: Vec<Vocab>) -> Self {
        Self { entries, extras }
    }

    pub fn all(&self) -> &[Vocab] {
        &self.entries
    }

    /// Bonus words spliced into the challenge stream.
    pub fn extras(&self) -> &[Vocab] {
        &self.extras
    }

    pub fn in_selection(&self, selection: &[(Book, Unit)]) -> Vec<Vocab> {
        self.entries
            .iter()
            .filter(|v| v.in_selection(selection))
            .cloned()
            .collect()
    }

    pub fn in_book(&self, book: Book) -> Vec<Vocab> {
        self.entries.iter().filter(|v| v.book == book).cloned().collect()
    }

    /// Pick a flashcard for review mode.
    pub fn random_in_selection<R: Rng>(
        &self,
        selection: &[(Book, Unit)],
        rng: &mut R,
    ) -> Option<&Vocab> {
        let candidates: Vec<&Vocab> = self
            .entries
            .iter()
            .filter(|v| v.in_selection(selection))
            .collect();
        candidates.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::vocab::book::{ALL_BOOKS, ALL_UNITS};

    #[test]
    fn bundled_catalog_covers_every_unit() {
        let repo = VocabRepository::load();
        for book in ALL_BOOKS {
            for unit in ALL_UNITS {
                let words = repo.in_selection(&[(book, unit)]);
                assert!(!words.is_empty(), "{book} {unit} has no words");
            }
        }
        assert!(!repo.extras().is_empty());
    }

    #[test]
    fn parse_groups_tolerates_missing_phonetic_and_garbage() {
        let json = r#"[{"book":"三年级上册","unit":"第一单元","words":[{"word":"pen","meaning":"钢笔"}]}]"#;
        let words = parse_groups(json);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].phonetic, "");
        assert_eq!(words[0].book, Book::Grade3Up);

        assert!(parse_groups("not json").is_empty());
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn corrupt_catalog_is_logged() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let words = tracing::subscriber::with_default(subscriber, || parse_groups("[{\"book\":"));
        assert!(words.is_empty());

        let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("WARN"));
        assert!(log.contains("unreadable vocabulary catalog"));
    }

    #[test]
    fn random_in_selection_respects_selection() {
        let repo = VocabRepository::from_entries(
            vec![
                Vocab::new("cat", "猫", "", Book::Grade3Up, Unit::Unit1),
                Vocab::new("dog", "狗", "", Book::Grade3Up, Unit::Unit2),
            ],
            Vec::new(),
        );
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let v = repo
                .random_in_selection(&[(Book::Grade3Up, Unit::Unit2)], &mut rng)
                .unwrap();
            assert_eq!(v.word, "dog");
        }
        assert!(repo.random_in_selection(&[(Book::Grade6Up, Unit::Unit1)], &mut rng).is_none());
    }
}
