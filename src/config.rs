use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::{ALL_BOOKS, ALL_UNITS, Book, Unit};

pub const MIN_QUESTION_COUNT: usize = 8;
pub const MIN_TIME_PER_QUESTION: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitKey {
    pub book: Book,
    pub unit: Unit,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_usage_limit_secs")]
    pub usage_limit_secs: u32,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_time_per_question")]
    pub time_per_question: u32,
    #[serde(default)]
    pub written_mode: bool,
    #[serde(default = "default_parent_password")]
    pub parent_password: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Grade master switches. Units of a book not listed here are never quizzed.
    #[serde(default = "default_enabled_books")]
    pub enabled_books: Vec<Book>,
    #[serde(default = "default_selected_units")]
    pub selected_units: Vec<UnitKey>,
}

fn default_usage_limit_secs() -> u32 {
    600
}
fn default_question_count() -> usize {
    MIN_QUESTION_COUNT
}
fn default_time_per_question() -> u32 {
    30
}
fn default_parent_password() -> String {
    "z123456".to_string()
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_enabled_books() -> Vec<Book> {
    vec![Book::Grade6Up]
}
fn default_selected_units() -> Vec<UnitKey> {
    vec![UnitKey {
        book: Book::Grade6Up,
        unit: Unit::Unit1,
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            usage_limit_secs: default_usage_limit_secs(),
            question_count: default_question_count(),
            time_per_question: default_time_per_question(),
            written_mode: false,
            parent_password: default_parent_password(),
            theme: default_theme(),
            enabled_books: default_enabled_books(),
            selected_units: default_selected_units(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("当前密码错误")]
    Mismatch,
    #[error("新密码不能为空")]
    Empty,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordgate")
            .join("config.toml")
    }

    pub fn is_book_enabled(&self, book: Book) -> bool {
        self.enabled_books.contains(&book)
    }

    pub fn is_unit_selected(&self, book: Book, unit: Unit) -> bool {
        self.selected_units
            .iter()
            .any(|k| k.book == book && k.unit == unit)
    }

    /// Units the quiz draws from, in textbook order. A unit only counts when
    /// its book's grade switch is on.
    pub fn selected_units(&self) -> Vec<(Book, Unit)> {
        let mut out = Vec::new();
        for book in ALL_BOOKS {
            if !self.is_book_enabled(book) {
                continue;
            }
            for unit in ALL_UNITS {
                if self.is_unit_selected(book, unit) {
                    out.push((book, unit));
                }
            }
        }
        out
    }

    /// Turning a grade off also clears every unit of that book.
    pub fn set_book_enabled(&mut self, book: Book, enabled: bool) {
        if enabled {
            if !self.is_book_enabled(book) {
                self.enabled_books.push(book);
            }
        } else {
            self.enabled_books.retain(|&b| b != book);
            self.selected_units.retain(|k| k.book != book);
        }
    }

    /// Returns false when the unit's grade switch is off.
    pub fn toggle_unit(&mut self, book: Book, unit: Unit) -> bool {
        if !self.is_book_enabled(book) {
            return false;
        }
        if self.is_unit_selected(book, unit) {
            self.selected_units
                .retain(|k| !(k.book == book && k.unit == unit));
        } else {
            self.selected_units.push(UnitKey { book, unit });
        }
        true
    }

    /// Clamp everything a parent may have typed by hand into usable values.
    pub fn normalize(&mut self) {
        if self.question_count < MIN_QUESTION_COUNT {
            self.question_count = MIN_QUESTION_COUNT;
        }
        if self.time_per_question < MIN_TIME_PER_QUESTION {
            self.time_per_question = default_time_per_question();
        }
        if self.usage_limit_secs == 0 {
            self.usage_limit_secs = default_usage_limit_secs();
        }

        let enabled = self.enabled_books.clone();
        self.selected_units.retain(|k| enabled.contains(&k.book));
        let mut seen = Vec::new();
        self.selected_units.retain(|k| {
            if seen.contains(k) {
                false
            } else {
                seen.push(*k);
                true
            }
        });

        if self.selected_units.is_empty() {
            self.set_book_enabled(Book::Grade6Up, true);
            self.selected_units.extend(default_selected_units());
        }
    }

    pub fn set_question_count_text(&mut self, text: &str) {
        self.question_count = parse_question_count(text);
    }

    pub fn set_time_per_question_text(&mut self, text: &str) {
        self.time_per_question = parse_time_per_question(text);
    }

    pub fn set_usage_limit_text(&mut self, text: &str) {
        self.usage_limit_secs = parse_usage_limit(text);
    }

    pub fn check_password(&self, attempt: &str) -> bool {
        attempt == self.parent_password
    }

    pub fn change_password(&mut self, current: &str, new: &str) -> Result<(), PasswordError> {
        if !self.check_password(current) {
            return Err(PasswordError::Mismatch);
        }
        if new.is_empty() {
            return Err(PasswordError::Empty);
        }
        self.parent_password = new.to_string();
        Ok(())
    }
}

pub fn parse_question_count(text: &str) -> usize {
    match text.trim().parse::<usize>() {
        Ok(n) if n >= MIN_QUESTION_COUNT => n,
        _ => MIN_QUESTION_COUNT,
    }
}

pub fn parse_time_per_question(text: &str) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(n) if n >= MIN_TIME_PER_QUESTION => n,
        _ => default_time_per_question(),
    }
}

/// Whole seconds of foreground time; zero or garbage falls back to ten minutes.
pub fn parse_usage_limit(text: &str) -> u32 {
    match text.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => default_usage_limit_secs(),
    }
}
