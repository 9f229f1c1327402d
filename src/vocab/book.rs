use std::fmt;

use serde::{Deserialize, Serialize};

/// A textbook volume. Serialized by its printed title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Book {
    #[serde(rename = "三年级上册")]
    Grade3Up,
    #[serde(rename = "三年级下册")]
    Grade3Down,
    #[serde(rename = "四年级上册")]
    Grade4Up,
    #[serde(rename = "四年级下册")]
    Grade4Down,
    #[serde(rename = "五年级上册")]
    Grade5Up,
    #[serde(rename = "五年级下册")]
    Grade5Down,
    #[serde(rename = "六年级上册")]
    Grade6Up,
    #[serde(rename = "六年级下册")]
    Grade6Down,
}

pub const ALL_BOOKS: [Book; 8] = [
    Book::Grade3Up,
    Book::Grade3Down,
    Book::Grade4Up,
    Book::Grade4Down,
    Book::Grade5Up,
    Book::Grade5Down,
    Book::Grade6Up,
    Book::Grade6Down,
];

impl Book {
    pub fn title(self) -> &'static str {
        match self {
            Book::Grade3Up => "三年级上册",
            Book::Grade3Down => "三年级下册",
            Book::Grade4Up => "四年级上册",
            Book::Grade4Down => "四年级下册",
            Book::Grade5Up => "五年级上册",
            Book::Grade5Down => "五年级下册",
            Book::Grade6Up => "六年级上册",
            Book::Grade6Down => "六年级下册",
        }
    }

    /// Settings key of the grade master switch guarding this book.
    pub fn grade_key(self) -> &'static str {
        match self {
            Book::Grade3Up => "grade3_up",
            Book::Grade3Down => "grade3_down",
            Book::Grade4Up => "grade4_up",
            Book::Grade4Down => "grade4_down",
            Book::Grade5Up => "grade5_up",
            Book::Grade5Down => "grade5_down",
            Book::Grade6Up => "grade6_up",
            Book::Grade6Down => "grade6_down",
        }
    }

    pub fn from_grade_key(key: &str) -> Option<Self> {
        ALL_BOOKS.into_iter().find(|b| b.grade_key() == key)
    }

    pub fn next(self) -> Self {
        let idx = ALL_BOOKS.iter().position(|&b| b == self).unwrap_or(0);
        ALL_BOOKS[(idx + 1) % ALL_BOOKS.len()]
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "第一单元")]
    Unit1,
    #[serde(rename = "第二单元")]
    Unit2,
    #[serde(rename = "第三单元")]
    Unit3,
    #[serde(rename = "第四单元")]
    Unit4,
}

pub const ALL_UNITS: [Unit; 4] = [Unit::Unit1, Unit::Unit2, Unit::Unit3, Unit::Unit4];

impl Unit {
    pub fn title(self) -> &'static str {
        match self {
            Unit::Unit1 => "第一单元",
            Unit::Unit2 => "第二单元",
            Unit::Unit3 => "第三单元",
            Unit::Unit4 => "第四单元",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Unit::Unit1 => 1,
            Unit::Unit2 => 2,
            Unit::Unit3 => 3,
            Unit::Unit4 => 4,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_as_title() {
        let json = serde_json::to_string(&Book::Grade6Up).unwrap();
        assert_eq!(json, "\"六年级上册\"");
        let back: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Book::Grade6Up);
    }

    #[test]
    fn grade_key_lookup_matches_every_book() {
        for book in ALL_BOOKS {
            assert_eq!(Book::from_grade_key(book.grade_key()), Some(book));
        }
        assert_eq!(Book::from_grade_key("grade7_up"), None);
    }

    #[test]
    fn next_book_wraps_around() {
        assert_eq!(Book::Grade3Up.next(), Book::Grade3Down);
        assert_eq!(Book::Grade6Down.next(), Book::Grade3Up);
    }
}
