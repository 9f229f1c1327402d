use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored in place of an answer for questions the child never answered.
pub const UNANSWERED: &str = "(未作答)";

/// Full review detail of one quiz round. Files carry no schema version, so
/// every field falls back to its default when missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizHistory {
    pub date: DateTime<Utc>,
    pub meanings: Vec<String>,
    pub answers: Vec<String>,
    pub user_answers: Vec<String>,
    pub correct_count: usize,
    pub total_count: usize,
    pub is_success: bool,
    pub range_text: Option<String>,
}

impl QuizHistory {
    /// Pad `user_answers` so every question has an entry.
    pub fn normalized(mut self) -> Self {
        let len = self.meanings.len().max(self.answers.len());
        while self.user_answers.len() < len {
            self.user_answers.push(UNANSWERED.to_string());
        }
        self
    }

    pub fn user_answer(&self, idx: usize) -> &str {
        match self.user_answers.get(idx) {
            Some(a) if !a.trim().is_empty() => a,
            _ => UNANSWERED,
        }
    }

    /// Numbered "meaning / expected / given" listing for the detail view.
    pub fn detail_text(&self) -> String {
        self.meanings
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let expected = self.answers.get(i).map(String::as_str).unwrap_or("");
                format!(
                    "{}. 【{}】\n标准答案: {}\n你的答案: {}",
                    i + 1,
                    m,
                    expected,
                    self.user_answer(i)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeRecord {
    pub date: DateTime<Utc>,
    pub correct_count: usize,
    pub failed_word: Option<String>,
    pub failed_meaning: Option<String>,
    pub failed_phonetic: Option<String>,
    pub is_exit: bool,
    pub is_success: bool,
    pub level: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRecord {
    pub attempt: usize,
    pub correct_count: usize,
    pub total_count: usize,
    pub is_success: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// The child backed out of a round (or ended a challenge early).
    Exit,
}

/// Small flags and tallies kept outside the settings file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefsData {
    pub quiz_records: Vec<QuizRecord>,
    pub last_exit_reason: Option<ExitReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_tolerates_missing_fields() {
        let h: QuizHistory = serde_json::from_str(r#"{"correct_count": 3}"#).unwrap();
        assert_eq!(h.correct_count, 3);
        assert!(h.meanings.is_empty());
        assert!(h.range_text.is_none());
    }

    #[test]
    fn normalized_pads_with_placeholder() {
        let h = QuizHistory {
            meanings: vec!["猫".into(), "狗".into(), "鸟".into()],
            answers: vec!["cat".into(), "dog".into(), "bird".into()],
            user_answers: vec!["cat".into()],
            ..Default::default()
        }
        .normalized();
        assert_eq!(h.user_answers.len(), 3);
        assert_eq!(h.user_answers[2], UNANSWERED);
    }

    #[test]
    fn detail_text_marks_blank_answers() {
        let h = QuizHistory {
            meanings: vec!["猫".into()],
            answers: vec!["cat".into()],
            user_answers: vec!["  ".into()],
            ..Default::default()
        };
        let text = h.detail_text();
        assert!(text.contains("标准答案: cat"));
        assert!(text.contains(UNANSWERED));
    }

    #[test]
    fn exit_reason_serializes_as_word() {
        let prefs = PrefsData {
            quiz_records: Vec::new(),
            last_exit_reason: Some(ExitReason::Exit),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("\"exit\""));
    }
}
