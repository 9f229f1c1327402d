use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::SessionStore;
use crate::store::schema::{ChallengeRecord, ExitReason, PrefsData, QuizHistory, QuizRecord};

const QUIZ_HISTORY_FILE: &str = "quiz_history.json";
const CHALLENGE_RECORDS_FILE: &str = "challenge_records.json";
const PREFS_FILE: &str = "prefs.json";

/// File-backed store for histories, challenge records and preference data.
///
/// Every append is a read-modify-write of the whole file. Only one session
/// writes at a time, so there is no cross-process locking.
#[derive(Clone, Debug)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(Self::default_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordgate")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    tracing::warn!(file = name, error = %e, "unreadable store file, using empty default");
                    T::default()
                }),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Newest first.
    pub fn load_quiz_history(&self) -> Vec<QuizHistory> {
        let all: Vec<QuizHistory> = self.load(QUIZ_HISTORY_FILE);
        all.into_iter().map(QuizHistory::normalized).collect()
    }

    pub fn load_challenge_records(&self) -> Vec<ChallengeRecord> {
        self.load(CHALLENGE_RECORDS_FILE)
    }

    pub fn load_prefs(&self) -> PrefsData {
        self.load(PREFS_FILE)
    }

    pub fn save_prefs(&self, data: &PrefsData) -> Result<()> {
        self.save(PREFS_FILE, data)
    }

    /// Prepend a tally entry numbered after the existing ones.
    pub fn push_quiz_record(&self, correct: usize, total: usize, success: bool) -> Result<QuizRecord> {
        let mut prefs = self.load_prefs();
        let record = QuizRecord {
            attempt: prefs.quiz_records.len() + 1,
            correct_count: correct,
            total_count: total,
            is_success: success,
        };
        prefs.quiz_records.insert(0, record.clone());
        self.save_prefs(&prefs)?;
        Ok(record)
    }

    pub fn clear_quiz_records(&self) -> Result<()> {
        let mut prefs = self.load_prefs();
        prefs.quiz_records.clear();
        self.save_prefs(&prefs)
    }

    /// Read and clear the exit flag left by the last round.
    pub fn take_last_exit_reason(&self) -> Result<Option<ExitReason>> {
        let mut prefs = self.load_prefs();
        let reason = prefs.last_exit_reason.take();
        if reason.is_some() {
            self.save_prefs(&prefs)?;
        }
        Ok(reason)
    }

    /// Highest persisted challenge score, scanning raw JSON so records from
    /// older layouts still count.
    fn persisted_challenge_best(&self) -> Option<usize> {
        let path = self.file_path(CHALLENGE_RECORDS_FILE);
        let content = fs::read_to_string(path).ok()?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&content).ok()?;
        Some(
            values
                .iter()
                .filter_map(|v| v.get("correct_count").and_then(serde_json::Value::as_u64))
                .max()
                .unwrap_or(0) as usize,
        )
    }
}

impl SessionStore for JsonStore {
    fn append_quiz_history(&self, history: &QuizHistory) -> Result<()> {
        let mut all: Vec<QuizHistory> = self.load(QUIZ_HISTORY_FILE);
        all.insert(0, history.clone());
        self.save(QUIZ_HISTORY_FILE, &all)
    }

    fn append_challenge_record(&self, record: &ChallengeRecord) -> Result<()> {
        let mut all = self.load_challenge_records();
        all.insert(0, record.clone());
        self.save(CHALLENGE_RECORDS_FILE, &all)
    }

    fn challenge_best(&self, current: usize) -> usize {
        match self.persisted_challenge_best() {
            Some(best) => best.max(current),
            None => current,
        }
    }

    fn set_last_exit_reason(&self, reason: Option<ExitReason>) -> Result<()> {
        let mut prefs = self.load_prefs();
        prefs.last_exit_reason = reason;
        self.save_prefs(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn history_is_newest_first() {
        let (_dir, store) = store();
        for n in 1..=3 {
            let h = QuizHistory {
                correct_count: n,
                total_count: 3,
                ..Default::default()
            };
            store.append_quiz_history(&h).unwrap();
        }
        let all = store.load_quiz_history();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].correct_count, 3);
        assert_eq!(all[2].correct_count, 1);
    }

    #[test]
    fn corrupt_history_reads_as_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join(QUIZ_HISTORY_FILE), "{{ not json").unwrap();
        assert!(store.load_quiz_history().is_empty());
        // Appending over a corrupt file starts a fresh list.
        store.append_quiz_history(&QuizHistory::default()).unwrap();
        assert_eq!(store.load_quiz_history().len(), 1);
    }

    #[test]
    fn challenge_best_scans_records() {
        let (_dir, store) = store();
        assert_eq!(store.challenge_best(4), 4);
        for score in [7, 12, 3] {
            let r = ChallengeRecord {
                correct_count: score,
                ..Default::default()
            };
            store.append_challenge_record(&r).unwrap();
        }
        assert_eq!(store.challenge_best(0), 12);
        assert_eq!(store.challenge_best(20), 20);
    }

    #[test]
    fn challenge_best_falls_back_on_corrupt_file() {
        let (dir, store) = store();
        fs::write(dir.path().join(CHALLENGE_RECORDS_FILE), "garbage").unwrap();
        assert_eq!(store.challenge_best(5), 5);
    }

    #[test]
    fn quiz_records_number_attempts() {
        let (_dir, store) = store();
        store.push_quiz_record(5, 8, false).unwrap();
        let second = store.push_quiz_record(8, 8, true).unwrap();
        assert_eq!(second.attempt, 2);
        let prefs = store.load_prefs();
        assert_eq!(prefs.quiz_records[0].attempt, 2);
        store.clear_quiz_records().unwrap();
        assert!(store.load_prefs().quiz_records.is_empty());
    }

    #[test]
    fn exit_reason_is_taken_once() {
        let (_dir, store) = store();
        store.set_last_exit_reason(Some(ExitReason::Exit)).unwrap();
        assert_eq!(store.take_last_exit_reason().unwrap(), Some(ExitReason::Exit));
        assert_eq!(store.take_last_exit_reason().unwrap(), None);
    }
}
