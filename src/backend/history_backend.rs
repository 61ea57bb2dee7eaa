//! Persistence for analysis history and the saved-resume library.
//!
//! Both collections are JSON arrays under fixed keys in a [`Storage`]
//! backend, loaded at startup and written back on every change. The store
//! is generic over the storage so tests run against a temp directory.

use crate::analysis::AnalysisResult;
use crate::constant::{JD_PREVIEW_CHARS, MAX_HISTORY_ITEMS};
use crate::storage::{Storage, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const HISTORY_KEY: &str = "history";
const LIBRARY_KEY: &str = "library";

/// One completed analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub score: u32,
    /// Role targeted by the run, derived from the extracted title.
    pub role: String,
    pub jd_preview: String,
    pub full_jd: String,
    pub full_resume: String,
    pub result: AnalysisResult,
}

impl HistoryItem {
    pub fn from_run(jd: &str, resume: &str, result: AnalysisResult) -> Self {
        let jd_preview: String = jd.chars().take(JD_PREVIEW_CHARS).collect();
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            score: result.overall_score,
            role: result.personal_info.title.clone(),
            jd_preview,
            full_jd: jd.to_string(),
            full_resume: resume.to_string(),
            result,
        }
    }
}

/// A named resume kept in the library for reuse across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResume {
    pub id: String,
    pub name: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

pub struct HistoryBackend<S: Storage> {
    storage: S,
}

impl<S: Storage> HistoryBackend<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn load_history(&self) -> Result<Vec<HistoryItem>, StorageError> {
        self.load_list(HISTORY_KEY)
    }

    /// Prepend a run and persist, keeping the list capped.
    pub fn push_history(&self, item: HistoryItem) -> Result<Vec<HistoryItem>, StorageError> {
        let mut items = self.load_history()?;
        items.insert(0, item);
        items.truncate(MAX_HISTORY_ITEMS);
        self.save_list(HISTORY_KEY, &items)?;
        Ok(items)
    }

    pub fn remove_history(&self, id: &str) -> Result<Vec<HistoryItem>, StorageError> {
        let mut items = self.load_history()?;
        items.retain(|item| item.id != id);
        self.save_list(HISTORY_KEY, &items)?;
        Ok(items)
    }

    pub fn clear_history(&self) -> Result<(), StorageError> {
        self.storage.remove(HISTORY_KEY)
    }

    pub fn load_library(&self) -> Result<Vec<SavedResume>, StorageError> {
        self.load_list(LIBRARY_KEY)
    }

    /// Save a resume under a name, replacing an existing entry of the same
    /// name. Returns the updated library, newest first.
    pub fn save_resume(
        &self,
        name: &str,
        content: &str,
    ) -> Result<Vec<SavedResume>, StorageError> {
        let mut items = self.load_library()?;
        items.retain(|r| r.name != name);
        items.insert(
            0,
            SavedResume {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                content: content.to_string(),
                updated_at: Utc::now(),
            },
        );
        self.save_list(LIBRARY_KEY, &items)?;
        Ok(items)
    }

    pub fn delete_resume(&self, id: &str) -> Result<Vec<SavedResume>, StorageError> {
        let mut items = self.load_library()?;
        items.retain(|r| r.id != id);
        self.save_list(LIBRARY_KEY, &items)?;
        Ok(items)
    }

    fn load_list<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.storage.get(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(items)?;
        self.storage.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CultureFit, PersonalInfo};
    use crate::storage::FileStorage;
    use std::fs;
    use std::path::PathBuf;

    fn sample_result(score: u32) -> AnalysisResult {
        AnalysisResult {
            overall_score: score,
            projected_score: 95,
            summary: String::new(),
            culture_fit: CultureFit {
                company_name: "Acme".to_string(),
                inferred_values: vec![],
                alignment_score: 50,
                analysis: String::new(),
            },
            breakdown: vec![],
            personal_info: PersonalInfo {
                name: "Jane".to_string(),
                title: "Engineer".to_string(),
                email: String::new(),
                phone: String::new(),
                linkedin: None,
                website: None,
                location: None,
            },
            skills: vec![],
            certifications: vec![],
            missing_keywords: vec![],
            critical_keywords: vec![],
            strengths: vec![],
            weaknesses: vec![],
            improvements: vec![],
            rewritten_resume: "# Jane".to_string(),
            cover_letter: String::new(),
        }
    }

    fn setup_backend() -> (HistoryBackend<FileStorage>, PathBuf) {
        let dir = std::env::temp_dir().join(format!("test_history_{}", Uuid::new_v4()));
        let backend = HistoryBackend::new(FileStorage::new(dir.clone()).unwrap());
        (backend, dir)
    }

    fn cleanup(dir: &std::path::Path) {
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let (backend, dir) = setup_backend();

        for score in 0..(MAX_HISTORY_ITEMS as u32 + 5) {
            backend
                .push_history(HistoryItem::from_run("jd", "resume", sample_result(score)))
                .unwrap();
        }

        let items = backend.load_history().unwrap();
        assert_eq!(items.len(), MAX_HISTORY_ITEMS);
        assert_eq!(items[0].score, MAX_HISTORY_ITEMS as u32 + 4);

        cleanup(&dir);
    }

    #[test]
    fn history_survives_reload() {
        let (backend, dir) = setup_backend();

        let item = HistoryItem::from_run("a long job description", "resume", sample_result(80));
        backend.push_history(item.clone()).unwrap();

        let reloaded = HistoryBackend::new(FileStorage::new(dir.clone()).unwrap());
        let items = reloaded.load_history().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0], item);

        cleanup(&dir);
    }

    #[test]
    fn remove_and_clear_history() {
        let (backend, dir) = setup_backend();

        let item = HistoryItem::from_run("jd", "resume", sample_result(70));
        let id = item.id.clone();
        backend.push_history(item).unwrap();
        backend
            .push_history(HistoryItem::from_run("jd2", "resume2", sample_result(60)))
            .unwrap();

        let items = backend.remove_history(&id).unwrap();
        assert_eq!(items.len(), 1);

        backend.clear_history().unwrap();
        assert!(backend.load_history().unwrap().is_empty());

        cleanup(&dir);
    }

    #[test]
    fn library_replaces_entries_by_name() {
        let (backend, dir) = setup_backend();

        backend.save_resume("Backend CV", "# v1").unwrap();
        let items = backend.save_resume("Backend CV", "# v2").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].content, "# v2");

        let items = backend.save_resume("SRE CV", "# sre").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "SRE CV");

        let items = backend.delete_resume(&items[0].id).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Backend CV");

        cleanup(&dir);
    }

    #[test]
    fn jd_preview_is_truncated() {
        let long_jd = "x".repeat(500);
        let item = HistoryItem::from_run(&long_jd, "resume", sample_result(50));
        assert_eq!(item.jd_preview.len(), JD_PREVIEW_CHARS);
        assert_eq!(item.full_jd.len(), 500);
    }
}
