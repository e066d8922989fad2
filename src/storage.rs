use crate::error::{Result, SyllabusError};
use crate::types::CourseRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Storage trait for persisting one grade of a curriculum
#[async_trait]
pub trait CurriculumStore: Send + Sync {
    /// Saves the records of `grade`, returning where they were written.
    async fn save_grade(
        &self,
        year: u16,
        course_code: &str,
        grade: u8,
        records: &[CourseRecord],
    ) -> Result<String>;
}

/// Writes `<root>/<year>/<course_code>/<grade>.json`, a pretty-printed
/// JSON array with two-space indentation.
pub struct FsCurriculumStore {
    root: PathBuf,
}

impl FsCurriculumStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn grade_path(&self, year: u16, course_code: &str, grade: u8) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(course_code)
            .join(format!("{grade}.json"))
    }
}

fn write_json(path: &Path, records: &[CourseRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json_content = serde_json::to_string_pretty(records)?;
    fs::write(path, json_content)?;
    Ok(())
}

#[async_trait]
impl CurriculumStore for FsCurriculumStore {
    async fn save_grade(
        &self,
        year: u16,
        course_code: &str,
        grade: u8,
        records: &[CourseRecord],
    ) -> Result<String> {
        let path = self.grade_path(year, course_code, grade);
        info!("Saving to {}...", path.display());
        write_json(&path, records)?;
        Ok(path.to_string_lossy().to_string())
    }
}

type GradeKey = (u16, String, u8);

/// In-memory storage implementation for testing
#[derive(Default)]
pub struct InMemoryCurriculumStore {
    grades: Arc<Mutex<HashMap<GradeKey, Vec<CourseRecord>>>>,
}

impl InMemoryCurriculumStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<GradeKey, Vec<CourseRecord>>>> {
        self.grades
            .lock()
            .map_err(|_| SyllabusError::Storage("in-memory store lock poisoned".to_string()))
    }

    pub fn get(
        &self,
        year: u16,
        course_code: &str,
        grade: u8,
    ) -> Result<Option<Vec<CourseRecord>>> {
        let grades = self.lock()?;
        Ok(grades.get(&(year, course_code.to_string(), grade)).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl CurriculumStore for InMemoryCurriculumStore {
    async fn save_grade(
        &self,
        year: u16,
        course_code: &str,
        grade: u8,
        records: &[CourseRecord],
    ) -> Result<String> {
        let key = format!("memory://{year}/{course_code}/{grade}");
        self.lock()?.insert((year, course_code.to_string(), grade), records.to_vec());
        debug!("Stored {} records at {}", records.len(), key);
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Divide, Term};

    fn record() -> CourseRecord {
        CourseRecord {
            divide: Divide::Specialized,
            required: true,
            grade: 1,
            title: "情報工学概論".to_string(),
            term: Term::FirstHalf,
            credit: 2,
            lecturer: "山田太郎、\u{3000}佐藤一郎".to_string(),
            id: Some(0),
        }
    }

    #[tokio::test]
    async fn test_fs_store_writes_expected_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCurriculumStore::new(dir.path().join("curriculum"));

        let written = store.save_grade(2025, "EJ", 1, &[record()]).await.unwrap();

        let expected_path = dir.path().join("curriculum").join("2025").join("EJ").join("1.json");
        assert_eq!(PathBuf::from(&written), expected_path);

        let content = fs::read_to_string(&expected_path).unwrap();
        let expected = r#"[
  {
    "divide": 1,
    "required": true,
    "grade": 1,
    "title": "情報工学概論",
    "term": 1,
    "credit": 2,
    "lecturer": "山田太郎、　佐藤一郎",
    "id": 0
  }
]"#;
        assert_eq!(content, expected);
    }

    #[tokio::test]
    async fn test_fs_store_empty_grade() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsCurriculumStore::new(dir.path());
        let written = store.save_grade(2024, "M", 5, &[]).await.unwrap();
        assert_eq!(fs::read_to_string(written).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryCurriculumStore::new();
        assert!(store.is_empty().unwrap());
        store.save_grade(2025, "A", 3, &[record()]).await.unwrap();
        assert_eq!(store.get(2025, "A", 3).unwrap().unwrap().len(), 1);
        assert!(store.get(2025, "A", 4).unwrap().is_none());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_store_poisoned_lock_fails_save() {
        let store = InMemoryCurriculumStore::new();
        let grades = Arc::clone(&store.grades);
        let _ = std::thread::spawn(move || {
            let _guard = grades.lock().unwrap();
            panic!("writer crashed while holding the lock");
        })
        .join();

        let err = store.save_grade(2025, "A", 3, &[record()]).await.unwrap_err();
        assert!(matches!(err, SyllabusError::Storage(_)));
        assert!(store.get(2025, "A", 3).is_err());
        assert!(store.len().is_err());
    }
}
