use crate::config::FilterConfig;
use crate::error::Result;
use crate::types::CourseRecord;
use metrics::counter;
use regex::RegexSet;
use tracing::debug;

/// Drops courses whose title matches any configured exclusion pattern
/// (study-abroad programs, courses for international students, ...).
#[derive(Debug, Clone)]
pub struct RecordFilter {
    patterns: RegexSet,
}

impl RecordFilter {
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            patterns: RegexSet::new(patterns)?,
        })
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::new(&config.exclude_title_patterns)
    }

    pub fn is_excluded(&self, record: &CourseRecord) -> bool {
        self.patterns.is_match(&record.title)
    }

    pub fn apply(&self, records: Vec<CourseRecord>) -> Vec<CourseRecord> {
        let before = records.len();
        let kept: Vec<CourseRecord> = records
            .into_iter()
            .filter(|record| {
                let excluded = self.is_excluded(record);
                if excluded {
                    debug!("Excluding course: {}", record.title);
                }
                !excluded
            })
            .collect();

        let excluded = before - kept.len();
        if excluded > 0 {
            counter!("syllabus_records_excluded_total").increment(excluded as u64);
        }
        kept
    }
}
