use crate::constants::GRADE_COUNT;
use crate::types::{CourseRecord, GradedCurriculum};
use tracing::warn;

/// Splits records into grade buckets 1..=5 and numbers each bucket from 0.
///
/// Every bucket is present in the result, even when empty. Records with an
/// undetermined grade (0) or a grade above 5 are dropped.
pub fn group_by_grade(records: Vec<CourseRecord>) -> GradedCurriculum {
    let mut grouped: GradedCurriculum = (1..=GRADE_COUNT as u8).map(|g| (g, Vec::new())).collect();
    let mut dropped = Vec::new();

    for mut record in records {
        match grouped.get_mut(&record.grade) {
            Some(bucket) => {
                record.id = Some(bucket.len());
                bucket.push(record);
            }
            None => dropped.push(record.title),
        }
    }

    if !dropped.is_empty() {
        warn!(
            "Dropped {} records without a grade: {}",
            dropped.len(),
            dropped.join(", ")
        );
    }
    grouped
}
