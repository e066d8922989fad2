use crate::types::CourseRecord;
use std::ops::RangeInclusive;
use tracing::info;

/// Grade ranges taken from each page of a split curriculum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRanges {
    pub shared: RangeInclusive<u8>,
    pub track: RangeInclusive<u8>,
}

impl Default for SplitRanges {
    fn default() -> Self {
        Self {
            shared: 1..=3,
            track: 4..=5,
        }
    }
}

/// Merges a department's shared lower-grade page with a track's
/// upper-grade page. Shared records come first; each source keeps its order.
#[derive(Debug, Clone, Default)]
pub struct CurriculumReconciler {
    ranges: SplitRanges,
}

impl CurriculumReconciler {
    pub fn new(ranges: SplitRanges) -> Self {
        Self { ranges }
    }

    pub fn reconcile(
        &self,
        shared: Vec<CourseRecord>,
        track: Vec<CourseRecord>,
    ) -> Vec<CourseRecord> {
        let mut merged: Vec<CourseRecord> = shared
            .into_iter()
            .filter(|r| self.ranges.shared.contains(&r.grade))
            .collect();
        let shared_count = merged.len();
        info!(
            "Found {} records (grades {}-{})",
            shared_count,
            self.ranges.shared.start(),
            self.ranges.shared.end()
        );

        merged.extend(track.into_iter().filter(|r| self.ranges.track.contains(&r.grade)));
        info!(
            "Found {} records (grades {}-{})",
            merged.len() - shared_count,
            self.ranges.track.start(),
            self.ranges.track.end()
        );

        merged
    }
}
