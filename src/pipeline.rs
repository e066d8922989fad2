use crate::apis::SyllabusCrawler;
use crate::config::DepartmentConfig;
use crate::error::Result;
use crate::grouping::group_by_grade;
use crate::reconcile::CurriculumReconciler;
use crate::storage::CurriculumStore;
use crate::types::{CourseRecord, GradedCurriculum};
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub course_code: String,
    pub year: u16,
    pub total_records: usize,
    pub records_per_grade: BTreeMap<u8, usize>,
    pub output_files: Vec<String>,
    pub finished_at: DateTime<Utc>,
}

pub struct Pipeline {
    crawler: SyllabusCrawler,
    reconciler: CurriculumReconciler,
}

impl Pipeline {
    pub fn new(crawler: SyllabusCrawler) -> Self {
        Self {
            crawler,
            reconciler: CurriculumReconciler::default(),
        }
    }

    pub fn with_reconciler(mut self, reconciler: CurriculumReconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    /// Every course of a department across all grades. Split departments
    /// fetch the shared and track pages concurrently and merge them by role.
    #[instrument(skip(self, department), fields(course_code = %department.code))]
    pub async fn collect(
        &self,
        department: &DepartmentConfig,
        year: u16,
    ) -> Result<Vec<CourseRecord>> {
        let records = match department.shared_department_id {
            Some(shared_id) => {
                let (shared, track) = tokio::try_join!(
                    self.crawler.fetch_curriculum(shared_id, year),
                    self.crawler.fetch_curriculum(department.department_id, year),
                )?;
                self.reconciler.reconcile(shared, track)
            }
            None => self.crawler.fetch_curriculum(department.department_id, year).await?,
        };
        info!("Total: {} records", records.len());
        Ok(records)
    }

    /// Collects, groups by grade, and stamps ids.
    pub async fn build(
        &self,
        department: &DepartmentConfig,
        year: u16,
    ) -> Result<GradedCurriculum> {
        let records = self.collect(department, year).await?;
        Ok(group_by_grade(records))
    }

    /// Runs the full pipeline and saves one file per grade.
    #[instrument(skip(self, department, store), fields(course_code = %department.code))]
    pub async fn run(
        &self,
        department: &DepartmentConfig,
        year: u16,
        store: &dyn CurriculumStore,
    ) -> Result<PipelineResult> {
        let curriculum = self.build(department, year).await?;

        let mut output_files = Vec::new();
        let mut records_per_grade = BTreeMap::new();
        for (&grade, records) in &curriculum {
            let written = store.save_grade(year, &department.code, grade, records).await?;
            output_files.push(written);
            records_per_grade.insert(grade, records.len());
        }

        let total_records = records_per_grade.values().sum();
        counter!("syllabus_records_written_total", "course" => department.code.clone())
            .increment(total_records as u64);
        info!("Done! Wrote {} records for {} {}", total_records, year, department.code);

        Ok(PipelineResult {
            course_code: department.code.clone(),
            year,
            total_records,
            records_per_grade,
            output_files,
            finished_at: Utc::now(),
        })
    }
}
