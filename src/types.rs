use crate::constants::{GRADE_COUNT, QUARTERS_PER_GRADE, QUARTER_SLOTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One `<tr>` of a syllabus table, as the text content of its cells.
pub type RawTableRow = Vec<String>;

/// A table extracted from a page, rows in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<RawTableRow>,
}

impl Table {
    pub fn new(rows: Vec<RawTableRow>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Whether a course is general education or specialized coursework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Divide {
    General,
    Specialized,
}

impl From<Divide> for u8 {
    fn from(divide: Divide) -> Self {
        match divide {
            Divide::General => 0,
            Divide::Specialized => 1,
        }
    }
}

impl TryFrom<u8> for Divide {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Divide::General),
            1 => Ok(Divide::Specialized),
            other => Err(format!("invalid divide code: {other}")),
        }
    }
}

/// Placement of a course within its academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Term {
    FullYear,
    FirstHalf,
    SecondHalf,
}

impl From<Term> for u8 {
    fn from(term: Term) -> Self {
        match term {
            Term::FullYear => 0,
            Term::FirstHalf => 1,
            Term::SecondHalf => 2,
        }
    }
}

impl TryFrom<u8> for Term {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Term::FullYear),
            1 => Ok(Term::FirstHalf),
            2 => Ok(Term::SecondHalf),
            other => Err(format!("invalid term code: {other}")),
        }
    }
}

/// Taught hours per quarter across all five grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuarterGrid(pub [u32; QUARTER_SLOTS]);

impl QuarterGrid {
    /// The four quarters of `grade` (1-based). Out-of-range grades yield `None`.
    pub fn group(&self, grade: u8) -> Option<&[u32]> {
        let index = usize::from(grade).checked_sub(1)?;
        if index >= GRADE_COUNT {
            return None;
        }
        let start = index * QUARTERS_PER_GRADE;
        Some(&self.0[start..start + QUARTERS_PER_GRADE])
    }

    pub fn groups(&self) -> impl Iterator<Item = &[u32]> {
        self.0.chunks(QUARTERS_PER_GRADE)
    }
}

/// A course extracted from one curriculum row.
///
/// Field order matches the JSON written for each grade file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub divide: Divide,
    pub required: bool,
    /// 1..=5, or 0 when no quarter had any hours
    pub grade: u8,
    pub title: String,
    pub term: Term,
    pub credit: u32,
    pub lecturer: String,
    /// Position within the grade bucket; assigned by grouping
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<usize>,
}

/// Final output: grade (1..=5) to id-stamped records.
pub type GradedCurriculum = BTreeMap<u8, Vec<CourseRecord>>;
