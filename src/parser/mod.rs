pub mod normalize;
pub mod quarter;

use crate::config::LabelConfig;
use crate::constants::*;
use crate::types::{CourseRecord, Divide};
use metrics::counter;
use tracing::debug;

pub use normalize::{normalize_lecturer, normalize_title};
pub use quarter::{decode, grid_from_cells};

/// Maps curriculum table rows to course records.
#[derive(Debug, Clone, Default)]
pub struct RowParser {
    labels: LabelConfig,
}

impl RowParser {
    pub fn new(labels: LabelConfig) -> Self {
        Self { labels }
    }

    /// Parses one row. Rows with fewer than `MIN_ROW_CELLS` cells are
    /// section headings or spacer rows and yield `None`.
    pub fn parse_row<S: AsRef<str>>(&self, cells: &[S]) -> Option<CourseRecord> {
        if cells.len() < MIN_ROW_CELLS {
            return None;
        }
        let divide = if cells[DIVIDE_CELL].as_ref().trim() == self.labels.general_education {
            Divide::General
        } else {
            Divide::Specialized
        };
        let required = cells[REQUIRED_CELL].as_ref().trim() == self.labels.required;
        let title = normalize_title(cells[TITLE_CELL].as_ref());
        let credit = quarter::parse_hours(cells[CREDIT_CELL].as_ref());

        let grid = grid_from_cells(&cells[FIRST_QUARTER_CELL..FIRST_QUARTER_CELL + QUARTER_SLOTS]);
        let (grade, term) = decode(&grid);

        let lecturer = normalize_lecturer(cells[LECTURER_CELL].as_ref());

        Some(CourseRecord {
            divide,
            required,
            grade,
            title,
            term,
            credit,
            lecturer,
            id: None,
        })
    }

    /// Parses every usable row, in order.
    pub fn parse_rows<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> Vec<CourseRecord> {
        let mut skipped = 0usize;
        let records: Vec<CourseRecord> = rows
            .iter()
            .filter_map(|row| {
                let record = self.parse_row(row);
                if record.is_none() {
                    skipped += 1;
                }
                record
            })
            .collect();

        if skipped > 0 {
            debug!("Skipped {} rows with fewer than {} cells", skipped, MIN_ROW_CELLS);
            counter!("syllabus_rows_skipped_total").increment(skipped as u64);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Term;

    /// A 27-cell row with the given quarter hours set.
    fn row(
        divide: &str,
        required: &str,
        title: &str,
        credit: &str,
        quarters: &[(usize, &str)],
        lecturer: &str,
    ) -> Vec<String> {
        let mut cells = vec![String::new(); MIN_ROW_CELLS];
        cells[DIVIDE_CELL] = divide.to_string();
        cells[REQUIRED_CELL] = required.to_string();
        cells[TITLE_CELL] = title.to_string();
        cells[3] = "履修単位".to_string();
        cells[4] = "1".to_string();
        cells[CREDIT_CELL] = credit.to_string();
        for &(index, value) in quarters {
            cells[FIRST_QUARTER_CELL + index] = value.to_string();
        }
        cells[LECTURER_CELL] = lecturer.to_string();
        cells
    }

    #[test]
    fn test_end_to_end_row() {
        let cells = row(
            "専門",
            "必修",
            "情報工学概論\n情報工学概論",
            "2",
            &[(1, "2")],
            "山田太郎, 佐藤一郎",
        );
        let record = RowParser::default().parse_row(&cells).unwrap();

        assert_eq!(
            record,
            CourseRecord {
                divide: Divide::Specialized,
                required: true,
                grade: 1,
                title: "情報工学概論".to_string(),
                term: Term::FirstHalf,
                credit: 2,
                lecturer: "山田太郎、\u{3000}佐藤一郎".to_string(),
                id: None,
            }
        );
    }

    #[test]
    fn test_general_elective_row() {
        let cells = row(" 一般 ", "選択", "  英語演習  ", "1", &[(14, "2"), (15, "2")], "Smith");
        let record = RowParser::default().parse_row(&cells).unwrap();

        assert_eq!(record.divide, Divide::General);
        assert!(!record.required);
        assert_eq!(record.title, "英語演習");
        assert_eq!(record.grade, 4);
        assert_eq!(record.term, Term::SecondHalf);
        assert_eq!(record.credit, 1);
    }

    #[test]
    fn test_short_row_is_skipped() {
        let mut cells = row("専門", "必修", "実験", "2", &[(0, "2")], "");
        cells.truncate(MIN_ROW_CELLS - 1);
        assert!(RowParser::default().parse_row(&cells).is_none());
    }

    #[test]
    fn test_unparseable_credit_and_empty_grid() {
        let cells = row("専門", "必修", "卒業研究", "-", &[], "");
        let record = RowParser::default().parse_row(&cells).unwrap();
        assert_eq!(record.credit, 0);
        assert_eq!(record.grade, 0);
    }

    #[test]
    fn test_custom_labels() {
        let parser = RowParser::new(LabelConfig {
            general_education: "General".to_string(),
            required: "Required".to_string(),
        });
        let cells = row("General", "Required", "Physics", "2", &[(8, "2"), (10, "2")], "");
        let record = parser.parse_row(&cells).unwrap();
        assert_eq!(record.divide, Divide::General);
        assert!(record.required);
        assert_eq!(record.grade, 3);
        assert_eq!(record.term, Term::FullYear);

        // default Japanese labels no longer match
        let cells = row("一般", "必修", "Physics", "2", &[(8, "2")], "");
        let record = parser.parse_row(&cells).unwrap();
        assert_eq!(record.divide, Divide::Specialized);
        assert!(!record.required);
    }

    #[test]
    fn test_parse_rows_keeps_order_and_drops_short_rows() {
        let rows = vec![
            row("一般", "必修", "国語", "2", &[(0, "2")], ""),
            vec!["専門科目".to_string()],
            row("専門", "選択", "電気回路", "1", &[(5, "2")], ""),
            Vec::new(),
        ];
        let records = RowParser::default().parse_rows(&rows);
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["国語", "電気回路"]);
    }
}
