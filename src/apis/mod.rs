pub mod syllabus;
pub mod table;

pub use syllabus::SyllabusCrawler;
pub use table::{extract_tables, LargestTableSelector, TableLocator, TableSelector};
