use crate::constants::HEADER_ROWS;
use crate::error::{Result, SyllabusError};
use crate::types::{RawTableRow, Table};
use scraper::{Html, Selector};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SyllabusError::Selector(format!("{css}: {e}")))
}

/// Extracts every `<table>` of a page in document order. Each row holds the
/// text content of its `<td>` cells; `<th>` cells are not data.
pub fn extract_tables(html: &str) -> Result<Vec<Table>> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let tables = document
        .select(&table_selector)
        .map(|table| {
            let rows = table
                .select(&row_selector)
                .map(|row| {
                    row.select(&cell_selector)
                        .map(|cell| cell.text().collect::<String>())
                        .collect::<RawTableRow>()
                })
                .collect();
            Table::new(rows)
        })
        .collect();

    Ok(tables)
}

/// Chooses the curriculum table among all tables on a page.
pub trait TableSelector: Send + Sync {
    fn select<'a>(&self, tables: &'a [Table]) -> Result<&'a Table>;
}

/// The curriculum is the largest table on the page. Ties go to the first
/// table in document order. Tables without rows never qualify.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestTableSelector;

impl TableSelector for LargestTableSelector {
    fn select<'a>(&self, tables: &'a [Table]) -> Result<&'a Table> {
        let mut best: Option<&Table> = None;
        let mut max_rows = 0;
        for table in tables {
            if table.row_count() > max_rows {
                max_rows = table.row_count();
                best = Some(table);
            }
        }
        best.ok_or_else(|| SyllabusError::MissingTable { url: String::new() })
    }
}

/// Finds the curriculum table and hands back its data rows.
pub struct TableLocator {
    selector: Box<dyn TableSelector>,
    header_rows: usize,
}

impl Default for TableLocator {
    fn default() -> Self {
        Self::new(Box::new(LargestTableSelector))
    }
}

impl TableLocator {
    pub fn new(selector: Box<dyn TableSelector>) -> Self {
        Self {
            selector,
            header_rows: HEADER_ROWS,
        }
    }

    /// Data rows of the selected table; the leading header rows are skipped
    /// whatever they contain.
    pub fn data_rows(&self, tables: Vec<Table>, url: &str) -> Result<Vec<RawTableRow>> {
        let table = self.selector.select(&tables).map_err(|e| match e {
            SyllabusError::MissingTable { .. } => SyllabusError::MissingTable {
                url: url.to_string(),
            },
            other => other,
        })?;
        Ok(table.rows.iter().skip(self.header_rows).cloned().collect())
    }
}
