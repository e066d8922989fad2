use crate::apis::table::{extract_tables, TableLocator};
use crate::app::ports::{NavigateOptions, PageFetcher};
use crate::config::{Config, SourceConfig};
use crate::error::Result;
use crate::filter::RecordFilter;
use crate::parser::RowParser;
use crate::types::CourseRecord;
use metrics::{counter, histogram};
use std::sync::Arc;
use tracing::{info, instrument};

/// Turns one syllabus department page into filtered course records.
pub struct SyllabusCrawler {
    fetcher: Arc<dyn PageFetcher>,
    source: SourceConfig,
    locator: TableLocator,
    parser: RowParser,
    filter: RecordFilter,
}

impl SyllabusCrawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        source: SourceConfig,
        locator: TableLocator,
        parser: RowParser,
        filter: RecordFilter,
    ) -> Self {
        Self {
            fetcher,
            source,
            locator,
            parser,
            filter,
        }
    }

    /// Crawler wired from config with the default table locator.
    pub fn from_config(fetcher: Arc<dyn PageFetcher>, config: &Config) -> Result<Self> {
        Ok(Self::new(
            fetcher,
            config.source.clone(),
            TableLocator::default(),
            RowParser::new(config.labels.clone()),
            RecordFilter::from_config(&config.filter)?,
        ))
    }

    pub fn department_url(&self, department_id: u32, year: u16) -> String {
        self.source.department_url(department_id, year)
    }

    /// All courses listed on a department page, across every grade.
    #[instrument(skip(self))]
    pub async fn fetch_curriculum(
        &self,
        department_id: u32,
        year: u16,
    ) -> Result<Vec<CourseRecord>> {
        let url = self.department_url(department_id, year);
        info!("Fetching: {}", url);

        let t_fetch = std::time::Instant::now();
        let options = NavigateOptions::with_timeout(self.source.timeout());
        let html = self.fetcher.navigate(&url, &options).await?;
        histogram!("syllabus_fetch_duration_seconds").record(t_fetch.elapsed().as_secs_f64());
        counter!("syllabus_pages_fetched_total").increment(1);

        self.records_from_html(&html, &url)
    }

    /// Parses an already-retrieved page.
    pub fn records_from_html(&self, html: &str, url: &str) -> Result<Vec<CourseRecord>> {
        let tables = extract_tables(html)?;
        let rows = self.locator.data_rows(tables, url)?;
        let records = self.parser.parse_rows(&rows);
        Ok(self.filter.apply(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyllabusError;
    use crate::types::{Divide, Term};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticPage {
        html: String,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn navigate(&self, url: &str, _options: &NavigateOptions) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(self.html.clone())
        }
    }

    fn course_row(divide: &str, required: &str, title: &str, quarter: usize) -> String {
        let mut cells = vec![divide.to_string(), required.to_string(), title.to_string()];
        cells.push("履修単位".to_string());
        cells.push("1".to_string());
        cells.push("2".to_string());
        for i in 0..20 {
            cells.push(if i == quarter { "2".to_string() } else { String::new() });
        }
        cells.push("山田 太郎".to_string());
        let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
        format!("<tr>{tds}</tr>")
    }

    fn page(rows: &[String]) -> String {
        let headers = "<tr><th>h</th></tr>".repeat(4);
        let nav = "<table><tr><td>nav</td></tr></table>";
        format!(
            "<html><body>{nav}<table>{headers}{}</table></body></html>",
            rows.concat()
        )
    }

    #[tokio::test]
    async fn test_fetch_curriculum() {
        let html = page(&[
            course_row("一般", "必修", "国語Ⅰ", 0),
            "<tr><td colspan=\"27\">専門科目</td></tr>".to_string(),
            course_row("専門", "選択", "海外研修", 13),
            course_row("専門", "選択", "情報理論", 18),
        ]);
        let fetcher = Arc::new(StaticPage {
            html,
            requested: Mutex::new(Vec::new()),
        });
        let crawler = SyllabusCrawler::from_config(fetcher.clone(), &Config::akashi()).unwrap();

        let records = crawler.fetch_curriculum(14, 2025).await.unwrap();

        assert_eq!(
            fetcher.requested.lock().unwrap().as_slice(),
            [concat!(
                "https://syllabus.kosen-k.go.jp/Pages/PublicSubjects",
                "?school_id=27&department_id=14&year=2025&lang=ja"
            )]
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "国語Ⅰ");
        assert_eq!(records[0].divide, Divide::General);
        assert_eq!(records[0].grade, 1);
        assert_eq!(records[0].term, Term::FirstHalf);
        assert_eq!(records[1].title, "情報理論");
        assert_eq!(records[1].grade, 5);
        assert_eq!(records[1].term, Term::SecondHalf);
        assert_eq!(records[1].lecturer, "山田\u{3000}太郎");
    }

    #[test]
    fn test_page_without_tables() {
        let fetcher = Arc::new(StaticPage {
            html: String::new(),
            requested: Mutex::new(Vec::new()),
        });
        let crawler = SyllabusCrawler::from_config(fetcher, &Config::akashi()).unwrap();
        let err = crawler.records_from_html("<p>no data</p>", "u").unwrap_err();
        assert!(matches!(err, SyllabusError::MissingTable { .. }));
    }
}
