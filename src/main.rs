use anyhow::Context;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use kosen_syllabus_scraper::apis::SyllabusCrawler;
use kosen_syllabus_scraper::config::Config;
use kosen_syllabus_scraper::constants::DEFAULT_OUTPUT_DIR;
use kosen_syllabus_scraper::error::SyllabusError;
use kosen_syllabus_scraper::infra::http_client::ReqwestPageFetcher;
use kosen_syllabus_scraper::logging;
use kosen_syllabus_scraper::pipeline::{Pipeline, PipelineResult};
use kosen_syllabus_scraper::storage::FsCurriculumStore;

#[derive(Parser)]
#[command(name = "kosen_syllabus_scraper")]
#[command(about = "Scrapes a department curriculum from the KOSEN web syllabus")]
#[command(after_help = "Course codes: M, ED, EJ, C, A\nExample: kosen_syllabus_scraper 2025 EJ")]
#[command(version)]
struct Cli {
    /// Academic year, e.g. 2025
    year: u16,

    /// Department course code (M, ED, EJ, C, A unless the config file says otherwise)
    course_code: String,

    /// Root directory for curriculum/<year>/<course_code>/<grade>.json
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// TOML config file; built-in defaults are used when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Page load timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,
}

fn print_summary(result: &PipelineResult) {
    println!("\n📊 Curriculum for {} {}:", result.course_code, result.year);
    for (grade, count) in &result.records_per_grade {
        println!("   Grade {}: {} courses", grade, count);
    }
    println!("   Total: {}", result.total_records);
    for file in &result.output_files {
        println!("   💾 {}", file);
    }
}

async fn run(cli: Cli) -> anyhow::Result<PipelineResult> {
    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_env_overrides();
    if let Some(timeout_secs) = cli.timeout_secs {
        config.source.timeout_secs = timeout_secs;
    }

    let department = config.department(&cli.course_code)?.clone();
    let crawler = SyllabusCrawler::from_config(Arc::new(ReqwestPageFetcher::new()), &config)?;
    let store = FsCurriculumStore::new(&cli.output_dir);

    let result = Pipeline::new(crawler)
        .run(&department, cli.year, &store)
        .await
        .with_context(|| format!("scraping {} {}", cli.year, department.code))?;
    Ok(result)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli.log_dir);

    info!("Scraping {} {}", cli.year, cli.course_code);
    match run(cli).await {
        Ok(result) => {
            print_summary(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(SyllabusError::UnknownCourseCode { code, available }) =
                e.downcast_ref::<SyllabusError>()
            {
                error!("Unknown course code: {}", code);
                eprintln!("Unknown course code: {code}");
                eprintln!("Available codes: {}", available.join(", "));
                eprintln!("{}", Cli::command().render_usage());
            } else {
                error!("Scrape failed: {:#}", e);
                eprintln!("❌ Scrape failed: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
