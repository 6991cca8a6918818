//! geoscore CLI entry point.

use anyhow::Result;
use clap::Parser;
use geoscore::analyzer;
use geoscore::domain::models::{GeoScoreResult, SiteType};
use geoscore::error::AppError;
use geoscore::service::{CrawlOptions, SiteCrawler};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "geoscore",
    version,
    about = "GEO score analyzer - measures how likely AI answer engines are to cite a page"
)]
struct Cli {
    /// Page URL to analyze (http/https)
    url: String,

    /// Crawl internal subpages discovered via sitemap and anchors
    #[arg(long)]
    subpages: bool,

    /// Maximum number of subpages to crawl (hard cap 50)
    #[arg(long, default_value_t = 10)]
    max_subpages: usize,

    /// Site classification gating which schema checks apply
    #[arg(long, default_value = "general")]
    site_type: SiteType,

    /// Print the full JSON report instead of the human summary
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let crawler = SiteCrawler::new()?;
    let options = CrawlOptions {
        include_subpages: cli.subpages,
        max_subpages: cli.max_subpages,
    };

    let crawl = crawler.crawl_site(&cli.url, &options).await?;
    if crawl.pages.is_empty() {
        for err in &crawl.errors {
            eprintln!("error: {} ({})", err.error, err.url);
        }
        return Err(AppError::NoPagesCrawled(cli.url).into());
    }

    let result = analyzer::score_site(&cli.url, &crawl.pages, cli.site_type);

    if let Some(path) = &cli.output {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
        eprintln!("report written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    Ok(())
}

fn print_summary(result: &GeoScoreResult) {
    println!("GEO Score: {}/100 ({})", result.total_score, result.grade);
    println!("  {}", result.grade.description());
    println!();

    let categories = [
        ("구조 (Structure)", &result.categories.structure),
        ("스키마 (Schema)", &result.categories.schema),
        ("URL", &result.categories.url),
        ("메타 (Meta)", &result.categories.meta),
        ("콘텐츠 (Content)", &result.categories.content),
    ];
    for (label, category) in categories {
        println!(
            "  {label:<20} {:>3}/{:<3} ({}%)",
            category.score, category.max_score, category.percentage
        );
    }

    if result.pages.len() > 1 {
        println!();
        println!("분석 페이지 {}개:", result.pages.len());
        for page in &result.pages {
            println!("  {:>3}/100  {}", page.scores.total, page.url);
        }
    }

    if !result.recommendations.is_empty() {
        println!();
        println!("개선 권장사항:");
        for recommendation in result.recommendations.iter().take(10) {
            println!(
                "  [{:?}] {}",
                recommendation.priority, recommendation.issue
            );
            println!("         → {} ({})", recommendation.suggestion, recommendation.impact);
        }
    }
}
