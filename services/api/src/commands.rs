use crate::infra::load_records_from_path;
use crate::render::{render_html, render_text};
use assessment_report::config::AppConfig;
use assessment_report::error::AppError;
use assessment_report::reports::{AssessmentConfig, ReportCatalog, ReportService};
use chrono::Local;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// Human-readable listing of sections and fields
    #[default]
    Text,
    /// The structured report document as JSON
    Json,
    /// Standalone HTML page
    Html,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Session whose captured record should be reported
    #[arg(long)]
    pub(crate) session_id: String,
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
    /// Assessment catalog JSON (defaults to REPORT_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Session records JSON array (defaults to REPORT_RECORDS_PATH)
    #[arg(long)]
    pub(crate) records: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Assessment catalog JSON (defaults to REPORT_CATALOG_PATH)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        session_id,
        format,
        catalog,
        records,
    } = args;

    let sources = AppConfig::load()?.sources;
    let catalog = ReportCatalog::from_path(catalog.unwrap_or(sources.catalog_path))?;
    let records = load_records_from_path(records.unwrap_or(sources.records_path))?;

    let service = ReportService::new(Arc::new(records), Arc::new(catalog));
    let document = service.generate(&session_id)?;

    let output = match format {
        ReportFormat::Text => render_text(&document),
        ReportFormat::Json => {
            serde_json::to_string_pretty(&document).map_err(std::io::Error::from)?
        }
        ReportFormat::Html => render_html(&document, Local::now()),
    };
    println!("{output}");

    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let path = match args.catalog {
        Some(path) => path,
        None => AppConfig::load()?.sources.catalog_path,
    };
    let catalog = ReportCatalog::from_path(&path)?;

    println!("Assessment catalog: {}", path.display());
    if catalog.is_empty() {
        println!("No assessment layouts configured");
        return Ok(());
    }

    for (assessment_id, config) in catalog.assessment_types() {
        println!("{}", describe_layout(assessment_id, config));
    }

    Ok(())
}

fn describe_layout(assessment_id: &str, config: &AssessmentConfig) -> String {
    let mut line = format!(
        "- {}: {} section(s), {} field(s)",
        assessment_id,
        config.sections.len(),
        config.field_count()
    );

    if !config.classifications.is_empty() {
        let keys: Vec<&str> = config.classifications.keys().map(String::as_str).collect();
        line.push_str(&format!(", classifications [{}]", keys.join(", ")));
    }

    line
}
