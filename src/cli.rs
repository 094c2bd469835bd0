use std::borrow::Cow;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, ValueEnum, error::ErrorKind};

use crate::config::{CompletionColumn, KeyColumn, ReconcileConfig, RenderConfig, ReportConfig};
use crate::constants::cli::DEFAULT_OUTPUT_STEM;
use crate::constants::reconcile::{DEFAULT_COMPLETION_COLUMN_INDEX, ORDERS_TABLE, PLAN_TABLE};
use crate::errors::OrderNestError;
use crate::ingest::load_record_set;
use crate::pipeline::OrderNest;
use crate::render::{DocumentRenderer, HtmlRenderer, TextRenderer, layout};
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Html,
    Text,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => HtmlRenderer.file_extension(),
            OutputFormat::Text => TextRenderer.file_extension(),
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "order_nest",
    disable_help_subcommand = true,
    about = "Build a grouped work report from sales orders and a production plan",
    long_about = "Join a sales order CSV to a production plan CSV on the order key, drop orders the plan marks complete, group the rest by material category, and write a paginated report.",
    after_help = "The completion column defaults to the 10th plan column (index 9). The plan's first column is always its order key."
)]
/// CLI for `order_nest`.
///
/// Common usage:
/// - `order_nest --sales sales.csv --plan plan.csv`
/// - Pick the completion column by name: `--completion-column "Graphics Completed"`
/// - Plain text to stdout-friendly file: `--format text --output today.txt`
struct OrderNestCli {
    #[arg(long, value_name = "CSV", help = "Sales order export")]
    sales: PathBuf,
    #[arg(long, value_name = "CSV", help = "Production plan export")]
    plan: PathBuf,
    #[arg(
        long = "sales-key",
        value_name = "COLUMN",
        help = "Sales order key column (defaults to the first column)"
    )]
    sales_key: Option<String>,
    #[arg(
        long = "completion-index",
        value_name = "INDEX",
        conflicts_with = "completion_column",
        help = "Zero-based plan column holding the completion marker"
    )]
    completion_index: Option<usize>,
    #[arg(
        long = "completion-column",
        value_name = "COLUMN",
        help = "Plan column holding the completion marker, by name"
    )]
    completion_column: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Html, help = "Output format")]
    format: OutputFormat,
    #[arg(
        long,
        short = 'o',
        value_name = "PATH",
        help = "Output file (defaults to Order_Nest_Today.<ext>)"
    )]
    output: Option<PathBuf>,
    #[arg(long, help = "Cover title")]
    title: Option<String>,
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        value_parser = parse_report_date,
        help = "Cover date (defaults to today)"
    )]
    date: Option<NaiveDate>,
}

impl OrderNestCli {
    fn reconcile_config(&self) -> ReconcileConfig {
        let order_key = self
            .sales_key
            .clone()
            .map_or(KeyColumn::First, KeyColumn::Named);
        let completion = match (&self.completion_column, self.completion_index) {
            (Some(name), _) => CompletionColumn::Named(name.clone()),
            (None, Some(index)) => CompletionColumn::Position(index),
            (None, None) => CompletionColumn::Position(DEFAULT_COMPLETION_COLUMN_INDEX),
        };
        ReconcileConfig {
            order_key,
            completion,
        }
    }

    fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::default();
        if let Some(title) = &self.title {
            config.title = Cow::Owned(title.clone());
        }
        config.report_date = self.date;
        config
    }

    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            reconcile: self.reconcile_config(),
            render: self.render_config(),
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{DEFAULT_OUTPUT_STEM}.{}", self.format.extension()))
        })
    }
}

/// Entry point for the `order_nest` binary.
pub fn run_order_nest<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<OrderNestCli, _>(std::iter::once("order_nest".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let orders = load_record_set(ORDERS_TABLE, &cli.sales)?;
    let plan = load_record_set(PLAN_TABLE, &cli.plan)?;

    let config = cli.report_config();
    let output = OrderNest::new(config.reconcile)?.run(&orders, &plan)?;
    let rendered = render_report(&output.report, cli.format, &config.render)?;

    let path = cli.output_path();
    write_output(&path, &rendered)?;

    println!(
        "Wrote {} section(s), {} row(s) to {}",
        output.report.sections.len(),
        output.report.row_count(),
        path.display()
    );
    if output.report.is_empty() {
        println!("No matching rows to display.");
    }
    Ok(())
}

fn render_report(
    report: &Report,
    format: OutputFormat,
    config: &RenderConfig,
) -> Result<String, OrderNestError> {
    match format {
        OutputFormat::Html => Ok(HtmlRenderer.render(&layout(report, config)?)),
        OutputFormat::Text => Ok(TextRenderer.render(&layout(report, config)?)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn write_output(path: &Path, rendered: &str) -> Result<(), OrderNestError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    Ok(())
}

fn parse_report_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("could not parse --date value '{raw}' as YYYY-MM-DD"))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
