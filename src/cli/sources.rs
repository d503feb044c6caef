//! Ingredient sources command handler

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

use crate::config::ConfigLoader;
use crate::services::{IngredientSources, TraceFilter, create_trace_service};

/// Arguments for the ingredient sources report
#[derive(Args, Debug)]
pub struct SourcesArgs {
    /// Product id (GTIN or product class URN) to trace
    #[arg(long, short = 'p')]
    pub product: String,

    /// Earliest date of lots and serials to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Latest date of lots, serials and events to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Answer from a JSON fixture instead of the trace service
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Write the CSV here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl SourcesArgs {
    fn filter(&self) -> Result<TraceFilter> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                anyhow::bail!("--start ({}) is after --end ({})", start, end);
            }
        }
        Ok(TraceFilter {
            product_id: self.product.clone(),
            start_date: self.start,
            end_date: self.end,
        })
    }
}

/// Build the report and write it as CSV
pub async fn handle_sources_command(args: SourcesArgs) -> Result<()> {
    let filter = args.filter()?;
    let config = ConfigLoader::load().context("Failed to load configuration")?;

    let service = create_trace_service(&config.service, args.fixture.clone())
        .context("Failed to create trace service")?;
    let sources =
        IngredientSources::new(service).with_max_traced_items(config.report.max_traced_items);

    let report = sources
        .report(&filter)
        .await
        .with_context(|| format!("Failed to build ingredient sources for {}", filter.product_id))?;

    let csv = report.to_csv();
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, csv)
                .await
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            tracing::info!("Wrote {} row(s) to {}", report.rows().len(), path.display());
        }
        None => print!("{}", csv),
    }

    Ok(())
}
