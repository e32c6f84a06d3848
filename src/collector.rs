use anyhow::{Result, Context};
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{info, warn};

use crate::archive::ArchiveError;
use crate::archive::csv_sink::CsvSink;
use crate::archive::image_store::ImageStore;
use crate::archive::record::PaintingRecord;
use crate::catalog::{Catalog, CatalogError};
use crate::extract::{extract_record, ExtractError};
use crate::utils::config::CollectorConfig;

/// Why a single record was not collected.
#[derive(Error, Debug)]
enum RecordError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl RecordError {
    /// Fetch, parse, and payload problems only cost the record at hand. Failing
    /// to write the output files ends the run.
    fn is_recoverable(&self) -> bool {
        match self {
            RecordError::Catalog(e) => e.is_recoverable(),
            RecordError::Extract(_) => true,
            RecordError::Archive(ArchiveError::NotAnImage { .. }) => true,
            RecordError::Archive(_) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Walks `[start, end)` one record at a time: fetch, extract, download the
/// image, append the row. The catalog session lives exactly as long as the
/// collector that owns it.
pub struct Collector<C: Catalog> {
    catalog: C,
    config: CollectorConfig,
}

impl<C: Catalog> Collector<C> {
    pub fn new(catalog: C, config: CollectorConfig) -> Self {
        Self { catalog, config }
    }

    pub fn run(mut self) -> Result<RunSummary> {
        let start = self.config.start;
        let end = match self.config.end {
            Some(end) => end,
            None => self
                .catalog
                .total_records()
                .context("Failed to resolve the catalog's record count")?,
        };
        info!("Collecting pomological watercolors {} through {}", start, end);

        let range = start..end.max(start);
        if !range.is_empty() {
            match self.catalog.connect(start) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => warn!("First catalog page failed: {}", e),
                Err(e) => return Err(e).context("Failed to reach the catalog"),
            }
        }

        let mut csv = CsvSink::open(&self.config.csv_name, self.config.write_mode)
            .with_context(|| format!("Failed to open CSV output {:?}", self.config.csv_name))?;
        let images = ImageStore::create(&self.config.images_dir)
            .with_context(|| format!("Failed to create image directory {:?}", self.config.images_dir))?;

        let progress = self.progress_bar(range.len() as u64);
        let mut summary = RunSummary::default();

        for index in range {
            summary.attempted += 1;
            match self.collect_one(index, &mut csv, &images) {
                Ok(record) => {
                    summary.written += 1;
                    if self.config.verbose {
                        info!(
                            "[{}] painting {}: {} ({})",
                            index,
                            record.painting_number,
                            record.fruit,
                            record.year.map(|y| y.to_string()).unwrap_or_default()
                        );
                    }
                }
                Err(e) if e.is_recoverable() => {
                    summary.skipped += 1;
                    warn!("Skipping record {}: {}", index, e);
                }
                Err(e) => {
                    progress.abandon();
                    return Err(e).with_context(|| format!("Collection aborted at record {}", index));
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!(
            "Wrote {} rows to {:?} ({} skipped)",
            csv.rows_written(),
            csv.path(),
            summary.skipped
        );
        Ok(summary)
    }

    fn collect_one(
        &mut self,
        index: usize,
        csv: &mut CsvSink,
        images: &ImageStore,
    ) -> Result<PaintingRecord, RecordError> {
        let page = self.catalog.fetch_record(index)?;
        let record = extract_record(&page)?;
        let bytes = self.catalog.fetch_image(&record.image_url)?;
        images.save(record.painting_number, &bytes)?;
        csv.append(&record)?;
        Ok(record)
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.config.verbose {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(len);
        let style = ProgressStyle::with_template("{bar:40} {pos}/{len} records ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar
    }
}
