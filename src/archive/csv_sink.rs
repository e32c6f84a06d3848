use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use csv::{Terminator, Writer, WriterBuilder};
use tracing::debug;

use crate::archive::ArchiveError;
use crate::archive::record::{PaintingRecord, CSV_HEADER};
use crate::utils::config::WriteMode;

/// Row-at-a-time CSV output.
///
/// The header is written exactly once per file: on open when the file is new,
/// empty, or truncated, never when appending to existing rows. Every row is
/// flushed before `append` returns so an interrupted run leaves only whole rows.
pub struct CsvSink {
    writer: Writer<File>,
    path: PathBuf,
    rows_written: usize,
}

impl CsvSink {
    pub fn open(path: &Path, mode: WriteMode) -> Result<Self, ArchiveError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = match mode {
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
            WriteMode::Truncate => File::create(path)?,
        };
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        if needs_header {
            debug!("Writing CSV header to {:?}", path);
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            writer,
            path: path.to_path_buf(),
            rows_written: 0,
        })
    }

    pub fn append(&mut self, record: &PaintingRecord) -> Result<(), ArchiveError> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }
}
