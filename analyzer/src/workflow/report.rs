use anyhow::Context;
use log::warn;
use sbfcore::analysis::report::NOT_AVAILABLE;
use sbfcore::QualityReport;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Appends report rows to a CSV file, reusing the header already on disk.
pub struct ReportWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    header: Option<Vec<String>>,
}

impl ReportWriter {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }

        let header = Self::existing_header(&path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening report {}", path.display()))?;

        Ok(Self {
            writer: csv::Writer::from_writer(file),
            header,
            path,
        })
    }

    fn existing_header(path: &Path) -> anyhow::Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("reading report header {}", path.display()))?;
        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        Ok(if header.is_empty() { None } else { Some(header) })
    }

    /// Writes one row aligned to the file header. Reports share one schema, so
    /// a mismatch only happens when appending to a file written with other
    /// thresholds: missing columns become `N/A`, unknown ones are dropped.
    pub fn append(&mut self, report: &QualityReport) -> anyhow::Result<()> {
        let columns = report.columns();
        let row = report.row();

        if self.header.is_none() {
            self.writer.write_record(&columns)?;
            self.header = Some(columns.clone());
        }
        let header = self.header.clone().unwrap_or_default();

        let dropped: Vec<&String> = columns.iter().filter(|c| !header.contains(*c)).collect();
        if !dropped.is_empty() {
            warn!(
                "{}: columns {:?} not in report header of {}",
                report.source,
                dropped,
                self.path.display()
            );
        }

        let aligned: Vec<&str> = header
            .iter()
            .map(|name| {
                columns
                    .iter()
                    .position(|column| column == name)
                    .map(|idx| row[idx].as_str())
                    .unwrap_or(NOT_AVAILABLE)
            })
            .collect();
        self.writer.write_record(&aligned)?;
        self.writer
            .flush()
            .with_context(|| format!("flushing report {}", self.path.display()))?;
        Ok(())
    }
}
