use std::fs;
use std::path::PathBuf;

use chrono::Local;

use crate::collector::CollectionResult;
use crate::error::Result;

const REPORT_TITLE: &str = "NBA Warriors - Jacket Details Report";
const REPORT_RULE: &str = "=====================================";

/// Writes collection results as timestamped text reports.
///
/// Each run gets its own file name, so concurrent runs against the same
/// output directory never overwrite each other.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render the report body. Pure: identical input renders identical bytes.
    pub fn render(result: &CollectionResult) -> String {
        let mut body = String::new();
        body.push_str(REPORT_TITLE);
        body.push('\n');
        body.push_str(REPORT_RULE);
        body.push_str("\n\n");
        body.push_str(&format!("Total Jackets Found: {}\n\n", result.len()));

        for record in result.records() {
            body.push_str(&record.to_string());
            body.push('\n');
        }

        body
    }

    /// Persist the rendered report under a unique timestamped name.
    ///
    /// The report is the run's deliverable, so storage failures propagate.
    pub fn write(&self, result: &CollectionResult) -> Result<PathBuf> {
        let stamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
        let path = self.output_dir.join(format!("jacket_details_{stamp}.txt"));

        fs::create_dir_all(&self.output_dir)?;
        fs::write(&path, Self::render(result))?;

        ::log::info!("Jacket details stored to {}", path.display());
        Ok(path)
    }
}
