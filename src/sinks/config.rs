use std::path::PathBuf;

use crate::args::{ReportFormat, Strategy};

#[derive(Debug, Clone)]
pub struct SinkConfig {
    pub output_dir: PathBuf,
    pub format: ReportFormat,
}

impl SinkConfig {
    /// Fixed location of a strategy's result file.
    #[must_use]
    pub fn result_path(&self, strategy: Strategy) -> PathBuf {
        self.output_dir.join(format!(
            "{}_results.{}",
            strategy.as_str(),
            self.format.extension()
        ))
    }
}
