use crate::error::SladResult;
use crate::selector::AnalysisResults;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Destination for the finalized results of a run.
pub trait ResultSink {
    fn write(&mut self, results: &AnalysisResults) -> SladResult<()>;
}

/// Writes the results as one JSON document.
pub struct JsonSink {
    path: PathBuf,
    pretty: bool,
}

impl JsonSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: false,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for JsonSink {
    fn write(&mut self, results: &AnalysisResults) -> SladResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, results)?;
        } else {
            serde_json::to_writer(&mut writer, results)?;
        }
        writer.flush()?;
        info!("💾 Results written to: {}", self.path.display());
        Ok(())
    }
}

pub fn load_results<P: AsRef<Path>>(path: P) -> SladResult<AnalysisResults> {
    let file = File::open(path)?;
    let results: AnalysisResults = serde_json::from_reader(BufReader::new(file))?;
    results.check_shape()?;
    Ok(results)
}
