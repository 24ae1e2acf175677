use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::conformity::{ConformityResult, Sample};
use crate::error::Result;
use crate::reference::{ReferenceStatistics, Summary};
use crate::report::Report;

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    kind: &'static str,
    value: Option<f64>,
    mean: f64,
    std_dev: f64,
    z_score: Option<f64>,
    flagged: bool,
}

struct CsvReportWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvReportWriter<W> {
    fn write_row(
        &mut self,
        name: &str,
        kind: &'static str,
        value: Option<f64>,
        summary: &Summary,
        result: &ConformityResult,
    ) -> Result<()> {
        self.writer.serialize(CsvRow {
            name,
            kind,
            value,
            mean: summary.mean,
            std_dev: summary.std_dev,
            z_score: result.z_scores().get(name),
            flagged: result.is_flagged(name),
        })?;
        Ok(())
    }

    fn write_data(
        &mut self,
        statistics: &ReferenceStatistics,
        sample: &Sample,
        result: &ConformityResult,
    ) -> Result<()> {
        for (quantity, summary) in statistics.scored() {
            let value = sample.get(quantity.name());

            self.write_row(quantity.name(), "quantity", value, summary, result)?;
        }

        for (ratio, summary) in statistics.ratios() {
            let value = sample
                .get(ratio.numerator().name())
                .zip(sample.get(ratio.denominator().name()))
                .map(|(n, d)| n / d);

            self.write_row(ratio.name(), "ratio", value, summary, result)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}

/// Writes one row per evaluated quantity and ratio to a CSV file
#[derive(Debug)]
pub struct FileCsvReport {
    path: PathBuf,
}

impl FileCsvReport {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileCsvReport {
        FileCsvReport { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(
        &self,
        statistics: &ReferenceStatistics,
        sample: &Sample,
        result: &ConformityResult,
    ) -> Result<()> {
        let writer = Writer::from_path(&self.path)?;
        let mut writer = CsvReportWriter { writer };
        writer.write_data(statistics, sample, result)?;
        Ok(())
    }
}

impl Report for FileCsvReport {
    fn evaluation_complete(
        &self,
        statistics: &ReferenceStatistics,
        sample: &Sample,
        result: &ConformityResult,
    ) {
        log_if_err!("csv", self.write_file(statistics, sample, result));
    }
}
