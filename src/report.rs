//! Rendering of reference statistics and conformity results
//!
//! Reporters only present what the evaluator produced; none of them alter a verdict.

#[cfg(feature = "csv_output")]
use crate::csv_report::FileCsvReport;

use std::io::{self, Write};

use anes::{Attribute, Color, ResetAttributes, SetAttribute, SetForegroundColor};
use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::conformity::{ConformityResult, Sample};
use crate::error::{InputError, Result};
use crate::format;
use crate::reference::ReferenceStatistics;

/// Message printed when nothing was flagged
pub const WITHIN_LIMITS: &str = "All parameters are within acceptable limits.";

pub trait Report {
    fn reference(&self, _statistics: &ReferenceStatistics) {}

    fn evaluation_complete(
        &self,
        _statistics: &ReferenceStatistics,
        _sample: &Sample,
        _result: &ConformityResult,
    ) {
    }

    fn evaluation_rejected(&self, _sample: &Sample, _error: &InputError) {}
}

/// Fans every event out to the enabled reporters
#[derive(Debug)]
pub struct Reports {
    pub cli_enabled: bool,
    pub cli: CliReport,
    pub json_enabled: bool,
    #[cfg(feature = "csv_output")]
    pub csv: Option<FileCsvReport>,
}

macro_rules! reports_impl {
    (fn $name:ident(&self, $($argn:ident: $argt:ty),*)) => {
        fn $name(&self, $($argn: $argt),* ) {
            if self.cli_enabled {
                self.cli.$name($($argn),*);
            }
            if self.json_enabled {
                JsonReport.$name($($argn),*);
            }
            #[cfg(feature = "csv_output")]
            if let Some(reporter) = &self.csv {
                reporter.$name($($argn),*);
            }
        }
    };
}

impl Report for Reports {
    reports_impl!(fn reference(&self, statistics: &ReferenceStatistics));
    reports_impl!(
    fn evaluation_complete(
        &self,
        statistics: &ReferenceStatistics,
        sample: &Sample,
        result: &ConformityResult
    ));
    reports_impl!(fn evaluation_rejected(&self, sample: &Sample, error: &InputError));
}

/// Human-readable terminal output
#[derive(Debug)]
pub struct CliReport {
    pub enable_text_coloring: bool,
}

impl CliReport {
    pub fn new(enable_text_coloring: bool) -> CliReport {
        CliReport {
            enable_text_coloring,
        }
    }

    fn with_color(&self, color: Color, s: &str) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetForegroundColor(color), s, ResetAttributes)
        } else {
            String::from(s)
        }
    }

    fn green(&self, s: &str) -> String {
        self.with_color(Color::DarkGreen, s)
    }

    fn yellow(&self, s: &str) -> String {
        self.with_color(Color::DarkYellow, s)
    }

    fn red(&self, s: &str) -> String {
        self.with_color(Color::DarkRed, s)
    }

    fn bold(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Bold), s, ResetAttributes)
        } else {
            s
        }
    }

    fn faint(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Faint), s, ResetAttributes)
        } else {
            s
        }
    }

    /// Verdict line, the full z-score listing, then the flags or the within-limits message
    pub fn render_result(&self, result: &ConformityResult) -> String {
        let verdict = result.verdict().to_string();
        let verdict = if result.is_conforming() {
            self.green(&verdict)
        } else {
            self.red(&verdict)
        };

        let mut lines = vec![
            self.bold(verdict),
            String::new(),
            self.faint(format!("Z-scores (threshold {}):", result.threshold())),
        ];

        let width = result
            .z_scores()
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        for (name, z_score) in result.z_scores().iter() {
            let value = format::z_score(z_score);
            let value = if result.is_flagged(name) {
                self.yellow(&value)
            } else {
                value
            };

            lines.push(format!("  {} {}", format::label(name, width), value));
        }

        lines.push(String::new());
        if result.flagged().is_empty() {
            lines.push(self.green(WITHIN_LIMITS));
        } else {
            lines.push(String::from("Flagged parameters:"));
            for flag in result.flagged() {
                lines.push(format!("  {}", self.yellow(&flag.to_string())));
            }
        }

        lines.join("\n")
    }

    pub fn render_rejection(&self, error: &InputError) -> String {
        self.red(&format!("Cannot evaluate sample: {}", error))
    }

    /// Mean, spread and range of every scored quantity and ratio
    pub fn render_reference(&self, statistics: &ReferenceStatistics) -> String {
        let quantity_set = statistics.quantity_set();
        let mut lines = vec![self.bold(format!(
            "Reference population `{}` ({} batches)",
            quantity_set.name(),
            statistics.rows()
        ))];

        if !quantity_set.auxiliary().is_empty() {
            let auxiliary = quantity_set.auxiliary().iter().map(|q| q.name()).join(", ");
            lines.push(self.faint(format!("Ratio denominators only: {}", auxiliary)));
        }

        let width = statistics
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        for (name, summary) in statistics.iter() {
            lines.push(format!(
                "  {} mean {:>7}  std. dev. {:>7}  RSD {}  {}",
                format::label(name, width),
                format::short(summary.mean),
                format::short(summary.std_dev),
                format::percent(summary.relative_std_dev()),
                self.faint(format!(
                    "[{} {}]",
                    format::short(summary.min),
                    format::short(summary.max)
                )),
            ));
        }

        lines.join("\n")
    }
}

impl Report for CliReport {
    fn reference(&self, statistics: &ReferenceStatistics) {
        println!("{}", self.render_reference(statistics));
    }

    fn evaluation_complete(
        &self,
        _: &ReferenceStatistics,
        _: &Sample,
        result: &ConformityResult,
    ) {
        println!("{}", self.render_result(result));
    }

    fn evaluation_rejected(&self, _: &Sample, error: &InputError) {
        eprintln!("{}", self.render_rejection(error));
    }
}

struct Summaries<'a>(&'a ReferenceStatistics);

impl Serialize for Summaries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

#[derive(Serialize)]
struct ReferenceMessage<'a> {
    schema: &'static str,
    rows: usize,
    summaries: Summaries<'a>,
}

#[derive(Serialize)]
struct EvaluationMessage<'a> {
    schema: &'static str,
    sample: &'a Sample,
    #[serde(flatten)]
    result: &'a ConformityResult,
}

#[derive(Serialize)]
struct RejectionMessage<'a> {
    sample: &'a Sample,
    error: String,
}

/// One JSON object per event on stdout
#[derive(Debug)]
pub struct JsonReport;

impl JsonReport {
    fn write<T: Serialize>(&self, message: &T) -> Result<()> {
        let stdout = io::stdout();
        let mut stdout = stdout.lock();

        serde_json::to_writer(&mut stdout, message)?;
        writeln!(stdout)?;
        Ok(())
    }
}

impl Report for JsonReport {
    fn reference(&self, statistics: &ReferenceStatistics) {
        log_if_err!(
            "json",
            self.write(&ReferenceMessage {
                schema: statistics.quantity_set().name(),
                rows: statistics.rows(),
                summaries: Summaries(statistics),
            })
        );
    }

    fn evaluation_complete(
        &self,
        statistics: &ReferenceStatistics,
        sample: &Sample,
        result: &ConformityResult,
    ) {
        log_if_err!(
            "json",
            self.write(&EvaluationMessage {
                schema: statistics.quantity_set().name(),
                sample,
                result,
            })
        );
    }

    fn evaluation_rejected(&self, sample: &Sample, error: &InputError) {
        log_if_err!(
            "json",
            self.write(&RejectionMessage {
                sample,
                error: error.to_string(),
            })
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conformity::evaluate;
    use crate::reference::{get_reference_statistics, Variant};

    fn plain() -> CliReport {
        CliReport::new(false)
    }

    #[test]
    fn conforming_result_reports_within_limits() {
        let statistics = get_reference_statistics(Variant::Components).unwrap();
        let sample = Sample::new()
            .with("Curcumin", 75.5)
            .with("DMC", 16.4)
            .with("BDMC", 2.7);
        let result = evaluate(&sample, statistics).unwrap();

        let text = plain().render_result(&result);
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Conforms to natural variation");
        assert!(lines[3].trim_start().starts_with("Curcumin:"));
        assert_eq!(lines.last(), Some(&WITHIN_LIMITS));
        assert!(!text.contains("Flagged"));
    }

    #[test]
    fn outlier_result_lists_flags() {
        let statistics = get_reference_statistics(Variant::Components).unwrap();
        let sample = Sample::new()
            .with("Curcumin", 90.)
            .with("DMC", 16.4)
            .with("BDMC", 2.7);
        let result = evaluate(&sample, statistics).unwrap();

        let text = plain().render_result(&result);

        assert!(text.starts_with("Outlier - Does not conform to natural variation"));
        assert!(text.contains("Flagged parameters:"));
        assert!(text.contains("  Curcumin (Z-score: 9.79)"));
        assert!(!text.contains(WITHIN_LIMITS));
    }

    #[test]
    fn rejection_is_a_validation_message() {
        let error = InputError::MissingField { quantity: "DMC" };

        assert_eq!(
            plain().render_rejection(&error),
            "Cannot evaluate sample: missing required value for `DMC`"
        );
    }

    #[test]
    fn reference_listing_names_auxiliary_quantities() {
        let statistics = get_reference_statistics(Variant::TotalCurcuminoids).unwrap();

        let text = plain().render_reference(statistics);

        assert!(text.starts_with("Reference population `total-curcuminoids` (10 batches)"));
        assert!(text.contains("Ratio denominators only: Total_Curcuminoids"));
        assert!(text.contains("Curcumin_to_Total:"));
        assert!(!text.contains("Total_Curcuminoids:"));
    }

    #[test]
    fn coloring_is_opt_in() {
        let error = InputError::MissingField { quantity: "DMC" };

        assert!(!plain().render_rejection(&error).contains('\u{1b}'));
        assert!(CliReport::new(true)
            .render_rejection(&error)
            .contains('\u{1b}'));
    }

    #[test]
    fn evaluation_message_flattens_the_result() {
        let statistics = get_reference_statistics(Variant::Components).unwrap();
        let sample = statistics.mean_sample();
        let result = evaluate(&sample, statistics).unwrap();

        let value = serde_json::to_value(&EvaluationMessage {
            schema: statistics.quantity_set().name(),
            sample: &sample,
            result: &result,
        })
        .unwrap();

        assert_eq!(value["schema"], "components");
        assert_eq!(value["verdict"], "conforms");
        assert_eq!(value["threshold"], 2.0);
        assert_eq!(value["flagged"].as_array().map(Vec::len), Some(0));
        assert!(value["z_scores"]["Curcumin_to_DMC"].is_number());
    }
}
