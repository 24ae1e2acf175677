//! Checks one sample against the reference batches and exits with the verdict.
//!
//! ```bash
//! assay-check --curcumin 75.5 --dmc 16.4 --bdmc 2.7
//! assay-check --variant total-curcuminoids --curcumin 75.9 --dmc 16.3 --bdmc 2.7 --total 94.9
//! assay-check --show-reference --variant serialized
//! ```

use std::io;
use std::process;
use std::sync::Once;

use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use assay_conformity::cli::{self, OutputFormat};
use assay_conformity::report::{CliReport, Report, Reports};
use assay_conformity::{get_reference_statistics, Checker};

static INIT: Once = Once::new();

/// Log events go to stderr so `--message-format json` keeps stdout parseable.
fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(cli::LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(filter)
            .init();
    });
}

fn main() {
    init_tracing();
    process::exit(run(cli::parse_args()));
}

fn run(args: cli::Args) -> i32 {
    let statistics = match get_reference_statistics(args.variant) {
        Ok(statistics) => statistics,
        Err(e) => {
            error!(variant = args.variant.name(), "unusable reference data: {}", e);
            eprintln!("{}", e);
            return cli::EXIT_CONFIGURATION_ERROR;
        }
    };

    let reports = Reports {
        cli_enabled: args.output_format == OutputFormat::Human,
        cli: CliReport::new(args.color.enabled(atty::is(atty::Stream::Stdout))),
        json_enabled: args.output_format == OutputFormat::Json,
        #[cfg(feature = "csv_output")]
        csv: args.export.as_ref().map(assay_conformity::FileCsvReport::new),
    };

    if args.show_reference {
        reports.reference(statistics);
        return cli::EXIT_CONFORMS;
    }

    let checker = Checker::default().threshold(args.threshold);
    match checker.evaluate(&args.sample, statistics) {
        Ok(result) => {
            reports.evaluation_complete(statistics, &args.sample, &result);

            if result.is_conforming() {
                cli::EXIT_CONFORMS
            } else {
                cli::EXIT_OUTLIER
            }
        }
        Err(e) => {
            reports.evaluation_rejected(&args.sample, &e);
            cli::EXIT_INPUT_ERROR
        }
    }
}
