//! Command-line front end of the `assay-check` binary
//!
//! The CLI only collects numbers and settings; all statistics live in the library.

mod error;
mod types;

pub use self::error::Error;
pub use self::types::{Color, OutputFormat};

use std::ffi::OsString;
use std::path::PathBuf;
use std::{env, process};

use clap::{App, AppSettings, Arg, ArgMatches, ErrorKind};

use crate::conformity::{Sample, DEFAULT_THRESHOLD};
use crate::reference::{Quantity, Variant, BDMC, CURCUMIN, DMC, TOTAL_CURCUMINOIDS};

/// Environment variable overriding the default threshold
pub const THRESHOLD_ENV: &str = "ASSAY_THRESHOLD";
/// Environment variable holding the log filter
pub const LOG_ENV: &str = "ASSAY_LOG";

pub const EXIT_CONFORMS: i32 = 0;
pub const EXIT_OUTLIER: i32 = 1;
pub const EXIT_INPUT_ERROR: i32 = 2;
pub const EXIT_CONFIGURATION_ERROR: i32 = 3;

const SAMPLE_FLAGS: [(&str, Quantity); 4] = [
    ("curcumin", CURCUMIN),
    ("dmc", DMC),
    ("bdmc", BDMC),
    ("total", TOTAL_CURCUMINOIDS),
];

#[derive(Debug, PartialEq)]
pub struct Args {
    pub variant: Variant,
    pub sample: Sample,
    pub threshold: f64,
    pub output_format: OutputFormat,
    pub color: Color,
    pub show_reference: bool,
    pub export: Option<PathBuf>,
}

impl Default for Args {
    fn default() -> Args {
        Args {
            variant: Variant::default(),
            sample: Sample::default(),
            threshold: DEFAULT_THRESHOLD,
            output_format: OutputFormat::default(),
            color: Color::default(),
            show_reference: false,
            export: None,
        }
    }
}

/// Parses the process arguments, exiting on `--help`, `--version` or invalid input
pub fn parse_args() -> Args {
    let args = env::args_os().collect();
    let env_threshold = env::var(THRESHOLD_ENV).ok();

    match try_parse_args(args, env_threshold) {
        Ok(args) => args,
        Err(Error::DisplayHelp(help)) => {
            println!("{}", help);
            process::exit(0);
        }
        Err(Error::DisplayVersion) => process::exit(0),
        Err(e) => {
            eprintln!("Error parsing CLI args: {}", e);
            process::exit(EXIT_INPUT_ERROR);
        }
    }
}

fn app() -> App<'static, 'static> {
    let app = App::new("assay-check")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Checks curcuminoid assay values against the natural variation of the reference batches")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name("curcumin")
                .long("curcumin")
                .takes_value(true)
                .value_name("PERCENT")
                .help("Curcumin assay, % w/w"),
        )
        .arg(
            Arg::with_name("dmc")
                .long("dmc")
                .takes_value(true)
                .value_name("PERCENT")
                .help("Demethoxycurcumin assay, % w/w"),
        )
        .arg(
            Arg::with_name("bdmc")
                .long("bdmc")
                .takes_value(true)
                .value_name("PERCENT")
                .help("Bisdemethoxycurcumin assay, % w/w"),
        )
        .arg(
            Arg::with_name("total")
                .long("total")
                .takes_value(true)
                .value_name("PERCENT")
                .help("Total curcuminoids assay, % w/w. Required by the total-curcuminoids variant."),
        )
        .arg(
            Arg::with_name("variant")
                .long("variant")
                .takes_value(true)
                .possible_values(&["components", "serialized", "total-curcuminoids"])
                .default_value("components")
                .help("Reference dataset to compare against."),
        )
        .arg(
            Arg::with_name("threshold")
                .long("threshold")
                .takes_value(true)
                .value_name("Z")
                .help("Flag quantities whose |z-score| exceeds this value. [default: 2]"),
        )
        .arg(
            Arg::with_name("message-format")
                .long("message-format")
                .takes_value(true)
                .possible_values(&["human", "json"])
                .default_value("human")
                .help("Print results for humans or as one JSON object per line."),
        )
        .arg(
            Arg::with_name("color")
                .short("c")
                .long("color")
                .alias("colour")
                .takes_value(true)
                .possible_values(&["auto", "always", "never"])
                .default_value("auto")
                .help("Configure coloring of output. auto = colorize output if stdout is a tty."),
        )
        .arg(
            Arg::with_name("show-reference")
                .long("show-reference")
                .help("Print the reference statistics of the variant and exit."),
        )
        .after_help(
            "\
The exit status is 0 when the sample conforms, 1 when it is an outlier, 2 when the
sample cannot be evaluated and 3 when the reference data is unusable.

ASSAY_THRESHOLD overrides the default threshold; --threshold overrides both.
ASSAY_LOG sets the log filter, e.g. ASSAY_LOG=debug.",
        );

    #[cfg(feature = "csv_output")]
    let app = app.arg(
        Arg::with_name("export")
            .long("export")
            .takes_value(true)
            .value_name("PATH")
            .help("Write one CSV row per evaluated quantity and ratio to PATH."),
    );

    app
}

/// Parses `args` (executable first); `env_threshold` is the value of `ASSAY_THRESHOLD`, if set
pub fn try_parse_args(args: Vec<OsString>, env_threshold: Option<String>) -> Result<Args, Error> {
    let matches = app()
        .get_matches_from_safe(args)
        .map_err(|e| match e.kind {
            ErrorKind::HelpDisplayed => Error::DisplayHelp(e.message),
            ErrorKind::VersionDisplayed => Error::DisplayVersion,
            _ => Error::Clap(e),
        })?;

    let mut sample = Sample::new();
    for &(flag, quantity) in &SAMPLE_FLAGS {
        if let Some(value) = percentage(&matches, flag)? {
            sample.insert(quantity.name(), value);
        }
    }

    let variant = matches.value_of("variant").unwrap_or_default().parse()?;
    let output_format = matches
        .value_of("message-format")
        .unwrap_or_default()
        .parse()?;
    let color = matches.value_of("color").unwrap_or_default().parse()?;

    // Flag, then environment, then default
    let threshold = match matches.value_of("threshold").map(String::from).or(env_threshold) {
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(t) if t.is_finite() && t > 0. => t,
            _ => return Err(Error::InvalidThreshold(raw)),
        },
        None => DEFAULT_THRESHOLD,
    };

    Ok(Args {
        variant,
        sample,
        threshold,
        output_format,
        color,
        show_reference: matches.is_present("show-reference"),
        export: matches.value_of_os("export").map(PathBuf::from),
    })
}

fn percentage(matches: &ArgMatches<'_>, flag: &'static str) -> Result<Option<f64>, Error> {
    let raw = match matches.value_of(flag) {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let value = raw.trim().parse::<f64>().map_err(|_| Error::InvalidNumber {
        flag,
        value: raw.to_owned(),
    })?;

    if (0.0..=100.0).contains(&value) {
        Ok(Some(value))
    } else {
        Err(Error::OutOfRange { flag, value })
    }
}
