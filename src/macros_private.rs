//! Private macro used for error handling.

/// Logs the error of a fallible report write, ignores an `Ok` value.
///
/// A report that cannot be written never changes the verdict or the exit code.
macro_rules! log_if_err {
    ($report:expr, $x:expr) => {
        if let Err(e) = $x {
            let e: crate::error::Error = e;
            tracing::error!(report = $report, "failed to write report: {}", e);
        }
    };
}
