//! Logger initialisation

use log::LevelFilter;

/// Default filter: warnings only, or everything from debug up with
/// `--verbose`. `RUST_LOG` is applied on top.
pub(crate) fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the process-wide logger, writing to stderr.
pub(crate) fn init(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(default_level(verbose))
        .format_timestamp(None)
        .parse_default_env();
    if let Err(e) = builder.try_init() {
        eprintln!("[warn] Failed to initialise logging: {e}");
    }
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;
