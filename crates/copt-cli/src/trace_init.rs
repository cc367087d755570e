use std::path::Path;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const LOG_FILE: &str = "coptool-trace.jsonl";

fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("copt_core=debug,copt_cli=debug")
        } else {
            EnvFilter::new("copt_core=warn,copt_cli=warn")
        }
    })
}

/// Install the global subscriber: compact lines on stderr, or JSON lines
/// appended to `<log_dir>/coptool-trace.jsonl` when a directory is given.
pub fn init_tracing(verbose: bool, log_dir: Option<&Path>) {
    INIT.call_once(|| match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
            tracing_subscriber::fmt()
                .json()
                .with_writer(file_appender)
                .with_target(true)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                .with_env_filter(filter(verbose))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(filter(verbose))
                .init();
        }
    });
}
