use std::io::IsTerminal;

use flb_classic_core::{Diagnostic, Severity};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` overrides the default level.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .ok();
}

/// Forward engine diagnostics to the matching tracing level.
pub fn emit_diagnostics(source: &str, diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        match diag.severity {
            Severity::Debug => debug!(file = source, "{diag}"),
            Severity::Info => info!(file = source, "{diag}"),
            Severity::Warning => warn!(file = source, "{diag}"),
            Severity::Error => error!(file = source, "{diag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init(false);
        init(true);
        emit_diagnostics("inline", &[]);
    }
}
