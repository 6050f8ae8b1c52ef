use crate::stderr_buffer::BufferedStderr;
use env_logger::{Builder, Env, Target};

/// Install the global logger.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks debug and the
/// default is warnings only. Output goes through the stderr buffer so the
/// TUI can hold it back until the terminal is restored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(BufferedStderr)))
        .format_timestamp(None)
        .try_init();
}
