pub mod core;

use once_cell::sync::OnceCell;

static LOG_INIT: OnceCell<()> = OnceCell::new();

/// Initialize the process-wide logger. Safe to call more than once.
pub fn init_logging() {
    LOG_INIT.get_or_init(|| {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .try_init();
    });
}
