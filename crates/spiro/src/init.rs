//! Process-wide setup.

/// Installs `env_logger` as the `log` backend.
///
/// Filtering follows `RUST_LOG`. Calling this more than once, or after
/// another logger was installed, does nothing.
pub fn init_logging() {
    let _ = env_logger::try_init();
    log::debug!("spiro-rs {} logging initialized", env!("CARGO_PKG_VERSION"));
}
