//! Tracing initialisation for tests.
//!
//! The subscriber is installed at most once per process, so
//! [`init_test_tracing`] can be called from every test function.

use tracing_subscriber::EnvFilter;

/// Install a subscriber that writes through the test harness (captured
/// unless `--nocapture`) and honours `RUST_LOG`, defaulting to `debug` for
/// the phonebook crates.
///
/// # Example
///
/// ```ignore
/// #[test]
/// fn my_test() {
///     phonebook_test_utils::tracing_setup::init_test_tracing();
///     tracing::debug!("visible with --nocapture");
/// }
/// ```
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("phonebook_core=debug,phonebook_cli=debug")),
        )
        .with_test_writer()
        .try_init();
}
