//! Build-time metadata embedded by the build script.

/// The git commit hash at build time (short form), or `unknown` outside a
/// checkout.
pub const GIT_HASH: &str = env!("PHONEBOOK_GIT_HASH");

/// The build time in seconds since the Unix epoch.
pub const BUILD_TIMESTAMP: &str = env!("PHONEBOOK_BUILD_TIMESTAMP");

/// The build profile (`debug` or `release`).
pub const BUILD_PROFILE: &str = env!("PHONEBOOK_BUILD_PROFILE");

/// The crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Return a formatted version string including git hash and profile.
///
/// Example: `"0.1.0 (abc1234, debug)"`
pub fn version_string() -> String {
    format!("{VERSION} ({GIT_HASH}, {BUILD_PROFILE})")
}
