//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use phonebook_config::AppConfig;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .save_file("/tmp/book.txt")
///     .name_policy("strip")
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn save_file(mut self, path: impl AsRef<std::path::Path>) -> Self {
        self.config.directory.save_file = path.as_ref().display().to_string();
        self
    }

    pub fn name_policy(mut self, policy: &str) -> Self {
        self.config.directory.name_policy = policy.to_string();
        self
    }

    pub fn viewer(mut self, command: &str, args: &[&str]) -> Self {
        self.config.viewer.command = Some(command.to_string());
        self.config.viewer.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    /// Build the config, panicking if it would fail validation.
    pub fn build(self) -> AppConfig {
        self.config
            .validate()
            .expect("test config should be valid");
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
