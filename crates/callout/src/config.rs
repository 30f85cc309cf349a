//! Configuration types for callout registry generation.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so an empty TOML document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`ScanConfig`] - Which files of the input directory are source documents.
//! - [`RegistryConfig`] - Failure policy, default entry and baseline source.
//! - [`ExtractConfig`] - Markup parser selection and path data options.
//! - [`OutputConfig`] - Names used in the emitted module.
//!
//! # Example
//!
//! ```
//! # use callout::config::AppConfig;
//! # use callout::FailurePolicy;
//! let config: AppConfig = toml::from_str(r#"
//!     [registry]
//!     policy = "lenient"
//!
//!     [extract]
//!     parser = "structural-with-fallback"
//! "#).unwrap();
//!
//! assert_eq!(config.registry().policy(), FailurePolicy::Lenient);
//! assert_eq!(config.scan().extension(), "md");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use callout_core::identifier::CalloutId;

pub use callout_parser::ExtractConfig;

use crate::assembler::FailurePolicy;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    scan: ScanConfig,

    #[serde(default)]
    registry: RegistryConfig,

    #[serde(default)]
    extract: ExtractConfig,

    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        scan: ScanConfig,
        registry: RegistryConfig,
        extract: ExtractConfig,
        output: OutputConfig,
    ) -> Self {
        Self {
            scan,
            registry,
            extract,
            output,
        }
    }

    pub fn scan(&self) -> &ScanConfig {
        &self.scan
    }

    pub fn registry(&self) -> &RegistryConfig {
        &self.registry
    }

    pub fn extract(&self) -> &ExtractConfig {
        &self.extract
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the configured failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.registry.policy = policy;
        self
    }
}

/// Selection of source documents inside the input directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extension of source documents, without the leading dot.
    extension: String,

    /// Only files whose name starts with this prefix are scanned.
    prefix: Option<String>,
}

impl ScanConfig {
    /// Creates a new [`ScanConfig`].
    ///
    /// # Arguments
    ///
    /// * `extension` - Extension of source documents; a leading dot is ignored.
    /// * `prefix` - Optional file name prefix filter.
    pub fn new(extension: impl Into<String>, prefix: Option<String>) -> Self {
        Self {
            extension: extension.into(),
            prefix,
        }
    }

    /// Returns the extension without a leading dot.
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new("md", None)
    }
}

/// Assembly settings of the callout table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// What happens to documents that fail extraction.
    policy: FailurePolicy,

    /// Identifier of the entry exported as the default shape.
    default_entry: CalloutId,

    /// Start from the baseline table instead of an empty one.
    include_baseline: bool,

    /// Baseline file replacing the bundled baseline.
    baseline: Option<PathBuf>,
}

impl RegistryConfig {
    /// Creates a new [`RegistryConfig`].
    ///
    /// # Arguments
    ///
    /// * `policy` - Failure policy applied per document.
    /// * `default_entry` - Identifier of the default entry.
    /// * `include_baseline` - Whether baseline entries are merged first.
    /// * `baseline` - Optional replacement baseline file.
    pub fn new(
        policy: FailurePolicy,
        default_entry: CalloutId,
        include_baseline: bool,
        baseline: Option<PathBuf>,
    ) -> Self {
        Self {
            policy,
            default_entry,
            include_baseline,
            baseline,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn default_entry(&self) -> &CalloutId {
        &self.default_entry
    }

    pub fn include_baseline(&self) -> bool {
        self.include_baseline
    }

    pub fn baseline(&self) -> Option<&Path> {
        self.baseline.as_deref()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(
            FailurePolicy::default(),
            CalloutId::new("speech_oval_bl"),
            true,
            None,
        )
    }
}

/// Names of the declarations in the emitted module.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Name of the entry record interface.
    interface_name: String,

    /// Name of the exported table constant.
    table_name: String,

    /// Name of the exported default entry constant.
    default_name: String,
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    pub fn new(
        interface_name: impl Into<String>,
        table_name: impl Into<String>,
        default_name: impl Into<String>,
    ) -> Self {
        Self {
            interface_name: interface_name.into(),
            table_name: table_name.into(),
            default_name: default_name.into(),
        }
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new("CalloutDef", "CALLOUTS", "DEFAULT_CALLOUT")
    }
}

#[cfg(test)]
mod tests {
    use callout_parser::ParseStrategy;

    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.scan().extension(), "md");
        assert_eq!(config.scan().prefix(), None);
        assert_eq!(config.registry().policy(), FailurePolicy::Strict);
        assert_eq!(config.registry().default_entry(), "speech_oval_bl");
        assert!(config.registry().include_baseline());
        assert_eq!(config.registry().baseline(), None);
        assert_eq!(config.extract().strategy, ParseStrategy::Structural);
        assert!(!config.extract().collapse_whitespace);
        assert_eq!(config.output().interface_name(), "CalloutDef");
        assert_eq!(config.output().table_name(), "CALLOUTS");
        assert_eq!(config.output().default_name(), "DEFAULT_CALLOUT");
    }

    #[test]
    fn test_full_document() {
        let config: AppConfig = toml::from_str(
            r#"
            [scan]
            extension = ".svgmd"
            prefix = "svg"

            [registry]
            policy = "lenient"
            default_entry = "svg1"
            include_baseline = false
            baseline = "shapes/baseline.toml"

            [extract]
            parser = "permissive"
            collapse_whitespace = true

            [output]
            interface_name = "Shape"
            table_name = "SHAPES"
            default_name = "DEFAULT_SHAPE"
            "#,
        )
        .unwrap();

        assert_eq!(config.scan().extension(), "svgmd");
        assert_eq!(config.scan().prefix(), Some("svg"));
        assert_eq!(config.registry().policy(), FailurePolicy::Lenient);
        assert_eq!(config.registry().default_entry(), "svg1");
        assert!(!config.registry().include_baseline());
        assert_eq!(
            config.registry().baseline(),
            Some(Path::new("shapes/baseline.toml"))
        );
        assert_eq!(config.extract().strategy, ParseStrategy::Permissive);
        assert!(config.extract().collapse_whitespace);
        assert_eq!(config.output().table_name(), "SHAPES");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[registry]\npolicy = \"lenient\"\n").unwrap();

        assert_eq!(config.registry().policy(), FailurePolicy::Lenient);
        assert_eq!(config.registry().default_entry(), "speech_oval_bl");
        assert!(config.registry().include_baseline());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(toml::from_str::<AppConfig>("[registry]\npolcy = \"lenient\"\n").is_err());
        assert!(toml::from_str::<AppConfig>("[layout]\n").is_err());
        assert!(toml::from_str::<AppConfig>("[registry]\npolicy = \"loose\"\n").is_err());
    }

    #[test]
    fn test_with_policy() {
        let config = AppConfig::default().with_policy(FailurePolicy::Lenient);

        assert_eq!(config.registry().policy(), FailurePolicy::Lenient);
    }
}
