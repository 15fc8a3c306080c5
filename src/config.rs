//! Generator configuration module.
//!
//! Handles loading, validating, and merging the optional `routes.toml` that
//! sits in the project root. Every key has a stock default, so a project that
//! follows the conventions needs no config file at all.
//!
//! ## Config File Location
//!
//! ```text
//! my-app/
//! ├── routes.toml              # Optional, overrides stock defaults
//! └── src/
//!     ├── layouts/             # One file per layout (DefaultLayout.vue, ...)
//!     └── views/               # One file per route
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! views_root = "src/views"      # Directory whose files become routes
//! layouts_dir = "src/layouts"   # Directory whose files become named layouts
//! extensions = ["vue"]          # Page/layout file extensions
//! exclude = []                  # File or directory names under views_root to skip
//! sibling_file = "route.json"   # Per-directory route config (.json or .toml)
//! block_type = "route"          # Custom block tag holding embedded config
//! default_redirect = "/home"    # Target of the synthesized root route
//!
//! [defaults]
//! auth_prefix = "Auth"          # Leaf names with this prefix require auth
//! admin_segment = "admin"       # Path component that selects admin_layout
//! admin_layout = "AdminLayout"
//! default_layout = "DefaultLayout"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! views_root = "app/pages"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE: &str = "routes.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `routes.toml`.
///
/// All fields have defaults matching the conventional project layout.
/// Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory (relative to the project root) whose files become routes.
    pub views_root: String,
    /// Directory whose files are registered as named layouts.
    pub layouts_dir: String,
    /// File extensions (without dot) recognized as pages and layouts.
    pub extensions: Vec<String>,
    /// File or directory names skipped while walking the views root.
    pub exclude: Vec<String>,
    /// Fixed file name of the per-directory declarative route config.
    pub sibling_file: String,
    /// Tag of the custom block carrying a page's embedded route config.
    pub block_type: String,
    /// Redirect target of the root route synthesized when no page claims `/`.
    pub default_redirect: String,
    /// Inputs of the computed default meta.
    pub defaults: MetaDefaults,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            views_root: "src/views".to_string(),
            layouts_dir: "src/layouts".to_string(),
            extensions: vec!["vue".to_string()],
            exclude: Vec::new(),
            sibling_file: "route.json".to_string(),
            block_type: "route".to_string(),
            default_redirect: "/home".to_string(),
            defaults: MetaDefaults::default(),
        }
    }
}

impl GeneratorConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if self.extensions.iter().any(|e| e.is_empty() || e.starts_with('.')) {
            return Err(ConfigError::Validation(
                "extensions must be non-empty and written without a leading dot".into(),
            ));
        }
        if self.exclude.iter().any(|e| e.is_empty() || e.contains('/')) {
            return Err(ConfigError::Validation(
                "exclude entries must be plain file or directory names".into(),
            ));
        }
        if !self.default_redirect.starts_with('/') {
            return Err(ConfigError::Validation(
                "default_redirect must be an absolute path".into(),
            ));
        }
        if self.block_type.is_empty() {
            return Err(ConfigError::Validation(
                "block_type must not be empty".into(),
            ));
        }
        if self.sibling_file.is_empty() || self.sibling_file.contains('/') {
            return Err(ConfigError::Validation(
                "sibling_file must be a plain file name".into(),
            ));
        }
        if self.defaults.admin_layout.is_empty() || self.defaults.default_layout.is_empty() {
            return Err(ConfigError::Validation(
                "defaults.admin_layout and defaults.default_layout must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Views root with surrounding slashes trimmed, as used for prefix stripping.
    pub fn views_prefix(&self) -> &str {
        self.views_root.trim_matches('/')
    }

    /// Whether a file or directory name under the views root is skipped.
    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude.iter().any(|e| e == name)
    }

    /// Whether `ext` is one of the configured page extensions.
    pub fn is_page_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Inputs of the computed default meta record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetaDefaults {
    /// Leaf names starting with this literal prefix default to `requiresAuth = true`.
    pub auth_prefix: String,
    /// Path component that switches the default layout to `admin_layout`.
    pub admin_segment: String,
    pub admin_layout: String,
    pub default_layout: String,
}

impl Default for MetaDefaults {
    fn default() -> Self {
        Self {
            auth_prefix: "Auth".to_string(),
            admin_segment: "admin".to_string(),
            admin_layout: "AdminLayout".to_string(),
            default_layout: "DefaultLayout".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GeneratorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// contains invalid TOML.
pub fn load_raw_config(config_path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GeneratorConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GeneratorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `routes.toml` in the given project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<GeneratorConfig, ConfigError> {
    load_config_file(&root.join(CONFIG_FILE))
}

/// Load config from an explicit file path. A missing file yields the defaults.
pub fn load_config_file(config_path: &Path) -> Result<GeneratorConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(config_path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `routes.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# route-tree configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Directory (relative to the project root) whose files become routes.
# views/index.vue -> "/", views/users/[id].vue -> "/users/:id".
views_root = "src/views"

# Directory whose files are registered as layouts, keyed by file stem.
# layouts/AdminLayout.vue -> layout "AdminLayout".
layouts_dir = "src/layouts"

# File extensions (without the dot) treated as pages and layouts.
extensions = ["vue"]

# File or directory names under views_root that are not pages, matched
# exactly at any depth. Dot-entries are always skipped.
#   exclude = ["components", "_partials"]
exclude = []

# Fixed file name of the declarative route config that sits next to pages.
# Applies to every page in its directory. Decoded as TOML when the name ends
# in .toml, JSON otherwise.
sibling_file = "route.json"

# Tag of the custom block that carries a page's embedded route config:
#   <route>{ "meta": { "requiresAuth": true } }</route>
block_type = "route"

# Redirect target of the root route added when no page maps to "/".
default_redirect = "/home"

# ---------------------------------------------------------------------------
# Computed default meta
# ---------------------------------------------------------------------------
[defaults]
# Pages whose file name starts with this prefix get meta.requiresAuth = true.
auth_prefix = "Auth"

# Pages with this path component get admin_layout, all others default_layout.
admin_segment = "admin"
admin_layout = "AdminLayout"
default_layout = "DefaultLayout"
"##
}
