//! Route metadata resolution.
//!
//! Each page's final [`RouteDescriptor`] is resolved from three layers:
//!
//! ## Computed defaults
//!
//! - `requiresAuth`: `true` when the leaf file name starts with the auth
//!   prefix (`AuthLogin.vue`), else `false`.
//! - `layout`: the admin layout when any path component equals the admin
//!   segment (`admin/users.vue`, and `admin/index.vue` whose leaf *is*
//!   `admin`), else the default layout.
//!
//! ## Sibling file, then embedded block
//!
//! `meta` is merged key by key, low to high: defaults → sibling → embedded.
//! A source overriding `layout` keeps every other default key, and the
//! embedded block wins any key both sources set.
//!
//! `redirect`, `name` and `props` have no default. The sibling value wins over
//! the embedded one; the first non-empty value is taken.
//!
//! `requiresAuth` must stay a boolean and `layout` a string. An override of
//! the wrong type is dropped, the lower layer's value stays, and the key is
//! reported back so the caller can flag it.

use crate::config::MetaDefaults;
use crate::naming::NormalizedPath;
use crate::types::{META_LAYOUT, META_REQUIRES_AUTH, RouteConfig, RouteDescriptor};
use serde_json::{Map, Value};

/// Result of merging one page's config layers.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub descriptor: RouteDescriptor,
    /// Guaranteed meta keys whose override had the wrong type and was dropped.
    pub rejected: Vec<String>,
}

/// The computed default meta for a page.
pub fn default_meta(path: &NormalizedPath, defaults: &MetaDefaults) -> Map<String, Value> {
    let requires_auth = path.leaf_name.starts_with(&defaults.auth_prefix);
    let is_admin = path
        .segments
        .iter()
        .chain(std::iter::once(&path.leaf_name))
        .any(|s| *s == defaults.admin_segment);
    let layout = if is_admin {
        &defaults.admin_layout
    } else {
        &defaults.default_layout
    };

    let mut meta = Map::new();
    meta.insert(META_REQUIRES_AUTH.to_string(), Value::Bool(requires_auth));
    meta.insert(META_LAYOUT.to_string(), Value::String(layout.clone()));
    meta
}

/// Resolve a field from sources in priority order: first present, non-empty value.
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Like [`resolve`] for structured values: `null` counts as absent.
fn resolve_value(sources: [Option<Value>; 2]) -> Option<Value> {
    sources.into_iter().flatten().find(|v| !v.is_null())
}

/// Overlay `layer` onto `meta` key by key, enforcing the guaranteed key types.
fn overlay_meta(meta: &mut Map<String, Value>, layer: Map<String, Value>, rejected: &mut Vec<String>) {
    for (key, value) in layer {
        let well_typed = match key.as_str() {
            META_REQUIRES_AUTH => value.is_boolean(),
            META_LAYOUT => value.is_string(),
            _ => true,
        };
        if well_typed {
            meta.insert(key, value);
        } else if !rejected.contains(&key) {
            rejected.push(key);
        }
    }
}

/// Merge computed defaults, the sibling config and the embedded config.
pub fn merge_descriptor(
    defaults: Map<String, Value>,
    sibling: RouteConfig,
    embedded: RouteConfig,
) -> MergeOutcome {
    let mut rejected = Vec::new();
    let mut meta = defaults;
    overlay_meta(&mut meta, sibling.meta, &mut rejected);
    overlay_meta(&mut meta, embedded.meta, &mut rejected);

    let descriptor = RouteDescriptor {
        redirect: resolve(&[sibling.redirect.as_deref(), embedded.redirect.as_deref()]),
        name: resolve(&[sibling.name.as_deref(), embedded.name.as_deref()]),
        props: resolve_value([sibling.props, embedded.props]),
        meta,
    };
    MergeOutcome {
        descriptor,
        rejected,
    }
}
