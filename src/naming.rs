//! Page path normalization: views-relative file path → route path.
//!
//! Every page follows the same file-name conventions:
//!
//! - `views/index.vue` → `/` (the application root)
//! - `views/Profile.vue` → `/Profile`
//! - `views/admin/index.vue` → `/admin` (a directory index is the directory itself)
//! - `views/admin/users.vue` → `/admin/users`
//! - `views/users/[id].vue` → `/users/:id` (bracketed names are dynamic segments)
//!
//! Normalization depends on the file path alone, so the same page always lands
//! on the same route regardless of the order pages are discovered in.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("{path} is not under the views root {root}")]
    OutsideViewsRoot { path: String, root: String },
    #[error("{0} has no file extension")]
    NoExtension(String),
}

/// Result of normalizing a page path like `src/views/users/[id].vue`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPath {
    /// Directory segments above the leaf, dynamic markers applied (`["users"]`).
    /// Empty for top-level pages and directory index pages.
    pub segments: Vec<String>,
    /// Raw file stem of the leaf, brackets preserved (`"[id]"`, `"AuthLogin"`).
    pub leaf_name: String,
    /// Absolute route path (`"/users/:id"`).
    pub path: String,
}

impl NormalizedPath {
    /// Path of the directory node this page nests under, if any.
    pub fn parent_path(&self) -> Option<String> {
        if self.segments.is_empty() {
            None
        } else {
            Some(format!("/{}", self.segments.join("/")))
        }
    }
}

/// Normalize a page's file path into route segments and an absolute path.
///
/// `views_root` is the slash-separated directory prefix to strip (`src/views`).
/// The extension is whatever follows the last dot of the file name.
pub fn normalize_page_path(
    file_path: &str,
    views_root: &str,
) -> Result<NormalizedPath, NormalizeError> {
    let root = views_root.trim_matches('/');
    let file = file_path.trim_start_matches("./").trim_start_matches('/');

    let relative = if root.is_empty() {
        file
    } else {
        file.strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| NormalizeError::OutsideViewsRoot {
                path: file_path.to_string(),
                root: views_root.to_string(),
            })?
    };

    let stem = strip_extension(relative)
        .ok_or_else(|| NormalizeError::NoExtension(file_path.to_string()))?;

    // `a/index` behaves like the directory `a`
    let stem = match stem.strip_suffix("/index") {
        Some(dir) => format!("{dir}/"),
        None => stem.to_string(),
    };

    let mut parts: Vec<&str> = stem.split('/').filter(|p| !p.is_empty()).collect();
    let leaf_name = parts.pop().unwrap_or("index").to_string();
    let segments: Vec<String> = parts.into_iter().map(route_segment).collect();

    let last = if leaf_name == "index" {
        if segments.is_empty() {
            "/".to_string()
        } else {
            String::new()
        }
    } else {
        route_segment(&leaf_name)
    };

    let joined = format!("/{}/{}", segments.join("/"), last);
    Ok(NormalizedPath {
        segments,
        leaf_name,
        path: clean_path(&joined),
    })
}

/// Convert one file-system name into a route segment: `[id]` → `:id`.
pub fn route_segment(name: &str) -> String {
    match name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        Some(param) if !param.is_empty() => format!(":{param}"),
        _ => name.to_string(),
    }
}

/// Collapse repeated slashes and drop a trailing slash, keeping a bare `/`.
pub fn clean_path(path: &str) -> String {
    let mut cleaned = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && cleaned.ends_with('/') {
            continue;
        }
        cleaned.push(c);
    }
    if cleaned.len() > 1 && cleaned.ends_with('/') {
        cleaned.pop();
    }
    if cleaned.is_empty() {
        cleaned.push('/');
    }
    cleaned
}

/// Strip the extension from the last path component, `None` if it has none.
fn strip_extension(relative: &str) -> Option<&str> {
    let name_start = relative.rfind('/').map(|i| i + 1).unwrap_or(0);
    let dot = relative[name_start..].rfind('.')?;
    if dot == 0 {
        return None;
    }
    Some(&relative[..name_start + dot])
}
