//! CLI output formatting for generated route tables.
//!
//! # Route-First Display
//!
//! Output is **route-centric, not file-centric**. Each line leads with the
//! route's positional index and URL path; the component it renders (a page
//! file or a named layout) follows as secondary context. This reads as a URL
//! inventory while still letting users trace every route back to its file.
//!
//! # Output Format
//!
//! ## Route tree
//!
//! ```text
//! Routes
//! 001 /AuthLogin → src/views/AuthLogin.vue
//! 002 /admin [layout AdminLayout]
//!     001 /admin/users → src/views/admin/users.vue
//!         Name: admin-users
//!     002 /admin/roles → src/views/admin/roles.vue
//! 003 / ⇒ /home
//!
//! Generated 5 routes from 4 pages
//! ```
//!
//! ## Diagnostics
//!
//! ```text
//! Warnings
//!     src/views/Broken.vue: ignoring <route> block: invalid JSON: ...
//!     /shop: layout ShopLayout not found, route has no component
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::diagnostic::Diagnostic;
use crate::generate::Generated;
use crate::types::{Component, RouteNode};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a route header: index, path, then whatever the route resolves to.
///
/// ```text
/// 001 /About → src/views/About.vue
/// 002 /admin [layout AdminLayout]
/// 003 / ⇒ /home
/// 004 /shop (no component)
/// ```
fn route_header(index: usize, node: &RouteNode) -> String {
    let mut line = format!("{} {}", format_index(index), node.path);
    match &node.component {
        Some(Component::Page { source }) => line.push_str(&format!(" \u{2192} {source}")),
        Some(Component::Layout { name, .. }) => line.push_str(&format!(" [layout {name}]")),
        None if node.redirect.is_none() => line.push_str(" (no component)"),
        None => {}
    }
    if let Some(redirect) = &node.redirect {
        line.push_str(&format!(" \u{21d2} {redirect}"));
    }
    line
}

fn walk_routes(routes: &[RouteNode], depth: usize, lines: &mut Vec<String>) {
    let base_indent = indent(depth);
    for (i, node) in routes.iter().enumerate() {
        lines.push(format!("{}{}", base_indent, route_header(i + 1, node)));
        if let Some(name) = &node.name {
            lines.push(format!("{}    Name: {}", base_indent, name));
        }
        walk_routes(&node.children, depth + 1, lines);
    }
}

/// Count every node in a route tree, children included.
pub fn count_routes(routes: &[RouteNode]) -> usize {
    routes
        .iter()
        .map(|r| 1 + count_routes(&r.children))
        .sum()
}

// ============================================================================
// Route tree
// ============================================================================

/// Format the route tree, one indented line per route.
pub fn format_route_tree(routes: &[RouteNode]) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];
    walk_routes(routes, 0, &mut lines);
    lines
}

/// Format non-fatal findings. Empty when there are none.
pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> Vec<String> {
    if diagnostics.is_empty() {
        return Vec::new();
    }
    let mut lines = vec!["Warnings".to_string()];
    lines.extend(diagnostics.iter().map(|d| format!("{}{}", indent(1), d)));
    lines
}

/// One-line summary of a generation pass.
pub fn format_summary(generated: &Generated) -> String {
    let mut line = format!(
        "Generated {} routes from {} pages",
        count_routes(&generated.routes),
        generated.page_count
    );
    let skipped = generated.skipped_count();
    if skipped > 0 {
        line.push_str(&format!(", {skipped} skipped"));
    }
    line
}

/// Format a whole pass: tree, warnings, then the summary line.
pub fn format_generate_output(generated: &Generated) -> Vec<String> {
    let mut lines = format_route_tree(&generated.routes);
    let warnings = format_diagnostics(&generated.diagnostics);
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.extend(warnings);
    }
    lines.push(String::new());
    lines.push(format_summary(generated));
    lines
}

/// Print a whole pass to stdout.
pub fn print_generate_output(generated: &Generated) {
    for line in format_generate_output(generated) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
