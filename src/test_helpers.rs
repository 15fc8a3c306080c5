//! Shared test utilities for the route-tree test suite.
//!
//! Provides lookup helpers, bulk extractors, and tree-shape assertions that
//! work with generated route tables (`RouteNode`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let generated = generate_with_source(&demo_source(), &SfcBlockParser, &config).unwrap();
//!
//! let users = find_route(&generated.routes, "/admin/users");
//! assert_eq!(users.meta["layout"], json!("AdminLayout"));
//!
//! assert_tree_shape(&generated.routes, &[
//!     ("/AuthLogin", &[]),
//!     ("/admin", &["/admin/users", "/admin/roles"]),
//!     ("/", &[]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::source::MemorySource;
use crate::types::RouteNode;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/app/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/app");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// The small project used throughout the docs, in memory.
///
/// ```text
/// src/views/AuthLogin.vue
/// src/views/Profile.vue
/// src/views/admin/users.vue
/// src/views/admin/roles.vue
/// src/views/users/[id].vue
/// src/layouts/DefaultLayout.vue
/// src/layouts/AdminLayout.vue
/// ```
pub fn demo_source() -> MemorySource {
    let page = "<template>\n  <div/>\n</template>\n";
    MemorySource::new()
        .page("src/views/AuthLogin.vue", page)
        .page("src/views/Profile.vue", page)
        .page("src/views/admin/users.vue", page)
        .page("src/views/admin/roles.vue", page)
        .page("src/views/users/[id].vue", page)
        .layout("src/layouts/DefaultLayout.vue")
        .layout("src/layouts/AdminLayout.vue")
}

// =========================================================================
// Route lookups: panic with a clear message on miss
// =========================================================================

fn all_paths<'a>(routes: &'a [RouteNode], out: &mut Vec<&'a str>) {
    for r in routes {
        out.push(r.path.as_str());
        all_paths(&r.children, out);
    }
}

fn search<'a>(routes: &'a [RouteNode], path: &str) -> Option<&'a RouteNode> {
    routes
        .iter()
        .find_map(|r| (r.path == path).then_some(r).or_else(|| search(&r.children, path)))
}

/// Find a route by path anywhere in the tree, top level first. Panics if not found.
pub fn find_route<'a>(routes: &'a [RouteNode], path: &str) -> &'a RouteNode {
    search(routes, path).unwrap_or_else(|| {
        let mut paths = Vec::new();
        all_paths(routes, &mut paths);
        panic!("route '{path}' not found. Available: {paths:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Top-level route paths in order.
pub fn route_paths(routes: &[RouteNode]) -> Vec<&str> {
    routes.iter().map(|r| r.path.as_str()).collect()
}

/// Child paths under a top-level route. Panics if the parent is not found.
pub fn child_paths<'a>(routes: &'a [RouteNode], parent_path: &str) -> Vec<&'a str> {
    routes
        .iter()
        .find(|r| r.path == parent_path)
        .map(|r| route_paths(&r.children))
        .unwrap_or_else(|| {
            let paths = route_paths(routes);
            panic!("top-level route '{parent_path}' not found. Available: {paths:?}")
        })
}

/// Assert that the route tree matches an expected shape.
///
/// Each entry is `(path, children)`. Use `&[]` for leaf routes.
///
/// ```rust
/// assert_tree_shape(&routes, &[
///     ("/Profile", &[]),
///     ("/admin", &["/admin/users", "/admin/roles"]),
///     ("/", &[]),
/// ]);
/// ```
pub fn assert_tree_shape(routes: &[RouteNode], expected: &[(&str, &[&str])]) {
    let actual = route_paths(routes);
    let expected_paths: Vec<&str> = expected.iter().map(|(p, _)| *p).collect();
    assert_eq!(actual, expected_paths, "top-level route paths mismatch");

    for (path, children) in expected {
        assert_eq!(
            child_paths(routes, path),
            children.to_vec(),
            "children of '{path}' mismatch"
        );
    }
}
