//! Route tree assembly.
//!
//! Pages are folded into the tree one at a time, in discovery order:
//!
//! ```text
//! views/index.vue          →  /                      (top level)
//! views/admin/users.vue    →  /admin  [AdminLayout]  (synthesized parent)
//!                               └─ /admin/users
//! views/admin/roles.vue    →    └─ /admin/roles      (joins existing parent)
//! views/users/[id].vue     →  /users  [DefaultLayout]
//!                               └─ /users/:id
//! ```
//!
//! A page with directory segments nests under the node at
//! `"/" + segments.join("/")`. If no node has that path yet, a parent is
//! synthesized, bound to the layout named by the page's `meta.layout`, and
//! added to the top level. Parents are always top-level: `a/b/c.vue` nests
//! under `/a/b`, not under `/a`.
//!
//! The first page to create a parent picks its layout. Later siblings asking
//! for another layout join the parent unchanged, and a
//! [`Diagnostic::LayoutConflict`] is recorded.
//!
//! Every path appears at most once in the tree:
//!
//! - A page whose path is held by a synthesized parent takes that node over in
//!   place and keeps its children. `users/[id].vue` then `users/index.vue`
//!   gives the same shape as the reverse order.
//! - A page whose path is held by another page is dropped with a
//!   [`Diagnostic::DuplicatePath`].
//! - A parent path already held by a page reuses that page as the parent.

use crate::diagnostic::Diagnostic;
use crate::layout::LayoutRegistry;
use crate::naming::NormalizedPath;
use crate::types::{META_REQUIRES_AUTH, RouteDescriptor, RouteNode};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One page after extraction, merging and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRoute {
    /// Page file path, used as the leaf's component reference.
    pub source: String,
    pub normalized: NormalizedPath,
    pub descriptor: RouteDescriptor,
}

/// Position of a node: its top-level ancestor, then child positions below it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    top: usize,
    children: Vec<usize>,
}

impl Slot {
    fn child(&self, i: usize) -> Slot {
        let mut children = self.children.clone();
        children.push(i);
        Slot {
            top: self.top,
            children,
        }
    }
}

/// The running accumulator of a generation pass.
#[derive(Debug, Default)]
pub struct RouteTree {
    routes: Vec<RouteNode>,
    /// Path of every node → where it sits in the tree.
    index: HashMap<String, Slot>,
    /// Path of every page node → the page file that owns it.
    pages: HashMap<String, String>,
    /// Synthesized parents still rendering a layout → the layout their first page asked for.
    chosen_layouts: HashMap<String, Option<String>>,
}

impl RouteTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place one prepared page into the tree.
    ///
    /// Findings (missing layouts, layout conflicts, duplicate paths) are
    /// appended to `diagnostics`.
    pub fn insert(
        &mut self,
        route: PreparedRoute,
        layouts: &LayoutRegistry,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let PreparedRoute {
            source,
            normalized,
            descriptor,
        } = route;
        let path = normalized.path.clone();

        if let Some(kept) = self.pages.get(&path) {
            diagnostics.push(Diagnostic::DuplicatePath {
                path,
                kept: kept.clone(),
                page: source,
            });
            return;
        }

        let requested = descriptor.layout().map(str::to_string);
        let mut leaf = RouteNode::leaf(path.clone(), &source, descriptor);

        if let Some(slot) = self.index.get(&path) {
            let node = node_at(&mut self.routes, slot);
            leaf.children = std::mem::take(&mut node.children);
            *node = leaf;
            self.chosen_layouts.remove(&path);
            self.pages.insert(path, source);
            return;
        }

        match normalized.parent_path() {
            None => {
                self.push_top_level(leaf);
            }
            Some(parent_path) => {
                let parent = self.parent_slot(parent_path, requested, &source, layouts, diagnostics);
                let node = node_at(&mut self.routes, &parent);
                let slot = parent.child(node.children.len());
                node.children.push(leaf);
                self.index.insert(path.clone(), slot);
            }
        }
        self.pages.insert(path, source);
    }

    /// Find or synthesize the node a page with `parent_path` nests under.
    fn parent_slot(
        &mut self,
        parent_path: String,
        requested: Option<String>,
        page: &str,
        layouts: &LayoutRegistry,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Slot {
        if let Some(slot) = self.index.get(&parent_path) {
            if let Some(kept) = self.chosen_layouts.get(&parent_path)
                && *kept != requested
            {
                diagnostics.push(Diagnostic::LayoutConflict {
                    parent: parent_path.clone(),
                    kept: kept.clone(),
                    requested,
                    page: page.to_string(),
                });
            }
            return slot.clone();
        }

        let layout = requested.as_deref().and_then(|name| layouts.get(name)).cloned();
        if layout.is_none() {
            diagnostics.push(Diagnostic::MissingLayout {
                parent: parent_path.clone(),
                layout: requested.clone().unwrap_or_default(),
            });
        }
        self.chosen_layouts.insert(parent_path.clone(), requested);
        self.push_top_level(RouteNode::layout_parent(parent_path, layout))
    }

    fn push_top_level(&mut self, node: RouteNode) -> Slot {
        let slot = Slot {
            top: self.routes.len(),
            children: Vec::new(),
        };
        self.index.insert(node.path.clone(), slot.clone());
        self.routes.push(node);
        slot
    }

    /// Guarantee a node at `/`, synthesizing a redirect if no page produced one.
    ///
    /// Returns `true` if a node was added. Calling it again never adds a second root.
    pub fn complete_root(&mut self, default_redirect: &str) -> bool {
        let added = complete_root(&mut self.routes, default_redirect);
        if added {
            let top = self.routes.len() - 1;
            self.index.insert(
                "/".to_string(),
                Slot {
                    top,
                    children: Vec::new(),
                },
            );
        }
        added
    }

    pub fn into_routes(self) -> Vec<RouteNode> {
        self.routes
    }
}

/// The node at `slot`. Nodes are never removed, so recorded slots stay valid.
fn node_at<'a>(routes: &'a mut [RouteNode], slot: &Slot) -> &'a mut RouteNode {
    slot.children
        .iter()
        .fold(&mut routes[slot.top], |node, &i| &mut node.children[i])
}

/// Append a redirecting root node to `routes` unless one already exists at `/`.
pub fn complete_root(routes: &mut Vec<RouteNode>, default_redirect: &str) -> bool {
    if routes.iter().any(|r| r.path == "/") {
        return false;
    }
    let mut meta = Map::new();
    meta.insert(META_REQUIRES_AUTH.to_string(), Value::Bool(false));
    routes.push(RouteNode {
        path: "/".to_string(),
        component: None,
        redirect: Some(default_redirect.to_string()),
        name: None,
        props: None,
        meta,
        children: Vec::new(),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetaDefaults;
    use crate::metadata::{default_meta, merge_descriptor};
    use crate::naming::normalize_page_path;
    use crate::test_helpers::{assert_tree_shape, child_paths, find_route, route_paths};
    use crate::types::{LayoutRef, RouteConfig};
    use serde_json::json;

    fn layouts() -> LayoutRegistry {
        ["DefaultLayout", "AdminLayout", "Custom"]
            .into_iter()
            .map(|name| LayoutRef {
                name: name.to_string(),
                source: format!("src/layouts/{name}.vue"),
            })
            .collect()
    }

    fn prepared(path: &str, meta_override: Option<Value>) -> PreparedRoute {
        let normalized = normalize_page_path(path, "views").unwrap();
        let defaults = default_meta(&normalized, &MetaDefaults::default());
        let embedded: RouteConfig = meta_override
            .map(|m| serde_json::from_value(json!({ "meta": m })).unwrap())
            .unwrap_or_default();
        PreparedRoute {
            source: path.to_string(),
            normalized,
            descriptor: merge_descriptor(defaults, RouteConfig::default(), embedded).descriptor,
        }
    }

    fn build(pages: &[&str]) -> (Vec<RouteNode>, Vec<Diagnostic>) {
        let registry = layouts();
        let mut tree = RouteTree::new();
        let mut diagnostics = Vec::new();
        for page in pages {
            tree.insert(prepared(page, None), &registry, &mut diagnostics);
        }
        (tree.into_routes(), diagnostics)
    }

    #[test]
    fn top_level_pages_stay_flat() {
        let (routes, diags) = build(&["views/index.vue", "views/About.vue"]);
        assert_eq!(route_paths(&routes), vec!["/", "/About"]);
        assert!(routes.iter().all(|r| r.children.is_empty()));
        assert!(diags.is_empty());
    }

    #[test]
    fn siblings_share_one_synthesized_parent() {
        let (routes, _) = build(&["views/admin/users.vue", "views/admin/roles.vue"]);
        assert_tree_shape(&routes, &[("/admin", &["/admin/users", "/admin/roles"])]);

        let admin = find_route(&routes, "/admin");
        assert_eq!(admin.layout_name(), Some("AdminLayout"));
        assert!(admin.meta.is_empty());
    }

    #[test]
    fn first_child_picks_parent_layout() {
        let registry = layouts();
        let mut tree = RouteTree::new();
        let mut diags = Vec::new();
        tree.insert(
            prepared("views/admin/users.vue", Some(json!({"layout": "Custom"}))),
            &registry,
            &mut diags,
        );
        tree.insert(prepared("views/admin/roles.vue", None), &registry, &mut diags);

        let routes = tree.into_routes();
        assert_eq!(find_route(&routes, "/admin").layout_name(), Some("Custom"));
        assert_eq!(
            diags,
            vec![Diagnostic::LayoutConflict {
                parent: "/admin".into(),
                kept: Some("Custom".into()),
                requested: Some("AdminLayout".into()),
                page: "views/admin/roles.vue".into(),
            }]
        );
    }

    #[test]
    fn directory_index_alone_is_single_node() {
        let (routes, _) = build(&["views/admin/index.vue"]);
        assert_eq!(route_paths(&routes), vec!["/admin"]);
        assert!(routes[0].children.is_empty());
        assert_eq!(routes[0].page_source(), Some("views/admin/index.vue"));
    }

    #[test]
    fn index_page_first_hosts_its_siblings() {
        let (routes, _) = build(&["views/users/index.vue", "views/users/[id].vue"]);
        assert_eq!(route_paths(&routes), vec!["/users"]);
        let users = find_route(&routes, "/users");
        assert_eq!(users.page_source(), Some("views/users/index.vue"));
        assert_eq!(child_paths(&routes, "/users"), vec!["/users/:id"]);
    }

    #[test]
    fn index_page_after_parent_takes_it_over() {
        let (routes, diags) = build(&["views/users/[id].vue", "views/users/index.vue"]);
        assert_eq!(route_paths(&routes), vec!["/users"]);
        assert_eq!(child_paths(&routes, "/users"), vec!["/users/:id"]);

        let users = find_route(&routes, "/users");
        assert_eq!(users.page_source(), Some("views/users/index.vue"));
        assert_eq!(users.layout_name(), None);
        assert_eq!(users.meta["requiresAuth"], json!(false));
        assert!(diags.is_empty());
    }

    #[test]
    fn taken_over_parent_stops_reporting_conflicts() {
        let registry = layouts();
        let mut tree = RouteTree::new();
        let mut diags = Vec::new();
        tree.insert(prepared("views/users/[id].vue", None), &registry, &mut diags);
        tree.insert(prepared("views/users/index.vue", None), &registry, &mut diags);
        tree.insert(
            prepared("views/users/new.vue", Some(json!({"layout": "Custom"}))),
            &registry,
            &mut diags,
        );

        let routes = tree.into_routes();
        assert_eq!(child_paths(&routes, "/users"), vec!["/users/:id", "/users/new"]);
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn nested_leaf_takes_over_deeper_parent() {
        let (routes, _) = build(&["views/a/b/c.vue", "views/a/b.vue"]);
        assert_tree_shape(&routes, &[("/a/b", &["/a/b/c"])]);
        assert_eq!(find_route(&routes, "/a/b").page_source(), Some("views/a/b.vue"));
    }

    #[test]
    fn second_page_for_a_path_is_dropped() {
        let (routes, diags) = build(&["views/users.vue", "views/users/index.vue"]);
        assert_eq!(route_paths(&routes), vec!["/users"]);
        assert_eq!(find_route(&routes, "/users").page_source(), Some("views/users.vue"));
        assert_eq!(
            diags,
            vec![Diagnostic::DuplicatePath {
                path: "/users".into(),
                kept: "views/users.vue".into(),
                page: "views/users/index.vue".into(),
            }]
        );
    }

    #[test]
    fn page_hosts_later_pages_of_its_directory() {
        let (routes, diags) = build(&["views/users.vue", "views/users/[id].vue"]);
        assert_eq!(route_paths(&routes), vec!["/users"]);
        assert_eq!(child_paths(&routes, "/users"), vec!["/users/:id"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn every_path_appears_once() {
        fn collect<'a>(routes: &'a [RouteNode], out: &mut Vec<&'a str>) {
            for r in routes {
                out.push(&r.path);
                collect(&r.children, out);
            }
        }

        let (routes, _) = build(&[
            "views/a/b/c.vue",
            "views/a/d.vue",
            "views/a/b.vue",
            "views/a/index.vue",
            "views/a/b/index.vue",
            "views/users/[id].vue",
            "views/users.vue",
            "views/index.vue",
        ]);
        let mut paths = Vec::new();
        collect(&routes, &mut paths);
        let mut unique = paths.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(paths.len(), unique.len(), "{paths:?}");
    }

    #[test]
    fn deep_pages_nest_under_their_full_directory() {
        let (routes, _) = build(&["views/a/b/c.vue", "views/a/d.vue"]);
        assert_tree_shape(&routes, &[("/a/b", &["/a/b/c"]), ("/a", &["/a/d"])]);
    }

    #[test]
    fn unknown_layout_leaves_parent_without_component() {
        let registry = layouts();
        let mut tree = RouteTree::new();
        let mut diags = Vec::new();
        tree.insert(
            prepared("views/shop/cart.vue", Some(json!({"layout": "ShopLayout"}))),
            &registry,
            &mut diags,
        );
        let routes = tree.into_routes();
        assert!(find_route(&routes, "/shop").component.is_none());
        assert_eq!(
            diags,
            vec![Diagnostic::MissingLayout {
                parent: "/shop".into(),
                layout: "ShopLayout".into()
            }]
        );
    }

    #[test]
    fn conflict_not_reported_when_layouts_agree() {
        let (_, diags) = build(&["views/admin/a.vue", "views/admin/b.vue", "views/admin/c.vue"]);
        assert!(diags.is_empty());
    }

    #[test]
    fn root_completion_adds_redirect_once() {
        let (mut routes, _) = build(&["views/About.vue"]);
        assert!(complete_root(&mut routes, "/home"));
        assert!(!complete_root(&mut routes, "/home"));

        let roots: Vec<&RouteNode> = routes.iter().filter(|r| r.path == "/").collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].redirect.as_deref(), Some("/home"));
        assert_eq!(roots[0].meta["requiresAuth"], json!(false));
        assert!(roots[0].component.is_none());
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn root_completion_skipped_for_organic_root() {
        let registry = layouts();
        let mut tree = RouteTree::new();
        tree.insert(prepared("views/index.vue", None), &registry, &mut Vec::new());
        assert!(!tree.complete_root("/home"));

        let routes = tree.into_routes();
        assert_eq!(routes.len(), 1);
        assert!(routes[0].redirect.is_none());
    }

    #[test]
    fn tree_root_completion_indexes_root() {
        let registry = layouts();
        let mut tree = RouteTree::new();
        let mut diags = Vec::new();
        assert!(tree.complete_root("/dashboard"));
        assert!(!tree.complete_root("/dashboard"));

        tree.insert(prepared("views/About.vue", None), &registry, &mut diags);
        let routes = tree.into_routes();
        assert_eq!(route_paths(&routes), vec!["/", "/About"]);
        assert!(diags.is_empty());
    }
}
