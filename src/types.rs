//! Shared types passed between extraction, merging, and tree assembly.
//!
//! [`RouteNode`] is also the output contract: it serializes to the camelCase
//! JSON route table a front-end router consumes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Meta key holding the auth hint.
pub const META_REQUIRES_AUTH: &str = "requiresAuth";
/// Meta key holding the layout identifier.
pub const META_LAYOUT: &str = "layout";

/// Partial route config contributed by one source (embedded block or sibling file).
///
/// Every field is optional; unknown top-level keys are ignored so config
/// blocks can carry data meant for other tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl RouteConfig {
    pub fn is_empty(&self) -> bool {
        self.redirect.is_none() && self.name.is_none() && self.props.is_none() && self.meta.is_empty()
    }
}

/// Fully merged config for one page, ready for tree placement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub redirect: Option<String>,
    pub name: Option<String>,
    pub props: Option<Value>,
    /// Always carries `requiresAuth` (bool) and `layout` (string).
    pub meta: Map<String, Value>,
}

impl RouteDescriptor {
    /// The layout identifier, or `None` if a config source replaced it with a non-string.
    pub fn layout(&self) -> Option<&str> {
        self.meta.get(META_LAYOUT).and_then(Value::as_str)
    }

    pub fn requires_auth(&self) -> bool {
        self.meta
            .get(META_REQUIRES_AUTH)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// A resolved layout unit that synthesized parent routes render through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRef {
    pub name: String,
    pub source: String,
}

/// What a route mounts. Leaves reference their page; synthesized parents their layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Component {
    /// Deferred reference to a page file; never loaded during generation.
    Page { source: String },
    Layout { name: String, source: String },
}

impl From<LayoutRef> for Component {
    fn from(layout: LayoutRef) -> Self {
        Component::Layout {
            name: layout.name,
            source: layout.source,
        }
    }
}

/// One node of the generated route tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Leaf route for a page, carrying its merged descriptor.
    pub fn leaf(path: String, source: &str, descriptor: RouteDescriptor) -> Self {
        Self {
            path,
            component: Some(Component::Page {
                source: source.to_string(),
            }),
            redirect: descriptor.redirect,
            name: descriptor.name,
            props: descriptor.props,
            meta: descriptor.meta,
            children: Vec::new(),
        }
    }

    /// Synthesized parent hosting the pages of one directory.
    pub fn layout_parent(path: String, layout: Option<LayoutRef>) -> Self {
        Self {
            path,
            component: layout.map(Component::from),
            redirect: None,
            name: None,
            props: None,
            meta: Map::new(),
            children: Vec::new(),
        }
    }

    /// Name of the layout this node renders through, if it is a layout route.
    pub fn layout_name(&self) -> Option<&str> {
        match &self.component {
            Some(Component::Layout { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Source file of the page this node mounts, if it is a leaf.
    pub fn page_source(&self) -> Option<&str> {
        match &self.component {
            Some(Component::Page { source }) => Some(source),
            _ => None,
        }
    }
}
