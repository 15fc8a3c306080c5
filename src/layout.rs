//! Named layouts that synthesized parent routes render through.
//!
//! Each file in the layouts directory registers one layout under its file
//! stem: `src/layouts/AdminLayout.vue` → `"AdminLayout"`. The registry is
//! built once per generation pass and only read during tree assembly.

use crate::source::{PageSource, SourceError};
use crate::types::LayoutRef;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutRegistry {
    layouts: BTreeMap<String, LayoutRef>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every layout file the source lists.
    ///
    /// When two files share a stem (`Default.vue`, `Default.tsx`) the first one
    /// listed wins.
    pub fn from_source(source: &impl PageSource) -> Result<Self, SourceError> {
        Ok(source
            .layouts()?
            .into_iter()
            .filter_map(|path| {
                let name = layout_name(&path)?;
                Some(LayoutRef { name, source: path })
            })
            .collect())
    }

    pub fn get(&self, name: &str) -> Option<&LayoutRef> {
        self.layouts.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl FromIterator<LayoutRef> for LayoutRegistry {
    fn from_iter<I: IntoIterator<Item = LayoutRef>>(iter: I) -> Self {
        let mut layouts = BTreeMap::new();
        for layout in iter {
            layouts.entry(layout.name.clone()).or_insert(layout);
        }
        Self { layouts }
    }
}

/// File stem of a slash-separated path: `src/layouts/AdminLayout.vue` → `AdminLayout`.
fn layout_name(path: &str) -> Option<String> {
    let file = path.rsplit('/').next()?;
    let stem = match file.rfind('.') {
        Some(0) | None => file,
        Some(dot) => &file[..dot],
    };
    (!stem.is_empty()).then(|| stem.to_string())
}
