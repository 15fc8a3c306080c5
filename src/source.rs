//! Page discovery and lazy content loading.
//!
//! The generator never touches the filesystem directly; it asks a
//! [`PageSource`] for the page list, the layout list, and (at most once per
//! page) the raw text it needs for config extraction. Two sources ship:
//!
//! - [`FsSource`] walks a project directory. Discovery order is the sorted
//!   depth-first walk order, so repeated runs see pages in the same order.
//!   Dot-entries and names listed in `exclude` are skipped.
//! - [`MemorySource`] serves files from memory in insertion order, for tests
//!   and for callers that already hold their sources (bundler plugins, watchers).
//!
//! All paths handed out and accepted are slash-separated and relative to the
//! project root, e.g. `src/views/users/[id].vue`.

use crate::config::GeneratorConfig;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Views directory not found: {0}")]
    MissingViews(PathBuf),
    #[error("No such file: {0}")]
    NotFound(String),
}

/// One discovered page. Its path doubles as the component reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    pub file_path: String,
}

impl SourcePage {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Directory part of the page path, without trailing slash (`""` at the top).
    pub fn dir(&self) -> &str {
        self.file_path
            .rfind('/')
            .map(|i| &self.file_path[..i])
            .unwrap_or("")
    }
}

/// Supplies pages, layouts, and their contents to a generation pass.
///
/// Enumeration is complete before any page is processed. Loaders may be
/// called from several threads at once.
pub trait PageSource: Sync {
    /// All pages, in discovery order.
    fn pages(&self) -> Result<Vec<SourcePage>, SourceError>;

    /// Paths of all layout files. Missing layouts are not an error.
    fn layouts(&self) -> Result<Vec<String>, SourceError>;

    /// Raw text of a page.
    fn load_content(&self, path: &str) -> Result<String, SourceError>;

    /// Raw text of an optional file, `None` when it does not exist.
    fn load_optional(&self, path: &str) -> Result<Option<String>, SourceError>;
}

// =============================================================================
// Filesystem source
// =============================================================================

/// Walks `<root>/<views_root>` and `<root>/<layouts_dir>` on disk.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    config: GeneratorConfig,
}

impl FsSource {
    pub fn new(root: &Path, config: &GeneratorConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config: config.clone(),
        }
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|e| self.config.is_page_extension(&e.to_string_lossy()))
    }

    /// Slash-separated path of `path` relative to the project root.
    fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn read(&self, path: &str) -> Result<String, SourceError> {
        fs::read_to_string(self.root.join(path)).map_err(|source| SourceError::Io {
            path: path.to_string(),
            source,
        })
    }
}

impl PageSource for FsSource {
    fn pages(&self) -> Result<Vec<SourcePage>, SourceError> {
        let views = self.root.join(self.config.views_prefix());
        if !views.is_dir() {
            return Err(SourceError::MissingViews(views));
        }

        let mut pages = Vec::new();
        let walker = WalkDir::new(&views)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !self.config.is_excluded(&e.file_name().to_string_lossy())
            });
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && self.has_extension(entry.path()) {
                pages.push(SourcePage::new(self.relative(entry.path())));
            }
        }
        Ok(pages)
    }

    fn layouts(&self) -> Result<Vec<String>, SourceError> {
        let dir = self.root.join(self.config.layouts_dir.trim_matches('/'));
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut layouts = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.has_extension(entry.path()) {
                layouts.push(self.relative(entry.path()));
            }
        }
        Ok(layouts)
    }

    fn load_content(&self, path: &str) -> Result<String, SourceError> {
        self.read(path)
    }

    fn load_optional(&self, path: &str) -> Result<Option<String>, SourceError> {
        if !self.root.join(path).is_file() {
            return Ok(None);
        }
        self.read(path).map(Some)
    }
}

// =============================================================================
// In-memory source
// =============================================================================

/// Pages, layouts, and side files held in memory.
///
/// ```rust
/// use route_tree::source::MemorySource;
///
/// let source = MemorySource::new()
///     .page("src/views/index.vue", "<template></template>")
///     .file("src/views/route.json", r#"{"meta": {"title": "Home"}}"#)
///     .layout("src/layouts/DefaultLayout.vue");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<(String, Option<String>)>,
    layouts: Vec<String>,
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with its raw content. Pages are discovered in insertion order.
    pub fn page(mut self, path: &str, content: &str) -> Self {
        self.pages.push((path.to_string(), Some(content.to_string())));
        self
    }

    /// Add a page whose content cannot be loaded.
    pub fn unreadable_page(mut self, path: &str) -> Self {
        self.pages.push((path.to_string(), None));
        self
    }

    pub fn layout(mut self, path: &str) -> Self {
        self.layouts.push(path.to_string());
        self
    }

    /// Add a non-page file, such as a sibling route config.
    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }
}

impl PageSource for MemorySource {
    fn pages(&self) -> Result<Vec<SourcePage>, SourceError> {
        Ok(self.pages.iter().map(|(p, _)| SourcePage::new(p.as_str())).collect())
    }

    fn layouts(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.layouts.clone())
    }

    fn load_content(&self, path: &str) -> Result<String, SourceError> {
        self.pages
            .iter()
            .find(|(p, _)| p == path)
            .and_then(|(_, content)| content.clone())
            .or_else(|| self.files.get(path).cloned())
            .ok_or_else(|| SourceError::NotFound(path.to_string()))
    }

    fn load_optional(&self, path: &str) -> Result<Option<String>, SourceError> {
        Ok(self.files.get(path).cloned())
    }
}
