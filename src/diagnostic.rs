//! Non-fatal findings of a generation pass.
//!
//! None of these stop a pass. Each one is logged as it happens and collected
//! into [`Generated::diagnostics`](crate::generate::Generated) so tooling can
//! report them or fail on them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The page's embedded `<route>` block could not be used.
    EmbeddedConfig { page: String, error: String },
    /// The sibling config file applying to the page could not be used.
    SiblingConfig {
        page: String,
        file: String,
        error: String,
    },
    /// A config source set a guaranteed meta key to the wrong type.
    IgnoredMetaKey { page: String, key: String },
    /// A synthesized parent asked for a layout the registry does not have.
    MissingLayout { parent: String, layout: String },
    /// A page wanted a different layout than its already-created parent has.
    LayoutConflict {
        parent: String,
        kept: Option<String>,
        requested: Option<String>,
        page: String,
    },
    /// Another page already owns the route path, so this page was dropped.
    DuplicatePath {
        path: String,
        kept: String,
        page: String,
    },
    /// The page was dropped from the tree.
    PageSkipped { page: String, error: String },
}

impl Diagnostic {
    /// Whether the page this concerns is missing from the output.
    pub fn drops_page(&self) -> bool {
        matches!(
            self,
            Diagnostic::PageSkipped { .. } | Diagnostic::DuplicatePath { .. }
        )
    }
}

fn or_none(layout: &Option<String>) -> &str {
    layout.as_deref().unwrap_or("<none>")
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::EmbeddedConfig { page, error } => {
                write!(f, "{page}: ignoring <route> block: {error}")
            }
            Diagnostic::SiblingConfig { page, file, error } => {
                write!(f, "{page}: ignoring {file}: {error}")
            }
            Diagnostic::IgnoredMetaKey { page, key } => {
                write!(f, "{page}: ignoring meta.{key} override of the wrong type")
            }
            Diagnostic::MissingLayout { parent, layout } => {
                write!(f, "{parent}: layout {layout} not found, route has no component")
            }
            Diagnostic::LayoutConflict {
                parent,
                kept,
                requested,
                page,
            } => write!(
                f,
                "{parent}: keeps layout {} although {page} asks for {}",
                or_none(kept),
                or_none(requested)
            ),
            Diagnostic::DuplicatePath { path, kept, page } => {
                write!(f, "{page}: skipped: {path} is already routed to {kept}")
            }
            Diagnostic::PageSkipped { page, error } => write!(f, "{page}: skipped: {error}"),
        }
    }
}
