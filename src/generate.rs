//! Route table generation: the batch pass tying everything together.
//!
//! ```text
//! 1. Enumerate   PageSource       →  pages, layouts     (fatal on failure)
//! 2. Prepare     each page        →  PreparedRoute      (parallel, per-page errors contained)
//! 3. Assemble    prepared routes  →  RouteTree          (single thread, discovery order)
//! 4. Complete    RouteTree        →  exactly one "/"
//! ```
//!
//! Preparing a page means normalizing its path, extracting the sibling and
//! embedded configs, and merging them over the computed defaults. Pages share
//! no state while being prepared, so that step runs on rayon's pool; the
//! results are collected back in discovery order before assembly.
//!
//! A config source that fails to load or decode degrades to an empty config.
//! A page whose path cannot be normalized is dropped. Both are logged and
//! recorded as [`Diagnostic`]s. Only enumeration failures abort the pass.

use crate::block::{BlockParser, SfcBlockParser};
use crate::config::GeneratorConfig;
use crate::diagnostic::Diagnostic;
use crate::extract::{self, ExtractError};
use crate::layout::LayoutRegistry;
use crate::metadata::{default_meta, merge_descriptor};
use crate::naming::{NormalizeError, normalize_page_path};
use crate::source::{FsSource, PageSource, SourceError, SourcePage};
use crate::tree::{PreparedRoute, RouteTree};
use crate::types::{RouteConfig, RouteNode};
use rayon::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Page enumeration failed: {0}")]
    Source(#[from] SourceError),
}

/// Output of one generation pass.
#[derive(Debug)]
pub struct Generated {
    /// Top-level routes, ready to serialize.
    pub routes: Vec<RouteNode>,
    /// Everything that degraded along the way, in the order it happened.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of pages the source enumerated.
    pub page_count: usize,
    /// Whether the root route was synthesized.
    pub root_synthesized: bool,
}

impl Generated {
    /// Number of pages dropped from the tree.
    pub fn skipped_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.drops_page()).count()
    }
}

/// Generate the route table for the project at `root`, reading from disk.
pub fn generate(root: &Path, config: &GeneratorConfig) -> Result<Generated, GenerateError> {
    let source = FsSource::new(root, config);
    generate_with_source(&source, &SfcBlockParser, config)
}

/// Generate from any page source and block parser (allows in-memory sources and custom parsers).
pub fn generate_with_source(
    source: &impl PageSource,
    parser: &impl BlockParser,
    config: &GeneratorConfig,
) -> Result<Generated, GenerateError> {
    let pages = source.pages()?;
    let layouts = LayoutRegistry::from_source(source)?;
    debug!(
        pages = pages.len(),
        layouts = ?layouts.names().collect::<Vec<_>>(),
        "enumerated sources"
    );
    Ok(generate_routes(source, parser, &pages, &layouts, config))
}

/// Run steps 2–4 over an explicit page list and layout registry.
///
/// The result depends only on the inputs, so two runs over the same inputs
/// produce the same tree.
pub fn generate_routes(
    source: &impl PageSource,
    parser: &impl BlockParser,
    pages: &[SourcePage],
    layouts: &LayoutRegistry,
    config: &GeneratorConfig,
) -> Generated {
    let prepared: Vec<Result<(PreparedRoute, Vec<Diagnostic>), NormalizeError>> = pages
        .par_iter()
        .map(|page| prepare_page(source, parser, page, config))
        .collect();

    let mut tree = RouteTree::new();
    let mut diagnostics = Vec::new();

    for (page, result) in pages.iter().zip(prepared) {
        match result {
            Ok((route, page_diagnostics)) => {
                for d in &page_diagnostics {
                    warn!(page = %page.file_path, "{d}");
                }
                diagnostics.extend(page_diagnostics);
                debug!(
                    page = %page.file_path,
                    path = %route.normalized.path,
                    layout = route.descriptor.layout(),
                    requires_auth = route.descriptor.requires_auth(),
                    "placing route"
                );

                let before = diagnostics.len();
                tree.insert(route, layouts, &mut diagnostics);
                for d in &diagnostics[before..] {
                    warn!("{d}");
                }
            }
            Err(error) => {
                let d = Diagnostic::PageSkipped {
                    page: page.file_path.clone(),
                    error: error.to_string(),
                };
                warn!(page = %page.file_path, "{d}");
                diagnostics.push(d);
            }
        }
    }

    let root_synthesized = tree.complete_root(&config.default_redirect);
    if root_synthesized {
        debug!(redirect = %config.default_redirect, "no page maps to /, added root redirect");
    }

    let generated = Generated {
        routes: tree.into_routes(),
        diagnostics,
        page_count: pages.len(),
        root_synthesized,
    };
    info!(
        pages = generated.page_count,
        routes = generated.routes.len(),
        skipped = generated.skipped_count(),
        diagnostics = generated.diagnostics.len(),
        "route table generated"
    );
    generated
}

/// Normalize, extract and merge one page.
///
/// Extraction failures degrade to empty configs and come back as diagnostics;
/// only a path that cannot be normalized fails the page.
pub fn prepare_page(
    source: &impl PageSource,
    parser: &impl BlockParser,
    page: &SourcePage,
    config: &GeneratorConfig,
) -> Result<(PreparedRoute, Vec<Diagnostic>), NormalizeError> {
    let normalized = normalize_page_path(&page.file_path, &config.views_root)?;
    let mut diagnostics = Vec::new();

    let sibling = extract::load_sibling(source, page, &config.sibling_file).unwrap_or_else(|e| {
        diagnostics.push(Diagnostic::SiblingConfig {
            page: page.file_path.clone(),
            file: extract::sibling_path(page, &config.sibling_file),
            error: e.to_string(),
        });
        RouteConfig::default()
    });

    let embedded = extract::load_embedded(source, parser, page, &config.block_type)
        .unwrap_or_else(|e: ExtractError| {
            diagnostics.push(Diagnostic::EmbeddedConfig {
                page: page.file_path.clone(),
                error: e.to_string(),
            });
            RouteConfig::default()
        });

    let defaults = default_meta(&normalized, &config.defaults);
    let outcome = merge_descriptor(defaults, sibling, embedded);
    diagnostics.extend(outcome.rejected.into_iter().map(|key| Diagnostic::IgnoredMetaKey {
        page: page.file_path.clone(),
        key,
    }));

    Ok((
        PreparedRoute {
            source: page.file_path.clone(),
            normalized,
            descriptor: outcome.descriptor,
        },
        diagnostics,
    ))
}
