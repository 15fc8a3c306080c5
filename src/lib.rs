//! # Route Tree
//!
//! A file-based route generator for single-page applications. Your views
//! directory is the data source: page files become routes, directories become
//! layout-bound parent routes, and `[param]` segments become `:param`.
//!
//! # Architecture: Four-Step Pass
//!
//! One generation pass turns a project into a nested route table:
//!
//! ```text
//! 1. Enumerate  src/views, src/layouts  →  pages, layout registry
//! 2. Prepare    each page               →  path + merged route config
//! 3. Assemble   prepared pages          →  nested route tree
//! 4. Complete   route tree              →  exactly one "/" route
//! ```
//!
//! Step 2 is independent per page and runs in parallel. Steps 3 and 4 are a
//! single ordered fold over the prepared pages, so the output depends only on
//! the input files and their discovery order. The filesystem sits behind the
//! [`source::PageSource`] trait, so every step can be tested in memory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Page and layout discovery, lazy content loading (`FsSource`, `MemorySource`) |
//! | [`naming`] | Page file path → URL path and parent directory segments |
//! | [`block`] | Custom block parser for single-file components (`<route>…</route>`) |
//! | [`extract`] | Embedded-block and sibling-file route config extraction |
//! | [`metadata`] | Computed meta defaults and the three-layer config merge |
//! | [`layout`] | Layout registry keyed by layout name |
//! | [`tree`] | Route tree assembly, parent synthesis, and root completion |
//! | [`generate`] | The full pass, tying the steps together |
//! | [`diagnostic`] | Non-fatal findings collected during a pass |
//! | [`config`] | `routes.toml` loading, validation, and stock defaults |
//! | [`types`] | Route config and route node types serialized to JSON |
//! | [`output`] | CLI output formatting: route tree and warnings |
//!
//! # Design Decisions
//!
//! ## Flat Parents
//!
//! A page nests under the parent whose path is its full directory, and
//! parents are always top-level. `a/b/c.vue` lands under `/a/b`, which sits
//! beside `/a` rather than inside it. The route table stays two levels deep.
//!
//! ## First Page Picks the Layout
//!
//! A synthesized parent renders the layout named by the `meta.layout` of the
//! first page discovered in its directory. Siblings asking for a different
//! layout join the parent unchanged, and the mismatch is reported as a
//! [`diagnostic::Diagnostic::LayoutConflict`].
//!
//! ## Config Cascade (Defaults → Sibling → Block)
//!
//! Route meta is layered, later layers winning per key:
//!
//! ```text
//! computed defaults              ← requiresAuth from Auth* prefix, layout from admin/
//! src/views/admin/route.json     ← applies to every page in admin/
//! <route> block in the page      ← applies to this page only
//! ```
//!
//! `name`, `redirect` and `props` take the first value present, sibling file
//! first. See [`metadata`] for the exact rules.
//!
//! ## Degrade, Don't Abort
//!
//! Only failing to enumerate the project stops a pass. A broken config block
//! or sibling file falls back to the defaults, and a page whose path cannot be
//! mapped is dropped. Each case is logged with `tracing` and collected in
//! [`generate::Generated::diagnostics`]; `route-tree check` exits non-zero
//! when a page was dropped.

pub mod block;
pub mod config;
pub mod diagnostic;
pub mod extract;
pub mod generate;
pub mod layout;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod source;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
