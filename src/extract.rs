//! Per-page route config extraction.
//!
//! A page's route config can come from two independent places:
//!
//! - **Embedded block**: a `<route>` custom block inside the page itself.
//! - **Sibling file**: a fixed-name file (`route.json` by default) in the
//!   page's directory. It applies to every page in that directory.
//!
//! Both are optional. Each extraction returns a `Result`, so the caller picks
//! the policy: the generation pass logs failures and carries on with an empty
//! config, while `check`-style tooling can surface them.
//!
//! A sibling file named `*.toml` is decoded as TOML, anything else as JSON.
//! An embedded block is JSON unless its `lang` attribute says otherwise, and
//! only `json` is accepted there.

use crate::block::{BlockError, BlockParser};
use crate::source::{PageSource, SourceError, SourcePage};
use crate::types::RouteConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("could not load {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: SourceError,
    },
    #[error("block parse error: {0}")]
    Block(#[from] BlockError),
    #[error("unsupported <route> block language: {0}")]
    UnsupportedLang(String),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Decode the first block of type `block_type` in a page's raw text.
///
/// A page with no such block yields an empty config; so does a block holding
/// only whitespace.
pub fn extract_embedded(
    content: &str,
    parser: &impl BlockParser,
    block_type: &str,
) -> Result<RouteConfig, ExtractError> {
    let blocks = parser.parse(content)?;
    let Some(block) = blocks.into_iter().find(|b| b.block_type == block_type) else {
        return Ok(RouteConfig::default());
    };

    if let Some(lang) = block.lang()
        && !lang.eq_ignore_ascii_case("json")
    {
        return Err(ExtractError::UnsupportedLang(lang.to_string()));
    }

    if block.content.trim().is_empty() {
        return Ok(RouteConfig::default());
    }
    Ok(serde_json::from_str(&block.content)?)
}

/// Decode a sibling config file's text, choosing the format by file name.
pub fn decode_sibling(file_name: &str, raw: &str) -> Result<RouteConfig, ExtractError> {
    if raw.trim().is_empty() {
        return Ok(RouteConfig::default());
    }
    if file_name.ends_with(".toml") {
        Ok(toml::from_str(raw)?)
    } else {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Path of the sibling config that applies to `page`.
pub fn sibling_path(page: &SourcePage, sibling_file: &str) -> String {
    match page.dir() {
        "" => sibling_file.to_string(),
        dir => format!("{dir}/{sibling_file}"),
    }
}

/// Load the page's content and extract its embedded config.
pub fn load_embedded(
    source: &impl PageSource,
    parser: &impl BlockParser,
    page: &SourcePage,
    block_type: &str,
) -> Result<RouteConfig, ExtractError> {
    let content = source
        .load_content(&page.file_path)
        .map_err(|e| ExtractError::Load {
            path: page.file_path.clone(),
            source: e,
        })?;
    extract_embedded(&content, parser, block_type)
}

/// Load and decode the sibling config for `page`; absent means empty.
pub fn load_sibling(
    source: &impl PageSource,
    page: &SourcePage,
    sibling_file: &str,
) -> Result<RouteConfig, ExtractError> {
    let path = sibling_path(page, sibling_file);
    match source.load_optional(&path) {
        Ok(Some(raw)) => decode_sibling(sibling_file, &raw),
        Ok(None) => Ok(RouteConfig::default()),
        Err(e) => Err(ExtractError::Load { path, source: e }),
    }
}
