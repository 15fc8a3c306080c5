//! Custom block parsing for single-file-component pages.
//!
//! A page can embed its route config in a top-level custom block:
//!
//! ```text
//! <template>
//!   <h1>Login</h1>
//! </template>
//!
//! <route lang="json">
//! { "name": "login", "meta": { "requiresAuth": false } }
//! </route>
//! ```
//!
//! [`BlockParser`] is the seam: the generator only needs "give me the tagged
//! blocks of this text". [`SfcBlockParser`] is the stock implementation. It
//! treats a tag as top-level when it opens at the start of a line, and the
//! block ends at the first matching closing tag that either starts a line or
//! sits on the opening line, which is how formatted components are written.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("<{0}> block is never closed")]
    Unterminated(String),
}

/// One top-level block of a page, e.g. `<route lang="json">…</route>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomBlock {
    /// Tag name (`"route"`, `"template"`, `"script"`, …).
    pub block_type: String,
    /// Attributes of the opening tag. Bare attributes map to an empty string.
    pub attrs: BTreeMap<String, String>,
    /// Raw text between the opening and closing tag.
    pub content: String,
}

impl CustomBlock {
    pub fn lang(&self) -> Option<&str> {
        self.attrs.get("lang").map(String::as_str)
    }
}

/// Splits a page's raw text into tagged blocks.
pub trait BlockParser: Sync {
    fn parse(&self, content: &str) -> Result<Vec<CustomBlock>, BlockError>;
}

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^<([A-Za-z][A-Za-z0-9_-]*)(\s[^>]*)?>").expect("open tag pattern")
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:@][A-Za-z0-9_:.@-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern")
});

/// Stock parser for `.vue`-style single-file components.
#[derive(Debug, Default, Clone, Copy)]
pub struct SfcBlockParser;

impl BlockParser for SfcBlockParser {
    fn parse(&self, content: &str) -> Result<Vec<CustomBlock>, BlockError> {
        let mut blocks = Vec::new();
        let mut pos = 0;

        while let Some(open) = OPEN_TAG.captures_at(content, pos) {
            let whole = open.get(0).expect("group 0 always matches");
            let name = open[1].to_string();
            let raw_attrs = open.get(2).map(|m| m.as_str()).unwrap_or("");

            if raw_attrs.trim_end().ends_with('/') {
                let attrs = raw_attrs.trim_end().trim_end_matches('/');
                blocks.push(CustomBlock {
                    block_type: name,
                    attrs: parse_attrs(attrs),
                    content: String::new(),
                });
                pos = whole.end();
                continue;
            }

            let (body_end, close_end) = find_close(content, whole.end(), &name)
                .ok_or_else(|| BlockError::Unterminated(name.clone()))?;

            blocks.push(CustomBlock {
                block_type: name,
                attrs: parse_attrs(raw_attrs),
                content: content[whole.end()..body_end].to_string(),
            });
            pos = close_end;
        }

        Ok(blocks)
    }
}

/// Locate the closing tag of a top-level block opened just before `from`.
///
/// Returns `(start of closing tag, end of closing tag)`.
fn find_close(content: &str, from: usize, name: &str) -> Option<(usize, usize)> {
    let closing = format!("</{name}>");
    let first_newline = content[from..].find('\n').map(|i| from + i);
    let mut search = from;

    while let Some(offset) = content[search..].find(&closing) {
        let start = search + offset;
        let at_line_start = start == 0 || content[..start].ends_with('\n');
        let on_open_line = first_newline.is_none_or(|nl| start < nl);
        if at_line_start || on_open_line {
            return Some((start, start + closing.len()));
        }
        search = start + closing.len();
    }
    None
}

fn parse_attrs(raw: &str) -> BTreeMap<String, String> {
    ATTR.captures_iter(raw)
        .map(|c| {
            let value = c
                .get(2)
                .or_else(|| c.get(3))
                .or_else(|| c.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (c[1].to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Vec<CustomBlock> {
        SfcBlockParser.parse(content).unwrap()
    }

    #[test]
    fn finds_all_top_level_blocks() {
        let page = "<template>\n  <div/>\n</template>\n\n<script setup>\nconst a = 1\n</script>\n\n<route>\n{\"name\": \"x\"}\n</route>\n";
        let blocks = parse(page);
        let types: Vec<&str> = blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, vec!["template", "script", "route"]);
        assert_eq!(blocks[2].content.trim(), "{\"name\": \"x\"}");
        assert_eq!(blocks[1].attrs.get("setup").map(String::as_str), Some(""));
    }

    #[test]
    fn nested_template_does_not_end_block() {
        let page = "<template>\n  <template v-if=\"ok\">\n    <p/>\n  </template>\n</template>\n<route>{}</route>\n";
        let blocks = parse(page);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].content.contains("v-if"));
        assert_eq!(blocks[1].block_type, "route");
    }

    #[test]
    fn single_line_block() {
        let blocks = parse("<route lang=\"json\">{\"meta\": {}}</route>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].content, "{\"meta\": {}}");
        assert_eq!(blocks[0].lang(), Some("json"));
    }

    #[test]
    fn attribute_quoting_styles() {
        let blocks = parse("<route lang='json' scope=page flag>\n{}\n</route>\n");
        let attrs = &blocks[0].attrs;
        assert_eq!(attrs["lang"], "json");
        assert_eq!(attrs["scope"], "page");
        assert_eq!(attrs["flag"], "");
    }

    #[test]
    fn self_closing_block_is_empty() {
        let blocks = parse("<route lang=\"json\" />\n<template>\n</template>\n");
        assert_eq!(blocks[0].block_type, "route");
        assert!(blocks[0].content.is_empty());
        assert_eq!(blocks[0].lang(), Some("json"));
        assert_eq!(blocks[1].block_type, "template");
    }

    #[test]
    fn indented_tags_are_not_top_level() {
        let blocks = parse("<template>\n  <route>{}</route>\n</template>\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_type, "template");
    }

    #[test]
    fn unterminated_block_is_error() {
        let err = SfcBlockParser.parse("<route>\n{\"name\": 1}\n").unwrap_err();
        assert_eq!(err, BlockError::Unterminated("route".to_string()));
    }

    #[test]
    fn plain_text_has_no_blocks() {
        assert!(parse("just some text\nwith lines").is_empty());
        assert!(parse("").is_empty());
    }
}
