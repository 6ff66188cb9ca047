//! Linear text/code view of model output
//!
//! Used for display when no file could be extracted. The fence pattern here
//! only accepts an info string made of `[A-Za-z0-9_\-./]` directly followed by
//! a newline, so for the same input it can find fewer (or different) blocks
//! than [`crate::files::extract_files`]. The two views are not reconciled.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Highlighting mode used when a block has no usable extension
pub const FALLBACK_DISPLAY_LANGUAGE: &str = "javascript";

/// Segment of model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text {
        content: String,
    },
    Code {
        /// Fence info string, empty when absent
        path: String,
        content: String,
    },
}

impl Block {
    /// Highlighting language for code blocks, `None` for prose.
    pub fn display_language(&self) -> Option<&'static str> {
        match self {
            Block::Text { .. } => None,
            Block::Code { path, .. } => Some(language_for_path(path)),
        }
    }
}

fn code_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```([a-zA-Z0-9_\-./]+)?\n(.*?)```").unwrap())
}

/// Split `text` into alternating prose and code segments.
pub fn extract_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for caps in code_block_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last {
            blocks.push(Block::Text {
                content: text[last..whole.start()].to_string(),
            });
        }

        blocks.push(Block::Code {
            path: caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            content: caps
                .get(2)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        });

        last = whole.end();
    }

    if last < text.len() {
        blocks.push(Block::Text {
            content: text[last..].to_string(),
        });
    }

    blocks
}

/// Highlighting language inferred from the extension of `path`.
///
/// Anything unrecognized, including an empty path, falls back to
/// [`FALLBACK_DISPLAY_LANGUAGE`].
pub fn language_for_path(path: &str) -> &'static str {
    if path.is_empty() {
        return FALLBACK_DISPLAY_LANGUAGE;
    }

    let extension = path.rsplit('.').next().unwrap_or(path).to_lowercase();

    match extension.as_str() {
        "js" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "py" => "python",
        "java" => "java",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "md" => "markdown",
        _ => FALLBACK_DISPLAY_LANGUAGE,
    }
}
