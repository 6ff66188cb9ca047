use serde::Serialize;

use crate::blocks::{extract_blocks, Block};
use crate::files::{extract_files, ExtractedFile};

/// What to show for a model response.
///
/// Prefers the file view; falls back to the linear block view when no file
/// could be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum OutputView {
    Empty,
    Files {
        files: Vec<ExtractedFile>,
        /// Index of the file shown by default
        selected: usize,
    },
    Blocks {
        blocks: Vec<Block>,
    },
}

/// Build the view for `text`. Every call starts from scratch.
pub fn view(text: &str) -> OutputView {
    if text.is_empty() {
        return OutputView::Empty;
    }

    let files = extract_files(text);
    if !files.is_empty() {
        return OutputView::Files { files, selected: 0 };
    }

    OutputView::Blocks {
        blocks: extract_blocks(text),
    }
}
