//! Extraction of pathed files from markdown-fenced model output
//!
//! Models are asked to emit one fenced block per file with the file path in
//! the fence header. Compliance is best-effort, so the scanner accepts every
//! header shape seen in practice:
//!
//! ````text
//! ```python:app.py     language and path
//! ```src/main.rs       path only
//! ```rust              language only
//! ```                  neither
//! ````
//!
//! Blocks without a path get a synthesized `file<N>.<ext>` name. Nested fences
//! are not supported: the first closing fence after the header ends the block.

use serde::{Deserialize, Serialize};

const FENCE: &str = "```";

/// Language reported for blocks without a declared tag
pub const DEFAULT_LANGUAGE: &str = "text";

/// Conventional file names without an extension. Matched case-sensitively so
/// that lowercase tags like `dockerfile` stay languages.
const BARE_FILE_NAMES: &[&str] = &[
    "Dockerfile",
    "Containerfile",
    "Makefile",
    "GNUmakefile",
    "Justfile",
    "Procfile",
    "Gemfile",
    "Rakefile",
    "Brewfile",
    "Jenkinsfile",
    "Vagrantfile",
    "LICENSE",
    "README",
    "CHANGELOG",
    "CODEOWNERS",
];

/// A single file recovered from the model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFile {
    /// Position in the output sequence (0-based)
    pub index: usize,
    /// Last path segment
    pub name: String,
    /// Declared path, or the synthesized `file<N>.<ext>`
    pub path: String,
    /// Declared language tag, or `"text"`
    pub language: String,
    /// Block body, verbatim
    pub content: String,
}

/// Parsed fence header
#[derive(Debug, Default, PartialEq, Eq)]
struct Header<'a> {
    language: Option<&'a str>,
    path: Option<&'a str>,
}

/// Extract every fenced block of `text` as a file, in source order.
///
/// Never fails; text without fences yields an empty vector.
pub fn extract_files(text: &str) -> Vec<ExtractedFile> {
    let mut files = Vec::new();
    let mut cursor = 0;

    while let Some(open) = text[cursor..].find(FENCE) {
        let header_start = cursor + open + FENCE.len();
        let line_end = text[header_start..]
            .find('\n')
            .map(|offset| header_start + offset);
        let header_line = &text[header_start..line_end.unwrap_or(text.len())];

        // Opener and closer on the same line: a block with an empty body.
        if let Some(close) = header_line.find(FENCE) {
            push_file(&mut files, parse_header(&header_line[..close]), "");
            cursor = header_start + close + FENCE.len();
            continue;
        }

        let Some(line_end) = line_end else {
            break;
        };

        let body_start = line_end + 1;
        let Some(close) = text[body_start..].find(FENCE) else {
            break;
        };

        let body = &text[body_start..body_start + close];
        push_file(&mut files, parse_header(header_line), body);
        cursor = body_start + close + FENCE.len();
    }

    files
}

fn push_file(files: &mut Vec<ExtractedFile>, header: Header<'_>, content: &str) {
    let language = header.language.unwrap_or(DEFAULT_LANGUAGE).to_string();
    let path = match header.path {
        Some(path) => path.to_string(),
        None => format!(
            "file{}.{}",
            files.len() + 1,
            extension_for_language(&language)
        ),
    };

    files.push(ExtractedFile {
        index: files.len(),
        name: file_name(&path).to_string(),
        path,
        language,
        content: content.to_string(),
    });
}

fn parse_header(raw: &str) -> Header<'_> {
    let header = raw.trim();

    if header.is_empty() {
        return Header::default();
    }

    if let Some((language, path)) = header.split_once(':') {
        if is_language_tag(language) {
            let path = path.trim();
            return Header {
                language: Some(language),
                path: (!path.is_empty()).then_some(path),
            };
        }
    }

    if looks_like_path(header) {
        return Header {
            language: None,
            path: Some(header),
        };
    }

    Header {
        language: header.split_whitespace().next(),
        path: None,
    }
}

fn is_language_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn looks_like_path(token: &str) -> bool {
    token.contains('/') || token.contains('.') || BARE_FILE_NAMES.contains(&token)
}

/// Final path segment, ignoring trailing slashes.
fn file_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
}

/// File extension for a language tag; unknown tags map to `txt`.
///
/// Matching is case-insensitive.
pub fn extension_for_language(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "javascript" | "js" => "js",
        "typescript" | "ts" => "ts",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "python" | "py" => "py",
        "java" => "java",
        "kotlin" => "kt",
        "go" => "go",
        "rust" | "rs" => "rs",
        "ruby" | "rb" => "rb",
        "php" => "php",
        "csharp" | "cs" => "cs",
        "cpp" => "cpp",
        "c" => "c",
        "swift" => "swift",
        "json" => "json",
        "yaml" | "yml" => "yml",
        "toml" => "toml",
        "markdown" | "md" => "md",
        "bash" | "sh" | "shell" => "sh",
        "sql" => "sql",
        _ => "txt",
    }
}
