use std::path::PathBuf;

use colored::Colorize;
use scaffold_core::blocks::{extract_blocks, Block};
use scaffold_core::files::{extract_files, ExtractedFile};
use scaffold_core::tree::FileTree;
use scaffold_core::view::view;
use tokio::io::AsyncReadExt;

use crate::prelude::{eprintln, print, println, *};

#[derive(Debug, Clone, clap::Args)]
pub struct ExtractOptions {
    /// Saved model response; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print only the file with this path or index
    #[arg(long, value_name = "PATH|INDEX", conflicts_with_all = ["json", "tree", "blocks"])]
    pub select: Option<String>,

    #[clap(flatten)]
    pub output: OutputFlags,
}

/// Output selection shared by `extract` and `generate`
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OutputFlags {
    /// Output the parsed view as JSON
    #[arg(long, conflicts_with_all = ["tree", "blocks"])]
    pub json: bool,

    /// Output the extracted files as a directory tree
    #[arg(long, conflicts_with = "blocks")]
    pub tree: bool,

    /// Output the linear text/code block view
    #[arg(long)]
    pub blocks: bool,
}

impl OutputFlags {
    /// Selected output, or `default` when no flag was given.
    pub fn output(&self, default: Output) -> Output {
        if self.json {
            Output::Json
        } else if self.tree {
            Output::Tree
        } else if self.blocks {
            Output::Blocks
        } else {
            default
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// The response text untouched
    Raw,
    /// Every extracted file with a header line
    Listing,
    Tree,
    Json,
    Blocks,
}

pub async fn run(options: ExtractOptions, global: crate::Global) -> Result<()> {
    let text = read_input(options.file.as_ref()).await?;

    if global.verbose {
        eprintln!("Read {} bytes", text.len());
    }

    if let Some(key) = &options.select {
        print!("{}", selected_content(&text, key)?);
        return Ok(());
    }

    println!("{}", render(&text, options.output.output(Output::Listing))?);

    Ok(())
}

async fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| f!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .wrap_err("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Find a file by exact path, then by index.
pub fn select_file<'a>(files: &'a [ExtractedFile], key: &str) -> Option<&'a ExtractedFile> {
    files
        .iter()
        .find(|file| file.path == key)
        .or_else(|| key.parse::<usize>().ok().and_then(|index| files.get(index)))
}

/// Body of the selected file, verbatim.
pub fn selected_content(text: &str, key: &str) -> Result<String> {
    let files = extract_files(text);
    select_file(&files, key)
        .map(|file| file.content.clone())
        .ok_or_else(|| eyre!("No extracted file matches {}", key))
}

/// Render a model response for the terminal.
///
/// `Listing` and `Tree` need at least one extracted file; without one they
/// fall back to the block view, the same way the browser does.
pub fn render(text: &str, output: Output) -> Result<String> {
    match output {
        Output::Raw => Ok(text.to_string()),
        Output::Json => {
            serde_json::to_string_pretty(&view(text)).wrap_err("Failed to serialize output")
        }
        Output::Blocks => Ok(render_blocks(&extract_blocks(text))),
        Output::Listing | Output::Tree => {
            let files = extract_files(text);
            if files.is_empty() {
                return Ok(render_blocks(&extract_blocks(text)));
            }

            if output == Output::Tree {
                Ok(FileTree::from_files(&files).render())
            } else {
                Ok(render_listing(&files))
            }
        }
    }
}

fn render_listing(files: &[ExtractedFile]) -> String {
    let mut out = f!("{} {}\n", files.len(), "files".bold());

    for file in files {
        out.push('\n');
        out.push_str(&f!(
            "{} {} {}\n",
            f!("[{}]", file.index).dimmed(),
            file.path.bold().cyan(),
            f!("({})", file.language).dimmed()
        ));
        out.push_str(&file.content);
        if !file.content.is_empty() && !file.content.ends_with('\n') {
            out.push('\n');
        }
    }

    out
}

fn render_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();

    for block in blocks {
        match block {
            Block::Text { content } => out.push_str(content),
            Block::Code { path, content } => {
                let label = if path.is_empty() { "code" } else { path.as_str() };
                out.push_str(&f!(
                    "{} {}\n",
                    label.bold().cyan(),
                    f!("({})", block.display_language().unwrap_or_default()).dimmed()
                ));
                out.push_str(content);
            }
        }
    }

    out
}
