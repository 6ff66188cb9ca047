//! Directory tree of extracted files

use crate::files::ExtractedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir { name: String, children: Vec<Node> },
    File { name: String, index: usize },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Dir { name, .. } | Node::File { name, .. } => name,
        }
    }
}

/// Files grouped by directory, in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTree {
    pub roots: Vec<Node>,
}

impl FileTree {
    pub fn from_files(files: &[ExtractedFile]) -> Self {
        let mut tree = FileTree::default();
        for file in files {
            tree.insert(&file.path, file.index);
        }
        tree
    }

    /// Add a file at `path`. Leading `./` and empty segments are ignored;
    /// duplicate paths produce duplicate leaves.
    pub fn insert(&mut self, path: &str, index: usize) {
        let path = path.strip_prefix("./").unwrap_or(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let Some((file_name, dirs)) = segments.split_last() else {
            self.roots.push(Node::File {
                name: path.to_string(),
                index,
            });
            return;
        };

        let mut level = &mut self.roots;
        for dir in dirs {
            let position = level
                .iter()
                .position(|node| matches!(node, Node::Dir { name, .. } if name == dir));

            let position = match position {
                Some(position) => position,
                None => {
                    level.push(Node::Dir {
                        name: dir.to_string(),
                        children: Vec::new(),
                    });
                    level.len() - 1
                }
            };

            level = match &mut level[position] {
                Node::Dir { children, .. } => children,
                Node::File { .. } => unreachable!("position always points at a directory"),
            };
        }

        level.push(Node::File {
            name: file_name.to_string(),
            index,
        });
    }

    /// Render with box-drawing connectors, one entry per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_level(&self.roots, "", &mut out);
        out
    }
}

fn render_level(nodes: &[Node], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = if last { "└── " } else { "├── " };

        match node {
            Node::File { name, .. } => {
                out.push_str(&format!("{prefix}{connector}{name}\n"));
            }
            Node::Dir { name, children } => {
                out.push_str(&format!("{prefix}{connector}{name}/\n"));
                let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
                render_level(children, &child_prefix, out);
            }
        }
    }
}
