//! The syntax tree produced by the tree builder.
//!
//! Ownership is strictly hierarchical: every node is owned by exactly one
//! parent and there are no back-references. The tree is built in one pass
//! and handed out as an immutable value.
//!
//! Nesting depth is bounded only by the input, so dropping, comparing,
//! counting and printing walk the tree with an explicit work list instead
//! of recursing once per level. `Debug` and `Serialize` are derived and do
//! recurse.

use core::{fmt, mem};

use serde::Serialize;
use sprig_common::Span;

/// The root of a parsed template. Exactly one per parse.
#[derive(Debug, PartialEq, Eq, Default, Serialize)]
pub struct Root {
    /// Top-level nodes, in source order.
    pub children: Vec<Node>,
}

/// A non-root node.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// An element with children.
    Element(Element),
    /// A text leaf.
    Text(Text),
}

/// One opening/closing tag pair and everything between them.
#[derive(Debug, Serialize)]
pub struct Element {
    /// Tag name, as written on the opening tag.
    pub tag: String,
    /// Child nodes, in source order.
    pub children: Vec<Node>,
    /// From the opening tag's `<` to the closing tag's `>`.
    pub span: Span,
}

/// A run of character data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Text {
    /// The characters of the run.
    pub content: String,
    /// Exactly the run.
    pub span: Span,
}

impl Root {
    /// Total number of element nodes in the tree.
    #[must_use]
    pub fn element_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Node> = self.children.iter().collect();
        while let Some(node) = pending.pop() {
            if let Node::Element(element) = node {
                count += 1;
                pending.extend(&element.children);
            }
        }
        count
    }

    /// Deepest element nesting. A root with no elements has depth 0; text
    /// leaves do not add depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.children.iter().map(|node| (node, 1)).collect();
        while let Some((node, level)) = pending.pop() {
            if let Node::Element(element) = node {
                deepest = deepest.max(level);
                pending.extend(element.children.iter().map(|child| (child, level + 1)));
            }
        }
        deepest
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.tag != b.tag || a.span != b.span || a.children.len() != b.children.len() {
                return false;
            }
            for pair in a.children.iter().zip(&b.children) {
                match pair {
                    (Node::Element(a), Node::Element(b)) => pending.push((a, b)),
                    (Node::Text(a), Node::Text(b)) if a == b => {}
                    _ => return false,
                }
            }
        }
        true
    }
}

impl Eq for Element {}

impl Drop for Element {
    fn drop(&mut self) {
        // Detach descendants before they drop so each element is empty by
        // the time its own drop runs.
        let mut pending = mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut element) = node {
                pending.append(&mut element.children);
            }
        }
    }
}

impl Node {
    /// The element, if this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// The text leaf, if this node is one.
    #[must_use]
    pub const fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    /// Child nodes. Always empty for text.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element(element) => &element.children,
            Self::Text(_) => &[],
        }
    }

    /// Source span of the node.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Element(element) => element.span,
            Self::Text(text) => text.span,
        }
    }
}

/// Deepest level that still gets its own indentation in the outline.
const MAX_OUTLINE_INDENT: usize = 32;

/// Indented outline of the tree, one node per line:
///
/// ```text
/// Root
///   <div>
///     "hi"
///     <span>
///       "x"
/// ```
///
/// Spaces in text are shown as `·` and newlines as `\n`. Below level 32
/// the indentation stops growing and each line is prefixed with its level
/// instead, e.g. `(40) <a>`.
impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Root")?;
        let mut pending: Vec<(&Node, usize)> =
            self.children.iter().rev().map(|node| (node, 1)).collect();
        while let Some((node, level)) = pending.pop() {
            write_node_line(f, node, level)?;
            if let Node::Element(element) = node {
                pending.extend(element.children.iter().rev().map(|child| (child, level + 1)));
            }
        }
        Ok(())
    }
}

fn write_node_line(f: &mut fmt::Formatter<'_>, node: &Node, level: usize) -> fmt::Result {
    let indent = level.min(MAX_OUTLINE_INDENT) * 2;
    write!(f, "{:indent$}", "")?;
    if level > MAX_OUTLINE_INDENT {
        write!(f, "({level}) ")?;
    }
    match node {
        Node::Element(element) => writeln!(f, "<{}>", element.tag),
        Node::Text(text) => {
            let display = text.content.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(f, "\"{display}\"")
        }
    }
}

/// Print the tree outline to stdout.
pub fn print_tree(root: &Root) {
    print!("{root}");
}
