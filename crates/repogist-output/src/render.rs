//! Box-drawing text rendering of a scan tree.

use repogist_core::{NodeKind, ScanNode};

/// Render a node tree as line-drawing text.
///
/// Pure function over an already-ordered tree: the same tree always
/// produces byte-identical output. Directories get a trailing `/`; a node
/// with an empty name (a synthetic root) contributes no line of its own and
/// its children render at the inherited prefix.
pub fn render_tree(node: &ScanNode) -> String {
    let mut out = String::new();
    render_node(node, "", true, &mut out);
    out
}

fn render_node(node: &ScanNode, prefix: &str, is_last: bool, out: &mut String) {
    let named = !node.name.is_empty();
    if named {
        let branch = if is_last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&node.name);
        if node.is_dir() {
            out.push('/');
        }
        out.push('\n');
    }

    if let NodeKind::Directory { children, .. } = &node.kind {
        let child_prefix = if named {
            let continuation = if is_last { "    " } else { "│   " };
            format!("{prefix}{continuation}")
        } else {
            prefix.to_string()
        };
        let last_index = children.len().saturating_sub(1);
        for (i, child) in children.iter().enumerate() {
            render_node(child, &child_prefix, i == last_index, out);
        }
    }
}
