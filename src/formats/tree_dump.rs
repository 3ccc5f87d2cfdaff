//! Indented tree dump
//!
//! One line per node in preorder, two spaces of indentation per level:
//!
//! ```text
//! [ROOT]
//!   [LIST] (
//!     [SYMBOL] test
//! ```

use crate::parsing::Tree;
use std::fmt::Write as _;
use std::io;

pub fn dump_tree(tree: &Tree) -> String {
    let mut out = String::new();
    for (id, depth) in tree.walk() {
        let node = &tree[id];
        let payload = node.render();
        // writing into a String cannot fail
        let _ = write!(out, "{}[{}]", "  ".repeat(depth), node.node_type());
        if !payload.is_empty() {
            out.push(' ');
            out.push_str(&payload);
        }
        out.push('\n');
    }
    out
}

/// Stream the dump line by line, for trees too large to hold as one string.
pub fn write_tree(tree: &Tree, mut out: impl io::Write) -> io::Result<()> {
    for (id, depth) in tree.walk() {
        let node = &tree[id];
        for _ in 0..depth {
            out.write_all(b"  ")?;
        }
        write!(out, "[{}]", node.node_type())?;
        let payload = node.render();
        if !payload.is_empty() {
            write!(out, " {payload}")?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}
