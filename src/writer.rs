//! Table re-emission
//!
//! Serializes parsed documents back into the generator's exact byte
//! layout: two-space indentation and double quotes for the navigation
//! tree, single-line single-quoted entries for search shards. Output
//! of a parse-then-write pass over generator output is byte-identical
//! to the input.

use crate::core::escape::{encode_double_quoted, encode_single_quoted};
use crate::navtree::{ChildRef, NavTree, NodeId};
use crate::search::SearchShard;

/// Render a navigation tree document as `navtreedata.js` text
pub fn write_navtree(tree: &NavTree) -> String {
    let mut out = String::new();

    if let Some(header) = tree.header() {
        out.push_str("/*");
        out.push_str(header);
        out.push_str("*/\n");
    }

    out.push_str("var NAVTREE =\n[\n");
    let roots: Vec<_> = tree.roots().collect();
    for (i, &id) in roots.iter().enumerate() {
        write_node(tree, id, 1, i + 1 == roots.len(), &mut out);
    }
    out.push_str("];\n");

    if !tree.page_index().is_empty() {
        out.push_str("\nvar NAVTREEINDEX =\n[\n");
        let count = tree.page_index().len();
        for (i, boundary) in tree.page_index().iter().enumerate() {
            out.push('"');
            out.push_str(&encode_double_quoted(boundary));
            out.push('"');
            if i + 1 < count {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str("];\n");
    }

    if !tree.script_vars().is_empty() {
        out.push('\n');
        let count = tree.script_vars().len();
        for (i, (name, value)) in tree.script_vars().iter().enumerate() {
            out.push_str("var ");
            out.push_str(name);
            out.push_str(" = '");
            out.push_str(&encode_single_quoted(value));
            out.push_str("';");
            // The generator leaves no newline after the last declaration
            if i + 1 < count {
                out.push('\n');
            }
        }
    }

    out
}

/// Render one `[ "label", target, children ]` node and its subtree
fn write_node(tree: &NavTree, id: NodeId, depth: usize, last: bool, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push_str("[ \"");
    out.push_str(&encode_double_quoted(tree.label(id).unwrap_or("")));
    out.push_str("\", ");
    match tree.target(id) {
        Some(target) => {
            out.push('"');
            out.push_str(&encode_double_quoted(target));
            out.push('"');
        }
        None => out.push_str("null"),
    }
    out.push_str(", ");

    match tree.child_ref(id).unwrap_or(ChildRef::None) {
        ChildRef::None => out.push_str("null ]"),
        ChildRef::External(_) => {
            out.push('"');
            out.push_str(&encode_double_quoted(tree.external_ref(id).unwrap_or("")));
            out.push_str("\" ]");
        }
        ChildRef::Inline => {
            out.push_str("[\n");
            let children: Vec<_> = tree.children(id).collect();
            for (i, &child) in children.iter().enumerate() {
                write_node(tree, child, depth + 1, i + 1 == children.len(), out);
            }
            out.push_str(&indent);
            out.push_str("] ]");
        }
    }

    if !last {
        out.push(',');
    }
    out.push('\n');
}

/// Render a search shard as `search/*.js` text
pub fn write_search_shard(shard: &SearchShard) -> String {
    let mut out = String::from("var searchData=\n[\n");
    let count = shard.len();
    for (i, entry) in shard.entries().iter().enumerate() {
        out.push_str("  ['");
        out.push_str(&encode_single_quoted(&entry.token));
        out.push_str("',['");
        out.push_str(&encode_single_quoted(&entry.label));
        out.push('\'');
        for occ in &entry.occurrences {
            out.push_str(",['");
            out.push_str(&encode_single_quoted(&occ.target));
            out.push_str("',");
            out.push(if occ.same_frame { '1' } else { '0' });
            out.push_str(",'");
            out.push_str(&encode_single_quoted(&occ.context));
            out.push_str("']");
        }
        out.push_str("]]");
        if i + 1 < count {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("];\n");
    out
}
