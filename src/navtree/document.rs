//! Navigation Tree - arena-based table of contents
//!
//! Efficient storage for the `NAVTREE` table with:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - String interning for labels and targets
//!
//! A parse of `navtreedata.js` also captures the companion `NAVTREEINDEX`
//! pagination table, the leading license banner, and any trailing scalar
//! `var NAME = '...';` declarations, so the whole file round-trips.

use super::node::{ChildRef, NavNode, NodeId};
use super::pageindex::PageIndex;
use crate::core::strings::StringPool;
use crate::error::{Error, Result};
use crate::reader::events::TableEvent;
use crate::reader::slice::SliceReader;

/// A parsed navigation tree document
pub struct NavTree {
    /// Arena of nodes; index 0 is the synthetic root
    nodes: Vec<NavNode>,
    /// Interned labels, targets, and external shard names
    strings: StringPool,
    /// Companion NAVTREEINDEX pagination table
    page_index: PageIndex,
    /// Leading license banner comment, without delimiters
    header: Option<String>,
    /// Trailing scalar script variables in declaration order
    script_vars: Vec<(String, String)>,
}

/// Builder frame: what the next event means at this nesting level
#[derive(Clone, Copy)]
enum Frame {
    /// Inside a node sequence (the root array or a children array);
    /// nodes created here hang off `parent`
    Seq { parent: NodeId },
    /// Inside a node triple; counts the positional fields consumed
    Node { id: NodeId, fields: u8 },
}

impl NavTree {
    /// Parse a navtree table (lenient mode)
    ///
    /// Lenient mode never fails on generator output; entries it cannot
    /// understand are skipped.
    pub fn parse(input: &[u8]) -> Self {
        // Lenient build cannot produce Err
        Self::build(SliceReader::new(input), false).unwrap_or_else(|_| Self::empty())
    }

    /// Parse a navtree table in strict mode
    ///
    /// Returns Err if the table is not a well-formed sequence of
    /// `[label, target, children]` triples.
    pub fn parse_strict(input: &[u8]) -> Result<Self> {
        Self::build(SliceReader::new_strict(input), true)
    }

    fn empty() -> Self {
        NavTree {
            nodes: vec![NavNode::new(0, 0, None, 0)],
            strings: StringPool::new(),
            page_index: PageIndex::default(),
            header: None,
            script_vars: Vec::new(),
        }
    }

    fn build(mut reader: SliceReader<'_>, strict: bool) -> Result<Self> {
        let mut doc = Self::empty();
        let mut seen_navtree = false;

        loop {
            match reader.next_event() {
                Some(TableEvent::Comment(text)) => {
                    // First banner comment is the license header
                    if doc.header.is_none() && !seen_navtree {
                        doc.header = Some(text.into_owned());
                    }
                }
                Some(TableEvent::VarStart(name)) => match name.as_ref() {
                    "NAVTREE" => {
                        doc.build_tree(&mut reader, strict)?;
                        seen_navtree = true;
                    }
                    "NAVTREEINDEX" => {
                        doc.page_index = PageIndex::from_events(&mut reader, strict)?;
                    }
                    other => {
                        let var = other.to_string();
                        doc.read_scalar_var(&mut reader, var, strict)?;
                    }
                },
                Some(TableEvent::EndOfFile) | None => break,
                Some(other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "Unexpected {:?} at top level",
                            other
                        )));
                    }
                }
            }

            if let Some(err) = reader.error() {
                return Err(err.clone().into());
            }
        }

        if let Some(err) = reader.error() {
            return Err(err.clone().into());
        }
        if strict && !seen_navtree {
            return Err(Error::Malformed("Missing NAVTREE declaration".into()));
        }

        Ok(doc)
    }

    /// Consume the NAVTREE array: an arbitrarily nested sequence of
    /// `[label, target, null | [children] | "shard"]` triples
    fn build_tree(&mut self, reader: &mut SliceReader<'_>, strict: bool) -> Result<()> {
        match reader.next_event() {
            Some(TableEvent::ArrayStart) => {}
            _ => {
                if strict {
                    return Err(Error::Malformed("NAVTREE value must be an array".into()));
                }
                return Ok(());
            }
        }

        let mut stack: Vec<Frame> = vec![Frame::Seq { parent: 0 }];

        while !stack.is_empty() {
            let event = match reader.next_event() {
                Some(ev) => ev,
                None => break,
            };
            let top = stack.len() - 1;

            match (stack[top], event) {
                (Frame::Seq { parent }, TableEvent::ArrayStart) => {
                    let depth = self.nodes[parent as usize].depth + u16::from(parent != 0);
                    let id = self.nodes.len() as NodeId;
                    self.nodes.push(NavNode::new(0, 0, Some(parent), depth));
                    self.link_child(parent, id);
                    stack.push(Frame::Node { id, fields: 0 });
                }
                (Frame::Seq { .. }, TableEvent::ArrayEnd) => {
                    stack.pop();
                }
                (Frame::Seq { .. }, other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "Expected a navigation node, found {:?}",
                            other
                        )));
                    }
                    // Lenient mode: stray scalars between nodes are dropped
                }

                (Frame::Node { id, fields }, TableEvent::Str(s)) => {
                    match fields {
                        0 => self.nodes[id as usize].label_id = self.strings.intern(&s),
                        1 => self.nodes[id as usize].target_id = self.strings.intern(&s),
                        2 => {
                            let shard_id = self.strings.intern(&s);
                            self.nodes[id as usize].children = ChildRef::External(shard_id);
                        }
                        _ => {
                            if strict {
                                return Err(Error::Malformed(
                                    "Navigation node has more than three fields".into(),
                                ));
                            }
                        }
                    }
                    stack[top] = Frame::Node { id, fields: fields.saturating_add(1) };
                }
                (Frame::Node { id, fields }, TableEvent::Null) => {
                    if strict && !matches!(fields, 1 | 2) {
                        return Err(Error::Malformed(
                            "null only allowed in a node's target or children slot".into(),
                        ));
                    }
                    // ChildRef::None is already the default; a null target keeps id 0
                    stack[top] = Frame::Node { id, fields: fields.saturating_add(1) };
                }
                (Frame::Node { id, fields }, TableEvent::ArrayStart) => {
                    if strict && fields != 2 {
                        return Err(Error::Malformed(
                            "Nested array only allowed in a node's children slot".into(),
                        ));
                    }
                    self.nodes[id as usize].children = ChildRef::Inline;
                    stack[top] = Frame::Node { id, fields: fields.saturating_add(1) };
                    stack.push(Frame::Seq { parent: id });
                }
                (Frame::Node { id, fields }, TableEvent::ArrayEnd) => {
                    if strict && fields != 3 {
                        return Err(Error::Malformed(format!(
                            "Navigation node must be a [label, target, children] triple, found {} fields",
                            fields
                        )));
                    }
                    // Inline marker without surviving children degrades to a leaf
                    if self.nodes[id as usize].children == ChildRef::Inline
                        && !self.nodes[id as usize].has_children()
                    {
                        self.nodes[id as usize].children = ChildRef::None;
                    }
                    stack.pop();
                }
                (Frame::Node { .. }, other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "Unexpected {:?} inside a navigation node",
                            other
                        )));
                    }
                }
            }
        }

        // Swallow the declaration's trailing semicolon
        reader.skip_var_end();
        Ok(())
    }

    /// Read the value of a scalar `var NAME = '...';` declaration
    fn read_scalar_var(
        &mut self,
        reader: &mut SliceReader<'_>,
        name: String,
        strict: bool,
    ) -> Result<()> {
        match reader.next_event() {
            Some(TableEvent::Str(value)) => {
                self.script_vars.push((name, value.into_owned()));
                reader.skip_var_end();
                Ok(())
            }
            Some(TableEvent::ArrayStart) => {
                if strict {
                    return Err(Error::Malformed(format!(
                        "Unexpected array variable '{}'",
                        name
                    )));
                }
                log::warn!("skipping unknown array variable '{}'", name);
                // Skip the balanced array and the trailing semicolon
                let mut depth = 1u32;
                while depth > 0 {
                    match reader.next_event() {
                        Some(TableEvent::ArrayStart) => depth += 1,
                        Some(TableEvent::ArrayEnd) => depth -= 1,
                        Some(TableEvent::EndOfFile) | None => break,
                        _ => {}
                    }
                }
                reader.skip_var_end();
                Ok(())
            }
            _ => {
                if strict {
                    Err(Error::Malformed(format!(
                        "Variable '{}' has no value",
                        name
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Iterate over the root node sequence
    pub fn roots(&self) -> ChildIter<'_> {
        self.children(0)
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node's display label
    pub fn label(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        self.strings.get(node.label_id)
    }

    /// Get a node's target reference, or None for a null target
    pub fn target(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        if node.target_id == 0 {
            None
        } else {
            self.strings.get(node.target_id)
        }
    }

    /// Get a node's child reference kind
    pub fn child_ref(&self, id: NodeId) -> Option<ChildRef> {
        self.get_node(id).map(|n| n.children)
    }

    /// Get the external child-shard name for an External node
    pub fn external_ref(&self, id: NodeId) -> Option<&str> {
        match self.get_node(id)?.children {
            ChildRef::External(shard_id) => self.strings.get(shard_id),
            _ => None,
        }
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over all descendants of a node, document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// Find the first node whose target equals `target`, document order
    pub fn find_by_target(&self, target: &str) -> Option<NodeId> {
        self.descendants(0)
            .find(|&id| self.target(id) == Some(target))
    }

    /// Total number of nodes, synthetic root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The companion NAVTREEINDEX pagination table
    pub fn page_index(&self) -> &PageIndex {
        &self.page_index
    }

    /// Leading license banner, if the file carried one
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Trailing scalar script variables, in declaration order
    pub fn script_vars(&self) -> &[(String, String)] {
        &self.script_vars
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d NavTree,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first, document order)
pub struct DescendantIter<'d> {
    doc: &'d NavTree,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &[u8] = br#"/*
@licstart banner
@licend banner
*/
var NAVTREE =
[
  [ "XCSF", "index.html", [
    [ "Overview", "index.html#autotoc_md2", null ],
    [ "Features", "index.html#autotoc_md3", [
      [ "Conditions", "index.html#autotoc_md5", null ]
    ] ],
    [ "File List", "files.html", "files_dup" ]
  ] ]
];

var NAVTREEINDEX =
[
"act__integer_8c.html",
"globals_w.html",
"structClist.html"
];

var SYNCONMSG = 'click to disable panel synchronisation';
var SYNCOFFMSG = 'click to enable panel synchronisation';
"#;

    #[test]
    fn test_parse_roots() {
        let doc = NavTree::parse(SAMPLE);
        let roots: Vec<_> = doc.roots().collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(doc.label(roots[0]), Some("XCSF"));
        assert_eq!(doc.target(roots[0]), Some("index.html"));
    }

    #[test]
    fn test_nested_children_in_order() {
        let doc = NavTree::parse(SAMPLE);
        let root = doc.roots().next().unwrap();
        let labels: Vec<_> = doc
            .children(root)
            .map(|id| doc.label(id).unwrap())
            .collect();
        assert_eq!(labels, vec!["Overview", "Features", "File List"]);
    }

    #[test]
    fn test_all_nodes_well_formed() {
        let doc = NavTree::parse(SAMPLE);
        for id in doc.descendants(0) {
            let node = doc.get_node(id).unwrap();
            assert!(doc.label(id).is_some());
            match node.children {
                ChildRef::Inline => assert!(node.has_children()),
                ChildRef::None => assert!(!node.has_children()),
                ChildRef::External(_) => assert!(doc.external_ref(id).is_some()),
            }
        }
    }

    #[test]
    fn test_external_child_shard() {
        let doc = NavTree::parse(SAMPLE);
        let id = doc.find_by_target("files.html").unwrap();
        assert_eq!(doc.label(id), Some("File List"));
        assert_eq!(doc.external_ref(id), Some("files_dup"));
    }

    #[test]
    fn test_find_by_target() {
        let doc = NavTree::parse(SAMPLE);
        let id = doc.find_by_target("index.html#autotoc_md5").unwrap();
        assert_eq!(doc.label(id), Some("Conditions"));
        assert_eq!(doc.find_by_target("missing.html"), None);
    }

    #[test]
    fn test_depths() {
        let doc = NavTree::parse(SAMPLE);
        let root = doc.roots().next().unwrap();
        assert_eq!(doc.get_node(root).unwrap().depth, 0);
        let overview = doc.find_by_target("index.html#autotoc_md2").unwrap();
        assert_eq!(doc.get_node(overview).unwrap().depth, 1);
        let conditions = doc.find_by_target("index.html#autotoc_md5").unwrap();
        assert_eq!(doc.get_node(conditions).unwrap().depth, 2);
    }

    #[test]
    fn test_page_index_captured() {
        let doc = NavTree::parse(SAMPLE);
        assert_eq!(doc.page_index().len(), 3);
        assert_eq!(doc.page_index().get(0), Some("act__integer_8c.html"));
    }

    #[test]
    fn test_header_and_script_vars() {
        let doc = NavTree::parse(SAMPLE);
        assert!(doc.header().unwrap().contains("@licstart"));
        assert_eq!(
            doc.script_vars(),
            &[
                (
                    "SYNCONMSG".to_string(),
                    "click to disable panel synchronisation".to_string()
                ),
                (
                    "SYNCOFFMSG".to_string(),
                    "click to enable panel synchronisation".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_strict_accepts_sample() {
        assert!(NavTree::parse_strict(SAMPLE).is_ok());
    }

    #[test]
    fn test_strict_rejects_two_field_node() {
        let input = b"var NAVTREE =\n[\n  [ \"A\", \"a.html\" ]\n];";
        assert!(NavTree::parse_strict(input).is_err());
        // Lenient parse keeps the node as a leaf
        let doc = NavTree::parse(input);
        let root = doc.roots().next().unwrap();
        assert_eq!(doc.child_ref(root), Some(ChildRef::None));
    }

    #[test]
    fn test_strict_rejects_missing_navtree() {
        assert!(NavTree::parse_strict(b"var OTHER = 'x';").is_err());
    }

    #[test]
    fn test_null_target() {
        let input = b"var NAVTREE =\n[\n  [ \"A\", null, null ]\n];";
        let doc = NavTree::parse(input);
        let root = doc.roots().next().unwrap();
        assert_eq!(doc.label(root), Some("A"));
        assert_eq!(doc.target(root), None);
    }

    #[test]
    fn test_missing_semicolons_between_declarations() {
        let input = b"var NAVTREE =\n[\n  [ \"A\", \"a.html\", null ]\n]\nvar NAVTREEINDEX =\n[\n\"a.html\"\n]\nvar SYNCONMSG = 'on'\nvar SYNCOFFMSG = 'off';";
        let doc = NavTree::parse(input);
        assert_eq!(doc.roots().count(), 1);
        assert_eq!(doc.page_index().len(), 1);
        // A declaration without ';' must not eat the following var
        assert_eq!(
            doc.script_vars(),
            &[
                ("SYNCONMSG".to_string(), "on".to_string()),
                ("SYNCOFFMSG".to_string(), "off".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let doc = NavTree::parse(b"");
        assert_eq!(doc.roots().count(), 0);
        assert_eq!(doc.node_count(), 1);
    }
}
