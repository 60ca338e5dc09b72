//! Navigation tree node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// How a node refers to its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRef {
    /// Leaf: `null` in the literal
    None,
    /// Children given inline as a nested array
    Inline,
    /// Children live in a separately loaded child-shard script;
    /// the value is a string-pool id for the shard name (e.g. "files_dup")
    External(u32),
}

/// A navigation tree node in the arena
#[derive(Debug, Clone)]
pub struct NavNode {
    /// Parent node; root-sequence entries hang off the arena's
    /// synthetic root at index 0
    pub parent: Option<NodeId>,
    /// First child node (Inline children only)
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Index into string pool for the display label
    pub label_id: u32,
    /// Index into string pool for the page/anchor target, or 0 for none
    pub target_id: u32,
    /// Child reference kind
    pub children: ChildRef,
    /// Depth in the tree (root-sequence entries are depth 0)
    pub depth: u16,
}

impl NavNode {
    /// Create a new node with no children linked yet
    pub fn new(label_id: u32, target_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        NavNode {
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            label_id,
            target_id,
            children: ChildRef::None,
            depth,
        }
    }

    /// Check if this node has inline children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node defers its children to an external shard
    #[inline]
    pub fn is_external(&self) -> bool {
        matches!(self.children, ChildRef::External(_))
    }
}
