//! Navigation tree document model
//!
//! Parses `navtreedata.js` into an arena-backed tree with the
//! companion NAVTREEINDEX pagination table.

pub mod document;
pub mod node;
pub mod pageindex;

pub use document::{ChildIter, DescendantIter, NavTree};
pub use node::{ChildRef, NavNode, NodeId};
pub use pageindex::PageIndex;
