use std::ops::Not;

use super::{AigNodeRef, NodeId};

/// A directed edge representing a fanin for AIG nodes.
///
/// The edge can carry an inverter according to the value of `complement`.
/// Polarity always lives on edges, never on nodes: an AND gate with two
/// complemented fanins computes a NOR, and an inverter node is a single-fanin
/// node whose edge is complemented.
///
/// For example:
///
/// ```rust
/// use dals::{Aig, AigEdge};
/// let mut aig = Aig::new();
/// let a = aig.new_input(1).unwrap();
/// let fanin_plain = AigEdge::new(a.clone(), false);
/// let fanin_inverted = AigEdge::new(a.clone(), true);
/// assert_eq!(fanin_plain, !fanin_inverted);
/// ```
#[derive(Clone, Debug, Eq)]
pub struct AigEdge {
    /// The node the edge is refering to.
    /// It is wrapped in Rc<RefCell<_>> to allow multiple nodes refering to it.
    pub(crate) node: AigNodeRef,
    /// Set to true if the signal should be inverted.
    pub(crate) complement: bool,
}

impl Not for AigEdge {
    type Output = Self;

    fn not(mut self) -> Self::Output {
        self.complement = !self.complement;
        self
    }
}

impl PartialEq for AigEdge {
    fn eq(&self, other: &Self) -> bool {
        self.complement == other.complement && self.get_node_id() == other.get_node_id()
    }
}

impl AigEdge {
    pub fn new(node: AigNodeRef, complement: bool) -> Self {
        AigEdge { node, complement }
    }

    pub fn get_node(&self) -> AigNodeRef {
        self.node.clone()
    }

    pub fn get_node_id(&self) -> NodeId {
        self.node.borrow().get_id()
    }

    pub fn get_complement(&self) -> bool {
        self.complement
    }
}
