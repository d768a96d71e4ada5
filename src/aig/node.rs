//! Define [`AigNode`] and its commonly used alias [`AigNodeRef`].
//!
//! In an AIG, nodes are wrapped by [`Rc<RefCell<AigNode>>`], so in practice
//! you often deal with [`AigNodeRef`] (alias for the previous type) instead.
//!
//! For internal use, you can also use `AigNodeWeak` sometimes.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use super::{AigEdge, AigError, Result};

/// A node id.
///
/// Id 0 is never allocated: the delay reducer reserves slot 0 of its flow
/// graph for the super-source, so node ids start at 1.
pub type NodeId = u64;

/// An AIG node.
///
/// Fanin lists are ordered and the order is semantically significant: the
/// polarity of a signal is attached to the edge sitting in a given slot, and
/// structural undo restores slots positionally.
///
/// Internal note: driver nodes carry their fanouts with them. Make sure to
/// update this correctly on every structural mutation.
#[derive(Debug, Clone)]
pub enum AigNode {
    /// A primary input.
    Input {
        id: NodeId,
        fanouts: HashMap<NodeId, AigNodeWeak>,
    },
    /// A two-input AND gate.
    And {
        id: NodeId,
        fanins: Vec<AigEdge>,
        fanouts: HashMap<NodeId, AigNodeWeak>,
    },
    /// A single-input gate. The inversion, if any, rides on the fanin edge,
    /// matching the polarity-on-edges convention: `Aig::create_inverter`
    /// builds one with a complemented edge, a buffer has a plain edge.
    Inv {
        id: NodeId,
        fanins: Vec<AigEdge>,
        fanouts: HashMap<NodeId, AigNodeWeak>,
    },
    /// A primary output marker, fed by exactly one driver. Never a driver
    /// itself.
    Output { id: NodeId, fanins: Vec<AigEdge> },
}

/// A wrapper for AIG nodes to allow multiple references to it.
pub type AigNodeRef = Rc<RefCell<AigNode>>;

/// A non-counting reference to an AIG node - used internally.
pub(crate) type AigNodeWeak = Weak<RefCell<AigNode>>;

impl PartialEq for AigNode {
    /// Two nodes are equal iff they have the same id, the same kind and the
    /// same fanin edges in the same slots. Fanouts are not taken into account.
    /// Contrary to a strashed AIG, fanin order does not commute here: slot
    /// order carries meaning.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AigNode::Input { id: id1, .. }, AigNode::Input { id: id2, .. }) => id1 == id2,
            (
                AigNode::And {
                    id: id1,
                    fanins: f1,
                    ..
                },
                AigNode::And {
                    id: id2,
                    fanins: f2,
                    ..
                },
            )
            | (
                AigNode::Inv {
                    id: id1,
                    fanins: f1,
                    ..
                },
                AigNode::Inv {
                    id: id2,
                    fanins: f2,
                    ..
                },
            )
            | (
                AigNode::Output {
                    id: id1,
                    fanins: f1,
                },
                AigNode::Output {
                    id: id2,
                    fanins: f2,
                },
            ) => id1 == id2 && f1 == f2,
            (_, _) => false,
        }
    }
}

impl Eq for AigNode {}

impl AigNode {
    /// Returns a new primary input (initialize empty fanouts).
    pub fn input(id: NodeId) -> Self {
        if id == 0 {
            panic!(
                "Hey, you are trying to create an input with id=0. \
                Id=0 is reserved for the flow-graph super-source."
            )
        }
        AigNode::Input {
            id,
            fanouts: HashMap::new(),
        }
    }

    /// Returns a new and gate (initialize empty fanouts).
    pub fn and(id: NodeId, fanin0: AigEdge, fanin1: AigEdge) -> Self {
        if id == 0 {
            panic!(
                "Hey, you are trying to create an AND gate with id=0. \
                Id=0 is reserved for the flow-graph super-source."
            )
        }
        AigNode::And {
            id,
            fanins: vec![fanin0, fanin1],
            fanouts: HashMap::new(),
        }
    }

    /// Returns a new single-input gate (initialize empty fanouts).
    pub fn inv(id: NodeId, fanin: AigEdge) -> Self {
        if id == 0 {
            panic!(
                "Hey, you are trying to create an inverter with id=0. \
                Id=0 is reserved for the flow-graph super-source."
            )
        }
        AigNode::Inv {
            id,
            fanins: vec![fanin],
            fanouts: HashMap::new(),
        }
    }

    /// Returns a new primary output marker.
    pub fn output(id: NodeId, fanin: AigEdge) -> Self {
        if id == 0 {
            panic!(
                "Hey, you are trying to create an output with id=0. \
                Id=0 is reserved for the flow-graph super-source."
            )
        }
        AigNode::Output {
            id,
            fanins: vec![fanin],
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, AigNode::Input { .. })
    }

    pub fn is_and(&self) -> bool {
        matches!(self, AigNode::And { .. })
    }

    pub fn is_inv(&self) -> bool {
        matches!(self, AigNode::Inv { .. })
    }

    pub fn is_output(&self) -> bool {
        matches!(self, AigNode::Output { .. })
    }

    /// An internal node: an AND gate or a single-input gate.
    pub fn is_gate(&self) -> bool {
        self.is_and() || self.is_inv()
    }

    /// A gate that directly drives at least one primary output.
    pub fn is_po_driver(&self) -> bool {
        self.is_gate()
            && self
                .get_fanouts()
                .values()
                .filter_map(|weak| weak.upgrade())
                .any(|fanout| fanout.borrow().is_output())
    }

    pub fn get_id(&self) -> NodeId {
        match *self {
            AigNode::Input { id, .. } => id,
            AigNode::And { id, .. } => id,
            AigNode::Inv { id, .. } => id,
            AigNode::Output { id, .. } => id,
        }
    }

    pub fn get_fanins(&self) -> Vec<AigEdge> {
        match self {
            AigNode::Input { .. } => Vec::new(),
            AigNode::And { fanins, .. }
            | AigNode::Inv { fanins, .. }
            | AigNode::Output { fanins, .. } => fanins.clone(),
        }
    }

    /// Returns the fanouts as a hashmap. Outputs drive nothing and always
    /// report an empty map.
    pub fn get_fanouts(&self) -> HashMap<NodeId, AigNodeWeak> {
        match self {
            AigNode::Input { fanouts, .. }
            | AigNode::And { fanouts, .. }
            | AigNode::Inv { fanouts, .. } => fanouts.clone(),
            AigNode::Output { .. } => HashMap::new(),
        }
    }

    /// Okay, what is going on here is a bit subtle.
    /// The core problem is that in practice, the `fanout` is mutably owned by
    /// the caller. The first approach of taking an `AigNodeRef` as an argument
    /// and computing the `NodeId` by borrowing doesn't work: we are not
    /// allowed to borrow! So we need to supply the id of the fanout to store
    /// and be able to identify the fanout, without borrowing the `AigNodeRef`.
    pub(super) fn add_fanout(&mut self, fanout_id: NodeId, fanout: AigNodeWeak) {
        match self {
            AigNode::Input { fanouts, .. }
            | AigNode::And { fanouts, .. }
            | AigNode::Inv { fanouts, .. } => {
                fanouts.insert(fanout_id, fanout);
            }
            AigNode::Output { .. } => (),
        }
    }

    /// What is going on with fanouts is a bit subtle, check
    /// [`AigNode::add_fanout`] for more information.
    pub(super) fn remove_fanout(&mut self, fanout_id: NodeId) -> Result<()> {
        match self {
            AigNode::Input { fanouts, .. }
            | AigNode::And { fanouts, .. }
            | AigNode::Inv { fanouts, .. } => {
                fanouts.retain(|_, weak| weak.upgrade().is_some());
                let old_size = fanouts.len();
                fanouts.retain(|&id, _| id != fanout_id);
                let new_size = fanouts.len();
                if new_size < old_size {
                    Ok(())
                } else {
                    Err(AigError::InvalidState(format!(
                        "failed to remove fanout {} (not found) from node {}",
                        fanout_id,
                        self.get_id()
                    )))
                }
            }
            AigNode::Output { .. } => Ok(()),
        }
    }

    pub(super) fn clear_fanouts(&mut self) {
        match self {
            AigNode::Input { fanouts, .. }
            | AigNode::And { fanouts, .. }
            | AigNode::Inv { fanouts, .. } => fanouts.clear(),
            AigNode::Output { .. } => (),
        }
    }

    /// Rewrites every fanin slot pointing at `old_id` to point at `new` while
    /// keeping the slot's polarity and position. Returns the number of slots
    /// rewritten.
    pub(super) fn redirect_fanins(&mut self, old_id: NodeId, new: &AigNodeRef) -> usize {
        let mut rewritten = 0;
        match self {
            AigNode::Input { .. } => (),
            AigNode::And { fanins, .. }
            | AigNode::Inv { fanins, .. }
            | AigNode::Output { fanins, .. } => {
                for fanin in fanins.iter_mut() {
                    if fanin.get_node_id() == old_id {
                        *fanin = AigEdge::new(new.clone(), fanin.get_complement());
                        rewritten += 1;
                    }
                }
            }
        }
        rewritten
    }

    pub(super) fn clear_fanins(&mut self) -> Result<()> {
        match self {
            AigNode::And { fanins, .. }
            | AigNode::Inv { fanins, .. }
            | AigNode::Output { fanins, .. } => {
                fanins.clear();
                Ok(())
            }
            AigNode::Input { .. } => Err(AigError::NoFanin),
        }
    }

    pub(super) fn push_fanin(&mut self, fanin: AigEdge) -> Result<()> {
        match self {
            AigNode::And { fanins, .. }
            | AigNode::Inv { fanins, .. }
            | AigNode::Output { fanins, .. } => {
                fanins.push(fanin);
                Ok(())
            }
            AigNode::Input { .. } => Err(AigError::NoFanin),
        }
    }

    /// Fanin arity the node must have to be structurally sound.
    pub(super) fn expected_arity(&self) -> usize {
        match self {
            AigNode::Input { .. } => 0,
            AigNode::And { .. } => 2,
            AigNode::Inv { .. } | AigNode::Output { .. } => 1,
        }
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use crate::{AigEdge, AigNode, AigNodeRef};

    fn wrap(node: AigNode) -> AigNodeRef {
        Rc::new(RefCell::new(node))
    }

    fn edge(node: AigNodeRef) -> AigEdge {
        AigEdge::new(node, false)
    }

    #[test]
    #[should_panic]
    fn create_node_test_invalid_input_id0() {
        let _ = AigNode::input(0);
    }

    #[test]
    #[should_panic]
    fn create_node_test_invalid_and_id0() {
        let i1 = wrap(AigNode::input(1));
        let _ = AigNode::and(0, edge(i1.clone()), edge(i1));
    }

    #[test]
    fn node_eq_test() {
        let i1 = wrap(AigNode::input(1));
        let i2 = wrap(AigNode::input(2));
        let a3 = wrap(AigNode::and(3, edge(i1.clone()), edge(i2.clone())));
        let v4 = wrap(AigNode::inv(4, edge(a3.clone())));

        assert_eq!(i1, wrap(AigNode::input(1)));
        assert_ne!(i1, wrap(AigNode::input(2)));

        // Note that fanouts are not taken into account for equality
        assert_eq!(a3, wrap(AigNode::and(3, edge(i1.clone()), edge(i2.clone()))));
        // Fanin slots do NOT commute
        assert_ne!(a3, wrap(AigNode::and(3, edge(i2.clone()), edge(i1.clone()))));
        assert_ne!(a3, wrap(AigNode::and(3, !edge(i1.clone()), edge(i2.clone()))));

        assert_eq!(v4, wrap(AigNode::inv(4, edge(a3.clone()))));
        assert_ne!(v4, wrap(AigNode::inv(4, !edge(a3.clone()))));

        // Different kinds never compare equal
        assert_ne!(
            v4,
            wrap(AigNode::output(4, edge(a3.clone())))
        );
    }

    #[test]
    fn redirect_fanins_test() {
        let i1 = wrap(AigNode::input(1));
        let i2 = wrap(AigNode::input(2));
        let a3 = wrap(AigNode::and(3, edge(i1.clone()), !edge(i1.clone())));

        // Both slots point at i1, one of them complemented. Redirecting must
        // rewrite both slots and keep per-slot polarity.
        let n = a3.borrow_mut().redirect_fanins(1, &i2);
        assert_eq!(n, 2);
        let fanins = a3.borrow().get_fanins();
        assert_eq!(fanins[0], edge(i2.clone()));
        assert_eq!(fanins[1], !edge(i2.clone()));
    }

    #[test]
    fn fanin_arity_test() {
        let i1 = wrap(AigNode::input(1));
        assert_eq!(i1.borrow().expected_arity(), 0);
        assert!(i1.borrow_mut().push_fanin(edge(i1.clone())).is_err());
        assert!(i1.borrow_mut().clear_fanins().is_err());

        let o2 = wrap(AigNode::output(2, edge(i1.clone())));
        assert_eq!(o2.borrow().expected_arity(), 1);
        assert!(o2.borrow_mut().clear_fanins().is_ok());
        assert!(o2.borrow().get_fanins().is_empty());
        assert!(o2.borrow_mut().push_fanin(edge(i1.clone())).is_ok());
        assert_eq!(o2.borrow().get_fanins().len(), 1);
    }
}
