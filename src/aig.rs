//! Module defining the [`Aig`] struct, as well as [`AigNode`], [`AigEdge`] and some others relevant structs.
//!
//! The network is a DAG of primary inputs, two-input AND gates, single-input
//! gates (inverters and buffers) and primary output markers. Polarity lives on
//! fanin edges. All structural rewrites used by the synthesis engine
//! ([`Aig::replace`], [`Aig::create_inverter`], [`Aig::remove_all_fanins`],
//! [`Aig::add_fanin`], [`Aig::delete_node`]) live here.

mod clone;
pub mod edge;
pub mod error;
mod integrity;
pub mod node;
pub(crate) mod parser;

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    rc::Rc,
};

pub use edge::AigEdge;
pub use error::{AigError, Result};
pub(crate) use node::AigNodeWeak;
pub use node::{AigNode, AigNodeRef, NodeId};

/// A whole AIG.
///
/// Nodes are kept alive artificially to allow rewrites of the structure.
/// Once you are done with rewriting (ie, your AIG should now be in a relevant state), you can
/// call the [`.update()`] method to remove all unused nodes.
///
/// For example, if you just created a node using [`.new_and(id, fanin0, fanin1)`], this node isn't used as a fanin to any
/// other node for now. It won't be deleted directly (fortunately!). But if after finishing your rewrite you
/// call [`.update()`] and the node still is not used by any other node, then, it will get deleted.
///
/// [`.update()`]: Aig::update
/// [`.new_and(id, fanin0, fanin1)`]: Aig::new_and
///
/// The use of [`Rc`] and [`AigNodeRef`] allows us not to worry about having to drop manually nodes
/// that are no longer used, eg. nodes that were used before by node `A` as their fanin,
/// but `A` is rewritten to use another fanin.
///
/// Note that [`Aig::clone`] will perform a shallow copy of the AIG (the nodes won't be copied).
/// If you want to recursively clone the data structure (ie not incrementing Rc
/// but creating new nodes), use [`Aig::deep_clone`] instead.
#[derive(Debug, Clone)]
pub struct Aig {
    nodes: HashMap<NodeId, AigNodeWeak>,
    /// Inputs must be kept artificially alive as
    /// we don't want to remove them even if the outputs do not depend on them.
    inputs: HashMap<NodeId, AigNodeRef>,
    /// Output markers own the cones below them through their fanin edges.
    outputs: HashMap<NodeId, AigNodeRef>,
    /// Signal names, mostly coming from `.bench` netlists. Unnamed nodes
    /// render as `n<id>`.
    names: HashMap<NodeId, String>,
    keep_nodes_alive: Vec<AigNodeRef>,
    /// Monotonic id allocator. Ids are never reused, even after deletion.
    next_id: NodeId,
}

impl Aig {
    /// Create a brand new empty AIG.
    pub fn new() -> Self {
        Aig {
            nodes: HashMap::new(),
            inputs: HashMap::new(),
            outputs: HashMap::new(),
            names: HashMap::new(),
            keep_nodes_alive: Vec::new(),
            next_id: 1,
        }
    }

    /// Retrieves a node from its id.
    pub fn get_node(&self, id: NodeId) -> Option<AigNodeRef> {
        self.nodes.get(&id)?.upgrade()
    }

    /// Call this function when you are done with your rewrite.
    /// All nodes that are not part of the AIG anymore (ie not reachable from an output
    /// and not held by anyone else) will be deleted.
    pub fn update(&mut self) {
        // Stop keeping nodes artificially alive
        self.keep_nodes_alive.clear();

        // Removing no longer valid entries from the nodes
        self.nodes
            .retain(|_, weak_node| weak_node.upgrade().is_some());
        let nodes = &self.nodes;
        self.names.retain(|id, _| nodes.contains_key(id));
    }

    /// Retrieves inputs reference, sorted by id.
    pub fn get_inputs(&self) -> Vec<AigNodeRef> {
        let mut inputs: Vec<AigNodeRef> = self.inputs.values().cloned().collect();
        inputs.sort_by_key(|input| input.borrow().get_id());
        inputs
    }

    /// Retrieves inputs id.
    pub fn get_inputs_id(&self) -> HashSet<NodeId> {
        self.inputs.keys().copied().collect()
    }

    /// Retrieves output markers, sorted by id.
    pub fn get_outputs(&self) -> Vec<AigNodeRef> {
        let mut outputs: Vec<AigNodeRef> = self.outputs.values().cloned().collect();
        outputs.sort_by_key(|output| output.borrow().get_id());
        outputs
    }

    /// Retrieves outputs id.
    pub fn get_outputs_id(&self) -> HashSet<NodeId> {
        self.outputs.keys().copied().collect()
    }

    /// Assign a name to an existing node.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        if self.get_node(id).is_none() {
            return Err(AigError::NodeDoesNotExist(id));
        }
        self.names.insert(id, name.into());
        Ok(())
    }

    /// The name of a node, falling back to `n<id>` for unnamed nodes.
    pub fn node_name(&self, id: NodeId) -> String {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("n{}", id))
    }

    /// Largest id ever allocated in this AIG.
    pub fn max_obj_id(&self) -> NodeId {
        self.next_id - 1
    }

    /// Strict upper bound on node ids, with one spare slot on top.
    ///
    /// The delay reducer sizes its flow graph with this: vertex 0 is the
    /// super-source (no node has id 0) and the spare slot is the super-sink,
    /// so neither can ever collide with a real node id.
    pub fn max_id_bound(&self) -> NodeId {
        self.next_id + 1
    }

    /// Allocate a fresh id, strictly above every id ever used.
    fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_valid_node_to_add(&self, node: &AigNode) -> Result<()> {
        if node.get_id() == 0 {
            return Err(AigError::IdZeroReserved);
        }
        for fanin in node.get_fanins() {
            let fanin_id = fanin.get_node_id();
            if self.get_node(fanin_id).is_none() {
                return Err(AigError::NodeDoesNotExist(fanin_id));
            }
        }
        Ok(())
    }

    /// Create a new (or retrieve existing) node within the AIG.
    /// This will fail if a different node with the same id already exists in the AIG,
    /// or if a node uses the reserved id 0.
    ///
    /// ```rust
    /// use dals::{Aig, AigEdge, AigNode};
    /// let mut aig = Aig::new();
    /// let i1 = aig.add_node(AigNode::input(1)).unwrap();
    /// let i1_ = aig.add_node(AigNode::input(1)).unwrap(); // will simply retrieve the existing node
    /// assert_eq!(i1, i1_);
    ///
    /// let and_gate = aig
    ///     .add_node(AigNode::and(
    ///         2,
    ///         AigEdge::new(i1.clone(), false),
    ///         AigEdge::new(i1.clone(), true),
    ///     ))
    ///     .unwrap();
    ///
    /// // Some stuff we cannot do
    /// // Node with reserved id 0
    /// assert!(aig.add_node(AigNode::Input { id: 0, fanouts: Default::default() }).is_err());
    /// // Id 1 is already taken by an input
    /// assert!(
    ///     aig.add_node(AigNode::and(
    ///         1,
    ///         AigEdge::new(and_gate.clone(), false),
    ///         AigEdge::new(i1.clone(), false)
    ///     ))
    ///     .is_err()
    /// );
    /// ```
    pub fn add_node(&mut self, node: AigNode) -> Result<AigNodeRef> {
        self.check_valid_node_to_add(&node)?;

        let id = node.get_id();
        match self.get_node(id) {
            // No node with this id yet, let's register a new one.
            None => {
                let n = Rc::new(RefCell::new(node));
                // Wire the fanout maps of the fanins.
                for fanin in n.borrow().get_fanins() {
                    fanin.get_node().borrow_mut().add_fanout(id, Rc::downgrade(&n));
                }
                match &*n.borrow() {
                    AigNode::Input { .. } => {
                        self.inputs.insert(id, n.clone());
                    }
                    AigNode::Output { .. } => {
                        self.outputs.insert(id, n.clone());
                    }
                    _ => (),
                };

                self.nodes.insert(id, Rc::downgrade(&n));
                self.keep_nodes_alive.push(n.clone());
                self.next_id = self.next_id.max(id + 1);

                Ok(n)
            }
            // A node was found, maybe it is just the one we're trying to create.
            Some(n) => (*n.borrow() == node)
                .then(|| n.clone())
                .ok_or(AigError::DuplicateId(id)),
        }
    }

    /// Create a new primary input (or retrieve it if it already exists).
    pub fn new_input(&mut self, id: NodeId) -> Result<AigNodeRef> {
        self.add_node(AigNode::input(id))
    }

    /// Create a new and gate (or retrieve it if the exact same node already exists).
    pub fn new_and(&mut self, id: NodeId, fanin0: AigEdge, fanin1: AigEdge) -> Result<AigNodeRef> {
        self.add_node(AigNode::and(id, fanin0, fanin1))
    }

    /// Create a new single-input gate (or retrieve it if the exact same node already exists).
    pub fn new_inv(&mut self, id: NodeId, fanin: AigEdge) -> Result<AigNodeRef> {
        self.add_node(AigNode::inv(id, fanin))
    }

    /// Create a new primary output marker fed by `fanin`.
    pub fn new_output(&mut self, id: NodeId, fanin: AigEdge) -> Result<AigNodeRef> {
        self.add_node(AigNode::output(id, fanin))
    }

    /// Create a fresh inverter driven by `src`.
    ///
    /// The new node gets a fresh id; the inversion rides on its fanin edge.
    pub fn create_inverter(&mut self, src: &AigNodeRef) -> Result<AigNodeRef> {
        let id = self.fresh_id();
        self.new_inv(id, AigEdge::new(src.clone(), true))
    }

    /// Redirect every fanout edge of `old` to point at `new`, preserving both
    /// slot order and per-slot polarity. After this, `old` has no fanouts but
    /// still exists in the network.
    pub fn replace(&mut self, old: &AigNodeRef, new: &AigNodeRef) -> Result<()> {
        let old_id = old.borrow().get_id();
        let new_id = new.borrow().get_id();
        if old_id == new_id {
            return Err(AigError::InvalidState(format!(
                "trying to replace node {} by itself",
                old_id
            )));
        }
        if self.get_node(old_id).is_none() {
            return Err(AigError::NodeDoesNotExist(old_id));
        }
        if self.get_node(new_id).is_none() {
            return Err(AigError::NodeDoesNotExist(new_id));
        }

        let fanouts: Vec<AigNodeRef> = old
            .borrow()
            .get_fanouts()
            .values()
            .filter_map(|weak| weak.upgrade())
            .collect();

        for fanout in fanouts {
            let fanout_id = fanout.borrow().get_id();
            let rewritten = fanout.borrow_mut().redirect_fanins(old_id, new);
            if rewritten > 0 {
                new.borrow_mut().add_fanout(fanout_id, Rc::downgrade(&fanout));
            }
        }
        old.borrow_mut().clear_fanouts();

        Ok(())
    }

    /// Remove every fanin edge of `node`, unregistering `node` from the fanout
    /// maps of its former fanins.
    pub fn remove_all_fanins(&mut self, node: &AigNodeRef) -> Result<()> {
        let id = node.borrow().get_id();
        let mut former: Vec<NodeId> = node
            .borrow()
            .get_fanins()
            .iter()
            .map(|fanin| fanin.get_node_id())
            .collect();
        // A node may sit in several slots; its fanout map only has one entry.
        former.sort_unstable();
        former.dedup();

        for fanin_id in former {
            let fanin = self
                .get_node(fanin_id)
                .ok_or(AigError::NodeDoesNotExist(fanin_id))?;
            fanin.borrow_mut().remove_fanout(id)?;
        }
        node.borrow_mut().clear_fanins()
    }

    /// Append a fanin edge to `node` (slot order is the insertion order).
    pub fn add_fanin(&mut self, node: &AigNodeRef, fanin: AigEdge) -> Result<()> {
        let id = node.borrow().get_id();
        node.borrow_mut().push_fanin(fanin.clone())?;
        fanin
            .get_node()
            .borrow_mut()
            .add_fanout(id, Rc::downgrade(node));
        Ok(())
    }

    /// Remove a node from the network.
    ///
    /// The node is unregistered from the fanout maps of its fanins. Edges
    /// still pointing at the node keep it allocated until the caller rewires
    /// them; structural undo does exactly that right after deleting.
    pub fn delete_node(&mut self, node: &AigNodeRef) -> Result<()> {
        let id = node.borrow().get_id();
        if self.get_node(id).is_none() {
            return Err(AigError::NodeDoesNotExist(id));
        }

        let mut fanin_ids: Vec<NodeId> = node
            .borrow()
            .get_fanins()
            .iter()
            .map(|fanin| fanin.get_node_id())
            .collect();
        fanin_ids.sort_unstable();
        fanin_ids.dedup();
        for fanin_id in fanin_ids {
            if let Some(fanin) = self.get_node(fanin_id) {
                fanin.borrow_mut().remove_fanout(id)?;
            }
        }

        self.nodes.remove(&id);
        self.inputs.remove(&id);
        self.outputs.remove(&id);
        self.names.remove(&id);
        self.keep_nodes_alive.retain(|n| !Rc::ptr_eq(n, node));
        Ok(())
    }

    /// Returns a topological sort of all nodes reachable from the outputs
    /// (fanins before fanouts, output markers last in their cones). Will error
    /// if a cycle is detected.
    pub fn get_topological_sort(&self) -> Result<Vec<AigNodeRef>> {
        let mut sort = Vec::new();
        let mut gray = HashSet::new();
        let mut done = HashSet::new();

        let mut starts = self.get_outputs();
        starts.reverse();
        for start in starts {
            self.topological_visit(start, &mut sort, &mut gray, &mut done)?;
        }
        Ok(sort)
    }

    fn topological_visit(
        &self,
        start: AigNodeRef,
        sort: &mut Vec<AigNodeRef>,
        gray: &mut HashSet<NodeId>,
        done: &mut HashSet<NodeId>,
    ) -> Result<()> {
        let mut stack: Vec<(AigNodeRef, bool)> = vec![(start, false)];

        while let Some((node, last_time)) = stack.pop() {
            let id = node.borrow().get_id();

            // Post order check
            if last_time {
                gray.remove(&id);
                done.insert(id);
                sort.push(node);
                continue;
            }

            // A node may land on the stack twice through two fanouts.
            if done.contains(&id) || gray.contains(&id) {
                continue;
            }

            gray.insert(id);
            stack.push((node.clone(), true));

            for fanin in node.borrow().get_fanins() {
                let fanin_id = fanin.get_node_id();
                if gray.contains(&fanin_id) {
                    return Err(AigError::InvalidState("found a cycle".to_string()));
                }
                if !done.contains(&fanin_id) {
                    stack.push((fanin.get_node(), false));
                }
            }
        }

        Ok(())
    }

    /// All primary inputs (sorted by id) followed by the reachable internal
    /// nodes in topological order. Output markers are excluded.
    pub fn topo_sort_pi_and_nodes(&self) -> Result<Vec<AigNodeRef>> {
        let mut result = self.get_inputs();
        for node in self.get_topological_sort()? {
            if node.borrow().is_gate() {
                result.push(node);
            }
        }
        Ok(result)
    }
}

impl Default for Aig {
    fn default() -> Self {
        Aig::new()
    }
}

impl PartialEq for Aig {
    /// Compares the two AIGs. They are equal iff:
    /// - their inputs are equal (in terms of set)
    /// - their outputs are equal
    /// - their valid nodes are equal.
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs
            && self.outputs == other.outputs
            && self
                .nodes
                .iter()
                .filter_map(|(&id, weak)| Some((id, weak.upgrade()?)))
                .collect::<HashMap<NodeId, AigNodeRef>>()
                == other
                    .nodes
                    .iter()
                    .filter_map(|(&id, weak)| Some((id, weak.upgrade()?)))
                    .collect::<HashMap<NodeId, AigNodeRef>>()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn edge(node: &AigNodeRef) -> AigEdge {
        AigEdge::new(node.clone(), false)
    }

    /// c = a AND b, an output marker on c.
    fn and_po_net() -> (Aig, AigNodeRef, AigNodeRef, AigNodeRef, AigNodeRef) {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        let c = aig.new_and(3, edge(&a), edge(&b)).unwrap();
        let po = aig.new_output(4, edge(&c)).unwrap();
        (aig, a, b, c, po)
    }

    #[test]
    fn add_node_test() {
        let mut aig = Aig::new();

        let i1 = AigNode::input(1);
        let ri1 = aig.add_node(i1.clone()).unwrap();
        assert_eq!(*ri1.borrow(), i1);
        let a2 = AigNode::and(
            2,
            AigEdge::new(ri1.clone(), false),
            AigEdge::new(ri1.clone(), true),
        );
        let ra2 = aig.add_node(a2.clone()).unwrap();
        assert_eq!(*ra2.borrow(), a2);

        // Now, trying to add some illegal nodes
        assert!(aig.add_node(AigNode::input(2)).is_err());
        assert!(
            aig.add_node(AigNode::and(
                1,
                AigEdge::new(ri1.clone(), false),
                AigEdge::new(ri1.clone(), false)
            ))
            .is_err()
        );

        // Trying to re-add existing nodes (legal)
        assert_eq!(*aig.add_node(i1.clone()).unwrap().borrow(), i1);
        assert_eq!(*aig.add_node(a2.clone()).unwrap().borrow(), a2);
    }

    #[test]
    fn add_node_test_invalid_dependency() {
        let mut aig = Aig::new();

        let fake_input = Rc::new(RefCell::new(AigNode::input(1)));
        assert!(
            aig.add_node(AigNode::and(
                2,
                AigEdge::new(fake_input.clone(), false),
                AigEdge::new(fake_input.clone(), false),
            ))
            .is_err()
        );
        assert!(
            aig.add_node(AigNode::output(2, AigEdge::new(fake_input.clone(), false)))
                .is_err()
        );
    }

    #[test]
    fn fanout_wiring_test() {
        let (_aig, a, b, c, po) = and_po_net();

        let fanouts_a = a.borrow().get_fanouts();
        assert_eq!(fanouts_a.len(), 1);
        assert!(fanouts_a.contains_key(&c.borrow().get_id()));

        let fanouts_c = c.borrow().get_fanouts();
        assert_eq!(fanouts_c.len(), 1);
        assert!(fanouts_c.contains_key(&po.borrow().get_id()));

        assert!(c.borrow().is_po_driver());
        assert!(!b.borrow().is_po_driver());
    }

    #[test]
    fn replace_test() {
        let (mut aig, a, _b, c, po) = and_po_net();

        aig.replace(&c, &a).unwrap();

        // The output now fans in from a, and c is left dangling.
        assert_eq!(po.borrow().get_fanins(), vec![edge(&a)]);
        assert!(c.borrow().get_fanouts().is_empty());
        assert!(a.borrow().get_fanouts().contains_key(&po.borrow().get_id()));
        aig.check_integrity().unwrap();

        // Replacing a node by itself is refused.
        assert!(aig.replace(&a, &a).is_err());
    }

    #[test]
    fn replace_preserves_polarity_and_slots() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        let c = aig.new_and(3, edge(&a), edge(&b)).unwrap();
        // d references c in both slots, with different polarities.
        let d = aig
            .new_and(4, edge(&c), !edge(&c))
            .unwrap();
        aig.new_output(5, edge(&d)).unwrap();

        aig.replace(&c, &a).unwrap();
        let fanins = d.borrow().get_fanins();
        assert_eq!(fanins[0], edge(&a));
        assert_eq!(fanins[1], !edge(&a));
        aig.check_integrity().unwrap();
    }

    #[test]
    fn create_inverter_test() {
        let (mut aig, a, _b, c, po) = and_po_net();

        let inv = aig.create_inverter(&a).unwrap();
        let inv_fanins = inv.borrow().get_fanins();
        assert_eq!(inv_fanins.len(), 1);
        assert_eq!(inv_fanins[0], !edge(&a));

        aig.replace(&c, &inv).unwrap();
        assert_eq!(po.borrow().get_fanins()[0].get_node_id(), inv.borrow().get_id());
        aig.check_integrity().unwrap();
    }

    #[test]
    fn remove_and_readd_fanins_restores_order() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        let c = aig.new_and(3, !edge(&a), edge(&b)).unwrap();
        aig.new_output(4, edge(&c)).unwrap();

        let saved = c.borrow().get_fanins();
        aig.remove_all_fanins(&c).unwrap();
        assert!(c.borrow().get_fanins().is_empty());
        assert!(!a.borrow().get_fanouts().contains_key(&3));

        for fanin in &saved {
            aig.add_fanin(&c, fanin.clone()).unwrap();
        }
        assert_eq!(c.borrow().get_fanins(), saved);
        assert!(a.borrow().get_fanouts().contains_key(&3));
        aig.check_integrity().unwrap();
    }

    #[test]
    fn delete_node_test() {
        let (mut aig, a, _b, c, _po) = and_po_net();

        let inv = aig.create_inverter(&a).unwrap();
        let inv_id = inv.borrow().get_id();
        assert!(a.borrow().get_fanouts().contains_key(&inv_id));

        aig.delete_node(&inv).unwrap();
        assert!(aig.get_node(inv_id).is_none());
        assert!(!a.borrow().get_fanouts().contains_key(&inv_id));

        // Deleting twice fails.
        assert!(aig.delete_node(&inv).is_err());
        // c is untouched.
        assert!(aig.get_node(c.borrow().get_id()).is_some());
    }

    #[test]
    fn node_lifetime() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        // A gate nothing references dies on update.
        aig.new_and(3, edge(&a), edge(&b)).unwrap();
        // A gate under an output survives.
        let d = aig.new_and(4, edge(&a), !edge(&b)).unwrap();
        aig.new_output(5, edge(&d)).unwrap();
        drop(d);

        aig.update();
        assert!(aig.get_node(1).is_some()); // inputs do not get deleted
        assert!(aig.get_node(2).is_some());
        assert!(aig.get_node(3).is_none());
        assert!(aig.get_node(4).is_some());
        assert!(aig.get_node(5).is_some());
    }

    #[test]
    fn topo_sort_respects_fanins() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        let c = aig.new_and(3, edge(&a), edge(&b)).unwrap();
        let d = aig.new_and(4, edge(&c), edge(&b)).unwrap();
        let e = aig.new_and(5, edge(&c), edge(&d)).unwrap();
        aig.new_output(6, edge(&e)).unwrap();

        let sort = aig.get_topological_sort().unwrap();
        let position: HashMap<NodeId, usize> = sort
            .iter()
            .enumerate()
            .map(|(i, n)| (n.borrow().get_id(), i))
            .collect();
        for node in &sort {
            for fanin in node.borrow().get_fanins() {
                assert!(position[&fanin.get_node_id()] < position[&node.borrow().get_id()]);
            }
        }

        // PIs first, then gates, no output markers.
        let pi_nodes = aig.topo_sort_pi_and_nodes().unwrap();
        assert_eq!(pi_nodes[0].borrow().get_id(), 1);
        assert_eq!(pi_nodes[1].borrow().get_id(), 2);
        assert!(pi_nodes.iter().all(|n| !n.borrow().is_output()));
        assert_eq!(pi_nodes.len(), 5);
    }

    #[test]
    fn names_test() {
        let (mut aig, a, _b, _c, _po) = and_po_net();
        assert_eq!(aig.node_name(3), "n3");
        aig.set_name(a.borrow().get_id(), "alpha").unwrap();
        assert_eq!(aig.node_name(1), "alpha");
        assert!(aig.set_name(99, "ghost").is_err());
    }

    #[test]
    fn max_id_bound_leaves_spare_slot() {
        let (mut aig, a, _b, _c, _po) = and_po_net();
        assert_eq!(aig.max_obj_id(), 4);
        assert_eq!(aig.max_id_bound(), 6);
        let inv = aig.create_inverter(&a).unwrap();
        assert_eq!(inv.borrow().get_id(), 5);
        assert_eq!(aig.max_id_bound(), 7);
    }
}
