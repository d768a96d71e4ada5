use crate::{Aig, AigEdge, AigError, AigNode, Result};

impl Aig {
    /// Performs a real recursive clone of the AIG.
    ///
    /// We are not just incrementing reference counters, but instead creating
    /// brand new nodes, completely unrelated with the previous AIG. Ids and
    /// names are preserved, so the clone can be paired with the original
    /// output-by-output (which is what the error-rate simulation does).
    ///
    /// The strategy: create inputs, then gates in topological order, then
    /// output markers, then carry the names over.
    pub fn deep_clone(&self) -> Result<Self> {
        self.check_integrity()?;

        let mut aig = Aig::new();

        // Adding inputs
        for input in &self.get_inputs() {
            aig.new_input(input.borrow().get_id())?;
        }

        // Adding gates in topological order, recreating their fanin edges
        // inside the new AIG.
        for node in self.get_topological_sort()? {
            let node = node.borrow();
            if !node.is_gate() && !node.is_output() {
                continue;
            }

            let mut new_fanins = Vec::new();
            for fanin in node.get_fanins() {
                let fanin_id = fanin.get_node_id();
                let new_node = aig
                    .get_node(fanin_id)
                    .ok_or(AigError::NodeDoesNotExist(fanin_id))?;
                new_fanins.push(AigEdge::new(new_node, fanin.get_complement()));
            }

            match &*node {
                AigNode::And { id, .. } => {
                    let fanin1 = new_fanins.pop().ok_or(AigError::NoFanin)?;
                    let fanin0 = new_fanins.pop().ok_or(AigError::NoFanin)?;
                    aig.new_and(*id, fanin0, fanin1)?;
                }
                AigNode::Inv { id, .. } => {
                    let fanin = new_fanins.pop().ok_or(AigError::NoFanin)?;
                    aig.new_inv(*id, fanin)?;
                }
                AigNode::Output { id, .. } => {
                    let fanin = new_fanins.pop().ok_or(AigError::NoFanin)?;
                    aig.new_output(*id, fanin)?;
                }
                _ => (),
            }
        }

        for (id, name) in &self.names {
            if aig.get_node(*id).is_some() {
                aig.set_name(*id, name.clone())?;
            }
        }
        aig.next_id = self.next_id;

        aig.update();
        aig.check_integrity()?;

        Ok(aig)
    }
}
