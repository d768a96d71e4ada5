use crate::{Aig, AigError, AigNodeRef, Result};

impl Aig {
    /// Checking if the AIG structure is correct.
    /// This function was written for debug purposes, as the library is supposed to maintain
    /// integrity of the AIG at any moment.
    pub fn check_integrity(&self) -> Result<()> {
        // Checking that all nodes have relevant id
        // and perform some individual integrity checks
        for (&id, weak_node) in &self.nodes {
            if let Some(node) = weak_node.upgrade() {
                if node.borrow().get_id() != id {
                    return Err(AigError::InvalidState("incoherent node id".to_string()));
                }

                self.check_node_integrity(&node)?;
            }
        }

        // Checking that all output markers are registered as nodes
        for output in self.outputs.values() {
            let output_id = output.borrow().get_id();
            if self.get_node(output_id).is_none() {
                return Err(AigError::InvalidState(format!(
                    "output {} is not a node of the aig",
                    output_id
                )));
            }
            if !output.borrow().is_output() {
                return Err(AigError::InvalidState(format!(
                    "node {} is registered as an output but is not one",
                    output_id
                )));
            }
        }

        // Checks for acyclicity
        self.get_topological_sort()?;

        Ok(())
    }

    /// Check the integrity for an individual node, that is:
    /// - the fanin arity matches the node kind (0 for inputs, 2 for AND
    ///   gates, 1 for single-input gates and outputs)
    /// - every fanin edge refers to a node known to this AIG, and that node's
    ///   fanout map lists us back
    /// - every live fanout entry has a coherent id and actually references
    ///   this node among its fanins.
    fn check_node_integrity(&self, node: &AigNodeRef) -> Result<()> {
        let id = node.borrow().get_id();
        if id == 0 {
            return Err(AigError::IdZeroReserved);
        }

        let fanins = node.borrow().get_fanins();
        if fanins.len() != node.borrow().expected_arity() {
            return Err(AigError::InvalidState(format!(
                "node {} has {} fanins, expected {}",
                id,
                fanins.len(),
                node.borrow().expected_arity()
            )));
        }

        for fanin in &fanins {
            let fanin_id = fanin.get_node_id();
            let fanin_node = self.get_node(fanin_id).ok_or(AigError::InvalidState(format!(
                "edge pointing at node {} which is not in the AIG anymore",
                fanin_id
            )))?;
            if !fanin_node.borrow().get_fanouts().contains_key(&id) {
                return Err(AigError::InvalidState(format!(
                    "node {} fans in from {} but is missing from its fanout map",
                    id, fanin_id
                )));
            }
        }

        for (fanout_id, fanout_weak) in node.borrow().get_fanouts() {
            if let Some(fanout) = fanout_weak.upgrade() {
                let fanout_id_real = fanout.borrow().get_id();
                if fanout_id != fanout_id_real {
                    return Err(AigError::InvalidState(format!(
                        "incoherent fanout node id : {} in map vs {} in reality",
                        fanout_id, fanout_id_real
                    )));
                }
                if self.get_node(fanout_id).is_none() {
                    return Err(AigError::InvalidState(format!(
                        "fanout {} is no longer in the AIG",
                        fanout_id
                    )));
                }
                if !fanout
                    .borrow()
                    .get_fanins()
                    .iter()
                    .any(|fanin| fanin.get_node_id() == id)
                {
                    return Err(AigError::InvalidState(format!(
                        "node {} lists fanout {} which does not fan in from it",
                        id, fanout_id
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Aig, AigEdge};

    #[test]
    fn integrity_after_rewrites() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        let c = aig
            .new_and(3, AigEdge::new(a.clone(), false), AigEdge::new(b.clone(), false))
            .unwrap();
        let d = aig
            .new_and(4, AigEdge::new(c.clone(), false), AigEdge::new(b.clone(), true))
            .unwrap();
        aig.new_output(5, AigEdge::new(d.clone(), false)).unwrap();
        aig.check_integrity().unwrap();

        // Rewrite, then check the bookkeeping held up.
        let inv = aig.create_inverter(&c).unwrap();
        aig.replace(&d, &inv).unwrap();
        aig.check_integrity().unwrap();

        aig.update();
        aig.check_integrity().unwrap();
    }

    #[test]
    fn integrity_detects_arity_violation() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let c = aig
            .new_and(2, AigEdge::new(a.clone(), false), AigEdge::new(a.clone(), true))
            .unwrap();
        aig.new_output(3, AigEdge::new(c.clone(), false)).unwrap();

        aig.remove_all_fanins(&c).unwrap();
        assert!(aig.check_integrity().is_err());

        aig.add_fanin(&c, AigEdge::new(a.clone(), false)).unwrap();
        aig.add_fanin(&c, AigEdge::new(a.clone(), true)).unwrap();
        aig.check_integrity().unwrap();
    }
}
