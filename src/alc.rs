//! Approximate local changes: substituting one signal for another.
//!
//! An [`Alc`] replaces a `target` node by an earlier-arriving `substitute`
//! (optionally through a fresh inverter) and can undo the replacement
//! exactly. The snapshot taken at construction holds strong node handles, so
//! it stays valid however much the surrounding network is rewritten in
//! between, as long as the caller alternates `apply` and `recover`.

use std::rc::Rc;

use crate::{Aig, AigEdge, AigNodeRef, Result};

/// A single candidate substitution on the working network.
///
/// Lifecycle: fresh -> applied (via [`Alc::apply`]) -> fresh (via
/// [`Alc::recover`]), any number of times. The final, winning application is
/// simply never recovered.
#[derive(Debug, Clone)]
pub struct Alc {
    target: AigNodeRef,
    substitute: AigNodeRef,
    is_complemented: bool,
    error: f64,
    /// The inverter created by a complemented apply, deleted on recover.
    inv: Option<AigNodeRef>,
    /// Every fanout of `target` with its full ordered fanin list, captured
    /// before any application.
    saved_fanouts: Vec<(AigNodeRef, Vec<AigEdge>)>,
    applied: bool,
}

impl Alc {
    /// Snapshots `target`'s fanouts and their exact fanin slot ordering.
    pub fn new(
        target: &AigNodeRef,
        substitute: &AigNodeRef,
        is_complemented: bool,
        error: f64,
    ) -> Self {
        debug_assert!(!Rc::ptr_eq(target, substitute));

        let mut fanouts: Vec<AigNodeRef> = target
            .borrow()
            .get_fanouts()
            .values()
            .filter_map(|weak| weak.upgrade())
            .collect();
        fanouts.sort_by_key(|fanout| fanout.borrow().get_id());
        let saved_fanouts = fanouts
            .into_iter()
            .map(|fanout| {
                let fanins = fanout.borrow().get_fanins();
                (fanout, fanins)
            })
            .collect();

        Alc {
            target: target.clone(),
            substitute: substitute.clone(),
            is_complemented,
            error,
            inv: None,
            saved_fanouts,
            applied: false,
        }
    }

    pub fn target(&self) -> AigNodeRef {
        self.target.clone()
    }

    pub fn substitute(&self) -> AigNodeRef {
        self.substitute.clone()
    }

    pub fn is_complemented(&self) -> bool {
        self.is_complemented
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn set_error(&mut self, error: f64) {
        self.error = error;
    }

    /// Reroutes every fanout of the target onto the substitute (through a
    /// fresh inverter when complemented). The target stays in the network,
    /// fanout-free.
    pub fn apply(&mut self, aig: &mut Aig) -> Result<()> {
        debug_assert!(!self.applied, "apply called twice without recover");

        if self.is_complemented {
            let inv = aig.create_inverter(&self.substitute)?;
            aig.replace(&self.target, &inv)?;
            self.inv = Some(inv);
        } else {
            aig.replace(&self.target, &self.substitute)?;
        }
        self.applied = true;
        Ok(())
    }

    /// Undoes [`Alc::apply`] exactly.
    ///
    /// Each saved fanout gets all of its current fanins removed and the saved
    /// ones re-added in order. Patching edges one by one instead would go
    /// wrong when a fanout references the substitute signal in several slots;
    /// the full rebuild restores both the edges and their positions.
    pub fn recover(&mut self, aig: &mut Aig) -> Result<()> {
        debug_assert!(self.applied, "recover called without a preceding apply");

        if let Some(inv) = self.inv.take() {
            aig.delete_node(&inv)?;
        }
        for (fanout, saved_fanins) in &self.saved_fanouts {
            aig.remove_all_fanins(fanout)?;
            for fanin in saved_fanins {
                aig.add_fanin(fanout, fanin.clone())?;
            }
        }
        self.applied = false;
        Ok(())
    }
}
