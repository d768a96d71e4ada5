//! Bit-parallel truth-vector simulation.
//!
//! Every node gets a [`TruthVec`] of `W` 64-bit words: its Boolean function
//! evaluated on `64 * W` pseudo-random input assignments. A primary input's
//! words are drawn from an [`StdRng`] seeded purely from the input's id, so
//! repeated runs are reproducible and two networks sharing their input ids
//! (a circuit and its approximation) see the exact same stimulus.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng, rngs::StdRng};

use crate::{Aig, AigError, NodeId, Result};

/// `W` 64-bit words of simulated values for one node.
pub type TruthVec = Vec<u64>;

const BASE_SEED: u64 = 0x5D3C_9A7F_11E8_4D21;

fn pi_seed(id: NodeId) -> u64 {
    BASE_SEED.wrapping_add(id.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Computes the truth vector of every node reachable from the outputs, plus
/// all primary inputs, using `words` 64-bit words per node.
///
/// Inputs get pseudo-random words keyed by their id; gates and output markers
/// are the bitwise AND of their fanin evaluations (an edge evaluates to the
/// fanin vector, complemented when the edge is).
pub fn compute_truth_vectors(aig: &Aig, words: usize) -> Result<HashMap<NodeId, TruthVec>> {
    let mut tvs: HashMap<NodeId, TruthVec> = HashMap::new();

    for input in aig.get_inputs() {
        let id = input.borrow().get_id();
        let mut rng = StdRng::seed_from_u64(pi_seed(id));
        tvs.insert(id, (0..words).map(|_| rng.next_u64()).collect());
    }

    for node in aig.get_topological_sort()? {
        let node = node.borrow();
        if node.is_input() {
            continue;
        }
        let mut acc = vec![!0u64; words];
        for fanin in node.get_fanins() {
            let fanin_id = fanin.get_node_id();
            let src = tvs
                .get(&fanin_id)
                .ok_or(AigError::NodeDoesNotExist(fanin_id))?;
            let mask = if fanin.get_complement() { !0u64 } else { 0u64 };
            for (a, s) in acc.iter_mut().zip(src.iter()) {
                *a &= s ^ mask;
            }
        }
        tvs.insert(node.get_id(), acc);
    }

    Ok(tvs)
}

/// Fraction of sample bits on which the two vectors disagree, in `[0, 1]`.
/// Symmetric in its arguments.
pub fn pair_error(a: &TruthVec, b: &TruthVec) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let mismatches: u64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (x ^ y).count_ones() as u64)
        .sum();
    mismatches as f64 / (64 * a.len()) as f64
}

/// Simulated error rate between two networks: the fraction of input samples
/// for which at least one pair of corresponding outputs disagrees.
///
/// Outputs are paired by id, so the two networks must expose the same output
/// ids (which a [`Aig::deep_clone`] guarantees, and the synthesis engine
/// preserves: output markers are rewired but never deleted).
pub fn error_rate(net_a: &Aig, net_b: &Aig, words: usize) -> Result<f64> {
    if net_a.get_outputs_id() != net_b.get_outputs_id() {
        return Err(AigError::InvalidState(
            "cannot compare networks with different output ids".to_string(),
        ));
    }
    if words == 0 {
        return Ok(0.0);
    }

    let tva = compute_truth_vectors(net_a, words)?;
    let tvb = compute_truth_vectors(net_b, words)?;

    let mut diff = vec![0u64; words];
    for output in net_a.get_outputs() {
        let id = output.borrow().get_id();
        let a = tva.get(&id).ok_or(AigError::NodeDoesNotExist(id))?;
        let b = tvb.get(&id).ok_or(AigError::NodeDoesNotExist(id))?;
        for ((d, x), y) in diff.iter_mut().zip(a.iter()).zip(b.iter()) {
            *d |= x ^ y;
        }
    }

    let mismatched: u64 = diff.iter().map(|d| d.count_ones() as u64).sum();
    Ok(mismatched as f64 / (64 * words) as f64)
}
