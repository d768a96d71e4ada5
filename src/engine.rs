//! The delay-driven approximate synthesis engine.
//!
//! Each round: recompute slack over the working network, generate candidate
//! substitutions for every critical gate, build the node-split flow graph
//! over the critical structure, take the min-cut, and commit the cut's
//! substitutions. Every critical path crosses at least one cut node, so the
//! whole critical structure is rerouted through earlier signals at the
//! smallest estimated error. The loop stops once the simulated error rate
//! reaches the caller's budget, or when a round changes nothing.

use std::collections::HashMap;

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    Aig, AigError, AigNodeRef, NodeId,
    alc::Alc,
    flow::{Dinic, INF_CAPACITY},
    sim::{self, TruthVec},
    sta,
};

/// Error returned when a synthesis run failed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A structural operation on the working network failed.
    #[error("{0}")]
    Aig(#[from] AigError),

    /// The timing analysis returned no entry for a node it should cover.
    #[error("no timing entry for node {0}")]
    MissingTiming(NodeId),

    /// A node has no truth vector although it was simulated this round.
    #[error("no truth vector for node {0}")]
    MissingTruthVec(NodeId),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Tuning knobs of the engine.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Number of 64-bit words per truth vector; `64 * sim_64_cycles` random
    /// samples drive every error estimate.
    pub sim_64_cycles: usize,
    /// How many candidates per target survive into full-simulation
    /// refinement.
    pub top_k: usize,
    /// Emit per-phase progress messages (the per-round summary is always
    /// logged).
    pub show_progress: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            sim_64_cycles: 16,
            top_k: 3,
            show_progress: false,
        }
    }
}

/// What a [`Dals::run`] did, for callers that don't scrape logs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rounds: usize,
    pub error_rate: f64,
    pub initial_delay: i64,
    pub final_delay: i64,
}

/// Delay-driven approximate logic synthesis over a pair of networks: the
/// immutable reference (`target`) and the mutable working copy (`approx`).
pub struct Dals {
    target: Aig,
    approx: Aig,
    opts: EngineOptions,
    truth_vec: HashMap<NodeId, TruthVec>,
    cand_alcs: HashMap<NodeId, Vec<Alc>>,
    opt_alc: HashMap<NodeId, Alc>,
}

impl Dals {
    /// Sets up the engine on a copy of `target_ntk`; the caller's network is
    /// never touched.
    pub fn new(target_ntk: &Aig, opts: EngineOptions) -> EngineResult<Self> {
        let target = target_ntk.deep_clone()?;
        let approx = target.deep_clone()?;
        Ok(Dals {
            target,
            approx,
            opts,
            truth_vec: HashMap::new(),
            cand_alcs: HashMap::new(),
            opt_alc: HashMap::new(),
        })
    }

    pub fn target_ntk(&self) -> &Aig {
        &self.target
    }

    pub fn approx_ntk(&self) -> &Aig {
        &self.approx
    }

    /// Per-target candidate lists of the latest round, ranked by error.
    pub fn cand_alcs(&self) -> &HashMap<NodeId, Vec<Alc>> {
        &self.cand_alcs
    }

    /// Best substitution per target of the latest round. Targets without a
    /// single legal candidate are absent.
    pub fn opt_alc(&self) -> &HashMap<NodeId, Alc> {
        &self.opt_alc
    }

    fn calc_truth_vec(&mut self) -> EngineResult<()> {
        self.truth_vec = sim::compute_truth_vectors(&self.approx, self.opts.sim_64_cycles)?;
        Ok(())
    }

    fn est_pair_error(&self, target: NodeId, substitute: NodeId) -> EngineResult<f64> {
        let a = self
            .truth_vec
            .get(&target)
            .ok_or(EngineError::MissingTruthVec(target))?;
        let b = self
            .truth_vec
            .get(&substitute)
            .ok_or(EngineError::MissingTruthVec(substitute))?;
        Ok(sim::pair_error(a, b))
    }

    /// Complementation policy: an inverter costs one level, so it is only
    /// worth it when the substitute arrives strictly more than one level
    /// early. In that case a pair error above one half flips the signal and
    /// the stored error is clamped to `min(e, 1 - e)`.
    fn stored_error(est_error: f64, substitute_at: i64, target_at: i64) -> (bool, f64) {
        if substitute_at < target_at - 1 {
            (est_error > 0.5, est_error.min(1.0 - est_error))
        } else {
            (false, est_error)
        }
    }

    /// Stable sort by stored error (enumeration order breaks ties), keeping
    /// the best `top_k`.
    fn rank_candidates(mut cands: Vec<Alc>, top_k: usize) -> Vec<Alc> {
        cands.sort_by(|a, b| a.error().total_cmp(&b.error()));
        cands.truncate(top_k);
        cands
    }

    /// Generates and refines candidate substitutions for every node in
    /// `target_nodes`, filling [`Dals::cand_alcs`] and [`Dals::opt_alc`].
    pub fn calc_alcs(&mut self, target_nodes: &[AigNodeRef]) -> EngineResult<()> {
        self.cand_alcs.clear();
        self.opt_alc.clear();

        self.calc_truth_vec()?;
        if self.opts.show_progress {
            debug!("truth vectors computed ({} words)", self.opts.sim_64_cycles);
        }

        let time_info = sta::calc_slack(&self.approx)?;
        let s_nodes = self.approx.topo_sort_pi_and_nodes()?;

        // Cheap estimation pass: every earlier-arriving signal is a candidate.
        for t_node in target_nodes {
            let t_id = t_node.borrow().get_id();
            let t_at = time_info
                .get(&t_id)
                .ok_or(EngineError::MissingTiming(t_id))?
                .arrival_time;

            let mut cands = Vec::new();
            for s_node in &s_nodes {
                let s_id = s_node.borrow().get_id();
                if s_id == t_id {
                    continue;
                }
                let s_at = time_info
                    .get(&s_id)
                    .ok_or(EngineError::MissingTiming(s_id))?
                    .arrival_time;
                if s_at >= t_at {
                    continue;
                }
                let est_error = self.est_pair_error(t_id, s_id)?;
                let (is_complemented, stored) = Self::stored_error(est_error, s_at, t_at);
                cands.push(Alc::new(t_node, s_node, is_complemented, stored));
            }
            self.cand_alcs
                .insert(t_id, Self::rank_candidates(cands, self.opts.top_k));
        }
        if self.opts.show_progress {
            debug!("candidate substitutions for {} targets", target_nodes.len());
        }

        // Refinement pass: measure each survivor against the reference
        // network with a full simulation.
        for t_node in target_nodes {
            let t_id = t_node.borrow().get_id();
            let mut k_alcs = self.cand_alcs.remove(&t_id).unwrap_or_default();
            for alc in k_alcs.iter_mut() {
                alc.apply(&mut self.approx)?;
                let err = sim::error_rate(&self.target, &self.approx, self.opts.sim_64_cycles)?;
                alc.set_error(err);
                alc.recover(&mut self.approx)?;
            }
            k_alcs.sort_by(|a, b| a.error().total_cmp(&b.error()));
            if let Some(best) = k_alcs.first() {
                self.opt_alc.insert(t_id, best.clone());
            }
            self.cand_alcs.insert(t_id, k_alcs);
        }
        if self.opts.show_progress {
            debug!("optimal substitutions refined");
        }

        Ok(())
    }

    /// Runs rounds of min-cut delay reduction until the simulated error rate
    /// reaches `err_constraint` (or a round stops making progress).
    pub fn run(&mut self, err_constraint: f64) -> EngineResult<RunSummary> {
        let initial_delay = circuit_delay(&self.target)?;
        let mut final_delay = initial_delay;
        let mut err = 0.0;
        let mut round = 0;
        let mut prev_state: Option<(f64, i64)> = None;

        while err < err_constraint {
            round += 1;
            let time_info = sta::calc_slack(&self.approx)?;

            let mut crit_all = Vec::new();
            let mut crit_gates = Vec::new();
            for obj in self.approx.topo_sort_pi_and_nodes()? {
                let id = obj.borrow().get_id();
                let ti = time_info.get(&id).ok_or(EngineError::MissingTiming(id))?;
                if ti.slack == 0 {
                    crit_all.push(obj.clone());
                    if obj.borrow().is_gate() {
                        crit_gates.push(obj);
                    }
                }
            }

            self.calc_alcs(&crit_gates)?;

            // Node splitting: vertex u is the entry of node u, vertex u + m
            // its exit; the internal arc carries the substitution error.
            let m = self.approx.max_id_bound() as usize;
            let (source, sink) = (0, m - 1);
            let mut dinic = Dinic::new(2 * m);

            // A capacity strictly below any positive refined error of the
            // round, small enough that taking every free arc is still cheaper
            // than one paid arc.
            let mut zero_arcs = 0usize;
            let mut min_positive = f64::INFINITY;
            for obj in &crit_gates {
                if let Some(alc) = self.opt_alc.get(&obj.borrow().get_id()) {
                    if alc.error() > 0.0 {
                        min_positive = min_positive.min(alc.error());
                    } else {
                        zero_arcs += 1;
                    }
                }
            }
            let sentinel = if min_positive.is_finite() {
                min_positive / (2.0 * (zero_arcs as f64 + 1.0))
            } else {
                1.0
            };

            for obj in &crit_all {
                let obj = obj.borrow();
                let u = obj.get_id() as usize;
                if obj.is_input() {
                    dinic.add_edge(source, u, INF_CAPACITY);
                } else {
                    match self.opt_alc.get(&obj.get_id()) {
                        Some(alc) if alc.error() > 0.0 => dinic.add_edge(u, u + m, alc.error()),
                        Some(_) => dinic.add_edge(u, u + m, sentinel),
                        // No legal substitute: the node cannot be cut.
                        None => dinic.add_edge(u, u + m, INF_CAPACITY),
                    }
                    if obj.is_po_driver() {
                        dinic.add_edge(u + m, sink, INF_CAPACITY);
                    }
                }
            }

            let mut crit_edges: Vec<(NodeId, NodeId)> = sta::critical_graph(&self.approx)?
                .into_iter()
                .flat_map(|(u, vs)| vs.into_iter().map(move |v| (u, v)))
                .collect();
            crit_edges.sort_unstable();
            for (u, v) in crit_edges {
                let u_node = self
                    .approx
                    .get_node(u)
                    .ok_or(AigError::NodeDoesNotExist(u))?;
                let from = if u_node.borrow().is_input() {
                    u as usize
                } else {
                    u as usize + m
                };
                dinic.add_edge(from, v as usize, INF_CAPACITY);
            }

            let cut = dinic.min_cut(source, sink);

            info!("> round {}", round);
            let mut applied = 0usize;
            for arc in cut {
                // Only the node-internal arcs are actionable; an "uncuttable"
                // arc can show up when some critical path has no substitute
                // anywhere along it.
                if arc.v != arc.u + m {
                    continue;
                }
                let id = arc.u as NodeId;
                let alc = match self.opt_alc.get_mut(&id) {
                    Some(alc) => alc,
                    None => {
                        warn!(
                            "cut node {} has no substitution, skipping",
                            self.approx.node_name(id)
                        );
                        continue;
                    }
                };
                let sub_id = alc.substitute().borrow().get_id();
                info!(
                    "min-cut: {} ---> {} : {} : {:.6}",
                    self.approx.node_name(id),
                    self.approx.node_name(sub_id),
                    alc.is_complemented(),
                    alc.error()
                );
                alc.apply(&mut self.approx)?;
                applied += 1;
            }

            // Round-end cleanup: snapshots die here, then detached targets
            // get garbage-collected.
            self.cand_alcs.clear();
            self.opt_alc.clear();
            self.approx.update();

            err = sim::error_rate(&self.target, &self.approx, self.opts.sim_64_cycles)?;
            let new_delay = circuit_delay(&self.approx)?;
            info!("error rate: {:.6}", err);
            info!("delay: {} ---> {}", initial_delay, new_delay);

            if applied > 0 && new_delay >= final_delay {
                warn!("round {} did not reduce the delay", round);
            }
            let stalled = applied == 0 || prev_state == Some((err, new_delay));
            final_delay = new_delay;
            if stalled && err < err_constraint {
                warn!("round {} made no progress, stopping early", round);
                break;
            }
            prev_state = Some((err, new_delay));
        }

        Ok(RunSummary {
            rounds: round,
            error_rate: err,
            initial_delay,
            final_delay,
        })
    }
}

fn circuit_delay(aig: &Aig) -> EngineResult<i64> {
    Ok(sta::k_most_critical_paths(aig, 1)?
        .first()
        .map(|path| path.max_delay)
        .unwrap_or(0))
}
