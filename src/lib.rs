//! Delay-driven approximate logic synthesis (DALS) on and-inverter graphs.
//!
//! Given a combinational circuit, [`Dals`] maintains an immutable reference
//! network and a mutable working copy. Each round it finds the critical part
//! of the working copy, generates candidate substitutions (replace a critical
//! gate by an earlier-arriving signal, possibly inverted), scores them with
//! bit-parallel simulation, and picks the cheapest set that breaks every
//! critical path by solving a min-cut on the critical graph. Rounds repeat
//! until the simulated error rate reaches the caller's budget.
//!
//! The building blocks are usable on their own:
//! - [`aig`]: the mutable network, with a `.bench` reader
//! - [`sim`]: truth-vector simulation and error rates
//! - [`sta`]: unit-delay timing, critical graph, critical paths
//! - [`alc`]: a single substitution with exact undo
//! - [`flow`]: Dinic max-flow / min-cut
//!
//! ```rust
//! use dals::{Aig, AigEdge, Dals, EngineOptions};
//!
//! // A three-level circuit with a redundant double inverter.
//! let mut aig = Aig::new();
//! let a = aig.new_input(1).unwrap();
//! let b = aig.new_input(2).unwrap();
//! let g = aig
//!     .new_and(3, AigEdge::new(a.clone(), false), AigEdge::new(b.clone(), false))
//!     .unwrap();
//! let v = aig.create_inverter(&g).unwrap();
//! let w = aig.create_inverter(&v).unwrap();
//! aig.new_output(6, AigEdge::new(w.clone(), false)).unwrap();
//!
//! let mut dals = Dals::new(&aig, EngineOptions::default()).unwrap();
//! let summary = dals.run(0.1).unwrap();
//! assert!(summary.final_delay < summary.initial_delay);
//! ```

pub mod aig;
pub mod alc;
pub mod engine;
pub mod flow;
pub mod sim;
pub mod sta;

pub use aig::{Aig, AigEdge, AigError, AigNode, AigNodeRef, NodeId, Result};
pub use alc::Alc;
pub use engine::{Dals, EngineError, EngineOptions, EngineResult, RunSummary};
