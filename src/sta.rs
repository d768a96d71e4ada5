//! Static timing analysis under the unit-delay model.
//!
//! Forward propagation computes arrival times (every gate costs one unit,
//! output markers are free), backward propagation computes required times
//! against the circuit delay, and slack is their difference. A node is
//! critical iff its slack is zero. The critical graph and critical-path
//! enumeration built on top of this drive the delay reducer.

use std::collections::{HashMap, HashSet};

use crate::{Aig, AigError, NodeId, Result};

/// Per-node timing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingInfo {
    pub arrival_time: i64,
    pub required_time: i64,
    pub slack: i64,
}

/// Required time of a node that feeds nothing: effectively unconstrained,
/// kept finite so slack arithmetic cannot overflow.
const UNCONSTRAINED: i64 = i64::MAX / 2;

/// Computes arrival time, required time and slack for every primary input
/// and every node reachable from the outputs.
pub fn calc_slack(aig: &Aig) -> Result<HashMap<NodeId, TimingInfo>> {
    let topo = aig.get_topological_sort()?;

    let mut arrival: HashMap<NodeId, i64> = HashMap::new();
    for input in aig.get_inputs() {
        arrival.insert(input.borrow().get_id(), 0);
    }
    for node in &topo {
        let node = node.borrow();
        if node.is_input() {
            continue;
        }
        let mut at = 0;
        for fanin in node.get_fanins() {
            let fanin_id = fanin.get_node_id();
            let fanin_at = *arrival
                .get(&fanin_id)
                .ok_or(AigError::NodeDoesNotExist(fanin_id))?;
            at = at.max(fanin_at);
        }
        let cost = if node.is_gate() { 1 } else { 0 };
        arrival.insert(node.get_id(), at + cost);
    }

    let delay = max_delay_from(&arrival, aig);

    let mut required: HashMap<NodeId, i64> = arrival
        .keys()
        .map(|&id| (id, UNCONSTRAINED))
        .collect();
    for output in aig.get_outputs() {
        required.insert(output.borrow().get_id(), delay);
    }
    for node in topo.iter().rev() {
        let node = node.borrow();
        let req = required[&node.get_id()];
        let cost = if node.is_gate() { 1 } else { 0 };
        for fanin in node.get_fanins() {
            let fanin_id = fanin.get_node_id();
            let entry = required
                .get_mut(&fanin_id)
                .ok_or(AigError::NodeDoesNotExist(fanin_id))?;
            *entry = (*entry).min(req - cost);
        }
    }

    Ok(arrival
        .into_iter()
        .map(|(id, at)| {
            let rt = required[&id];
            (
                id,
                TimingInfo {
                    arrival_time: at,
                    required_time: rt,
                    slack: rt - at,
                },
            )
        })
        .collect())
}

fn max_delay_from(arrival: &HashMap<NodeId, i64>, aig: &Aig) -> i64 {
    aig.get_outputs()
        .iter()
        .filter_map(|output| arrival.get(&output.borrow().get_id()))
        .copied()
        .max()
        .unwrap_or(0)
}

/// The subgraph of critical edges: an edge `(u, v)` is present iff both
/// endpoints have zero slack and `u` determines `v`'s arrival time, ie
/// `arrival(v) = arrival(u) + 1`. Output markers never appear.
pub fn critical_graph(aig: &Aig) -> Result<HashMap<NodeId, HashSet<NodeId>>> {
    let time_info = calc_slack(aig)?;
    let mut graph: HashMap<NodeId, HashSet<NodeId>> = HashMap::new();

    for node in aig.get_topological_sort()? {
        let node = node.borrow();
        if !node.is_gate() {
            continue;
        }
        let id = node.get_id();
        let ti = time_info[&id];
        if ti.slack != 0 {
            continue;
        }
        for fanin in node.get_fanins() {
            let fanin_id = fanin.get_node_id();
            let fanin_ti = time_info[&fanin_id];
            if fanin_ti.slack == 0 && fanin_ti.arrival_time + 1 == ti.arrival_time {
                graph.entry(fanin_id).or_default().insert(id);
            }
        }
    }

    Ok(graph)
}

/// A single critical path, from a primary input to an output marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriticalPath {
    /// The circuit delay; identical for every reported path.
    pub max_delay: i64,
    /// Node ids along the path, primary input first, output marker last.
    pub nodes: Vec<NodeId>,
}

/// Enumerates up to `k` maximum-delay paths, walking critical edges backward
/// from the latest-arriving outputs. Fanin slot order makes the enumeration
/// deterministic.
pub fn k_most_critical_paths(aig: &Aig, k: usize) -> Result<Vec<CriticalPath>> {
    let time_info = calc_slack(aig)?;
    let outputs = aig.get_outputs();
    if outputs.is_empty() || k == 0 {
        return Ok(Vec::new());
    }
    let delay = outputs
        .iter()
        .map(|output| time_info[&output.borrow().get_id()].arrival_time)
        .max()
        .unwrap_or(0);

    let mut paths = Vec::new();
    for output in outputs {
        if paths.len() >= k {
            break;
        }
        let output_id = output.borrow().get_id();
        if time_info[&output_id].arrival_time != delay {
            continue;
        }
        let driver = output.borrow().get_fanins()[0].get_node();

        // Backward DFS over critical-cause fanins, emitting complete paths.
        let mut stack: Vec<Vec<NodeId>> = vec![vec![driver.borrow().get_id()]];
        while let Some(path) = stack.pop() {
            if paths.len() >= k {
                break;
            }
            let last = *path.last().unwrap();
            let node = aig.get_node(last).ok_or(AigError::NodeDoesNotExist(last))?;
            if node.borrow().is_input() {
                let mut nodes: Vec<NodeId> = path.iter().rev().copied().collect();
                nodes.push(output_id);
                paths.push(CriticalPath {
                    max_delay: delay,
                    nodes,
                });
                continue;
            }
            let at = time_info[&last].arrival_time;
            for fanin in node.borrow().get_fanins().iter().rev() {
                let fanin_id = fanin.get_node_id();
                let fanin_ti = time_info[&fanin_id];
                if fanin_ti.slack == 0 && fanin_ti.arrival_time + 1 == at {
                    let mut extended = path.clone();
                    extended.push(fanin_id);
                    stack.push(extended);
                }
            }
        }
    }

    Ok(paths)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::AigEdge;
    use crate::aig::parser::test_netlists::C17;

    fn edge(node: &crate::AigNodeRef) -> AigEdge {
        AigEdge::new(node.clone(), false)
    }

    /// Two-level cone with a one-level side branch:
    /// g2 = (a AND b) AND c is critical, g5 = a AND c is not.
    fn two_cone_net() -> Aig {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        let b = aig.new_input(2).unwrap();
        let c = aig.new_input(3).unwrap();
        let g1 = aig.new_and(4, edge(&a), edge(&b)).unwrap();
        let g2 = aig.new_and(5, edge(&g1), edge(&c)).unwrap();
        let g5 = aig.new_and(6, edge(&a), edge(&c)).unwrap();
        aig.new_output(7, edge(&g2)).unwrap();
        aig.new_output(8, edge(&g5)).unwrap();
        aig
    }

    #[test]
    fn slack_on_two_cone_net() {
        let aig = two_cone_net();
        let ti = calc_slack(&aig).unwrap();

        assert_eq!(ti[&1].arrival_time, 0);
        assert_eq!(ti[&4].arrival_time, 1);
        assert_eq!(ti[&5].arrival_time, 2);
        assert_eq!(ti[&6].arrival_time, 1);
        assert_eq!(ti[&7].arrival_time, 2);

        // Critical spine: a, b, g1, g2.
        for id in [1u64, 2, 4, 5] {
            assert_eq!(ti[&id].slack, 0, "node {} should be critical", id);
        }
        // c and the side branch have one unit of slack.
        assert_eq!(ti[&3].slack, 1);
        assert_eq!(ti[&6].slack, 1);
    }

    #[test]
    fn critical_graph_on_two_cone_net() {
        let aig = two_cone_net();
        let graph = critical_graph(&aig).unwrap();

        assert_eq!(graph[&1], HashSet::from([4]));
        assert_eq!(graph[&2], HashSet::from([4]));
        assert_eq!(graph[&4], HashSet::from([5]));
        // Non-critical nodes have no outgoing critical edges.
        assert!(!graph.contains_key(&3));
        assert!(!graph.contains_key(&6));
    }

    #[test]
    fn critical_paths_on_two_cone_net() {
        let aig = two_cone_net();
        let paths = k_most_critical_paths(&aig, 4).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.max_delay == 2));
        let nodes: Vec<&Vec<NodeId>> = paths.iter().map(|p| &p.nodes).collect();
        assert!(nodes.contains(&&vec![1, 4, 5, 7]));
        assert!(nodes.contains(&&vec![2, 4, 5, 7]));

        // k truncates.
        assert_eq!(k_most_critical_paths(&aig, 1).unwrap().len(), 1);
    }

    #[test]
    fn c17_delay() {
        // c17 is three NANDs deep; each NAND decomposes into AND + inverter,
        // so the unit-delay depth is six.
        let aig = Aig::from_bench_str(C17).unwrap();
        let paths = k_most_critical_paths(&aig, 1).unwrap();
        assert_eq!(paths[0].max_delay, 6);

        let ti = calc_slack(&aig).unwrap();
        // Somebody must be critical.
        assert!(ti.values().any(|t| t.slack == 0));
        // Arrival times are non-negative throughout.
        assert!(ti.values().all(|t| t.arrival_time >= 0));
    }

    #[test]
    fn required_time_of_dead_input() {
        let mut aig = Aig::new();
        let a = aig.new_input(1).unwrap();
        aig.new_input(2).unwrap(); // feeds nothing
        aig.new_output(3, edge(&a)).unwrap();

        let ti = calc_slack(&aig).unwrap();
        assert_eq!(ti[&1].slack, 0);
        // The dangling input is wildly unconstrained, never critical.
        assert!(ti[&2].slack > 0);
    }
}
