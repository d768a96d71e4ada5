//! Parser for the ISCAS-85 `.bench` netlist format.
//!
//! Gates are decomposed into the AIG primitives on the fly: an `AND` becomes
//! an AND node, a `NOR` an AND node with both fanin edges complemented, a
//! `NAND`/`OR` the complemented form followed by a single-input gate carrying
//! the signal name, and `NOT`/`BUFF` become single-input gates. Signal names
//! are attached to the created nodes.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use crate::{Aig, AigEdge, Result, aig::error::ParserError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateOp {
    And,
    Nand,
    Or,
    Nor,
    Not,
    Buff,
}

impl GateOp {
    fn parse(token: &str) -> std::result::Result<Self, ParserError> {
        match token.to_ascii_uppercase().as_str() {
            "AND" => Ok(GateOp::And),
            "NAND" => Ok(GateOp::Nand),
            "OR" => Ok(GateOp::Or),
            "NOR" => Ok(GateOp::Nor),
            "NOT" => Ok(GateOp::Not),
            "BUFF" | "BUF" => Ok(GateOp::Buff),
            other => Err(ParserError::UnsupportedFeature(format!(
                "gate type {}",
                other
            ))),
        }
    }

    fn arity(self) -> usize {
        match self {
            GateOp::Not | GateOp::Buff => 1,
            _ => 2,
        }
    }
}

#[derive(Debug, Clone)]
struct GateDef {
    op: GateOp,
    args: Vec<String>,
}

/// `NAME(arg, ...)` with a fixed leading keyword, eg `INPUT(a)`.
fn parse_call(line: &str) -> std::result::Result<(&str, Vec<String>), ParserError> {
    let open = line
        .find('(')
        .ok_or_else(|| ParserError::InvalidToken(line.to_string()))?;
    let close = line
        .rfind(')')
        .ok_or_else(|| ParserError::InvalidToken(line.to_string()))?;
    if close < open {
        return Err(ParserError::InvalidToken(line.to_string()));
    }
    let head = line[..open].trim();
    let args = line[open + 1..close]
        .split(',')
        .map(|arg| arg.trim().to_string())
        .filter(|arg| !arg.is_empty())
        .collect();
    Ok((head, args))
}

#[derive(Debug, Default)]
struct BenchFile {
    inputs: Vec<String>,
    outputs: Vec<String>,
    defs: HashMap<String, GateDef>,
    def_order: Vec<String>,
}

fn parse_bench(text: &str) -> std::result::Result<BenchFile, ParserError> {
    let mut file = BenchFile::default();

    for raw_line in text.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if let Some((target, rhs)) = line.split_once('=') {
            let target = target.trim().to_string();
            let (head, args) = parse_call(rhs.trim())?;
            let op = GateOp::parse(head)?;
            if args.len() != op.arity() {
                return Err(ParserError::InvalidToken(format!(
                    "{}: expected {} operands, got {}",
                    line,
                    op.arity(),
                    args.len()
                )));
            }
            if file.defs.insert(target.clone(), GateDef { op, args }).is_some() {
                return Err(ParserError::InvalidToken(format!(
                    "signal {} defined twice",
                    target
                )));
            }
            file.def_order.push(target);
        } else {
            let (head, mut args) = parse_call(line)?;
            if args.len() != 1 {
                return Err(ParserError::InvalidToken(line.to_string()));
            }
            let arg = args.pop().unwrap();
            match head.to_ascii_uppercase().as_str() {
                "INPUT" => file.inputs.push(arg),
                "OUTPUT" => file.outputs.push(arg),
                other => {
                    return Err(ParserError::UnsupportedFeature(format!(
                        "declaration {}",
                        other
                    )));
                }
            }
        }
    }

    Ok(file)
}

/// Builds the AIG bottom-up from parsed definitions, resolving each signal to
/// the edge that carries its value.
struct Builder<'a> {
    file: &'a BenchFile,
    aig: Aig,
    signals: HashMap<String, AigEdge>,
}

impl Builder<'_> {
    fn resolve(&mut self, name: &str) -> Result<AigEdge> {
        if let Some(edge) = self.signals.get(name) {
            return Ok(edge.clone());
        }

        // Iterative post-order over the definition DAG; `visiting` catches
        // definition cycles.
        let mut visiting: HashSet<String> = HashSet::new();
        let mut stack: Vec<(String, bool)> = vec![(name.to_string(), false)];

        while let Some((signal, last_time)) = stack.pop() {
            if last_time {
                visiting.remove(&signal);
                self.build_gate(&signal)?;
                continue;
            }
            if self.signals.contains_key(&signal) {
                continue;
            }
            if !visiting.insert(signal.clone()) {
                return Err(ParserError::UnresolvedSignal(signal).into());
            }

            let def = self
                .file
                .defs
                .get(&signal)
                .ok_or_else(|| ParserError::UnresolvedSignal(signal.clone()))?
                .clone();
            stack.push((signal, true));
            for arg in def.args.iter().rev() {
                if !self.signals.contains_key(arg) {
                    if visiting.contains(arg) {
                        return Err(ParserError::UnresolvedSignal(arg.clone()).into());
                    }
                    stack.push((arg.clone(), false));
                }
            }
        }

        Ok(self.signals[name].clone())
    }

    /// Every operand of `name` is resolved; create its node(s).
    fn build_gate(&mut self, name: &str) -> Result<()> {
        let def = self.file.defs[name].clone();
        let args: Vec<AigEdge> = def
            .args
            .iter()
            .map(|arg| self.signals[arg].clone())
            .collect();

        let node = match def.op {
            GateOp::And => {
                let id = self.aig.max_obj_id() + 1;
                self.aig.new_and(id, args[0].clone(), args[1].clone())?
            }
            GateOp::Nor => {
                let id = self.aig.max_obj_id() + 1;
                self.aig.new_and(id, !args[0].clone(), !args[1].clone())?
            }
            GateOp::Nand => {
                let aux_id = self.aig.max_obj_id() + 1;
                let aux = self.aig.new_and(aux_id, args[0].clone(), args[1].clone())?;
                let id = self.aig.max_obj_id() + 1;
                self.aig.new_inv(id, AigEdge::new(aux, true))?
            }
            GateOp::Or => {
                let aux_id = self.aig.max_obj_id() + 1;
                let aux = self
                    .aig
                    .new_and(aux_id, !args[0].clone(), !args[1].clone())?;
                let id = self.aig.max_obj_id() + 1;
                self.aig.new_inv(id, AigEdge::new(aux, true))?
            }
            GateOp::Not => {
                let id = self.aig.max_obj_id() + 1;
                self.aig.new_inv(id, !args[0].clone())?
            }
            GateOp::Buff => {
                let id = self.aig.max_obj_id() + 1;
                self.aig.new_inv(id, args[0].clone())?
            }
        };

        let id = node.borrow().get_id();
        self.aig.set_name(id, name)?;
        self.signals
            .insert(name.to_string(), AigEdge::new(node, false));
        Ok(())
    }
}

impl Aig {
    /// Reads a circuit from an ISCAS-85 `.bench` file.
    pub fn from_bench_file<P: AsRef<Path>>(path: P) -> Result<Aig> {
        let text = fs::read_to_string(path)
            .map_err(|e| ParserError::IoError(e.to_string()))?;
        Aig::from_bench_str(&text)
    }

    /// Reads a circuit from `.bench` text.
    pub fn from_bench_str(text: &str) -> Result<Aig> {
        let file = parse_bench(text)?;

        let mut builder = Builder {
            file: &file,
            aig: Aig::new(),
            signals: HashMap::new(),
        };

        for input in &file.inputs {
            let id = builder.aig.max_obj_id() + 1;
            let node = builder.aig.new_input(id)?;
            builder.aig.set_name(id, input.clone())?;
            builder
                .signals
                .insert(input.clone(), AigEdge::new(node, false));
        }

        for signal in &file.def_order {
            builder.resolve(signal)?;
        }

        for output in &file.outputs {
            let edge = builder.resolve(output)?;
            let id = builder.aig.max_obj_id() + 1;
            builder.aig.new_output(id, edge)?;
            builder.aig.set_name(id, output.clone())?;
        }

        let mut aig = builder.aig;
        aig.update();
        aig.check_integrity()?;
        Ok(aig)
    }
}


#[cfg(test)]
mod test {
    use super::test_netlists::C17;
    use crate::Aig;

    #[test]
    fn parse_c17() {
        let aig = Aig::from_bench_str(C17).unwrap();
        assert_eq!(aig.get_inputs().len(), 5);
        assert_eq!(aig.get_outputs().len(), 2);
        aig.check_integrity().unwrap();

        // Each NAND decomposes into an AND plus a single-input gate.
        let gates = aig
            .topo_sort_pi_and_nodes()
            .unwrap()
            .iter()
            .filter(|n| n.borrow().is_gate())
            .count();
        assert_eq!(gates, 12);

        // Named signals resolve to named nodes.
        let names: Vec<String> = aig
            .topo_sort_pi_and_nodes()
            .unwrap()
            .iter()
            .map(|n| aig.node_name(n.borrow().get_id()))
            .collect();
        for expected in ["1gat", "10gat", "16gat", "22gat"] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[test]
    fn parse_all_gate_kinds() {
        let text = "\
INPUT(a)
INPUT(b)
OUTPUT(f)
g1 = AND(a, b)
g2 = OR(a, b)
g3 = NOR(g1, g2)
g4 = NOT(g3)
g5 = BUFF(g4)
f = NAND(g5, b)
";
        let aig = Aig::from_bench_str(text).unwrap();
        assert_eq!(aig.get_inputs().len(), 2);
        assert_eq!(aig.get_outputs().len(), 1);
        aig.check_integrity().unwrap();
    }

    #[test]
    fn parse_out_of_order_definitions() {
        let text = "\
INPUT(a)
INPUT(b)
OUTPUT(f)
f = AND(g, b)
g = AND(a, b)
";
        let aig = Aig::from_bench_str(text).unwrap();
        aig.check_integrity().unwrap();
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Aig::from_bench_str("INPUT(a)\nf = XMAS(a, a)\n").is_err());
        assert!(Aig::from_bench_str("INPUT(a)\nf = AND(a)\n").is_err());
        assert!(Aig::from_bench_str("what even is this").is_err());
        // Undefined operand
        assert!(Aig::from_bench_str("INPUT(a)\nOUTPUT(f)\nf = AND(a, ghost)\n").is_err());
        // Definition cycle
        assert!(
            Aig::from_bench_str("INPUT(a)\nOUTPUT(f)\nf = AND(g, a)\ng = AND(f, a)\n").is_err()
        );
    }
}
