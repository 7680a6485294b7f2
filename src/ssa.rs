// BSD 3-Clause License
//
// Copyright © 2021 The sass-ssa developers
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
//

use crate::{dump, Addr, BasicBlock, Function, Instruction, Module, Operand, OperandFlags};
use indexmap::map::IndexMap;
use log::{debug, log_enabled, trace, Level};
use std::collections::{HashSet, VecDeque};

/// Reaching register versions at a program point, keyed by base register name
type RegVersions = IndexMap<String, String>;

/// φ candidates of a block: per base register, the φ version and the incoming
/// version contributed by each predecessor
type PhiNodes = IndexMap<String, (String, Vec<(Addr, String)>)>;

// The dataflow loop settles after a handful of rounds on well-formed input;
// reaching this many means the routine graph is corrupt.
const MAX_ROUNDS: usize = 10_000;

/// A rewrite applied over every function of a [`Module`]
pub trait Transform {
    /// Name of the transform, for diagnostics
    fn name(&self) -> &'static str;

    /// Run the transform, mutating the module in place
    fn apply(&self, module: &mut Module);
}

/// Rewrites every function into static single assignment form: each
/// general-purpose register ends up defined exactly once, control-flow joins
/// select among incoming definitions through `PHI` pseudo-instructions, and
/// the surviving names are compacted into a dense `R1, R2, ...` namespace.
///
/// Predicate registers, the zero register `RZ` and the constant true
/// predicate `PT` keep their names throughout.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ssa;

impl Transform for Ssa {
    fn name(&self) -> &'static str {
        "ssa"
    }

    fn apply(&self, module: &mut Module) {
        debug!("{}: processing {} functions", self.name(), module.functions.len());

        for function in &mut module.functions {
            process_function(function);
        }
    }
}

fn process_function(function: &mut Function) {
    let worklist = traverse_cfg(function);

    let entry = match worklist.first() {
        Some(entry) => *entry,
        None => return,
    };

    let mut in_regs: IndexMap<Addr, RegVersions> = IndexMap::new();
    let mut out_regs: IndexMap<Addr, RegVersions> = IndexMap::new();
    let mut phi_nodes: IndexMap<Addr, PhiNodes> = IndexMap::new();

    for addr in &worklist {
        in_regs.insert(*addr, RegVersions::new());
        out_regs.insert(*addr, RegVersions::new());
        phi_nodes.insert(*addr, PhiNodes::new());
    }

    let mut rounds = 0;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;
        assert!(
            rounds <= MAX_ROUNDS,
            "{}: dataflow did not converge after {} rounds",
            function.name,
            MAX_ROUNDS
        );

        for addr in &worklist {
            changed |= process_block(
                function,
                *addr,
                entry,
                &mut in_regs,
                &mut out_regs,
                &mut phi_nodes,
            );
        }
    }

    debug!(
        "{}: {} blocks reached a fixed point after {} rounds",
        function.name,
        worklist.len(),
        rounds
    );

    insert_phi_nodes(function, &worklist, &phi_nodes);
    remap_registers(function, &worklist);

    if log_enabled!(Level::Trace) {
        for addr in &worklist {
            let block = &function.blocks[addr];
            trace!("{}: block {}", function.name, block.addr);

            for instr in &block.instructions {
                trace!("  {} -> {}", instr.inst_content, dump::render_instruction(instr));
            }
        }
    }

    update_inst_content(function, &worklist);
}

/// Deterministic work-list order: breadth-first from the entry block along
/// successor edges. Unreachable blocks are left out on purpose.
fn traverse_cfg(function: &Function) -> Vec<Addr> {
    let mut worklist = Vec::new();
    let entry = match function.blocks.get_index(0) {
        Some((addr, _)) => *addr,
        None => return worklist,
    };

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(entry);

    while let Some(addr) = queue.pop_front() {
        if !visited.insert(addr) {
            continue;
        }

        worklist.push(addr);

        for succ in &function.blocks[&addr].succs {
            if !visited.contains(succ) {
                queue.push_back(*succ);
            }
        }
    }

    worklist
}

/// Strip the version payload, recovering the base register name
fn base_register_name(reg: &str) -> &str {
    match reg.find('@') {
        Some(split) => &reg[..split],
        None => reg,
    }
}

/// Version `reg` against its defining instruction
fn versioned_register_name(reg: &str, inst_id: &str) -> String {
    format!("{}@{}", base_register_name(reg), inst_id)
}

fn process_block(
    function: &mut Function,
    addr: Addr,
    entry: Addr,
    in_regs: &mut IndexMap<Addr, RegVersions>,
    out_regs: &mut IndexMap<Addr, RegVersions>,
    phi_nodes: &mut IndexMap<Addr, PhiNodes>,
) -> bool {
    let new_in = compute_in(function, addr, out_regs, phi_nodes);

    // The entry block is re-run every round: its input set is always empty,
    // so the unchanged-input shortcut would otherwise keep its first visit
    // from ever seeding OUT.
    if addr != entry && in_regs[&addr] == new_in {
        return false;
    }

    let mut curr = new_in.clone();
    in_regs.insert(addr, new_in);

    rename_block(&mut function.blocks[&addr], &mut curr);

    update_out_register_set(addr, curr, out_regs)
}

fn compute_in(
    function: &Function,
    addr: Addr,
    out_regs: &IndexMap<Addr, RegVersions>,
    phi_nodes: &mut IndexMap<Addr, PhiNodes>,
) -> RegVersions {
    let block = &function.blocks[&addr];
    if block.preds.is_empty() {
        return RegVersions::new();
    }

    let phis = &mut phi_nodes[&addr];
    phis.clear();

    let register_versions = collect_predecessor_versions(block, out_regs);
    generate_in_set(block, register_versions, phis)
}

/// Gather every version of every base register flowing out of a predecessor,
/// in predecessor order. Predecessors without a known `OUT` yet are skipped;
/// later rounds of the fixed point fill them in.
fn collect_predecessor_versions(
    block: &BasicBlock,
    out_regs: &IndexMap<Addr, RegVersions>,
) -> IndexMap<String, Vec<(Addr, String)>> {
    let mut register_versions: IndexMap<String, Vec<(Addr, String)>> = IndexMap::new();

    for pred in &block.preds {
        if let Some(out) = out_regs.get(pred) {
            for (base, version) in out {
                register_versions
                    .entry(base.clone())
                    .or_insert_with(Vec::new)
                    .push((*pred, version.clone()));
            }
        }
    }

    register_versions
}

/// Build the IN set from the collected contributions: a base supplied by a
/// single predecessor inherits that version, a base supplied by several gets
/// a φ version recorded for later materialisation. Contributions are not
/// deduplicated by version, so equal versions from two predecessors still
/// produce a φ.
fn generate_in_set(
    block: &BasicBlock,
    register_versions: IndexMap<String, Vec<(Addr, String)>>,
    phis: &mut PhiNodes,
) -> RegVersions {
    let mut incoming = RegVersions::new();

    for (base, mut versions) in register_versions {
        if versions.len() == 1 {
            let (_, version) = versions.remove(0);
            incoming.insert(base, version);
        } else if versions.len() > 1 {
            let phi_version = format!("{}@phi_{}", base, block.addr);
            incoming.insert(base.clone(), phi_version.clone());
            phis.insert(base, (phi_version, versions));
        }
    }

    incoming
}

/// Walk `block` in program order, substituting reaching versions into uses
/// and minting a fresh version at each definition
fn rename_block(block: &mut BasicBlock, curr: &mut RegVersions) {
    for instr in &mut block.instructions {
        rewrite_uses(instr, curr);
        rewrite_def(instr, curr);
    }
}

fn rewrite_uses(instr: &mut Instruction, curr: &RegVersions) {
    for idx in 1..instr.operands.len() {
        rewrite_use(instr, idx, curr);
    }
}

fn rewrite_use(instr: &mut Instruction, idx: usize, curr: &RegVersions) {
    let operand = &instr.operands[idx];
    if !operand.is_reg() || operand.reg().is_empty() {
        return;
    }

    // Predicate registers and the zero register are never renamed
    let reg = operand.reg().to_string();
    if instr.is_predicate_reg(&reg) || reg == "RZ" {
        return;
    }

    let base = base_register_name(&reg).to_string();
    if let Some(version) = curr.get(&base) {
        let version = version.clone();
        instr.operands[idx].rename(&version);
    }
}

fn rewrite_def(instr: &mut Instruction, curr: &mut RegVersions) {
    let (is_reg, is_mem_addr) = match instr.def() {
        Some(def) => (def.is_reg(), def.is_mem_addr()),
        None => return,
    };

    if !is_reg {
        return;
    }

    // STG.E [R6] R0: the def slot of a store reads R6 to form the address,
    // so it is rewritten like a use and no version is minted
    if is_mem_addr {
        rewrite_use(instr, 0, curr);
        return;
    }

    let reg = instr.operands[0].reg().to_string();
    if instr.is_predicate_reg(&reg) || reg == "RZ" {
        return;
    }

    let version = versioned_register_name(&reg, &instr.id);
    curr.insert(base_register_name(&reg).to_string(), version.clone());
    instr.operands[0].rename(&version);
}

fn update_out_register_set(
    addr: Addr,
    curr: RegVersions,
    out_regs: &mut IndexMap<Addr, RegVersions>,
) -> bool {
    let changed = match out_regs.get(&addr) {
        Some(old) => *old != curr,
        None => true,
    };
    out_regs.insert(addr, curr);
    changed
}

/// Materialise the recorded φ candidates as `PHI` pseudo-instructions at the
/// head of their blocks. Leading `PHI` instructions from an earlier run are
/// stripped first, so re-running the pass does not stack them up.
fn insert_phi_nodes(
    function: &mut Function,
    worklist: &[Addr],
    phi_nodes: &IndexMap<Addr, PhiNodes>,
) {
    let mut inserted = 0;

    for addr in worklist {
        let block = &mut function.blocks[addr];
        clear_existing_phi_instructions(block);

        let phis = &phi_nodes[addr];
        if phis.is_empty() {
            continue;
        }

        let mut phi_instructions = create_phi_instructions(block, phis);
        inserted += phi_instructions.len();
        phi_instructions.append(&mut block.instructions);
        block.instructions = phi_instructions;
    }

    debug!("{}: inserted {} phi nodes", function.name, inserted);
}

fn clear_existing_phi_instructions(block: &mut BasicBlock) {
    while block
        .instructions
        .first()
        .map_or(false, |instr| instr.opcodes == ["PHI"])
    {
        block.instructions.remove(0);
    }
}

fn create_phi_instructions(block: &BasicBlock, phis: &PhiNodes) -> Vec<Instruction> {
    let mut instructions = Vec::with_capacity(phis.len());

    for (base, (phi_version, incoming)) in phis {
        instructions.push(create_phi_instruction(block, base, phi_version, incoming));
    }

    instructions
}

/// Materialise `PHI <def> <use per predecessor>`, with the uses ordered by
/// the predecessor list of the owning block
fn create_phi_instruction(
    block: &BasicBlock,
    base: &str,
    phi_version: &str,
    incoming: &[(Addr, String)],
) -> Instruction {
    let mut sorted: Vec<&(Addr, String)> = incoming.iter().collect();
    sorted.sort_by_key(|entry| block.preds.iter().position(|pred| *pred == entry.0));

    let mut operands = Vec::with_capacity(sorted.len() + 1);
    operands.push(Operand::new(phi_version, phi_version, "", 0, OperandFlags::REG));

    for entry in &sorted {
        operands.push(Operand::new(&entry.1, &entry.1, "", 0, OperandFlags::REG));
    }

    let incoming_versions: Vec<&str> = sorted.iter().map(|entry| entry.1.as_str()).collect();
    let inst_content = format!("PHI {} {}", phi_version, incoming_versions.join(" "));

    Instruction::new(
        format!("phi_{}_{}", block.addr, base),
        vec!["PHI".to_string()],
        operands,
        inst_content,
    )
}

/// Rewrite every versioned register into the dense `R{n}` namespace. The
/// numbering is assigned in walk order, so it is stable across runs.
fn remap_registers(function: &mut Function, worklist: &[Addr]) {
    let mut mapping: IndexMap<String, String> = IndexMap::new();

    for addr in worklist {
        for instr in &function.blocks[addr].instructions {
            for operand in &instr.operands {
                if !operand.is_reg() || operand.reg().is_empty() {
                    continue;
                }

                let reg = operand.reg();
                if instr.is_predicate_reg(reg) || reg == "RZ" || reg == "PT" {
                    continue;
                }

                if !mapping.contains_key(reg) {
                    let compact = format!("R{}", mapping.len() + 1);
                    mapping.insert(reg.to_string(), compact);
                }
            }
        }
    }

    for addr in worklist {
        let block = &mut function.blocks[addr];

        for instr in &mut block.instructions {
            for idx in 0..instr.operands.len() {
                let operand = &instr.operands[idx];
                if !operand.is_reg() || operand.reg().is_empty() {
                    continue;
                }

                let reg = operand.reg().to_string();
                if instr.is_predicate_reg(&reg) || reg == "RZ" {
                    continue;
                }

                if let Some(compact) = mapping.get(&reg) {
                    let compact = compact.clone();
                    instr.operands[idx].rename(&compact);
                }
            }
        }
    }

    debug!("{}: remapped {} registers", function.name, mapping.len());
}

/// Refresh each instruction's textual mirror after renaming
fn update_inst_content(function: &mut Function, worklist: &[Addr]) {
    for addr in worklist {
        let block = &mut function.blocks[addr];

        for instr in &mut block.instructions {
            instr.inst_content = dump::render_instruction(instr);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{InstructionBuilder, Operand};
    use pretty_assertions::assert_eq;

    fn contents(function: &Function, addr: Addr) -> Vec<String> {
        function.blocks[&addr]
            .instructions
            .iter()
            .map(|instr| instr.inst_content.clone())
            .collect()
    }

    fn diamond() -> Module {
        let mut function = Function::new("kernel");
        function.create_block(Addr(0x00)).unwrap();
        function.create_block(Addr(0x10)).unwrap();
        function.create_block(Addr(0x20)).unwrap();
        function.create_block(Addr(0x30)).unwrap();
        function.add_edge(Addr(0x00), Addr(0x10)).unwrap();
        function.add_edge(Addr(0x00), Addr(0x20)).unwrap();
        function.add_edge(Addr(0x10), Addr(0x30)).unwrap();
        function.add_edge(Addr(0x20), Addr(0x30)).unwrap();

        InstructionBuilder::new(&mut function, Addr(0x00))
            .mov(Operand::register("R2"), Operand::immediate(0x1))
            .bra(Operand::immediate(0x10));
        InstructionBuilder::new(&mut function, Addr(0x10))
            .mov(Operand::register("R10"), Operand::immediate(0x2));
        InstructionBuilder::new(&mut function, Addr(0x20))
            .mov(Operand::register("R10"), Operand::immediate(0x3));
        InstructionBuilder::new(&mut function, Addr(0x30))
            .mov(Operand::register("R5"), Operand::register("R10"));

        Module {
            functions: vec![function],
        }
    }

    fn counting_loop() -> Module {
        let mut function = Function::new("kernel");
        function.create_block(Addr(0x00)).unwrap();
        function.create_block(Addr(0x10)).unwrap();
        function.create_block(Addr(0x20)).unwrap();
        function.add_edge(Addr(0x00), Addr(0x10)).unwrap();
        function.add_edge(Addr(0x10), Addr(0x10)).unwrap();
        function.add_edge(Addr(0x10), Addr(0x20)).unwrap();

        InstructionBuilder::new(&mut function, Addr(0x00))
            .mov(Operand::register("R5"), Operand::immediate(0x0));
        InstructionBuilder::new(&mut function, Addr(0x10)).iadd(
            Operand::register("R5"),
            Operand::register("R5"),
            Operand::immediate(0x1),
        );
        InstructionBuilder::new(&mut function, Addr(0x20))
            .mov(Operand::register("R2"), Operand::register("R5"))
            .exit();

        Module {
            functions: vec![function],
        }
    }

    fn store_kernel() -> Module {
        let mut function = Function::new("kernel");
        function.create_block(Addr(0)).unwrap();
        InstructionBuilder::new(&mut function, Addr(0))
            .mov(Operand::register("R6"), Operand::argument(0x140))
            .inst(
                &["STG", "E"],
                vec![Operand::memory("R6"), Operand::register("R0")],
            )
            .ldg(Operand::register("R7"), Operand::memory("R6+0x10"));

        Module {
            functions: vec![function],
        }
    }

    #[test]
    fn straight_line_single_assignment() {
        let mut function = Function::new("kernel");
        function.create_block(Addr(0)).unwrap();
        InstructionBuilder::new(&mut function, Addr(0))
            .iadd(
                Operand::register("R1"),
                Operand::register("R2"),
                Operand::register("R3"),
            )
            .imul(
                Operand::register("R1"),
                Operand::register("R1"),
                Operand::register("R2"),
            )
            .stg(Operand::memory("R4"), Operand::register("R1"));

        let mut module = Module {
            functions: vec![function],
        };
        Ssa.apply(&mut module);

        assert_eq!(
            contents(&module.functions[0], Addr(0)),
            vec!["IADD R1 R2 R3", "IMUL R4 R1 R2", "STG [R5] R4"]
        );
    }

    #[test]
    fn diamond_gets_phi_nodes_at_the_join() {
        let mut module = diamond();
        Ssa.apply(&mut module);
        let function = &module.functions[0];

        assert_eq!(contents(function, Addr(0x00)), vec!["MOV R1 0x1", "BRA 0x10"]);
        assert_eq!(contents(function, Addr(0x10)), vec!["MOV R2 0x2"]);
        assert_eq!(contents(function, Addr(0x20)), vec!["MOV R3 0x3"]);
        assert_eq!(
            contents(function, Addr(0x30)),
            vec!["PHI R4 R1 R1", "PHI R5 R2 R3", "MOV R6 R5"]
        );
    }

    #[test]
    fn phi_arity_matches_the_predecessor_count() {
        let mut module = diamond();
        Ssa.apply(&mut module);
        let function = &module.functions[0];
        let join = &function.blocks[&Addr(0x30)];

        for instr in &join.instructions {
            if instr.opcodes == ["PHI"] {
                assert_eq!(instr.operands.len(), 1 + join.preds.len());
            }
        }

        // Use order follows the predecessor order: 0x10 contributes first
        let phi = &join.instructions[1];
        assert_eq!(phi.operands[1].reg(), "R2");
        assert_eq!(phi.operands[2].reg(), "R3");
    }

    #[test]
    fn loop_phi_converges() {
        let mut module = counting_loop();
        Ssa.apply(&mut module);
        let function = &module.functions[0];

        assert_eq!(contents(function, Addr(0x00)), vec!["MOV R1 0x0"]);
        assert_eq!(
            contents(function, Addr(0x10)),
            vec!["PHI R2 R1 R3", "IADD R3 R2 0x1"]
        );
        assert_eq!(contents(function, Addr(0x20)), vec!["MOV R4 R3", "EXIT "]);
    }

    #[test]
    fn memory_address_definition_is_a_use() {
        let mut module = store_kernel();
        Ssa.apply(&mut module);

        assert_eq!(
            contents(&module.functions[0], Addr(0)),
            vec![
                "MOV R1 c[0x0][0x140]",
                "STG.E [R1] R2",
                "LDG R3 [R1+0x10]"
            ]
        );
    }

    #[test]
    fn excluded_registers_keep_their_names() {
        let mut function = Function::new("kernel");
        function.create_block(Addr(0)).unwrap();
        InstructionBuilder::new(&mut function, Addr(0))
            .iadd(
                Operand::register("R1"),
                Operand::register("RZ"),
                Operand::register("R2"),
            )
            .isetp(
                Operand::predicate("P0"),
                Operand::register("R1"),
                Operand::register("PT"),
            )
            .ldg(Operand::register("R3"), Operand::memory("RZ+0x10"));

        let mut module = Module {
            functions: vec![function],
        };
        Ssa.apply(&mut module);

        assert_eq!(
            contents(&module.functions[0], Addr(0)),
            vec!["IADD R1 RZ R2", "ISETP P0 R1 PT", "LDG R3 [RZ+0x10]"]
        );
    }

    #[test]
    fn reapplication_is_stable() {
        let mut module = store_kernel();
        Ssa.apply(&mut module);
        let snapshot = module.clone();

        Ssa.apply(&mut module);
        assert_eq!(module, snapshot);
    }

    #[test]
    fn equal_inputs_produce_equal_outputs() {
        let mut first = diamond();
        let mut second = diamond();
        Ssa.apply(&mut first);
        Ssa.apply(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn every_register_is_defined_exactly_once() {
        let mut module = counting_loop();
        Ssa.apply(&mut module);
        let function = &module.functions[0];

        let mut defs = Vec::new();
        for (_, block) in &function.blocks {
            for instr in &block.instructions {
                if let Some(def) = instr.def() {
                    if def.is_reg()
                        && !def.is_mem_addr()
                        && !instr.is_predicate_reg(def.reg())
                        && def.reg() != "RZ"
                        && def.reg() != "PT"
                    {
                        defs.push(def.reg().to_string());
                    }
                }
            }
        }

        let unique: HashSet<&String> = defs.iter().collect();
        assert_eq!(unique.len(), defs.len());
    }

    #[test]
    fn compaction_is_dense() {
        let mut module = diamond();
        Ssa.apply(&mut module);
        let function = &module.functions[0];

        let mut registers = HashSet::new();
        for (_, block) in &function.blocks {
            for instr in &block.instructions {
                for operand in &instr.operands {
                    if operand.is_reg()
                        && !operand.reg().is_empty()
                        && !instr.is_predicate_reg(operand.reg())
                        && operand.reg() != "RZ"
                        && operand.reg() != "PT"
                    {
                        registers.insert(operand.reg().to_string());
                    }
                }
            }
        }

        let expected: HashSet<String> = (1..=6).map(|n| format!("R{}", n)).collect();
        assert_eq!(registers, expected);
    }

    #[test]
    fn unreachable_blocks_are_left_alone() {
        let mut function = Function::new("kernel");
        function.create_block(Addr(0x00)).unwrap();
        function.create_block(Addr(0x40)).unwrap();
        InstructionBuilder::new(&mut function, Addr(0x00))
            .mov(Operand::register("R1"), Operand::immediate(0x1));
        InstructionBuilder::new(&mut function, Addr(0x40))
            .mov(Operand::register("R9"), Operand::immediate(0x7));

        let mut module = Module {
            functions: vec![function],
        };
        Ssa.apply(&mut module);

        let function = &module.functions[0];
        assert_eq!(contents(function, Addr(0x00)), vec!["MOV R1 0x1"]);
        assert_eq!(contents(function, Addr(0x40)), vec!["MOV R9 0x7"]);
    }

    #[test]
    fn traversal_is_breadth_first_from_the_entry() {
        let module = diamond();
        let function = &module.functions[0];
        assert_eq!(
            traverse_cfg(function),
            vec![Addr(0x00), Addr(0x10), Addr(0x20), Addr(0x30)]
        );
    }
}
