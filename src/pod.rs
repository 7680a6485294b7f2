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

use crate::{arch_info, Error, Lifter, Result};
use indexmap::map::IndexMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry address of a basic block inside a function
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Addr(pub u64);

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04x}", self.0)
    }
}

bitflags! {
    /// Flags describing operand classification
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct OperandFlags: u32 {
        /// General-purpose register access
        const REG = 1 << 0;
        /// Kernel argument slot in the constant bank
        const ARG = 1 << 1;
        /// Register read to compute a memory address (`[R6]`, `[R6+0x10]`)
        const MEM_ADDR = 1 << 2;
        /// Immediate value
        const IMMEDIATE = 1 << 3;
    }
}

/// SASS instruction operand
///
/// Operands are produced by the decoder and mutated in place by the renaming
/// machinery through [`Operand::rename`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    name: String,
    reg: String,
    mem_addr_offset: Option<String>,
    suffix: String,
    arg_offset: u64,
    flags: OperandFlags,
    immediate_value: Option<i64>,
    type_desc: String,
    skipped: bool,
    ir_type: Option<String>,
    ir_reg_name: Option<String>,
}

impl Operand {
    /// Build an operand from its display name, register identifier and
    /// classification flags. A `reg` of the form `base+offset` is split into
    /// the register identifier and the memory-address offset. Inconsistent
    /// classifications indicate a decoder bug and abort.
    pub fn new(
        name: &str,
        reg: &str,
        suffix: &str,
        arg_offset: u64,
        flags: OperandFlags,
    ) -> Operand {
        assert!(
            !(flags.contains(OperandFlags::REG)
                && flags.intersects(OperandFlags::ARG | OperandFlags::IMMEDIATE)),
            "register operand cannot also be {:?}",
            flags
        );
        assert!(
            !(flags.contains(OperandFlags::ARG) && flags.contains(OperandFlags::IMMEDIATE)),
            "argument operand cannot also be an immediate"
        );
        assert!(
            !flags.contains(OperandFlags::MEM_ADDR) || flags.contains(OperandFlags::REG),
            "memory-address operand must address through a register"
        );

        let (reg, mem_addr_offset) = match reg.find('+') {
            Some(split) => (reg[..split].to_string(), Some(reg[split + 1..].to_string())),
            None => (reg.to_string(), None),
        };

        Operand {
            name: name.to_string(),
            reg,
            mem_addr_offset,
            suffix: suffix.to_string(),
            arg_offset,
            flags,
            immediate_value: None,
            type_desc: "NOTYPE".to_string(),
            skipped: false,
            ir_type: None,
            ir_reg_name: None,
        }
    }

    /// General-purpose register operand
    pub fn register(name: &str) -> Operand {
        Operand::new(name, name, "", 0, OperandFlags::REG)
    }

    /// Memory-address operand; `reg` may carry a `+offset` suffix
    pub fn memory(reg: &str) -> Operand {
        Operand::new(reg, reg, "", 0, OperandFlags::REG | OperandFlags::MEM_ADDR)
    }

    /// Kernel argument slot at byte `offset` into the constant bank
    pub fn argument(offset: u64) -> Operand {
        Operand::new(
            &format!("{}[{:#x}]", arch_info::ARG_PREFIX, offset),
            "",
            "",
            offset,
            OperandFlags::ARG,
        )
    }

    /// Immediate operand
    pub fn immediate(value: i64) -> Operand {
        let mut operand = Operand::new(&format!("{:#x}", value), "", "", 0, OperandFlags::IMMEDIATE);
        operand.immediate_value = Some(value);
        operand
    }

    /// Special hardware register operand, e.g. `SR_TID.X`
    pub fn special(name: &str) -> Operand {
        Operand::new(name, "", "", 0, OperandFlags::empty())
    }

    /// Predicate register operand, e.g. `P0`
    pub fn predicate(name: &str) -> Operand {
        Operand::new(name, name, "", 0, OperandFlags::REG)
    }

    /// Display name of the operand
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register identifier, without any memory-address offset
    pub fn reg(&self) -> &str {
        &self.reg
    }

    /// Offset part of a `base+offset` memory address
    pub fn mem_addr_offset(&self) -> Option<&str> {
        self.mem_addr_offset.as_deref()
    }

    /// Modifier suffix attached by the decoder
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Byte offset into the constant bank for argument slots
    pub fn arg_offset(&self) -> u64 {
        self.arg_offset
    }

    /// Whether this operand accesses a general-purpose register
    pub fn is_reg(&self) -> bool {
        self.flags.contains(OperandFlags::REG)
    }

    /// Whether this operand is a kernel argument slot
    pub fn is_arg(&self) -> bool {
        self.flags.contains(OperandFlags::ARG)
    }

    /// Whether this operand computes a memory address
    pub fn is_mem_addr(&self) -> bool {
        self.flags.contains(OperandFlags::MEM_ADDR)
    }

    /// Whether this operand is an immediate value
    pub fn is_immediate(&self) -> bool {
        self.flags.contains(OperandFlags::IMMEDIATE)
    }

    /// The immediate value, if one was attached
    pub fn immediate_value(&self) -> Option<i64> {
        self.immediate_value
    }

    /// The zero register reads as zero and discards writes
    pub fn is_zero_reg(&self) -> bool {
        self.name == "RZ" || self.name == "SRZ"
    }

    /// The constant true predicate
    pub fn is_pt(&self) -> bool {
        self.name == "PT"
    }

    /// Whether this operand names one of the special hardware registers
    pub fn is_special_reg(&self) -> bool {
        arch_info::is_special_register(&self.name)
    }

    /// Thread index (`SR_TID.*`)
    pub fn is_thread_idx(&self) -> bool {
        self.name.starts_with(arch_info::SR_TID)
    }

    /// Block dimension (`SR_NTID.*`)
    pub fn is_block_dim(&self) -> bool {
        self.name.starts_with(arch_info::SR_NTID)
    }

    /// Block index (`SR_CTAID.*`)
    pub fn is_block_idx(&self) -> bool {
        self.name.starts_with(arch_info::SR_CTAID)
    }

    /// Lane id within the warp (`SR_LANE*`)
    pub fn is_lane_id(&self) -> bool {
        self.name.starts_with(arch_info::SR_LANE)
    }

    /// Warp id (`SR_WARP*`)
    pub fn is_warp_id(&self) -> bool {
        self.name.starts_with(arch_info::SR_WARP)
    }

    /// Type description attached by type inference
    pub fn type_desc(&self) -> &str {
        &self.type_desc
    }

    /// Attach a type description
    pub fn set_type_desc(&mut self, type_desc: &str) {
        self.type_desc = type_desc.to_string();
    }

    /// Whether a type description has been attached
    pub fn has_type_desc(&self) -> bool {
        self.type_desc != "NOTYPE"
    }

    /// Whether a pass has marked this operand to be ignored
    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Mark this operand to be ignored by later passes
    pub fn set_skip(&mut self) {
        self.skipped = true;
    }

    /// IR type of this operand, resolved through `lifter` once and cached
    pub fn ir_type(&mut self, lifter: &dyn Lifter) -> &str {
        if self.ir_type.is_none() {
            self.ir_type = Some(lifter.ir_type(&self.type_desc));
        }

        match &self.ir_type {
            Some(ir_type) => ir_type,
            None => unreachable!(),
        }
    }

    /// IR register name, derived from the register identifier and the type
    /// description once and cached
    pub fn ir_reg_name(&mut self) -> &str {
        if self.ir_reg_name.is_none() {
            self.ir_reg_name = Some(format!("{}{}", self.reg, self.type_desc));
        }

        match &self.ir_reg_name {
            Some(ir_reg_name) => ir_reg_name,
            None => unreachable!(),
        }
    }

    /// Point both the display name and the register identifier at `version`
    pub fn rename(&mut self, version: &str) {
        self.name = version.to_string();
        self.reg = version.to_string();
    }
}

/// SASS instruction: opcode list, operands and the textual form they mirror
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Identifier, unique within the owning function
    pub id: String,
    /// Mnemonic followed by its modifiers, dot-joined when printed
    pub opcodes: Vec<String>,
    /// Operands in encoding order; the definition comes first
    pub operands: Vec<Operand>,
    /// Textual form, regenerated whenever the operands change
    pub inst_content: String,
}

impl Instruction {
    /// Build an instruction from its parts
    pub fn new(
        id: String,
        opcodes: Vec<String>,
        operands: Vec<Operand>,
        inst_content: String,
    ) -> Instruction {
        Instruction {
            id,
            opcodes,
            operands,
            inst_content,
        }
    }

    /// The definition operand, by convention the first one
    pub fn def(&self) -> Option<&Operand> {
        self.operands.first()
    }

    /// Mutable access to the definition operand
    pub fn def_mut(&mut self) -> Option<&mut Operand> {
        self.operands.first_mut()
    }

    /// The operands read by this instruction
    pub fn uses(&self) -> &[Operand] {
        self.operands.get(1..).unwrap_or(&[])
    }

    /// Mutable access to the operands read by this instruction
    pub fn uses_mut(&mut self) -> &mut [Operand] {
        self.operands.get_mut(1..).unwrap_or(&mut [])
    }

    /// Whether `reg` names a predicate register
    pub fn is_predicate_reg(&self, reg: &str) -> bool {
        arch_info::is_predicate_register(reg)
    }
}

/// Basic block containing a linear sequence of SASS instructions
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicBlock {
    /// Address of the block entry
    pub addr: Addr,
    /// List of instructions contained in this basic block (in order)
    pub instructions: Vec<Instruction>,
    /// Predecessor block address(es), in edge insertion order
    pub preds: Vec<Addr>,
    /// Successor block address(es), in edge insertion order
    pub succs: Vec<Addr>,
}

impl BasicBlock {
    /// Empty basic block at `addr`
    pub fn new(addr: Addr) -> BasicBlock {
        BasicBlock {
            addr,
            instructions: Vec::new(),
            preds: Vec::new(),
            succs: Vec::new(),
        }
    }
}

/// A device function: basic blocks in discovery order, entry first
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Symbol name of the function
    pub name: String,
    /// Basic blocks keyed by entry address; the first entry is the function entry
    pub blocks: IndexMap<Addr, BasicBlock>,
    next_inst_id: u64,
}

impl Function {
    /// Empty function named `name`
    pub fn new(name: &str) -> Function {
        Function {
            name: name.to_string(),
            blocks: IndexMap::new(),
            next_inst_id: 0,
        }
    }

    /// The entry basic block, if any block exists
    pub fn entry(&self) -> Option<&BasicBlock> {
        self.blocks.get_index(0).map(|(_, block)| block)
    }

    /// Create an empty basic block at `addr`
    pub fn create_block(&mut self, addr: Addr) -> Result<&mut BasicBlock> {
        if self.blocks.contains_key(&addr) {
            return Err(Error::Malformed(format!(
                "duplicate basic block at {}",
                addr
            )));
        }

        Ok(self.blocks.entry(addr).or_insert_with(|| BasicBlock::new(addr)))
    }

    /// Record a control-flow edge, maintaining the ordered predecessor and
    /// successor lists of both endpoints
    pub fn add_edge(&mut self, from: Addr, to: Addr) -> Result<()> {
        if !self.blocks.contains_key(&from) {
            return Err(Error::Malformed(format!("edge source {} is not a block", from)));
        }

        if !self.blocks.contains_key(&to) {
            return Err(Error::Malformed(format!("edge target {} is not a block", to)));
        }

        self.blocks[&from].succs.push(to);
        self.blocks[&to].preds.push(from);
        Ok(())
    }

    /// Mint the next instruction id, unique within this function
    pub fn next_instruction_id(&mut self) -> u64 {
        self.next_inst_id += 1;
        self.next_inst_id
    }
}

/// A module of device functions, processed independently of each other
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Module {
    /// Functions in program order
    pub functions: Vec<Function>,
}

impl Module {
    /// Empty module
    pub fn new() -> Module {
        Module::default()
    }
}
