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

use crate::{Function, Instruction, Module, Operand, Result};
use std::io;

/// Render a single [`Operand`] in the stable textual format
pub fn render_operand(operand: &Operand) -> String {
    if operand.is_mem_addr() {
        match operand.mem_addr_offset() {
            Some(offset) => format!("[{}+{}]", operand.reg(), offset),
            None => format!("[{}]", operand.reg()),
        }
    } else if operand.is_reg() {
        operand.reg().to_string()
    } else if operand.is_arg() {
        format!("c[0x0][0x{:x}]", operand.arg_offset())
    } else if operand.is_special_reg() {
        operand.name().to_string()
    } else if operand.name().is_empty() {
        "<??>".to_string()
    } else {
        operand.name().to_string()
    }
}

/// Render an [`Instruction`] in the stable textual format: dot-joined opcodes
/// followed by space-joined operands. This is the string kept in
/// `inst_content`.
pub fn render_instruction(instr: &Instruction) -> String {
    let operands: Vec<String> = instr.operands.iter().map(render_operand).collect();
    format!("{} {}", instr.opcodes.join("."), operands.join(" "))
}

/// Dump an [`Instruction`] to `buffer`. This format is **not** stable
pub fn dump_instr(buffer: &mut dyn io::Write, instr: &Instruction) -> Result<()> {
    write!(buffer, "[{:>12}] {}", instr.id, render_instruction(instr))?;
    Ok(())
}

/// Dump a [`Function`] to `buffer`. This format is **not** stable
pub fn dump_function(buffer: &mut dyn io::Write, function: &Function) -> Result<()> {
    for (_, block) in &function.blocks {
        writeln!(buffer, "Basic block {}:", block.addr)?;

        for instr in &block.instructions {
            dump_instr(buffer, instr)?;
            writeln!(buffer)?;
        }
    }

    Ok(())
}

/// Dump a [`Module`] to `buffer`. This format is **not** stable
pub fn dump_module(buffer: &mut dyn io::Write, module: &Module) -> Result<()> {
    for function in &module.functions {
        writeln!(buffer, "Function {}:", function.name)?;
        dump_function(buffer, function)?;
    }

    Ok(())
}
