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

use crate::{dump, Addr, Function, Instruction, Operand};

/// Builder for SASS instructions appended to a basic block of an associated
/// [`Function`]
pub struct InstructionBuilder<'a> {
    function: &'a mut Function,
    addr: Addr,
}

impl<'a> InstructionBuilder<'a> {
    /// Build an `InstructionBuilder` appending to the block at `addr`
    pub fn new(function: &'a mut Function, addr: Addr) -> InstructionBuilder<'a> {
        assert!(
            function.blocks.contains_key(&addr),
            "no basic block at {}",
            addr
        );
        InstructionBuilder { function, addr }
    }

    /// Append an instruction built from raw opcodes and operands. The textual
    /// content is rendered from the operands, and the id is minted from the
    /// function counter.
    pub fn inst(&mut self, opcodes: &[&str], operands: Vec<Operand>) -> &mut Self {
        let id = self.function.next_instruction_id();
        let mut instr = Instruction::new(
            id.to_string(),
            opcodes.iter().map(|opcode| opcode.to_string()).collect(),
            operands,
            String::new(),
        );
        instr.inst_content = dump::render_instruction(&instr);

        self.function.blocks[&self.addr].instructions.push(instr);
        self
    }

    /// Append a `MOV`
    pub fn mov(&mut self, dst: Operand, src: Operand) -> &mut Self {
        self.inst(&["MOV"], vec![dst, src])
    }

    /// Append an `IADD`
    pub fn iadd(&mut self, dst: Operand, lhs: Operand, rhs: Operand) -> &mut Self {
        self.inst(&["IADD"], vec![dst, lhs, rhs])
    }

    /// Append an `IMUL`
    pub fn imul(&mut self, dst: Operand, lhs: Operand, rhs: Operand) -> &mut Self {
        self.inst(&["IMUL"], vec![dst, lhs, rhs])
    }

    /// Append an `LDG` (load from global memory)
    pub fn ldg(&mut self, dst: Operand, addr: Operand) -> &mut Self {
        self.inst(&["LDG"], vec![dst, addr])
    }

    /// Append an `STG` (store to global memory); the address operand comes
    /// first even though it is read, not written
    pub fn stg(&mut self, addr: Operand, value: Operand) -> &mut Self {
        self.inst(&["STG"], vec![addr, value])
    }

    /// Append an `ISETP` (integer compare into a predicate)
    pub fn isetp(&mut self, dst: Operand, lhs: Operand, rhs: Operand) -> &mut Self {
        self.inst(&["ISETP"], vec![dst, lhs, rhs])
    }

    /// Append a `BRA`
    pub fn bra(&mut self, target: Operand) -> &mut Self {
        self.inst(&["BRA"], vec![target])
    }

    /// Append an `EXIT`
    pub fn exit(&mut self) -> &mut Self {
        self.inst(&["EXIT"], vec![])
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn basic() {
        use crate::*;

        let mut function = Function::new("kernel");
        function.create_block(Addr(0)).unwrap();
        let mut builder = InstructionBuilder::new(&mut function, Addr(0));
        builder.mov(Operand::register("R1"), Operand::immediate(0xA5));

        let block = &function.blocks[&Addr(0)];
        assert_eq!(block.instructions.len(), 1);
        assert_eq!(block.instructions[0].opcodes, ["MOV"]);
        assert_eq!(block.instructions[0].inst_content, "MOV R1 0xa5");
        assert_eq!(block.instructions[0].id, "1");
    }

    #[test]
    fn ids_are_unique_across_blocks() {
        use crate::*;

        let mut function = Function::new("kernel");
        function.create_block(Addr(0x00)).unwrap();
        function.create_block(Addr(0x10)).unwrap();
        InstructionBuilder::new(&mut function, Addr(0x00))
            .mov(Operand::register("R1"), Operand::immediate(0x1));
        InstructionBuilder::new(&mut function, Addr(0x10))
            .mov(Operand::register("R2"), Operand::immediate(0x2));

        assert_eq!(function.blocks[&Addr(0x00)].instructions[0].id, "1");
        assert_eq!(function.blocks[&Addr(0x10)].instructions[0].id, "2");
    }
}
