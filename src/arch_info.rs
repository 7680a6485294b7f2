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

//! Register-namespace constants of the SASS virtual ISA.

/// Prefix of general-purpose registers (`R0`, `R1`, ...)
pub const REG_PREFIX: &str = "R";

/// Prefix of kernel argument slots in the constant bank
pub const ARG_PREFIX: &str = "c[0x0]";

/// Byte offset of the first kernel argument inside the constant bank
pub const ARG_BASE_OFFSET: u64 = 0x140;

/// Thread index special register prefix
pub const SR_TID: &str = "SR_TID";
/// Block dimension special register prefix
pub const SR_NTID: &str = "SR_NTID";
/// Block index special register prefix
pub const SR_CTAID: &str = "SR_CTAID";
/// Lane id special register prefix
pub const SR_LANE: &str = "SR_LANE";
/// Warp id special register prefix
pub const SR_WARP: &str = "SR_WARP";

const SPECIAL_REGISTER_PREFIXES: &[&str] = &[SR_TID, SR_NTID, SR_CTAID, SR_LANE, SR_WARP];

/// Whether `name` refers to one of the special hardware registers
pub fn is_special_register(name: &str) -> bool {
    SPECIAL_REGISTER_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Whether `name` refers to a predicate register (`P0`, `P1`, ..., possibly
/// negated). `PT`, the constant true predicate, is classified separately.
pub fn is_predicate_register(name: &str) -> bool {
    let name = name.strip_prefix('!').unwrap_or(name);
    let mut chars = name.chars();
    if chars.next() != Some('P') {
        return false;
    }

    let ordinal = chars.as_str();
    !ordinal.is_empty() && ordinal.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn predicate_registers() {
        assert!(is_predicate_register("P0"));
        assert!(is_predicate_register("P6"));
        assert!(is_predicate_register("!P2"));
        assert!(!is_predicate_register("PT"));
        assert!(!is_predicate_register("P"));
        assert!(!is_predicate_register("R1"));
        assert!(!is_predicate_register("RZ"));
    }

    #[test]
    fn special_registers() {
        assert!(is_special_register("SR_TID.X"));
        assert!(is_special_register("SR_CTAID.Y"));
        assert!(is_special_register("SR_LANEID"));
        assert!(!is_special_register("R0"));
        assert!(!is_special_register("PT"));
    }
}
