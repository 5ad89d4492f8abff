//! Mnemonic classification and string instruction expansion.

use super::token::TokenType;
use crate::disasm::{gpr, Argument, Bitness, DecodedInstruction, MemoryOperand, Register, Segment};

const NOP_SPELLINGS: [&str; 5] = ["nop", "fnop", "nopw", "nopl", "nopq"];

const PUSH_POP: [&str; 14] = [
    "push", "pushw", "pusha", "pushad", "pushf", "pushfd", "pushfq", "pop", "popw", "popa", "popad", "popf", "popfd",
    "popfq",
];

const CALLS: [&str; 3] = ["call", "callf", "lcall"];

const RETURNS: [&str; 7] = ["ret", "retn", "retf", "lret", "iret", "iretd", "iretq"];

const UNCOND_JUMPS: [&str; 3] = ["jmp", "jmpf", "ljmp"];

const LOOPS: [&str; 5] = ["loop", "loope", "loopne", "loopz", "loopnz"];

/// One step of the mnemonic classification cascade
pub struct MnemonicRule {
    pub name: &'static str,
    matches: fn(&str, &DecodedInstruction) -> bool,
    pub kind: TokenType,
}

impl MnemonicRule {
    pub fn matches(&self, insn: &DecodedInstruction) -> bool {
        (self.matches)(&insn.mnemonic.trim().to_ascii_lowercase(), insn)
    }
}

/// Evaluated top to bottom, first match wins. Anything left over is
/// `MnemonicNormal`.
pub const MNEMONIC_RULES: [MnemonicRule; 5] = [
    MnemonicRule {
        name: "nop",
        matches: is_nop,
        kind: TokenType::MnemonicNop,
    },
    MnemonicRule {
        name: "push/pop",
        matches: is_push_pop,
        kind: TokenType::MnemonicPushPop,
    },
    MnemonicRule {
        name: "call/ret",
        matches: is_call_ret,
        kind: TokenType::MnemonicCallRet,
    },
    MnemonicRule {
        name: "conditional jump",
        matches: is_cond_jump,
        kind: TokenType::MnemonicCondJump,
    },
    MnemonicRule {
        name: "unconditional jump",
        matches: is_uncond_jump,
        kind: TokenType::MnemonicUncondJump,
    },
];

/// Token type of the instruction's mnemonic
pub fn classify_mnemonic(insn: &DecodedInstruction) -> TokenType {
    let mnemonic = insn.mnemonic.trim().to_ascii_lowercase();
    MNEMONIC_RULES
        .iter()
        .find(|rule| (rule.matches)(&mnemonic, insn))
        .map(|rule| rule.kind)
        .unwrap_or(TokenType::MnemonicNormal)
}

/// Mnemonic kinds whose immediate operand is a code address
pub fn is_branch_kind(kind: TokenType) -> bool {
    matches!(
        kind,
        TokenType::MnemonicCallRet | TokenType::MnemonicCondJump | TokenType::MnemonicUncondJump
    )
}

/// Whether immediate operands are jump/call destinations. Returns share the
/// call/ret mnemonic kind, but their immediate is a stack adjustment.
pub fn has_code_target(insn: &DecodedInstruction, kind: TokenType) -> bool {
    let mnemonic = insn.mnemonic.trim().to_ascii_lowercase();
    if RETURNS.contains(&mnemonic.as_str()) {
        return false;
    }
    is_branch_kind(kind) || insn.flags.is_branch()
}

fn is_nop(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    insn.flags.nop || NOP_SPELLINGS.contains(&mnemonic) || is_self_xchg(mnemonic, insn) || is_self_lea(mnemonic, insn)
}

/// xchg r, r. In 64-bit mode the 32-bit form zero-extends, so it isn't a nop.
fn is_self_xchg(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    if mnemonic != "xchg" {
        return false;
    }
    match insn.arguments.as_slice() {
        [a, b] => {
            let same = a.flags.register
                && b.flags.register
                && !a.flags.memory
                && !b.flags.memory
                && a.register.is_some()
                && a.register == b.register
                && a.size == b.size;
            same && !(insn.bitness == Bitness::Bit64 && a.size == 4)
        }
        _ => false,
    }
}

/// lea r, [r] at full address width
fn is_self_lea(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    if mnemonic != "lea" {
        return false;
    }
    match insn.arguments.as_slice() {
        [dst, src] => {
            let mem = &src.memory;
            dst.flags.register
                && src.flags.memory
                && dst.register.is_some()
                && mem.base == dst.register
                && mem.index.is_none()
                && mem.displacement == 0
                && dst.size == insn.bitness.pointer_size()
        }
        _ => false,
    }
}

fn is_push_pop(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    insn.flags.push_pop || PUSH_POP.contains(&mnemonic)
}

fn is_call_ret(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    insn.flags.call_ret || CALLS.contains(&mnemonic) || RETURNS.contains(&mnemonic)
}

fn is_cond_jump(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    insn.flags.cond_jump
        || (mnemonic.starts_with('j') && !UNCOND_JUMPS.contains(&mnemonic))
        || LOOPS.contains(&mnemonic)
}

fn is_uncond_jump(mnemonic: &str, insn: &DecodedInstruction) -> bool {
    insn.flags.uncond_jump || UNCOND_JUMPS.contains(&mnemonic)
}

/// A string instruction rewritten with its implicit operands
pub(crate) struct StringOperation {
    pub mnemonic: &'static str,
    pub arguments: Vec<Argument>,
}

/// Expand `movsb`, `stosd`, `lodsq`, ... into the base mnemonic plus the
/// implicit `es:[rdi]` / `ds:[rsi]` operands. Only applies when the decoder
/// reported no operands, which keeps SSE `movsd xmm0, xmm1` untouched.
pub(crate) fn string_operation(insn: &DecodedInstruction) -> Option<StringOperation> {
    if !insn.arguments.is_empty() {
        return None;
    }
    let mnemonic = insn.mnemonic.trim().to_ascii_lowercase();
    if mnemonic.len() != 5 {
        return None;
    }
    let (base, suffix) = mnemonic.split_at(4);
    let size = match suffix {
        "b" => 1,
        "w" => 2,
        "d" => 4,
        "q" => 8,
        _ => return None,
    };
    if size == 8 && insn.bitness != Bitness::Bit64 {
        return None;
    }

    let destination = || string_operand(gpr::DI, Segment::Es, size);
    let source = || string_operand(gpr::SI, Segment::Ds, size);
    let (mnemonic, arguments) = match base {
        "movs" => ("movs", vec![destination(), source()]),
        "cmps" => ("cmps", vec![source(), destination()]),
        "stos" => ("stos", vec![destination()]),
        "scas" => ("scas", vec![destination()]),
        "lods" => ("lods", vec![source()]),
        _ => return None,
    };
    Some(StringOperation { mnemonic, arguments })
}

fn string_operand(index: u8, segment: Segment, size: u8) -> Argument {
    Argument::memory(MemoryOperand::base(Register::gpr(index)), size).with_segment(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::InstructionFlags;

    fn insn(mnemonic: &str) -> DecodedInstruction {
        DecodedInstruction::new(0x1000, Bitness::Bit64, mnemonic)
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = MNEMONIC_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["nop", "push/pop", "call/ret", "conditional jump", "unconditional jump"]
        );
    }

    #[test]
    fn test_spellings() {
        assert_eq!(classify_mnemonic(&insn("mov")), TokenType::MnemonicNormal);
        assert_eq!(classify_mnemonic(&insn("PUSH")), TokenType::MnemonicPushPop);
        assert_eq!(classify_mnemonic(&insn("popfq")), TokenType::MnemonicPushPop);
        assert_eq!(classify_mnemonic(&insn("popcnt")), TokenType::MnemonicNormal);
        assert_eq!(classify_mnemonic(&insn("retn")), TokenType::MnemonicCallRet);
        assert_eq!(classify_mnemonic(&insn("jne")), TokenType::MnemonicCondJump);
        assert_eq!(classify_mnemonic(&insn("loopne")), TokenType::MnemonicCondJump);
        assert_eq!(classify_mnemonic(&insn("jmp")), TokenType::MnemonicUncondJump);
        assert_eq!(classify_mnemonic(&insn("fnop")), TokenType::MnemonicNop);
    }

    #[test]
    fn test_flags_are_honored() {
        let flagged = insn("bnd jmp").with_flags(InstructionFlags {
            uncond_jump: true,
            ..Default::default()
        });
        assert_eq!(classify_mnemonic(&flagged), TokenType::MnemonicUncondJump);

        // nop outranks everything else
        let both = insn("nop").with_flags(InstructionFlags {
            call_ret: true,
            ..Default::default()
        });
        assert_eq!(classify_mnemonic(&both), TokenType::MnemonicNop);
    }

    #[test]
    fn test_code_targets() {
        let target = |insn: &DecodedInstruction| has_code_target(insn, classify_mnemonic(insn));
        assert!(target(&insn("call")));
        assert!(target(&insn("jmp")));
        assert!(target(&insn("je")));
        assert!(!target(&insn("mov")));
        assert!(!target(&insn("ret")));
        assert!(!target(&insn("IRETQ")));

        let far_return = insn("retf").with_flags(InstructionFlags {
            call_ret: true,
            ..Default::default()
        });
        assert!(!target(&far_return));
    }

    #[test]
    fn test_self_xchg() {
        let xchg = |bitness, size| {
            DecodedInstruction::new(0, bitness, "xchg")
                .with_argument(Argument::register(Register::gpr(gpr::BX), size))
                .with_argument(Argument::register(Register::gpr(gpr::BX), size))
        };
        assert_eq!(classify_mnemonic(&xchg(Bitness::Bit32, 4)), TokenType::MnemonicNop);
        assert_eq!(classify_mnemonic(&xchg(Bitness::Bit64, 8)), TokenType::MnemonicNop);
        assert_eq!(classify_mnemonic(&xchg(Bitness::Bit64, 4)), TokenType::MnemonicNormal);

        let other = DecodedInstruction::new(0, Bitness::Bit32, "xchg")
            .with_argument(Argument::register(Register::gpr(gpr::AX), 4))
            .with_argument(Argument::register(Register::gpr(gpr::BX), 4));
        assert_eq!(classify_mnemonic(&other), TokenType::MnemonicNormal);
    }

    #[test]
    fn test_self_lea() {
        let lea = DecodedInstruction::new(0, Bitness::Bit32, "lea")
            .with_argument(Argument::register(Register::gpr(gpr::SI), 4))
            .with_argument(Argument::memory(MemoryOperand::base(Register::gpr(gpr::SI)), 0));
        assert_eq!(classify_mnemonic(&lea), TokenType::MnemonicNop);

        let lea_disp = DecodedInstruction::new(0, Bitness::Bit32, "lea")
            .with_argument(Argument::register(Register::gpr(gpr::SI), 4))
            .with_argument(Argument::memory(
                MemoryOperand::base(Register::gpr(gpr::SI)).with_displacement(4),
                0,
            ));
        assert_eq!(classify_mnemonic(&lea_disp), TokenType::MnemonicNormal);
    }

    #[test]
    fn test_string_operation() {
        let movsb = string_operation(&insn("movsb")).expect("movsb expands");
        assert_eq!(movsb.mnemonic, "movs");
        assert_eq!(movsb.arguments.len(), 2);
        assert_eq!(movsb.arguments[0].segment, Some(Segment::Es));
        assert_eq!(movsb.arguments[0].memory.base, Some(Register::gpr(gpr::DI)));
        assert_eq!(movsb.arguments[1].memory.base, Some(Register::gpr(gpr::SI)));
        assert_eq!(movsb.arguments[1].size, 1);

        let lodsd = string_operation(&insn("lodsd")).expect("lodsd expands");
        assert_eq!(lodsd.arguments.len(), 1);
        assert_eq!(lodsd.arguments[0].segment, Some(Segment::Ds));
        assert_eq!(lodsd.arguments[0].size, 4);

        assert!(string_operation(&insn("movsx")).is_none());
        assert!(string_operation(&DecodedInstruction::new(0, Bitness::Bit32, "stosq")).is_none());

        let sse = insn("movsd")
            .with_argument(Argument::register(Register::sse(0), 16))
            .with_argument(Argument::register(Register::sse(1), 16));
        assert!(string_operation(&sse).is_none());
    }
}
