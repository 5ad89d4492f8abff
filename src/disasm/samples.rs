//! Built-in decoded listing used by the CLI `pd` command and by tests when no
//! decoder is attached.

use super::record::*;

/// Flat listing of a small x86-64 function, already decoded:
///
/// ```text
/// push rbp
/// mov rbp, rsp
/// sub rsp, 20
/// mov rax, qword ptr [rsp+28]
/// mov ecx, dword ptr [rax+rcx*4]
/// mov edx, dword ptr [1000]
/// test eax, eax
/// je <target>
/// call <target>
/// rep movsb
/// nop dword ptr [rax+rax]
/// add rsp, 20
/// pop rbp
/// ret
/// ```
pub fn sample_listing(base: u64) -> Vec<DecodedInstruction> {
    let b64 = Bitness::Bit64;
    let mut listing = Vec::new();
    let mut address = base;

    let mut push = |insn: DecodedInstruction| {
        address += insn.len() as u64;
        listing.push(insn);
        address
    };

    let next = push(
        DecodedInstruction::new(base, b64, "push")
            .with_bytes(&[0x55])
            .with_argument(Argument::register(Register::gpr(gpr::BP), 8))
            .with_flags(InstructionFlags {
                push_pop: true,
                ..Default::default()
            }),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "mov")
            .with_bytes(&[0x48, 0x89, 0xE5])
            .with_argument(Argument::register(Register::gpr(gpr::BP), 8))
            .with_argument(Argument::register(Register::gpr(gpr::SP), 8)),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "sub")
            .with_bytes(&[0x48, 0x83, 0xEC, 0x20])
            .with_argument(Argument::register(Register::gpr(gpr::SP), 8))
            .with_argument(Argument::immediate(0x20, 1)),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "mov")
            .with_bytes(&[0x48, 0x8B, 0x44, 0x24, 0x28])
            .with_argument(Argument::register(Register::gpr(gpr::AX), 8))
            .with_argument(Argument::memory(
                MemoryOperand::base(Register::gpr(gpr::SP)).with_displacement(0x28),
                8,
            )),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "mov")
            .with_bytes(&[0x8B, 0x0C, 0x88])
            .with_argument(Argument::register(Register::gpr(gpr::CX), 4))
            .with_argument(Argument::memory(
                MemoryOperand::base(Register::gpr(gpr::AX)).with_index(Register::gpr(gpr::CX), 4),
                4,
            )),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "mov")
            .with_bytes(&[0x8B, 0x14, 0x25, 0x00, 0x10, 0x00, 0x00])
            .with_argument(Argument::register(Register::gpr(gpr::DX), 4))
            .with_argument(Argument::memory(MemoryOperand::absolute(0x1000), 4)),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "test")
            .with_bytes(&[0x85, 0xC0])
            .with_argument(Argument::register(Register::gpr(gpr::AX), 4))
            .with_argument(Argument::register(Register::gpr(gpr::AX), 4)),
    );
    // je skips the call below
    let next = push(
        DecodedInstruction::new(next, b64, "je")
            .with_bytes(&[0x74, 0x05])
            .with_argument(Argument::immediate(next + 2 + 5, 8))
            .with_flags(InstructionFlags {
                cond_jump: true,
                ..Default::default()
            }),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "call")
            .with_bytes(&[0xE8, 0xF0, 0x0F, 0x00, 0x00])
            .with_argument(Argument::immediate(next + 5 + 0x0FF0, 8))
            .with_flags(InstructionFlags {
                call_ret: true,
                ..Default::default()
            }),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "movsb")
            .with_bytes(&[0xF3, 0xA4])
            .with_prefix(Prefix::Rep),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "nop")
            .with_bytes(&[0x0F, 0x1F, 0x44, 0x00, 0x00])
            .with_argument(Argument::memory(
                MemoryOperand::base(Register::gpr(gpr::AX)).with_index(Register::gpr(gpr::AX), 1),
                4,
            )),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "add")
            .with_bytes(&[0x48, 0x83, 0xC4, 0x20])
            .with_argument(Argument::register(Register::gpr(gpr::SP), 8))
            .with_argument(Argument::immediate(0x20, 1)),
    );
    let next = push(
        DecodedInstruction::new(next, b64, "pop")
            .with_bytes(&[0x5D])
            .with_argument(Argument::register(Register::gpr(gpr::BP), 8))
            .with_flags(InstructionFlags {
                push_pop: true,
                ..Default::default()
            }),
    );
    push(
        DecodedInstruction::new(next, b64, "ret")
            .with_bytes(&[0xC3])
            .with_flags(InstructionFlags {
                call_ret: true,
                ..Default::default()
            }),
    );

    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_addresses_are_contiguous() {
        let listing = sample_listing(0x1000);
        assert_eq!(listing[0].address, 0x1000);
        for pair in listing.windows(2) {
            assert_eq!(pair[0].address + pair[0].len() as u64, pair[1].address);
        }
    }
}
