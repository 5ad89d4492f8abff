//! Naming tables for segments, memory sizes and registers.
//!
//! Built once and only read afterwards. `NameTables::shared()` hands out a
//! lazily built process-wide instance; callers that want their own copy can
//! use `NameTables::new()` and pass it around by reference.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::disasm::{gpr, Bitness, Register, RegisterClass, Segment};

const SEGMENT_NAMES: [&str; 6] = ["es", "cs", "ss", "ds", "fs", "gs"];

const MEMORY_SIZE_NAMES: [(u8, &str); 9] = [
    (1, "byte ptr"),
    (2, "word ptr"),
    (4, "dword ptr"),
    (6, "fword ptr"),
    (8, "qword ptr"),
    (10, "tword ptr"),
    (16, "xmmword ptr"),
    (32, "ymmword ptr"),
    (64, "zmmword ptr"),
];

const GPR8: [&str; 20] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b", "r13b", "r14b",
    "r15b", "ah", "ch", "dh", "bh",
];
const GPR16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w", "r14w", "r15w",
];
const GPR32: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d", "r13d", "r14d",
    "r15d",
];
const GPR64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15",
];
const FPU: [&str; 8] = ["st0", "st1", "st2", "st3", "st4", "st5", "st6", "st7"];
const MMX: [&str; 8] = ["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"];
const XMM: [&str; 16] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7", "xmm8", "xmm9", "xmm10", "xmm11", "xmm12",
    "xmm13", "xmm14", "xmm15",
];
const YMM: [&str; 16] = [
    "ymm0", "ymm1", "ymm2", "ymm3", "ymm4", "ymm5", "ymm6", "ymm7", "ymm8", "ymm9", "ymm10", "ymm11", "ymm12",
    "ymm13", "ymm14", "ymm15",
];
const ZMM: [&str; 16] = [
    "zmm0", "zmm1", "zmm2", "zmm3", "zmm4", "zmm5", "zmm6", "zmm7", "zmm8", "zmm9", "zmm10", "zmm11", "zmm12",
    "zmm13", "zmm14", "zmm15",
];
const CONTROL: [&str; 16] = [
    "cr0", "cr1", "cr2", "cr3", "cr4", "cr5", "cr6", "cr7", "cr8", "cr9", "cr10", "cr11", "cr12", "cr13", "cr14",
    "cr15",
];
const DEBUG: [&str; 16] = [
    "dr0", "dr1", "dr2", "dr3", "dr4", "dr5", "dr6", "dr7", "dr8", "dr9", "dr10", "dr11", "dr12", "dr13", "dr14",
    "dr15",
];

/// Key of the register table: (size in bytes, register)
type RegisterKey = (u8, RegisterClass, u8);

#[derive(Debug, Clone)]
pub struct NameTables {
    segments: Vec<&'static str>,
    memory_sizes: BTreeMap<u8, &'static str>,
    registers: HashMap<RegisterKey, &'static str>,
}

static SHARED: OnceLock<NameTables> = OnceLock::new();

impl NameTables {
    pub fn new() -> Self {
        let mut registers = HashMap::new();
        let mut add = |size: u8, class: RegisterClass, names: &[&'static str]| {
            for (index, name) in names.iter().enumerate() {
                registers.insert((size, class, index as u8), *name);
            }
        };

        add(1, RegisterClass::General, &GPR8);
        add(2, RegisterClass::General, &GPR16);
        add(4, RegisterClass::General, &GPR32);
        add(8, RegisterClass::General, &GPR64);
        add(2, RegisterClass::Segment, &SEGMENT_NAMES);
        add(10, RegisterClass::Fpu, &FPU);
        add(8, RegisterClass::Mmx, &MMX);
        add(16, RegisterClass::Sse, &XMM);
        add(32, RegisterClass::Sse, &YMM);
        add(64, RegisterClass::Sse, &ZMM);
        for size in [4, 8] {
            add(size, RegisterClass::Control, &CONTROL);
            add(size, RegisterClass::Debug, &DEBUG);
        }

        Self {
            segments: SEGMENT_NAMES.to_vec(),
            memory_sizes: MEMORY_SIZE_NAMES.into_iter().collect(),
            registers,
        }
    }

    /// Process-wide tables, built on first use
    pub fn shared() -> &'static NameTables {
        SHARED.get_or_init(NameTables::new)
    }

    pub fn segment_name(&self, segment: Segment) -> &'static str {
        self.segments.get(segment.id()).copied().unwrap_or("seg?")
    }

    /// "byte ptr", "dword ptr", ...; `None` for sizes without a name
    pub fn memory_size_name(&self, size: u8) -> Option<&'static str> {
        self.memory_sizes.get(&size).copied()
    }

    /// Register name for `register` accessed with `size` bytes in the given
    /// mode. `None` when the combination doesn't exist.
    pub fn register_name(&self, bitness: Bitness, size: u8, register: Register) -> Option<&'static str> {
        if !Self::available(bitness, size, register) {
            return None;
        }
        let size = match register.class {
            // size is implied for these register files
            RegisterClass::Fpu => 10,
            RegisterClass::Mmx => 8,
            RegisterClass::Segment => 2,
            RegisterClass::Control | RegisterClass::Debug => bitness.pointer_size().max(4),
            _ => size,
        };
        self.registers.get(&(size, register.class, register.index)).copied()
    }

    /// Registers that only exist in 64-bit mode
    fn available(bitness: Bitness, size: u8, register: Register) -> bool {
        if bitness == Bitness::Bit64 {
            return true;
        }
        match register.class {
            RegisterClass::General => {
                if size == 8 {
                    return false;
                }
                if size == 1 && (gpr::SP..=gpr::DI).contains(&register.index) {
                    return false;
                }
                register.index < gpr::R8 || register.index >= gpr::AH
            }
            RegisterClass::Sse | RegisterClass::Control | RegisterClass::Debug => register.index < 8,
            _ => true,
        }
    }
}

impl Default for NameTables {
    fn default() -> Self {
        Self::new()
    }
}
