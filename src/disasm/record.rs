//! Decoded instruction records
//!
//! The shape in which an external x86/x64 disassembler hands a decoded
//! instruction to the tokenizer. Nothing here decodes bytes; these types only
//! carry what the decoder already worked out.

/// Target architecture bitness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bitness {
    Bit16 = 16,
    Bit32 = 32,
    #[default]
    Bit64 = 64,
}

impl Bitness {
    /// Size of a pointer (and of the address-size registers) in bytes
    pub fn pointer_size(self) -> u8 {
        match self {
            Bitness::Bit16 => 2,
            Bitness::Bit32 => 4,
            Bitness::Bit64 => 8,
        }
    }

    /// Mask applied to addresses in this mode
    pub fn address_mask(self) -> u64 {
        match self {
            Bitness::Bit16 => 0xFFFF,
            Bitness::Bit32 => 0xFFFF_FFFF,
            Bitness::Bit64 => u64::MAX,
        }
    }

    /// Parse "16", "32" or "64"
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            16 => Some(Bitness::Bit16),
            32 => Some(Bitness::Bit32),
            64 => Some(Bitness::Bit64),
            _ => None,
        }
    }
}

/// Register file a register id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterClass {
    /// rax..r15 and all their sub-registers
    General,
    /// es, cs, ss, ds, fs, gs
    Segment,
    /// st0..st7
    Fpu,
    /// mm0..mm7
    Mmx,
    /// xmm/ymm/zmm, selected by operand size
    Sse,
    Control,
    Debug,
}

/// General purpose register numbers, in encoding order.
///
/// The legacy high byte registers (ah, ch, dh, bh) get their own numbers so
/// that an 8-bit operand with number 4..7 always means spl..dil.
pub mod gpr {
    pub const AX: u8 = 0;
    pub const CX: u8 = 1;
    pub const DX: u8 = 2;
    pub const BX: u8 = 3;
    pub const SP: u8 = 4;
    pub const BP: u8 = 5;
    pub const SI: u8 = 6;
    pub const DI: u8 = 7;
    pub const R8: u8 = 8;
    pub const R15: u8 = 15;
    pub const AH: u8 = 16;
    pub const CH: u8 = 17;
    pub const DH: u8 = 18;
    pub const BH: u8 = 19;
}

/// A register as reported by the decoder: the register file plus its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub class: RegisterClass,
    pub index: u8,
}

impl Register {
    pub const fn new(class: RegisterClass, index: u8) -> Self {
        Self { class, index }
    }

    pub const fn gpr(index: u8) -> Self {
        Self::new(RegisterClass::General, index)
    }

    pub const fn fpu(index: u8) -> Self {
        Self::new(RegisterClass::Fpu, index)
    }

    pub const fn mmx(index: u8) -> Self {
        Self::new(RegisterClass::Mmx, index)
    }

    pub const fn sse(index: u8) -> Self {
        Self::new(RegisterClass::Sse, index)
    }

    /// rsp/esp/sp (any width)
    pub fn is_stack_pointer(&self) -> bool {
        self.class == RegisterClass::General && self.index == gpr::SP
    }

    /// Registers whose memory accesses default to the stack segment
    pub fn is_stack_based(&self) -> bool {
        self.class == RegisterClass::General && (self.index == gpr::SP || self.index == gpr::BP)
    }
}

/// Segment register ids, in encoding order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Es = 0,
    Cs = 1,
    Ss = 2,
    Ds = 3,
    Fs = 4,
    Gs = 5,
}

impl Segment {
    pub fn id(self) -> usize {
        self as usize
    }
}

/// Memory part of an argument: `[base + index*scale + displacement]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryOperand {
    pub base: Option<Register>,
    pub index: Option<Register>,
    pub scale: u8,
    pub displacement: i64,
}

impl MemoryOperand {
    pub fn base(base: Register) -> Self {
        Self {
            base: Some(base),
            scale: 1,
            ..Default::default()
        }
    }

    pub fn absolute(address: i64) -> Self {
        Self {
            scale: 1,
            displacement: address,
            ..Default::default()
        }
    }

    pub fn with_index(mut self, index: Register, scale: u8) -> Self {
        self.index = Some(index);
        self.scale = scale;
        self
    }

    pub fn with_displacement(mut self, displacement: i64) -> Self {
        self.displacement = displacement;
        self
    }

    pub fn has_registers(&self) -> bool {
        self.base.is_some() || self.index.is_some()
    }

    /// Segment used when the instruction carries no override
    pub fn default_segment(&self) -> Segment {
        match self.base {
            Some(base) if base.is_stack_based() => Segment::Ss,
            _ => Segment::Ds,
        }
    }
}

/// Argument type flags exactly as the decoder sets them.
///
/// Decoders occasionally set more than one of these; the tokenizer decides
/// which one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArgumentFlags {
    pub memory: bool,
    pub register: bool,
    pub immediate: bool,
}

/// One decoded operand
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Argument {
    pub flags: ArgumentFlags,
    /// Register operand id (register arguments only)
    pub register: Option<Register>,
    /// Memory operand (memory arguments only)
    pub memory: MemoryOperand,
    /// Immediate value or branch destination
    pub immediate: u64,
    /// Operand size in bytes, 0 when the decoder doesn't know
    pub size: u8,
    /// Explicit segment, if the decoder reports one
    pub segment: Option<Segment>,
    /// The decoder's own rendering of the operand, used when nothing else fits
    pub text: String,
}

impl Argument {
    pub fn register(register: Register, size: u8) -> Self {
        Self {
            flags: ArgumentFlags {
                register: true,
                ..Default::default()
            },
            register: Some(register),
            size,
            ..Default::default()
        }
    }

    pub fn memory(memory: MemoryOperand, size: u8) -> Self {
        Self {
            flags: ArgumentFlags {
                memory: true,
                ..Default::default()
            },
            memory,
            size,
            ..Default::default()
        }
    }

    pub fn immediate(value: u64, size: u8) -> Self {
        Self {
            flags: ArgumentFlags {
                immediate: true,
                ..Default::default()
            },
            immediate: value,
            size,
            ..Default::default()
        }
    }

    /// Free text operand with no type flags
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_segment(mut self, segment: Segment) -> Self {
        self.segment = Some(segment);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// Instruction prefixes that are displayed in front of the mnemonic.
///
/// Segment override prefixes are not listed here; they show up as the
/// segment of the memory argument they apply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    Lock,
    Rep,
    Repe,
    Repne,
    Other(String),
}

impl Prefix {
    pub fn name(&self) -> &str {
        match self {
            Prefix::Lock => "lock",
            Prefix::Rep => "rep",
            Prefix::Repe => "repe",
            Prefix::Repne => "repne",
            Prefix::Other(name) => name,
        }
    }
}

/// Instruction category flags from the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstructionFlags {
    pub nop: bool,
    pub push_pop: bool,
    pub call_ret: bool,
    pub cond_jump: bool,
    pub uncond_jump: bool,
}

impl InstructionFlags {
    pub fn is_branch(&self) -> bool {
        self.call_ret || self.cond_jump || self.uncond_jump
    }
}

/// A single decoded instruction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedInstruction {
    /// Address of the instruction
    pub address: u64,

    /// Raw bytes of the instruction
    pub bytes: Vec<u8>,

    /// Decode mode
    pub bitness: Bitness,

    /// Mnemonic as spelled by the decoder
    pub mnemonic: String,

    /// Displayed prefixes, in encoding order
    pub prefixes: Vec<Prefix>,

    /// Operands, destination first
    pub arguments: Vec<Argument>,

    pub flags: InstructionFlags,
}

impl DecodedInstruction {
    pub fn new(address: u64, bitness: Bitness, mnemonic: impl Into<String>) -> Self {
        Self {
            address,
            bitness,
            mnemonic: mnemonic.into(),
            ..Default::default()
        }
    }

    pub fn with_bytes(mut self, bytes: &[u8]) -> Self {
        self.bytes = bytes.to_vec();
        self
    }

    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefixes.push(prefix);
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_flags(mut self, flags: InstructionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Length of the instruction in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
