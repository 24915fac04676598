//! Static worklist catalog.
//!
//! A worklist is a named, ordered group of descriptors sharing an output
//! subdirectory. The catalog is compiled-in configuration: adding a
//! descriptor means extending these tables, not registering anything at
//! runtime.

use clap::ValueEnum;

use crate::descriptor::Instruction;

/// A named group of descriptors bound to an output subdirectory.
pub struct Worklist {
    /// Directory name under the output root. Unique across the catalog.
    pub subpath: &'static str,
    pub instructions: &'static [Instruction],
}

/// Identifier for a statically-defined [`Worklist`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WorklistId {
    /// Core-bound instruction programs.
    Cpu,
    /// Memory-bound load/store programs against a large buffer.
    Dram,
}

impl WorklistId {
    pub const ALL: &'static [Self] = &[Self::Cpu, Self::Dram];

    pub fn worklist(&self) -> &'static Worklist {
        match self {
            Self::Cpu => &CPU_WORKLIST,
            Self::Dram => &DRAM_WORKLIST,
        }
    }
}

pub static CPU_WORKLIST: Worklist = Worklist {
    subpath: "cpu",
    instructions: &[
        // Empty program; measures the harness floor around the benchmark.
        Instruction::complex("_noise", "", "", "", "", false),
        Instruction::simple("add", "i32", &["42", "311"]),
        Instruction::simple("fadd", "float", &["42.0", "311.0"]),
        Instruction::simple("fdiv", "float", &["42.0", "311.0"]),
        Instruction::complex(
            "call",
            "define void @_Z3foov() #0 {\n  ret void\n}",
            "",
            "call void @_Z3foov()\n  call void asm sideeffect \"\", \"~{memory}\"()",
            "",
            false,
        ),
        Instruction::complex(
            "getelementptr",
            "@array = global [4 x i8] zeroinitializer\n@ptr_sink = global i8* null",
            "",
            "getelementptr [4 x i8], [4 x i8]* @array, i32 0, i32 2\n  call void asm sideeffect \"\", \"r\"(i8* COUNTER)",
            "store volatile i8* %1, i8** @ptr_sink",
            true,
        ),
        Instruction::complex(
            "load",
            "@global_src = global i8 17",
            "",
            "load volatile i8, i8* @global_src",
            "",
            true,
        ),
        Instruction::simple("mul", "i32", &["42", "3"]),
        Instruction::simple("fmul", "float", &["42.0", "3.0"]),
        Instruction::simple("or", "i32", &["42", "311"]),
        Instruction::simple("and", "i32", &["42", "311"]),
        Instruction::simple("xor", "i32", &["42", "311"]),
        Instruction::branch_chain("br"),
        Instruction::frem_chain("frem", "float", &["42.0", "3.0"]),
        Instruction::simple("urem", "i32", &["42", "3"]),
        Instruction::simple("sdiv", "i32", &["42", "3"]),
        Instruction::complex(
            "select",
            "@global = global i64 0",
            "",
            "select i1 true, i64 17, i64 42\n  call void asm sideeffect \"\", \"r\"(i64 COUNTER)",
            "store volatile i64 %1, i64* @global",
            true,
        ),
        Instruction::complex(
            "sext",
            "@global = global i64 0",
            "",
            "sext i32 257 to i64\n  call void asm sideeffect \"\", \"r\"(i64 COUNTER)",
            "store volatile i64 %1, i64* @global",
            true,
        ),
        Instruction::complex(
            "zext",
            "@global = global i64 0",
            "",
            "zext i32 257 to i64\n  call void asm sideeffect \"\", \"r\"(i64 COUNTER)",
            "store volatile i64 %1, i64* @global",
            true,
        ),
        Instruction::simple_with_sink("icmp ne", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp sge", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp sgt", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp sle", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp slt", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp uge", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp ule", "i32", &["252", "42"], "i1"),
        Instruction::simple_with_sink("icmp ult", "i32", &["252", "42"], "i1"),
        Instruction::simple("shl", "i32", &["42", "1"]),
        Instruction::simple("lshr", "i32", &["42", "1"]),
        Instruction::simple("srem", "i32", &["42", "3"]),
        Instruction::complex(
            "store",
            "@global_dst = global i8 0",
            "",
            "store volatile i8 17, i8* @global_dst",
            "",
            false,
        ),
        Instruction::simple("sub", "i32", &["42", "311"]),
        Instruction::simple("fsub", "float", &["42.0", "311.0"]),
        Instruction::simple("udiv", "i32", &["42", "3"]),
    ],
};

pub static DRAM_WORKLIST: Worklist = Worklist {
    subpath: "dram",
    instructions: &[
        Instruction::complex(
            "load",
            "@buffer = global [134217728 x i8] zeroinitializer, align 64",
            " %base_i8 = getelementptr inbounds [134217728 x i8], [134217728 x i8]* @buffer, i64 0, i64 0\n  %ptr = bitcast i8* %base_i8 to i64*",
            "load i64, i64* %ptr, align 8\n  call void asm sideeffect \"\", \"r\"(i64 COUNTER)",
            "",
            true,
        ),
        Instruction::complex(
            "store",
            "@buffer = global [134217728 x i8] zeroinitializer, align 64\n  @store_value = constant i64 1311768467463790320",
            " %base_i8 = getelementptr inbounds [134217728 x i8], [134217728 x i8]* @buffer, i64 0, i64 0\n %ptr = bitcast i8* %base_i8 to i64*\n  %val = load i64, i64* @store_value\n",
            "store i64 %val, i64* %ptr, align 8",
            "",
            false,
        ),
    ],
};
