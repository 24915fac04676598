//! Rendering and emission of benchmark programs.
//!
//! Each descriptor renders to a complete program string first; the string
//! is then written to disk in one pass. A descriptor that fails to render
//! therefore leaves zero bytes behind. With repetition count `R`, every
//! program repeats its instruction `R+1` times (iterations `0..=R`, the
//! unrolling depth inherited from the profiling methodology).

use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{
    default_literal, join_operands, Complex, Frem, Instruction, Kind, Simple, Template,
};
use crate::error::{GenError, GenResult};
use crate::worklist::Worklist;

/// Generates one `<opcode>.ll` program per descriptor.
pub struct Generator {
    repetitions: u32,
}

impl Generator {
    /// Repetition counts must be positive; zero is rejected here, before
    /// any file I/O happens.
    pub fn new(repetitions: u32) -> GenResult<Self> {
        if repetitions == 0 {
            return Err(GenError::NonPositiveRepetitions);
        }
        Ok(Self { repetitions })
    }

    /// Emit every descriptor of `worklist` under `<root>/<subpath>`.
    /// The subdirectory is created if absent; already-exists is success.
    pub fn generate_worklist(&self, worklist: &Worklist, root: &Path) -> GenResult<()> {
        let dir = root.join(worklist.subpath);
        fs::create_dir_all(&dir).map_err(|source| GenError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        log::info!(
            "generating {} programs under {}",
            worklist.instructions.len(),
            dir.display()
        );
        for inst in worklist.instructions {
            self.generate(inst, &dir)?;
        }
        Ok(())
    }

    /// Render one descriptor and write it to `<dir>/<opcode>.ll`.
    /// An existing file with the same name is overwritten.
    pub fn generate(&self, inst: &Instruction, dir: &Path) -> GenResult<PathBuf> {
        let program = self.render(inst)?;
        let path = dir.join(inst.file_name());
        fs::write(&path, program).map_err(|source| GenError::Write {
            opcode: inst.opcode,
            path: path.clone(),
            source,
        })?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    /// Render the complete program text for one descriptor.
    pub fn render(&self, inst: &Instruction) -> GenResult<String> {
        if inst.opcode.is_empty() || inst.opcode.contains(['/', '\\']) {
            return Err(GenError::InvalidOpcode {
                opcode: inst.opcode,
            });
        }
        match &inst.kind {
            Kind::BranchChain => Ok(self.render_branch_chain()),
            Kind::FremChain(frem) => self.render_frem_chain(inst.opcode, frem),
            Kind::Simple(simple) => self.render_simple(inst.opcode, simple),
            Kind::Complex(complex) => Ok(self.render_complex(complex)),
        }
    }

    /// A linear chain of diamond branches: `R+1` blocks, each branching on
    /// a constant-true condition into symmetric arms that store to a shared
    /// global and fall through to the next block.
    fn render_branch_chain(&self) -> String {
        let reps = self.repetitions;
        let mut out = String::new();
        out.push_str("@global = global i32 0\n\n");
        out.push_str("define i32 @main() #0 {\n");
        out.push_str("entry:\n");
        out.push_str("  br label %block0\n\n");

        for i in 0..=reps {
            out.push_str(&format!("block{i}:\n"));
            out.push_str(&format!("  %v{i} = and i32 42, 311\n"));
            out.push_str(&format!(
                "  br i1 true, label %then{i}, label %else{i}\n\n"
            ));

            for arm in ["then", "else"] {
                out.push_str(&format!("{arm}{i}:\n"));
                out.push_str(&format!("  store volatile i32 %v{i}, i32* @global\n"));
                if i < reps {
                    out.push_str(&format!("  br label %block{}\n\n", i + 1));
                } else {
                    out.push_str("  br label %end\n\n");
                }
            }
        }

        out.push_str("end:\n");
        out.push_str("  ret i32 0\n");
        out.push_str("}\n");
        out
    }

    /// `R+1` independent remainder computations, each reloading both
    /// operands through volatile loads so no two iterations share a
    /// subexpression, each consumed through an opaque asm call.
    fn render_frem_chain(&self, opcode: &'static str, frem: &Frem) -> GenResult<String> {
        let args = join_operands(frem.operands);
        let (lhs, rhs) = args
            .split_once(',')
            .ok_or_else(|| GenError::MalformedOperands {
                opcode,
                args: args.clone(),
            })?;
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        let ty = frem.ty;
        let reps = self.repetitions;

        let mut out = String::new();
        out.push_str(&format!("@c42 = global {ty} {lhs}\n"));
        out.push_str(&format!("@c3  = global {ty} {rhs}\n"));
        out.push_str("define i32 @main() #0 {\n");
        out.push_str("entry:\n");

        for i in 0..=reps {
            out.push_str(&format!("  %x{i} = load volatile {ty}, {ty}* @c42\n"));
            out.push_str(&format!("  %y{i} = load volatile {ty}, {ty}* @c3\n"));
            out.push_str(&format!("  %r{i} = frem {ty} %x{i}, %y{i}\n"));
            out.push_str(&format!(
                "  call void asm sideeffect \"\", \"x\"({ty} %r{i})\n\n"
            ));
        }

        // Redundant store of the first result; keeps the chain observable.
        out.push_str(&format!("  store volatile {ty} %r0, {ty}* @c42\n"));
        out.push_str("  ret i32 0\n");
        out.push_str("}\n");
        Ok(out)
    }

    /// Generic path: one sink global, `R+1` applications of the opcode,
    /// each consumed through an opaque asm call, and a final volatile
    /// store of the first iteration's binding.
    fn render_simple(&self, opcode: &'static str, simple: &Simple) -> GenResult<String> {
        let default = default_literal(simple.ty).ok_or(GenError::UnknownTypeTag {
            opcode,
            ty: simple.ty,
        })?;
        let sink_ty = simple.sink_ty.unwrap_or(simple.ty);
        let ty = simple.ty;
        let args = join_operands(simple.operands);
        let reps = self.repetitions;

        let mut out = String::new();
        out.push_str(&format!("@global = global {sink_ty} {default}\n"));
        out.push_str("define i32 @main() #0 {\n");
        out.push_str("entry:\n");

        for i in 0..=reps {
            out.push_str(&format!("  %{i} = {opcode} {ty} {args}\n"));
            out.push_str(&format!(
                "  call void asm sideeffect \"\", \"r\"({sink_ty} %{i})\n"
            ));
        }

        // Fixed reference to the first iteration's binding, not the last.
        out.push_str(&format!(
            "  store volatile {sink_ty} %0, {sink_ty}* @global\n"
        ));
        out.push_str("  ret i32 0\n");
        out.push_str("}\n");
        Ok(out)
    }

    /// Complex path: header and pretext verbatim, `R+1` copies of the body
    /// (bound and counter-substituted when the counter flag is set), then
    /// the footer.
    fn render_complex(&self, complex: &Complex) -> String {
        let template = Template::parse(complex.body);
        let reps = self.repetitions;

        let mut out = String::new();
        out.push_str(complex.header);
        out.push_str("\n\n");
        out.push_str("define i32 @main() #0 {\n");
        out.push_str("entry:\n");

        if !complex.pretext.is_empty() {
            out.push_str(complex.pretext);
            if !complex.pretext.ends_with('\n') {
                out.push('\n');
            }
        }

        for i in 0..=reps {
            if complex.use_counter {
                let binding = format!("%{i}");
                let body = template.render(&binding);
                out.push_str(&format!("  {binding} = {body}\n"));
            } else {
                out.push_str(&format!("  {}\n", complex.body));
            }
        }

        out.push_str(&format!("  {}\n", complex.footer));
        out.push_str("  ret i32 0\n");
        out.push_str("}\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Instruction;

    fn render(inst: &Instruction, reps: u32) -> String {
        Generator::new(reps).unwrap().render(inst).unwrap()
    }

    #[test]
    fn zero_repetitions_is_a_usage_error() {
        assert!(matches!(
            Generator::new(0),
            Err(GenError::NonPositiveRepetitions)
        ));
    }

    #[test]
    fn simple_add_scenario() {
        let inst = Instruction::simple("add", "i32", &["42", "311"]);
        let expected = "\
@global = global i32 0
define i32 @main() #0 {
entry:
  %0 = add i32 42, 311
  call void asm sideeffect \"\", \"r\"(i32 %0)
  %1 = add i32 42, 311
  call void asm sideeffect \"\", \"r\"(i32 %1)
  %2 = add i32 42, 311
  call void asm sideeffect \"\", \"r\"(i32 %2)
  store volatile i32 %0, i32* @global
  ret i32 0
}
";
        assert_eq!(render(&inst, 2), expected);
    }

    #[test]
    fn simple_path_line_counts() {
        let inst = Instruction::simple("add", "i32", &["42", "311"]);
        for reps in [1, 2, 7] {
            let program = render(&inst, reps);
            let insts = program
                .lines()
                .filter(|l| l.contains("= add i32"))
                .count();
            let globals = program
                .lines()
                .filter(|l| l.starts_with("@global"))
                .count();
            assert_eq!(insts, reps as usize + 1);
            assert_eq!(globals, 1);
        }
    }

    #[test]
    fn simple_sink_type_overrides_global_and_consumption() {
        let inst = Instruction::simple_with_sink("icmp ne", "i32", &["252", "42"], "i1");
        let program = render(&inst, 1);
        assert!(program.starts_with("@global = global i1 0\n"));
        assert!(program.contains("  %0 = icmp ne i32 252, 42\n"));
        assert!(program.contains("call void asm sideeffect \"\", \"r\"(i1 %0)"));
        assert!(program.contains("  store volatile i1 %0, i1* @global\n"));
    }

    #[test]
    fn simple_unknown_type_is_a_configuration_error() {
        let inst = Instruction::simple("ptr_something", "ptr", &["null"]);
        let err = Generator::new(1).unwrap().render(&inst).unwrap_err();
        assert!(matches!(
            err,
            GenError::UnknownTypeTag { opcode: "ptr_something", ty: "ptr" }
        ));
    }

    #[test]
    fn branch_chain_block_counts() {
        let inst = Instruction::branch_chain("br");
        for reps in [1u32, 3, 5] {
            let program = render(&inst, reps);
            let chain = (0..=reps)
                .filter(|i| program.contains(&format!("block{i}:\n")))
                .count();
            assert_eq!(chain, reps as usize + 1);
            assert!(program.contains("end:\n"));

            let arms = program
                .lines()
                .filter(|l| l.starts_with("then") || l.starts_with("else"))
                .count();
            assert_eq!(arms, 2 * (reps as usize + 1));

            // Every arm but the last pair falls through to the next block.
            assert!(program.contains(&format!("block{reps}:\n")));
            assert!(!program.contains(&format!("block{}:\n", reps + 1)));
        }
    }

    #[test]
    fn branch_chain_last_arms_jump_to_end() {
        let program = render(&Instruction::branch_chain("br"), 1);
        assert_eq!(program.matches("br label %end").count(), 2);
        assert_eq!(program.matches("br label %block1").count(), 2);
    }

    #[test]
    fn frem_chain_reload_counts() {
        let inst = Instruction::frem_chain("frem", "float", &["42.0", "3.0"]);
        for reps in [1u32, 4] {
            let program = render(&inst, reps);
            let frems = program
                .lines()
                .filter(|l| l.contains("= frem float"))
                .count();
            let reloads = program
                .lines()
                .filter(|l| l.contains("load volatile float"))
                .count();
            assert_eq!(frems, reps as usize + 1);
            assert_eq!(reloads, 2 * (reps as usize + 1));
            assert!(program.contains("  store volatile float %r0, float* @c42\n"));
        }
    }

    #[test]
    fn frem_chain_globals_hold_the_operands() {
        let program = render(&Instruction::frem_chain("frem", "float", &["42.0", "3.0"]), 1);
        assert!(program.starts_with("@c42 = global float 42.0\n@c3  = global float 3.0\n"));
    }

    #[test]
    fn frem_single_operand_is_a_configuration_error() {
        let inst = Instruction::frem_chain("frem", "float", &["42.0"]);
        let err = Generator::new(1).unwrap().render(&inst).unwrap_err();
        assert!(matches!(err, GenError::MalformedOperands { opcode: "frem", .. }));
    }

    #[test]
    fn complex_counter_bodies_differ_only_in_binding() {
        let inst = Instruction::complex(
            "sext",
            "@global = global i64 0",
            "",
            "sext i32 257 to i64\n  call void asm sideeffect \"\", \"r\"(i64 COUNTER)",
            "store volatile i64 %1, i64* @global",
            true,
        );
        let program = render(&inst, 2);
        for i in 0..=2 {
            assert!(program.contains(&format!("  %{i} = sext i32 257 to i64\n")));
            assert!(program.contains(&format!(
                "call void asm sideeffect \"\", \"r\"(i64 %{i})"
            )));
        }
        assert!(program.contains("  store volatile i64 %1, i64* @global\n"));
    }

    #[test]
    fn complex_without_counter_repeats_verbatim() {
        let inst = Instruction::complex(
            "store",
            "@global_dst = global i8 0",
            "",
            "store volatile i8 17, i8* @global_dst",
            "",
            false,
        );
        let program = render(&inst, 3);
        assert_eq!(
            program
                .matches("  store volatile i8 17, i8* @global_dst\n")
                .count(),
            4
        );
        assert!(!program.contains("%0 ="));
    }

    #[test]
    fn complex_pretext_is_terminated_before_the_body() {
        let inst = Instruction::complex(
            "load",
            "@buffer = global [8 x i8] zeroinitializer",
            " %ptr = getelementptr inbounds [8 x i8], [8 x i8]* @buffer, i64 0, i64 0",
            "load volatile i8, i8* %ptr\n  call void asm sideeffect \"\", \"r\"(i8 COUNTER)",
            "",
            true,
        );
        let program = render(&inst, 1);
        assert!(program.contains("i64 0, i64 0\n  %0 = load volatile i8"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let generator = Generator::new(5).unwrap();
        for id in crate::worklist::WorklistId::ALL {
            for inst in id.worklist().instructions {
                let a = generator.render(inst).unwrap();
                let b = generator.render(inst).unwrap();
                assert_eq!(a, b, "{}", inst.opcode);
            }
        }
    }

    #[test]
    fn boundary_r1_emits_two_iterations() {
        let program = render(&Instruction::simple("add", "i32", &["42", "311"]), 1);
        assert!(program.contains("  %0 = add"));
        assert!(program.contains("  %1 = add"));
        assert!(!program.contains("  %2 = add"));
    }

    #[test]
    fn opcode_with_path_separator_is_rejected() {
        let inst = Instruction::simple("../escape", "i32", &["1", "2"]);
        let err = Generator::new(1).unwrap().render(&inst).unwrap_err();
        assert!(matches!(err, GenError::InvalidOpcode { .. }));
    }
}
