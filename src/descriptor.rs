//! Instruction descriptors and the body template language.
//!
//! A descriptor pairs an opcode (also the output file stem) with one of
//! four generation strategies. The four strategies are mutually exclusive
//! and dispatched exhaustively by the generator, so a descriptor can never
//! be half-simple, half-complex.

/// Default literal for a semantic type tag, used to initialize the sink
/// global on the simple path. Unknown tags return `None`; the simple path
/// treats that as a fatal configuration error since it has no fallback.
pub fn default_literal(ty: &str) -> Option<&'static str> {
    match ty {
        "i32" | "i8" | "i0" => Some("0"),
        "float" => Some("0.0"),
        _ => None,
    }
}

/// Join operand literals into the comma-separated form used inside an
/// instruction line (`"42, 311"`).
pub fn join_operands(operands: &[&str]) -> String {
    operands.join(", ")
}

/// One benchmarkable instruction.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    /// Opcode mnemonic; doubles as the output file stem (`<opcode>.ll`).
    /// Spaces are allowed (`icmp ne`), path separators are not.
    pub opcode: &'static str,
    pub kind: Kind,
}

/// Generation strategy for a descriptor.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    /// Generic template: `%i = <opcode> <ty> <operands>` per iteration.
    Simple(Simple),
    /// Free-text header/pretext/body/footer blocks.
    Complex(Complex),
    /// Hand-written chain of diamond branches for `br`.
    BranchChain,
    /// Hand-written volatile-reload remainder sequence for `frem`.
    FremChain(Frem),
}

/// Fields of the simple strategy.
#[derive(Debug, Clone, Copy)]
pub struct Simple {
    /// Semantic result type tag (`"i32"`, `"float"`, ...).
    pub ty: &'static str,
    /// Literal operand strings, emitted comma-separated.
    pub operands: &'static [&'static str],
    /// Overrides the type of the side-effecting sink when the result type
    /// differs from the computed value's type (`icmp` produces `i1`).
    pub sink_ty: Option<&'static str>,
}

/// Fields of the frem special case.
#[derive(Debug, Clone, Copy)]
pub struct Frem {
    pub ty: &'static str,
    /// Two operand literals; fewer is a configuration error.
    pub operands: &'static [&'static str],
}

/// Fields of the complex strategy. All blocks are emitted verbatim.
#[derive(Debug, Clone, Copy)]
pub struct Complex {
    /// Global/declaration preamble, before `@main`.
    pub header: &'static str,
    /// Emitted once inside `entry:`, before the repeated region.
    pub pretext: &'static str,
    /// Per-iteration body; may contain [`COUNTER_TOKEN`] placeholders.
    pub body: &'static str,
    /// Emitted once after the repeated region.
    pub footer: &'static str,
    /// When true, each iteration binds the body's value to a fresh
    /// iteration-numbered name and substitutes it for the placeholder.
    pub use_counter: bool,
}

impl Instruction {
    pub const fn simple(
        opcode: &'static str,
        ty: &'static str,
        operands: &'static [&'static str],
    ) -> Self {
        Self {
            opcode,
            kind: Kind::Simple(Simple {
                ty,
                operands,
                sink_ty: None,
            }),
        }
    }

    pub const fn simple_with_sink(
        opcode: &'static str,
        ty: &'static str,
        operands: &'static [&'static str],
        sink_ty: &'static str,
    ) -> Self {
        Self {
            opcode,
            kind: Kind::Simple(Simple {
                ty,
                operands,
                sink_ty: Some(sink_ty),
            }),
        }
    }

    pub const fn complex(
        opcode: &'static str,
        header: &'static str,
        pretext: &'static str,
        body: &'static str,
        footer: &'static str,
        use_counter: bool,
    ) -> Self {
        Self {
            opcode,
            kind: Kind::Complex(Complex {
                header,
                pretext,
                body,
                footer,
                use_counter,
            }),
        }
    }

    pub const fn branch_chain(opcode: &'static str) -> Self {
        Self {
            opcode,
            kind: Kind::BranchChain,
        }
    }

    pub const fn frem_chain(
        opcode: &'static str,
        ty: &'static str,
        operands: &'static [&'static str],
    ) -> Self {
        Self {
            opcode,
            kind: Kind::FremChain(Frem { ty, operands }),
        }
    }

    /// Output file name derived from the opcode.
    pub fn file_name(&self) -> String {
        format!("{}.ll", self.opcode)
    }
}

/// Placeholder token substituted with the iteration binding name.
pub const COUNTER_TOKEN: &str = "COUNTER";

/// A parsed complex body: literal text interleaved with counter
/// placeholders. Parsing once up front makes the substitution contract
/// explicit and testable without touching file I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Counter,
}

impl Template {
    pub fn parse(body: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = body;
        while let Some(at) = rest.find(COUNTER_TOKEN) {
            if at > 0 {
                segments.push(Segment::Literal(rest[..at].to_owned()));
            }
            segments.push(Segment::Counter);
            rest = &rest[at + COUNTER_TOKEN.len()..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }
        Self { segments }
    }

    pub fn has_counter(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Counter))
    }

    /// Expand the template, replacing every placeholder with `binding`.
    pub fn render(&self, binding: &str) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Counter => out.push_str(binding),
            }
        }
        out
    }
}
