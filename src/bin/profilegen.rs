//! CLI driver: emit one benchmark program per catalog descriptor.

use std::error::Error as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use profilegen::{GenResult, Generator, WorklistId};

#[derive(Parser)]
#[command(
    name = "profilegen",
    about = "Generate per-instruction LLVM-IR microbenchmark programs"
)]
struct Args {
    /// Output root directory (created if absent)
    path: PathBuf,

    /// Instruction repetitions per program; must be positive
    repetitions: u32,

    /// Restrict generation to a single worklist
    #[arg(long, value_enum)]
    worklist: Option<WorklistId>,
}

fn run(args: &Args) -> GenResult<()> {
    // Usage check happens here, before any directory is touched.
    let generator = Generator::new(args.repetitions)?;

    let selected: Vec<WorklistId> = match args.worklist {
        Some(id) => vec![id],
        None => WorklistId::ALL.to_vec(),
    };

    for id in selected {
        generator.generate_worklist(id.worklist(), &args.path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
