//! profilegen - per-instruction microbenchmark source generation.
//!
//! Given a compiled-in catalog of instruction descriptors and a repetition
//! count `R`, profilegen emits one self-contained LLVM-IR program per
//! descriptor, each exercising that single instruction `R+1` times in a
//! tight, side-effect-preserving sequence. An external energy/latency
//! profiler runs the emitted programs and attributes cost per instruction
//! class; this crate only produces the sources.
//!
//! # Primary Usage
//!
//! ```no_run
//! use profilegen::{Generator, WorklistId};
//!
//! let generator = Generator::new(100)?;
//! for id in WorklistId::ALL {
//!     generator.generate_worklist(id.worklist(), "out".as_ref())?;
//! }
//! # Ok::<(), profilegen::GenError>(())
//! ```
//!
//! # Architecture
//!
//! - [`descriptor`] - descriptor model and the body template language
//! - [`worklist`] - static catalog of descriptors grouped per subdirectory
//! - [`generator`] - rendering and file emission
//! - [`error`] - error taxonomy

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod worklist;

pub use descriptor::{default_literal, Instruction, Kind, Template, COUNTER_TOKEN};
pub use error::{GenError, GenResult};
pub use generator::Generator;
pub use worklist::{Worklist, WorklistId, CPU_WORKLIST, DRAM_WORKLIST};
