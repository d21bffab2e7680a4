//! imgsh is a line-oriented image-processing shell.
//!
//! A script is read one line at a time. Each line names a command followed by
//! whitespace-separated arguments; commands either append a validated
//! [`Operation`] to the [`Pipeline`] or act on the session (bind a source
//! image, reset, print help, list the pipeline).
//!
//! # Pipeline overview
//!
//! 1. **Tokenize**: `&str -> Line` (comments and blank lines are skipped)
//! 2. **Resolve**: `command name -> CommandSpec` through the [`Registry`]
//! 3. **Validate**: `CommandSpec + args -> Operation` or a [`ValidationError`]
//! 4. **Render**: `SourceBinding + Pipeline -> encoded bytes` through a [`FilterEngine`]
//!
//! In **batch** mode the [`Session`] renders once after the whole script;
//! in **watch** mode it overwrites a file after every processed line.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same binding and pipeline always encode to the same bytes.
//! - **Straight RGBA8**: images stay non-premultiplied from decode to encode.
#![forbid(unsafe_code)]

mod assets;
mod filter;
mod foundation;
mod pipeline;
mod render;
mod script;
mod session;

pub use assets::decode::{ContainerFormat, SourceBinding, bind, decode_bytes};
pub use assets::encode::encode;
pub use filter::engine::{CpuFilterEngine, FilterEngine};
pub use foundation::core::{Bounds, PixelRect};
pub use foundation::error::{ExitOutcome, ImgshError, ImgshResult};
pub use pipeline::operation::{ColorspaceConversion, LocalStat, Operation, OperationKind, Param};
pub use pipeline::sequence::Pipeline;
pub use render::driver::{output_bounds, render, render_image};
pub use script::diagnostic::{ScriptError, ValidationError, ValidationErrorKind};
pub use script::registry::{
    CommandAction, CommandSpec, Directive, Registry, RegistryBuilder, TransformFn,
};
pub use script::tokenize::{Line, tokenize};
pub use script::validate::{Validated, atof, validate};
pub use session::controller::{LineOutcome, RunSummary, Session, SessionOpts, SessionState};
