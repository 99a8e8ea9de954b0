//! CMake generator for resolved dependency graphs.
//!
//! This crate provides:
//! - Normalization of dependency metadata into CMake-ready strings
//! - Rendering of `conanbuildinfo.cmake` (per-dependency variables, merged
//!   global variables and the setup macro library)
//! - The compiler compatibility rules the generated macros enforce
//!
//! # Architecture
//!
//! ```text
//! AggregateBuildInfo → NormalizedView (per block) → CMakeGenerator → String
//! ```
//!
//! Rendering is pure: no I/O, no shared state. Writing the file is the
//! caller's job.

mod compiler_check;
mod generator;
mod macros;
mod normalize;

pub use compiler_check::{
    check_compiler, CompilerCheck, CompilerFamily, CompilerMismatch, DetectedCompiler,
    MismatchKind, MSVC_VERSIONS,
};
pub use generator::{render, render_with_settings, CMakeGenerator, Generator, BUILD_INFO_CMAKE};
pub use macros::CMAKE_MACROS;
pub use normalize::{quote_path, to_forward_slashes, NormalizedView};
