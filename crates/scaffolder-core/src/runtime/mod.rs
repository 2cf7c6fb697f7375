//! Toolchain detection for generated backends
//!
//! Checks are advisory: a missing toolchain is reported to the user with an
//! install hint but never fails generation.

pub mod check;

pub use check::{check_backend_toolchain, check_toolchain, RuntimeInfo, Toolchain};
