//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every endpoint, currently
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;
