//! An interactive interpreter for a small Forth-like stack language.
//!
//! Source text is split into tokens which are fed through a single evaluator.  Script defined words
//! are never compiled, invoking one splices its stored tokens back into the pending stream, and the
//! control flow words work the same way by replaying token runs.

/// Module for managing source text and turning it into tokens.
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;
