/// The core data structures of the interpreter: the data space and the word and variable tables.
pub mod data_structures;

/// Module for defining the built-in native words that are available to scripts.
pub mod built_ins;

/// Module for defining the error reporting of the interpreter.
pub mod error;

/// Module for defining the core functionality of the interpreter.  This includes the evaluator and
/// tools for managing and examining the interpreter's state.
pub mod interpreter;
