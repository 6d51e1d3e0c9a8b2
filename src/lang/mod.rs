/// Module for tracking where in the source text things were found.
pub mod source_buffer;

/// Module for turning lines of source text into tokens.
pub mod tokenizing;

/// The queue of pending tokens the evaluator pulls from, and splices word and loop bodies into.
pub mod token_stream;
