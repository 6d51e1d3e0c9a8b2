/// Simple constants.
mod constant_words;

/// Words that do arithmetic.
mod simple_arithmetic_words;

/// Words that manipulate the data stack.
mod stack_words;

/// Words that compare values and work with bits.
mod math_logic_and_bit_words;

/// Words that work with the data space.
mod data_space_words;

/// Words that create new words and variables.
mod word_creation_words;

/// Conditionals, comments and loops.
pub mod control_words;

use crate::runtime::{
    built_ins::base_words::{
        constant_words::register_constant_words, control_words::register_control_words,
        data_space_words::register_data_space_words,
        math_logic_and_bit_words::register_math_logic_and_bit_words,
        simple_arithmetic_words::register_simple_arithmetic_words,
        stack_words::register_stack_words, word_creation_words::register_word_creation_words,
    },
    interpreter::Interpreter,
};

/// Called to register all of the core words of the language.
pub fn register_base_words(interpreter: &mut dyn Interpreter) {
    register_constant_words(interpreter);
    register_simple_arithmetic_words(interpreter);
    register_stack_words(interpreter);
    register_math_logic_and_bit_words(interpreter);
    register_data_space_words(interpreter);
    register_word_creation_words(interpreter);
    register_control_words(interpreter);
}
