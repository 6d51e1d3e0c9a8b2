use crate::{
    add_native_word,
    runtime::{
        built_ins::base_words::{constant_words::to_flag, simple_arithmetic_words::binary_op},
        data_structures::data_space::Cell,
        error,
        interpreter::Interpreter,
    },
};

/// Helper function to handle the comparison words.  The right operand is popped first and the
/// result is pushed as a flag, -1 for true and 0 for false.
fn comparison_op(interpreter: &mut dyn Interpreter, op: fn(&Cell, &Cell) -> bool) -> error::Result<()> {
    interpreter.require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(to_flag(op(&a, &b)));
    Ok(())
}

/// Flip every bit of the top value.
///
/// Signature: `value -- ~value`
fn word_invert(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let value = interpreter.pop()?;

    interpreter.push(!value);
    Ok(())
}

pub fn register_math_logic_and_bit_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "=",
        |interpreter: &mut dyn Interpreter| comparison_op(interpreter, Cell::eq),
        "Are the two values equal?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        "<>",
        |interpreter: &mut dyn Interpreter| comparison_op(interpreter, Cell::ne),
        "Are the two values different?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        "<",
        |interpreter: &mut dyn Interpreter| comparison_op(interpreter, Cell::lt),
        "Is a less than b?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        "<=",
        |interpreter: &mut dyn Interpreter| comparison_op(interpreter, Cell::le),
        "Is a less than or equal to b?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        ">",
        |interpreter: &mut dyn Interpreter| comparison_op(interpreter, Cell::gt),
        "Is a greater than b?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        ">=",
        |interpreter: &mut dyn Interpreter| comparison_op(interpreter, Cell::ge),
        "Is a greater than or equal to b?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        "and",
        |interpreter: &mut dyn Interpreter| binary_op(interpreter, |a, b| a & b),
        "Bitwise and of the two values.",
        "a b -- a&b"
    );

    add_native_word!(
        interpreter,
        "or",
        |interpreter: &mut dyn Interpreter| binary_op(interpreter, |a, b| a | b),
        "Bitwise or of the two values.",
        "a b -- a|b"
    );

    add_native_word!(
        interpreter,
        "xor",
        |interpreter: &mut dyn Interpreter| binary_op(interpreter, |a, b| a ^ b),
        "Bitwise exclusive or of the two values.",
        "a b -- a^b"
    );

    add_native_word!(
        interpreter,
        "invert",
        word_invert,
        "Flip every bit of the top value.",
        "value -- ~value"
    );
}
