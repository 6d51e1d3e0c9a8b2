use crate::{
    add_native_word,
    runtime::{
        data_structures::data_space::Cell,
        error::{self, ErrorKind, script_error_str},
        interpreter::Interpreter,
    },
};

/// Pop the right operand, then the left, and push the result of the operation.  The stack is
/// checked first so that a short stack is left untouched.
pub fn binary_op(interpreter: &mut dyn Interpreter, op: fn(Cell, Cell) -> Cell) -> error::Result<()> {
    interpreter.require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(op(a, b));
    Ok(())
}

/// Integer division, truncating toward zero.  Both operands are consumed even when the divisor is
/// zero.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    if b == 0 {
        return script_error_str(interpreter, ErrorKind::Arithmetic, "Arithmetic exception!");
    }

    interpreter.push(a.wrapping_div(b));
    Ok(())
}

pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "+",
        |interpreter: &mut dyn Interpreter| binary_op(interpreter, Cell::wrapping_add),
        "Add two numbers.",
        "a b -- a+b"
    );

    add_native_word!(
        interpreter,
        "-",
        |interpreter: &mut dyn Interpreter| binary_op(interpreter, Cell::wrapping_sub),
        "Subtract the top number from the one below it.",
        "a b -- a-b"
    );

    add_native_word!(
        interpreter,
        "*",
        |interpreter: &mut dyn Interpreter| binary_op(interpreter, Cell::wrapping_mul),
        "Multiply two numbers.",
        "a b -- a*b"
    );

    add_native_word!(
        interpreter,
        "/",
        word_divide,
        "Divide, truncating toward zero.  Dividing by zero is an error.",
        "a b -- a/b"
    );
}
