use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let value = interpreter.pop()?;

    interpreter.push(value);
    interpreter.push(value);

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Make a copy of the second value and push it on top.
///
/// Signature: `a b -- a b a`
fn word_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Rotate the third value up to the top of the stack.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(3)?;

    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(())
}

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "dup",
        word_dup,
        "Duplicate the top value on the data stack.",
        "value -- value value"
    );

    add_native_word!(
        interpreter,
        "drop",
        word_drop,
        "Discard the top value on the data stack.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        "swap",
        word_swap,
        "Swap the top two values on the data stack.",
        "a b -- b a"
    );

    add_native_word!(
        interpreter,
        "over",
        word_over,
        "Copy the second value on the stack to the top.",
        "a b -- a b a"
    );

    add_native_word!(
        interpreter,
        "rot",
        word_rot,
        "Rotate the third value on the stack to the top.",
        "a b c -- b c a"
    );
}
