use crate::{
    add_native_word,
    runtime::{
        built_ins::base_words::control_words::accumulate_until,
        data_structures::dictionary::WordInfo,
        error::{self, ErrorKind, script_error_str},
        interpreter::Interpreter,
    },
};

/// Start a new word definition.  The next token is the name and everything up to the closing `;`
/// is the body, with comments removed.
///
/// Signature: ` -- `
fn word_start_word(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let name = interpreter.next_token()?;

    if name.is(";") {
        return script_error_str(interpreter, ErrorKind::Syntax, "Syntax error!  Missing word name.");
    }

    let (body, _) = accumulate_until(interpreter, &[";"])?;

    if body.is_empty() {
        return script_error_str(interpreter, ErrorKind::Syntax, "Syntax error!  Empty word definition.");
    }

    write!(interpreter.output(), "{} ", name)?;

    interpreter.define_word(WordInfo {
        location: name.location().clone(),
        name: name.text().to_string(),
        body,
    });

    Ok(())
}

/// Bind the next token as a name for the address on top of the stack.
///
/// Signature: `address -- `
fn word_constant(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let address = interpreter.pop()?;
    let name = interpreter.next_token()?;

    write!(interpreter.output(), "{} ", name)?;
    interpreter.define_variable(name.text().to_string(), address);

    Ok(())
}

pub fn register_word_creation_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ":",
        word_start_word,
        "Start a new word definition, ended by ;",
        " -- "
    );

    add_native_word!(
        interpreter,
        "constant",
        word_constant,
        "Give a name to the address on top of the stack.",
        "address -- "
    );
}
