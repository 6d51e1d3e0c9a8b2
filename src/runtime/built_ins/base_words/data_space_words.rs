use crate::{
    add_native_word,
    runtime::{
        data_structures::data_space::Cell,
        error::{self, ErrorKind, script_error, script_error_str},
        interpreter::Interpreter,
    },
};

/// Store a cell in the data space.  The address is on top, the value below it.
///
/// Signature: `value address -- `
fn word_store(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(2)?;

    let address = interpreter.pop()?;
    let value = interpreter.pop()?;

    if interpreter.data_space_mut().write_cell(address, value).is_none() {
        return script_error(
            interpreter,
            ErrorKind::OutOfBounds,
            format!("Access violation!  Address {} is outside of the data space.", address),
        );
    }

    Ok(())
}

/// Read a cell from the data space.
///
/// Signature: `address -- value`
fn word_fetch(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let address = interpreter.pop()?;

    match interpreter.data_space().read_cell(address) {
        Some(value) => {
            interpreter.push(value);
            Ok(())
        }

        None => script_error(
            interpreter,
            ErrorKind::OutOfBounds,
            format!("Invalid variable!  Address {} is outside of the data space.", address),
        ),
    }
}

/// Signature: ` -- size`
fn word_here(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let here = interpreter.data_space().here() as Cell;

    interpreter.push(here);
    Ok(())
}

/// Grow the data space by a number of zeroed bytes, or shrink it when the count is negative.
///
/// Signature: `count -- `
fn word_allot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let count = interpreter.pop()?;

    if interpreter.data_space_mut().allot(count).is_none() {
        return script_error_str(interpreter, ErrorKind::OutOfBounds, "Access violation!");
    }

    Ok(())
}

/// Signature: ` -- `
fn word_align(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.data_space_mut().align();
    Ok(())
}

/// Signature: ` -- address`
fn word_aligned(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let aligned = interpreter.data_space().next_aligned() as Cell;

    interpreter.push(aligned);
    Ok(())
}

pub fn register_data_space_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "!",
        word_store,
        "Store a value at an address in the data space.",
        "value address -- "
    );

    add_native_word!(
        interpreter,
        "@",
        word_fetch,
        "Read the value stored at an address in the data space.",
        "address -- value"
    );

    add_native_word!(
        interpreter,
        "here",
        word_here,
        "Push the current size of the data space.",
        " -- size"
    );

    add_native_word!(
        interpreter,
        "allot",
        word_allot,
        "Grow the data space by count bytes, or shrink it if count is negative.",
        "count -- "
    );

    add_native_word!(
        interpreter,
        "align",
        word_align,
        "Pad the data space up to the next cell boundary.",
        " -- "
    );

    add_native_word!(
        interpreter,
        "aligned",
        word_aligned,
        "Push the next cell aligned address without changing the data space.",
        " -- address"
    );
}
