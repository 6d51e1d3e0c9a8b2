use crate::{
    add_native_word,
    runtime::{
        data_structures::data_space::{CELL_SIZE, Cell},
        error,
        interpreter::Interpreter,
    },
};

/// The canonical true flag.  Every comparison pushes this for true.
pub const TRUE: Cell = -1;

/// The canonical false flag.
pub const FALSE: Cell = 0;

/// Convert a Rust boolean into a flag cell.
pub fn to_flag(value: bool) -> Cell {
    if value { TRUE } else { FALSE }
}

fn word_true(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.push(TRUE);
    Ok(())
}

fn word_false(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.push(FALSE);
    Ok(())
}

fn word_cell(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.push(CELL_SIZE as Cell);
    Ok(())
}

/// Register some useful constant words.
pub fn register_constant_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "true",
        word_true,
        "Push the value true onto the data stack.",
        " -- -1"
    );

    add_native_word!(
        interpreter,
        "false",
        word_false,
        "Push the value false onto the data stack.",
        " -- 0"
    );

    add_native_word!(
        interpreter,
        "cell",
        word_cell,
        "Push the width of a cell in bytes.",
        " -- size"
    );
}
