use tracing::debug;
use crate::{ add_native_word,
             runtime::{ error::{ self, script_error_str, ErrorKind },
                        interpreter::Interpreter } };



/// Write a value to the output followed by a space.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    interpreter.require(1)?;

    let value = interpreter.pop()?;

    write!(interpreter.output(), "{} ", value)?;
    Ok(())
}

/// Write the whole stack, bottom to top, followed by its depth.
///
/// Signature: ` -- `
fn word_print_stack(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    let dump = interpreter.stack_dump();

    write!(interpreter.output(), "{}", dump)?;
    Ok(())
}

/// Write the low byte of a value as a single character.
///
/// Signature: `character -- `
fn word_emit(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    interpreter.require(1)?;

    let value = interpreter.pop()?;

    interpreter.output().write_all(&[ value as u8 ])?;
    Ok(())
}

/// Capture the next token into the string buffer.
///
/// Signature: ` -- `
fn word_string(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    let token = interpreter.next_token()?;

    interpreter.set_string_buffer(Some(token.text().to_string()));
    Ok(())
}

/// Write the next token as is.
///
/// Signature: ` -- `
fn word_print_string(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    let token = interpreter.next_token()?;

    write!(interpreter.output(), "{}", token)?;
    Ok(())
}

/// Load and run the file named in the string buffer.  The rest of the current input is set aside
/// while the file runs and picked back up afterwards.  If the file fails the set aside input is
/// dropped.
///
/// Signature: ` -- `
fn word_loadfile(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    let path = match interpreter.string_buffer()
        {
            Some(path) if !path.is_empty() => path,
            _ => return script_error_str(interpreter,
                                         ErrorKind::MissingString,
                                         "No file name given, use s\" before loadfile.")
        };

    let saved = interpreter.take_tokens();

    debug!(path = %path, pending = saved.len(), "loadfile");

    interpreter.process_source_file(&path)?;
    interpreter.restore_tokens(saved);

    Ok(())
}

/// End the session.  Nothing after this word is evaluated.
///
/// Signature: ` -- `
fn word_bye(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    interpreter.request_exit();
    Ok(())
}

/// List the script defined words and then the variables, each in the order they were defined.
///
/// Signature: ` -- `
fn word_words(interpreter: &mut dyn Interpreter) -> error::Result<()>
{
    let listing = format!("{}{}", interpreter.dictionary(), interpreter.variables());

    write!(interpreter.output(), "{}", listing)?;
    Ok(())
}



/// Register the words that talk to the outside world.
pub fn register_io_words(interpreter: &mut dyn Interpreter)
{
    add_native_word!(interpreter, ".", word_print,
        "Print the value on top of the stack.",
        "value -- ");

    add_native_word!(interpreter, ".s", word_print_stack,
        "Print the whole stack followed by its depth.",
        " -- ");

    add_native_word!(interpreter, "emit", word_emit,
        "Print the value on top of the stack as a character.",
        "character -- ");

    add_native_word!(interpreter, "s\"", word_string,
        "Capture the text up to the next double quote in the string buffer.",
        " -- ");

    add_native_word!(interpreter, ".\"", word_print_string,
        "Print the text up to the next double quote.",
        " -- ");

    add_native_word!(interpreter, "loadfile", word_loadfile,
        "Load and run the file named by the last s\" string.",
        " -- ");

    add_native_word!(interpreter, "bye", word_bye,
        "End the session.",
        " -- ");

    add_native_word!(interpreter, "words", word_words,
        "List the script defined words and variables.",
        " -- ");
}
