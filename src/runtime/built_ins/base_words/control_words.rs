use crate::{
    add_native_word,
    lang::tokenizing::{Token, TokenList},
    runtime::{
        built_ins::base_words::constant_words::TRUE,
        data_structures::data_space::Cell,
        error::{self, ErrorKind, script_error_str},
        interpreter::{Interpreter, LoopKind},
    },
};
use tracing::debug;

/// Take tokens from the stream until one of the terminators is found.  Any `( ... )` comment spans
/// along the way are dropped.  Returns the collected tokens along with the terminator that ended
/// them, which is consumed.
pub fn accumulate_until(
    interpreter: &mut dyn Interpreter,
    terminators: &[&str],
) -> error::Result<(TokenList, Token)> {
    let mut tokens = TokenList::new();

    loop {
        let token = interpreter.next_token()?;

        if token.is("(") {
            let _ = skip_until(interpreter, &[")"])?;
        } else if terminators.iter().any(|terminator| token.is(terminator)) {
            return Ok((tokens, token));
        } else {
            tokens.push(token);
        }
    }
}

/// Discard tokens until one of the terminators is found, and return that terminator.  Nothing is
/// special cased along the way, not even comments or nested constructs.
pub fn skip_until(interpreter: &mut dyn Interpreter, terminators: &[&str]) -> error::Result<Token> {
    loop {
        let token = interpreter.next_token()?;

        if terminators.iter().any(|terminator| token.is(terminator)) {
            return Ok(token);
        }
    }
}

/// The index a `do` loop moves to after a pass.  Wraps around at the edges of the cell range, so a
/// loop that starts past its limit eventually comes back around to it.
pub fn step_index(index: Cell) -> Cell {
    index.wrapping_add(1)
}

/// Evaluate one of two branches depending on the predicate.  The tokens of the chosen branch are
/// evaluated one at a time, in order, and the first failure stops the branch.
///
/// `if` ... `then` pairs do not nest.  The first `then` or `else` found closes the construct.  A
/// word that reads ahead from inside a branch, like a second `if`, reads from the stream that
/// follows the whole construct, and a script word's body only runs once the branch is done.
///
/// Signature: `predicate -- `
fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(1)?;

    let predicate = interpreter.pop()?;

    let branch = if predicate != 0 {
        let (branch, terminator) = accumulate_until(interpreter, &["then", "else"])?;

        if terminator.is("else") {
            let _ = skip_until(interpreter, &["then"])?;
        }

        branch
    } else {
        let terminator = skip_until(interpreter, &["then", "else"])?;

        if terminator.is("else") {
            accumulate_until(interpreter, &["then"])?.0
        } else {
            TokenList::new()
        }
    };

    for token in branch {
        if interpreter.exit_requested() {
            break;
        }

        interpreter.evaluate_token(token)?;
    }

    Ok(())
}

/// Skip a comment.  Comments do not nest.
///
/// Signature: ` -- `
fn word_comment(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = skip_until(interpreter, &[")"])?;
    Ok(())
}

/// Replay the body once per index value, from the index up to but not including the limit.
///
/// Signature: `limit index -- `
fn word_do(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.loop_active(LoopKind::Do) {
        return script_error_str(interpreter, ErrorKind::NestedLoop, "Nested do loops are not supported.");
    }

    interpreter.require(2)?;

    let index = interpreter.pop()?;
    let limit = interpreter.pop()?;
    let (body, sentinel) = accumulate_until(interpreter, &["loop"])?;

    debug!(index, limit, tokens = body.len(), "entering do loop");

    interpreter.set_loop_active(LoopKind::Do, true);
    let result = run_do_loop(interpreter, &body, sentinel, index, limit);
    interpreter.set_loop_active(LoopKind::Do, false);

    result
}

fn run_do_loop(
    interpreter: &mut dyn Interpreter,
    body: &[Token],
    sentinel: Token,
    mut index: Cell,
    limit: Cell,
) -> error::Result<()> {
    interpreter.splice_tokens(std::slice::from_ref(&sentinel));

    while index != limit {
        interpreter.splice_tokens(body);
        interpreter.evaluate_until(sentinel.text())?;

        if interpreter.exit_requested() {
            return Ok(());
        }

        index = step_index(index);
    }

    let _ = interpreter.next_token()?;
    Ok(())
}

/// Replay the body until it leaves a true flag on the stack.  The body always runs at least once.
///
/// Signature: ` -- `
fn word_begin(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    if interpreter.loop_active(LoopKind::Begin) {
        return script_error_str(
            interpreter,
            ErrorKind::NestedLoop,
            "Nested begin loops are not supported.",
        );
    }

    let (body, sentinel) = accumulate_until(interpreter, &["until"])?;

    debug!(tokens = body.len(), "entering begin loop");

    interpreter.set_loop_active(LoopKind::Begin, true);
    let result = run_begin_loop(interpreter, &body, sentinel);
    interpreter.set_loop_active(LoopKind::Begin, false);

    result
}

fn run_begin_loop(interpreter: &mut dyn Interpreter, body: &[Token], sentinel: Token) -> error::Result<()> {
    interpreter.splice_tokens(std::slice::from_ref(&sentinel));

    loop {
        interpreter.splice_tokens(body);
        interpreter.evaluate_until(sentinel.text())?;

        if interpreter.exit_requested() {
            return Ok(());
        }

        interpreter.require(1)?;

        if interpreter.pop()? == TRUE {
            break;
        }
    }

    let _ = interpreter.next_token()?;
    Ok(())
}

pub fn register_control_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "if",
        word_if,
        "Evaluate the tokens up to else or then if the predicate is true, otherwise the tokens \
        between else and then.",
        "predicate -- "
    );

    add_native_word!(
        interpreter,
        "(",
        word_comment,
        "Skip everything up to the closing ).",
        " -- "
    );

    add_native_word!(
        interpreter,
        "do",
        word_do,
        "Run the body up to loop once for every index from index up to limit.",
        "limit index -- "
    );

    add_native_word!(
        interpreter,
        "begin",
        word_begin,
        "Run the body up to until repeatedly, until it leaves true on the stack.",
        " -- "
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 1 ; "counts up")]
    #[test_case(-1, 0 ; "crosses zero")]
    #[test_case(Cell::MAX, Cell::MIN ; "wraps at the top")]
    fn test_step_index(index: Cell, expected: Cell) {
        assert_eq!(step_index(index), expected);
    }

    #[test]
    fn test_step_index_reaches_limit_from_below() {
        let (mut index, limit) = (2, 7);
        let mut passes = 0;

        while index != limit {
            index = step_index(index);
            passes += 1;
        }

        assert_eq!(passes, 5);
    }
}
