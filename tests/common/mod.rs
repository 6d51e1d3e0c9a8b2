#![allow(dead_code)]

use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};
use winforth::runtime::{
    built_ins::register_builtin_words,
    error::Result,
    interpreter::{CodeManagement, InterpreterStack, forth_interpreter::ForthInterpreter},
};

/// An output sink that keeps everything written to it, shared so the test can read it back while
/// the interpreter still owns its half.
#[derive(Clone, Default)]
pub struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedSink {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

/// A fresh session with every native word registered, printing into a sink the test can read.
pub fn new_session() -> (ForthInterpreter, SharedSink) {
    let sink = SharedSink::default();
    let mut interp = ForthInterpreter::with_output(Box::new(sink.clone()));

    register_builtin_words(&mut interp);
    (interp, sink)
}

/// Run the source on top of an initial stack and return what is left on the stack.
pub fn eval_and_stack(source: &str, init_stack: &[i64]) -> Result<Vec<i64>> {
    let (mut interp, _) = new_session();

    for &value in init_stack {
        interp.push(value);
    }

    interp.process_source("<test>", source)?;
    Ok(interp.stack().clone())
}

/// Run the source and return everything it printed.
pub fn eval_and_output(source: &str) -> Result<String> {
    let (mut interp, sink) = new_session();

    interp.process_source("<test>", source)?;
    Ok(sink.contents())
}
