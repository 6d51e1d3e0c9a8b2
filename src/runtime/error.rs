
use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter },
           process::{ ExitCode, Termination } };
use thiserror::Error as ThisError;
use crate::lang::source_buffer::SourceLocation;

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// The broad category of an evaluation failure.
#[derive(ThisError, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind
{
    /// A word needed more values than the stack holds.
    #[error("stack underflow")]
    StackUnderflow,

    /// Division by zero.
    #[error("arithmetic exception")]
    Arithmetic,

    /// A data space access, or shrink, outside of the arena.
    #[error("access violation")]
    OutOfBounds,

    /// A malformed definition.
    #[error("syntax error")]
    Syntax,

    /// The token is not a number, built-in, variable, or word.
    #[error("unknown word")]
    UnknownWord,

    /// A `do` or `begin` was started while one was already running.
    #[error("nested loop")]
    NestedLoop,

    /// A word needed the string buffer but nothing has been captured.
    #[error("missing string")]
    MissingString,

    /// A word needed more tokens than the input holds.
    #[error("unexpected end of input")]
    EndOfInput,

    /// Reading a source file failed.
    #[error("i/o error")]
    Io
}



/// Any error that occurs during the evaluation of a script.
#[derive(Clone)]
pub struct ScriptError
{
    /// What kind of failure this is.
    kind: ErrorKind,

    /// The location in the source the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String
}


impl Error for ScriptError
{
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    /// Because this type represents an error, the exit code is always FAILURE.
    fn report(self) -> ExitCode
    {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}


impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error),
            None => write!(f, "{}", self.error)
        }
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{} [{}]", self, self.kind)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind, location: Option<SourceLocation>, error: String) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                error
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind,
                            location: Option<SourceLocation>,
                            error: String) -> Result<T>
    {
        Err(ScriptError::new(kind, location, error))
    }

    /// What kind of failure this is.
    pub fn kind(&self) -> ErrorKind
    {
        self.kind
    }

    /// If available, the location in the source the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io, None, format!("I/O error: {}", error))
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// location of the token the interpreter is currently evaluating.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: String) -> Result<T>
{
    let location = interpreter.current_location().clone();

    ScriptError::new_as_result(kind, location, message)
}



pub fn script_error_str<T>(interpreter: &dyn Interpreter, kind: ErrorKind, message: &str) -> Result<T>
{
    script_error(interpreter, kind, message.to_string())
}
