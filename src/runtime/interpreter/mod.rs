use crate::{
    lang::{source_buffer::SourceLocation, token_stream::TokenStream, tokenizing::Token},
    runtime::{
        data_structures::{
            data_space::{Cell, DataSpace},
            dictionary::{Dictionary, VariableIndex, WordInfo},
        },
        error,
    },
};
use std::{io::Write, rc::Rc};

pub mod forth_interpreter;

/// The data stack of cells managed by the interpreter.
pub type ValueStack = Vec<Cell>;

/// The two looping constructs.  Each may only have a single instance running at a time.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LoopKind {
    /// `do` ... `loop`
    Do,

    /// `begin` ... `until`
    Begin,
}

/// Trait for managing the interpreter's data stack.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required.  One example is for the stack dump word
    /// `.s`.
    fn stack(&self) -> &ValueStack;

    /// Push a cell onto the stack.
    fn push(&mut self, value: Cell);

    /// Pop a cell from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Cell>;

    /// Make sure the stack holds at least `count` cells before a word consumes any of them.  On
    /// failure the stack is left untouched.
    fn require(&self, count: usize) -> error::Result<()>;

    /// Render the stack bottom to top, each value followed by a space, then the depth in angle
    /// brackets.
    fn stack_dump(&self) -> String {
        let mut dump = String::new();

        for value in self.stack().iter() {
            dump += &format!("{} ", value);
        }

        dump + &format!("<{}>", self.stack().len())
    }
}

/// Trait for managing the pending token stream and evaluating what is in it.
pub trait CodeManagement {
    /// Take the next token from the stream.  Running out of tokens while a word still needs one is
    /// an end of input error.
    fn next_token(&mut self) -> error::Result<Token>;

    /// Look at the next token without taking it.
    fn peek_token(&self) -> Option<&Token>;

    /// Splice tokens onto the front of the stream so that they are the next ones evaluated, in
    /// their original order.
    fn splice_tokens(&mut self, tokens: &[Token]);

    /// Move the whole pending stream out of the interpreter, leaving it empty.
    fn take_tokens(&mut self) -> TokenStream;

    /// Replace the pending stream with one previously taken.
    fn restore_tokens(&mut self, tokens: TokenStream);

    /// Evaluate a single token.  Numbers are pushed, built-ins are executed, variables push their
    /// address and script words have their bodies spliced into the stream.
    fn evaluate_token(&mut self, token: Token) -> error::Result<()>;

    /// Evaluate tokens until the stream is empty, or until the session has been asked to end.
    fn evaluate_pending(&mut self) -> error::Result<()>;

    /// Evaluate tokens until the next token is the given sentinel word.  The sentinel itself is
    /// left in the stream.
    fn evaluate_until(&mut self, sentinel: &str) -> error::Result<()>;

    /// Tokenize a block of source text, append it to the stream and evaluate everything pending.
    ///
    /// The path parameter is only used to stamp token locations for error reporting.  For example,
    /// the repl uses a path of "\<repl\>".
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Read a source file, append its tokens to the stream and evaluate everything pending.
    fn process_source_file(&mut self, path: &str) -> error::Result<()>;
}

/// Definition of a native word handler function.  Can be a lambda, a callable object or a Rust
/// function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Information about a native word.  Once created it's fields are read-only and accessed by member
/// methods.
#[derive(Clone)]
pub struct WordHandlerInfo {
    name: String,
    location: SourceLocation,
    handler: Rc<WordHandler>,
    description: String,
    signature: String,
}

impl WordHandlerInfo {
    /// Create a new WordHandlerInfo instance.
    pub fn new(
        name: String,
        location: SourceLocation,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    ) -> WordHandlerInfo {
        WordHandlerInfo {
            name,
            location,
            handler,
            description,
            signature,
        }
    }

    /// The name of the word itself.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// Where in the Rust source this word was registered.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The handler function for the word.
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }

    /// A simple description of the word.
    pub fn description(&self) -> &String {
        &self.description
    }

    /// The word's stack signature.
    pub fn signature(&self) -> &String {
        &self.signature
    }
}

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        // Register the word while recording where in the source code the word was registered
        // from.
        $interpreter.add_word(
            file!().to_string(),
            line!() as usize,
            column!() as usize,
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Trait for managing the words and names known to the interpreter.
pub trait WordManagement {
    /// If currently set, the location of the token being evaluated.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Add a native word to the built-in table.
    #[allow(clippy::too_many_arguments)]
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// Find a native word by name.
    fn find_native(&self, name: &str) -> Option<&WordHandlerInfo>;

    /// Append a script word to the dictionary.
    fn define_word(&mut self, info: WordInfo);

    /// The dictionary of script defined words.
    fn dictionary(&self) -> &Dictionary;

    /// Bind a name to a data space address.
    fn define_variable(&mut self, name: String, address: Cell);

    /// The index of names bound to data space addresses.
    fn variables(&self) -> &VariableIndex;
}

/// Core interpreter trait.
///
/// Brings together the stack, the token stream and the word tables, and adds the remaining
/// session state: the data space, the string buffer, the loop guards and the output sink.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement {
    /// The data space arena.
    fn data_space(&self) -> &DataSpace;

    /// The data space arena, mutably.
    fn data_space_mut(&mut self) -> &mut DataSpace;

    /// The text of the most recently captured `s"` literal.
    fn string_buffer(&self) -> Option<String>;

    /// Replace the contents of the string buffer.
    fn set_string_buffer(&mut self, text: Option<String>);

    /// Is a loop of the given kind currently running?
    fn loop_active(&self, kind: LoopKind) -> bool;

    /// Mark a loop of the given kind as running or finished.
    fn set_loop_active(&mut self, kind: LoopKind, active: bool);

    /// Where printed output goes.
    fn output(&mut self) -> &mut dyn Write;

    /// Ask for the session to end once the current word returns.
    fn request_exit(&mut self);

    /// Has the session been asked to end?
    fn exit_requested(&self) -> bool;

    /// Add a directory to consult when a file is not found as given.
    fn add_search_path(&mut self, path: &str) -> error::Result<()>;

    /// Find a file, either as given or in one of the search paths, newest path first.
    fn find_file(&self, path: &str) -> error::Result<String>;
}
