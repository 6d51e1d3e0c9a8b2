use std::{ collections::HashMap,
           fs::{ canonicalize, metadata, read_to_string },
           io::{ stdout, Write },
           path::{ Path, PathBuf },
           rc::Rc };
use tracing::{ debug, trace };
use crate::{ lang::{ source_buffer::SourceLocation,
                     token_stream::TokenStream,
                     tokenizing::{ to_cell, Token, Tokenizer } },
             runtime::{ data_structures::{ data_space::{ Cell, DataSpace },
                                           dictionary::{ Dictionary, VariableIndex, WordInfo } },
                        error::{ self,
                                 script_error,
                                 script_error_str,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ CodeManagement,
                                       Interpreter,
                                       InterpreterStack,
                                       LoopKind,
                                       ValueStack,
                                       WordHandler,
                                       WordHandlerInfo,
                                       WordManagement } } };



/// The search paths used to find source files.
pub type SearchPaths = Vec<String>;

/// Table of native words known by the interpreter, keyed by name.
pub type NativeWordTable = HashMap<String, WordHandlerInfo>;



/// One interpreter session.  Everything a script can change lives here; nothing is shared between
/// sessions.
pub struct ForthInterpreter
{
    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// Tokens waiting to be evaluated.
    tokens: TokenStream,

    /// Tokenizer for interactive input.  It remembers whether a definition is still open across
    /// lines.
    tokenizer: Tokenizer,

    /// The location of the token currently being evaluated.
    current_location: Option<SourceLocation>,


    /// Primitives, constants and special forms.
    native_words: NativeWordTable,

    /// Words defined by scripts.
    dictionary: Dictionary,

    /// Names bound to data space addresses by `constant`.
    variables: VariableIndex,

    /// The byte arena behind the variables.
    data_space: DataSpace,

    /// The most recently captured `s"` literal.
    string_buffer: Option<String>,


    /// Is a `do` loop running?
    do_active: bool,

    /// Is a `begin` loop running?
    begin_active: bool,

    /// Set by `bye`.
    exit_requested: bool,


    /// The search paths used to find source files.
    search_paths: SearchPaths,

    /// Where printed output goes.
    output: Box<dyn Write>
}


impl Default for ForthInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}


impl ForthInterpreter
{
    /// Create a new session that prints to stdout.  No words are registered yet.
    pub fn new() -> ForthInterpreter
    {
        ForthInterpreter::with_output(Box::new(stdout()))
    }

    /// Create a new session that prints to the given sink.
    pub fn with_output(output: Box<dyn Write>) -> ForthInterpreter
    {
        ForthInterpreter
            {
                stack: ValueStack::new(),
                tokens: TokenStream::new(),
                tokenizer: Tokenizer::new(),
                current_location: None,

                native_words: NativeWordTable::new(),
                dictionary: Dictionary::new(),
                variables: VariableIndex::new(),
                data_space: DataSpace::new(),
                string_buffer: None,

                do_active: false,
                begin_active: false,
                exit_requested: false,

                search_paths: SearchPaths::new(),
                output
            }
    }

    /// Tokenize one line of interactive input onto the back of the stream.  Returns true while a
    /// `:` definition is still open and the caller should read another line before evaluating.
    pub fn ingest_line(&mut self, path: &str, line_number: usize, line: &str) -> bool
    {
        let (tokens, keep_reading) = self.tokenizer.tokenize_line(path, line_number, line);

        self.tokens.extend(tokens);
        keep_reading
    }

    /// The tokens still waiting to be evaluated.
    pub fn pending_tokens(&self) -> &TokenStream
    {
        &self.tokens
    }

    /// Put the session back into a state where it can accept new input after an error.  The stack,
    /// the pending tokens, the string buffer and the loop guards are all cleared.  Words,
    /// variables and the data space are kept.
    pub fn recover(&mut self)
    {
        trace!(pending = self.tokens.len(), depth = self.stack.len(), "recovering from error");

        self.stack.clear();
        self.tokens.clear();
        self.tokenizer.reset();
        self.string_buffer = None;
        self.do_active = false;
        self.begin_active = false;
        self.current_location = None;
    }

    /// Flush the output sink.
    pub fn flush(&mut self) -> error::Result<()>
    {
        self.output.flush()?;
        Ok(())
    }

    fn expand_word(&mut self, body: &[Token])
    {
        self.tokens.push_front_many(body);
    }
}


impl InterpreterStack for ForthInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn push(&mut self, value: Cell)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Cell>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None => script_error_str(self, ErrorKind::StackUnderflow, "Stack underflow!")
        }
    }

    fn require(&self, count: usize) -> error::Result<()>
    {
        if self.stack.len() < count
        {
            script_error(self,
                         ErrorKind::StackUnderflow,
                         format!("Stack underflow!  Expected {} value(s), found {}.",
                                 count,
                                 self.stack.len()))?;
        }

        Ok(())
    }
}


impl CodeManagement for ForthInterpreter
{
    fn next_token(&mut self) -> error::Result<Token>
    {
        match self.tokens.next()
        {
            Some(token) => Ok(token),
            None => script_error_str(self, ErrorKind::EndOfInput, "Reading past end of token stream.")
        }
    }

    fn peek_token(&self) -> Option<&Token>
    {
        self.tokens.peek()
    }

    fn splice_tokens(&mut self, tokens: &[Token])
    {
        self.tokens.push_front_many(tokens);
    }

    fn take_tokens(&mut self) -> TokenStream
    {
        self.tokens.take()
    }

    fn restore_tokens(&mut self, tokens: TokenStream)
    {
        self.tokens = tokens;
    }

    fn evaluate_token(&mut self, token: Token) -> error::Result<()>
    {
        trace!(token = token.text(), "evaluating");
        self.current_location = Some(token.location().clone());

        // Numbers take precedence over every kind of word.
        if let Some(value) = to_cell(token.text())
        {
            self.push(value);
            return Ok(());
        }

        // Then the primitives, constants and special forms.
        if let Some(info) = self.native_words.get(token.text())
        {
            trace!(word = info.name().as_str(), signature = info.signature().as_str(), "native word");

            let handler = info.handler();
            return (*handler)(self);
        }

        // A variable shadows a script word of the same name, never the other way around.
        if let Some(address) = self.variables.try_get(token.text())
        {
            self.push(address);
            return Ok(());
        }

        if let Some(word) = self.dictionary.try_get(token.text())
        {
            let body = word.body.clone();
            self.expand_word(&body);
            return Ok(());
        }

        script_error(self, ErrorKind::UnknownWord, format!("{} ??", token))
    }

    fn evaluate_pending(&mut self) -> error::Result<()>
    {
        while !self.exit_requested
        {
            match self.tokens.next()
            {
                Some(token) => self.evaluate_token(token)?,
                None => break
            }
        }

        Ok(())
    }

    fn evaluate_until(&mut self, sentinel: &str) -> error::Result<()>
    {
        while !self.exit_requested
        {
            let at_sentinel = match self.peek_token()
                {
                    Some(token) => token.is(sentinel),
                    None => return script_error(self,
                                                ErrorKind::EndOfInput,
                                                format!("Lost the closing {} of a loop.", sentinel))
                };

            if at_sentinel
            {
                break;
            }

            let token = self.next_token()?;
            self.evaluate_token(token)?;
        }

        Ok(())
    }

    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let mut tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize_source(path, source);

        self.tokens.extend(tokens);
        self.evaluate_pending()
    }

    fn process_source_file(&mut self, path: &str) -> error::Result<()>
    {
        let full_path = self.find_file(path)?;

        let source = match read_to_string(&full_path)
            {
                Ok(source) => source,
                Err(err) => return script_error(self,
                                                ErrorKind::Io,
                                                format!("Unable to open: {}: {}", path, err))
            };

        debug!(path = %full_path, "loading source file");
        self.process_source(&full_path, &source)
    }
}


impl WordManagement for ForthInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn add_word(&mut self,
                file: String,
                line: usize,
                column: usize,
                name: String,
                handler: Rc<WordHandler>,
                description: String,
                signature: String)
    {
        let location = SourceLocation::new_from_info(&file, line, column);
        let info = WordHandlerInfo::new(name.clone(), location, handler, description, signature);

        let _ = self.native_words.insert(name, info);
    }

    fn find_native(&self, name: &str) -> Option<&WordHandlerInfo>
    {
        self.native_words.get(name)
    }

    fn define_word(&mut self, info: WordInfo)
    {
        debug!(name = %info.name, tokens = info.body.len(), "defining word");
        self.dictionary.insert(info);
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn define_variable(&mut self, name: String, address: Cell)
    {
        debug!(name = %name, address, "defining variable");
        self.variables.insert(name, address);
    }

    fn variables(&self) -> &VariableIndex
    {
        &self.variables
    }
}


impl Interpreter for ForthInterpreter
{
    fn data_space(&self) -> &DataSpace
    {
        &self.data_space
    }

    fn data_space_mut(&mut self) -> &mut DataSpace
    {
        &mut self.data_space
    }

    fn string_buffer(&self) -> Option<String>
    {
        self.string_buffer.clone()
    }

    fn set_string_buffer(&mut self, text: Option<String>)
    {
        self.string_buffer = text;
    }

    fn loop_active(&self, kind: LoopKind) -> bool
    {
        match kind
        {
            LoopKind::Do => self.do_active,
            LoopKind::Begin => self.begin_active
        }
    }

    fn set_loop_active(&mut self, kind: LoopKind, active: bool)
    {
        match kind
        {
            LoopKind::Do => self.do_active = active,
            LoopKind::Begin => self.begin_active = active
        }
    }

    fn output(&mut self) -> &mut dyn Write
    {
        &mut *self.output
    }

    fn request_exit(&mut self)
    {
        self.exit_requested = true;
    }

    fn exit_requested(&self) -> bool
    {
        self.exit_requested
    }

    fn add_search_path(&mut self, path: &str) -> error::Result<()>
    {
        if let Err(err) = metadata(path)
        {
            return ScriptError::new_as_result(ErrorKind::Io,
                                              None,
                                              format!("Could not append search path {}: {}.",
                                                      path,
                                                      err));
        }

        self.search_paths.push(path.to_string());
        Ok(())
    }

    fn find_file(&self, path: &str) -> error::Result<String>
    {
        let candidates = std::iter::once(PathBuf::from(path))
            .chain(self.search_paths.iter().rev().map(|directory| Path::new(directory).join(path)));

        for candidate in candidates
        {
            if candidate.exists()
            {
                let canonical = canonicalize(candidate)?;

                return match canonical.to_str()
                    {
                        Some(canonical) => Ok(canonical.to_string()),
                        None => script_error_str(self, ErrorKind::Io, "Path contains invalid characters.")
                    };
            }
        }

        script_error(self, ErrorKind::Io, format!("Unable to open: {}", path))
    }
}
