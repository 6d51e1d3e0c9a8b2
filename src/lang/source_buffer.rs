use core::str::Chars;
use std::fmt::{self, Display, Formatter};



/// The location in the source text where a token was found.  Tokens keep their location even
/// after they have been captured into a word definition, so an error raised while a word's body is
/// replayed still points at the line that defined it.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source.  For example text entered in
    /// the REPL will have a tag of "\<repl\>".
    path: String,

    /// The 1 based line number in the source text where the token was found.
    line: usize,

    /// The 1 based column number in the source text where the token was found.
    column: usize
}


impl Default for SourceLocation
{
    fn default() -> Self
    {
        Self::new()
    }
}


/// Used for error reporting to show where in the source an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    /// Create a new SourceLocation with default values.
    pub fn new() -> SourceLocation
    {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }

    /// The path to the source or a meaningful description of the source.
    pub fn path(&self) -> &String
    {
        &self.path
    }

    /// The 1 based line number in the source.
    pub fn line(&self) -> usize
    {
        self.line
    }

    /// The 1 based column number in the source.
    pub fn column(&self) -> usize
    {
        self.column
    }
}



/// A forward only cursor over a single line of source text.  The tokenizer pulls characters out
/// of it one at a time while the buffer keeps track of the column the cursor has reached.
///
/// The SourceBuffer only holds a reference to the text, the line is not copied.
pub struct SourceBuffer<'a>
{
    /// An iterator over the line being processed.
    chars: Chars<'a>,

    /// The logical location of the cursor in the source.
    location: SourceLocation,

    /// The character under the cursor, if it has been peeked but not yet consumed.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    /// Create a new SourceBuffer for one line of text.  The path and line number are only used to
    /// stamp the locations of the tokens found in it.
    pub fn new(path: &str, line: usize, text: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: text.chars(),
                location: SourceLocation::new_from_info(path, line, 1),
                current: None
            }
    }

    /// The location the cursor is at in the line being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        if self.current.is_none()
        {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None => self.chars.next()
            };

        if next.is_some()
        {
            self.location.column += 1;
        }

        next
    }
}
