use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::data_structures::data_space::Cell,
};
use std::fmt::{self, Debug, Display, Formatter};

/// Longest line the tokenizer will look at.  Anything past this many characters is dropped.
pub const MAX_LINE_LENGTH: usize = 499;

/// Words whose following token is captured up to the next double quote instead of the next
/// whitespace.
const LITERAL_WORDS: [&str; 2] = ["s\"", ".\""];

/// A token is the smallest unit of the language, a run of text plus the place it was found.  What
/// the text means, (a number, a primitive, a word name,) is only decided when the token is
/// evaluated.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token {
    location: SourceLocation,
    text: String,
}

/// A list of tokens found in the source.
pub type TokenList = Vec<Token>;

/// Tokens print as their bare text.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Include the location when debugging.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.text)
    }
}

impl Token {
    /// Create a new token.
    pub fn new(location: SourceLocation, text: String) -> Token {
        Token { location, text }
    }

    /// Create a token that did not come from any source text.
    pub fn synthetic(text: &str) -> Token {
        Token::new(SourceLocation::new(), text.to_string())
    }

    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The token's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check the token's text against a word.
    pub fn is(&self, word: &str) -> bool {
        self.text == word
    }
}

/// Check if the given character is considered whitespace.
fn is_whitespace(next: &char) -> bool {
    *next == ' ' || *next == '\t' || *next == '\r' || *next == '\n'
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Pull text out of the buffer until we hit a whitespace character.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            break;
        }

        text.push(next);
        let _ = buffer.next_char();
    }

    (location, text)
}

/// Capture the text of a string literal.  The single whitespace character that ended the
/// introducing word is dropped, everything after it up to the next `"` is the literal.  The
/// closing quote is consumed.  Running off the end of the line ends the literal.
fn process_string(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let _ = buffer.next_char();

    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.next_char() {
        if next == '"' {
            break;
        }

        text.push(next);
    }

    (location, text)
}

/// Does the text read as an optionally negative decimal integer?  A lone `-` is a word.
pub fn is_number(text: &str) -> bool {
    let digits = match text.strip_prefix('-') {
        Some(rest) => rest,
        None => text,
    };

    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Convert the text into a cell.  Values past the range of a cell saturate at the nearest bound.
pub fn to_cell(text: &str) -> Option<Cell> {
    if !is_number(text) {
        return None;
    }

    match text.parse::<Cell>() {
        Ok(value) => Some(value),
        Err(_) if text.starts_with('-') => Some(Cell::MIN),
        Err(_) => Some(Cell::MAX),
    }
}

/// Splits lines of text into tokens.  The tokenizer remembers, from one line to the next, whether
/// a `:` definition has been opened but not yet closed with `;`.  Line based drivers use that to
/// keep asking for input until a multi-line definition is complete.
#[derive(Default)]
pub struct Tokenizer {
    definition_open: bool,
}

impl Tokenizer {
    /// Create a tokenizer with no open definition.
    pub fn new() -> Tokenizer {
        Tokenizer::default()
    }

    /// Is a `:` definition still waiting for its `;`?
    pub fn definition_open(&self) -> bool {
        self.definition_open
    }

    /// Forget any open definition.  Used when the interpreter recovers from an error and the
    /// buffered text of the definition is thrown away.
    pub fn reset(&mut self) {
        self.definition_open = false;
    }

    /// Tokenize a single line of text.  Returns the tokens found and whether the caller should
    /// keep reading lines because a definition is still open.
    ///
    /// An empty or whitespace only line produces no tokens, leaves the definition state alone and
    /// always tells the caller to stop reading.
    pub fn tokenize_line(&mut self, path: &str, line_number: usize, line: &str) -> (TokenList, bool) {
        let line = match line.char_indices().nth(MAX_LINE_LENGTH) {
            Some((end, _)) => &line[..end],
            None => line,
        };

        let mut buffer = SourceBuffer::new(path, line_number, line);
        let mut token_list = TokenList::new();

        skip_whitespace(&mut buffer);

        if buffer.peek_next().is_none() {
            return (token_list, false);
        }

        while buffer.peek_next().is_some() {
            let (location, text) = process_until_whitespace(&mut buffer);
            let is_literal_word = LITERAL_WORDS.contains(&text.as_str());

            self.track_definition(&text);
            token_list.push(Token::new(location, text));

            if is_literal_word {
                let (location, text) = process_string(&mut buffer);
                token_list.push(Token::new(location, text));
            }

            skip_whitespace(&mut buffer);
        }

        (token_list, self.definition_open)
    }

    /// Tokenize a whole block of text line by line.
    pub fn tokenize_source(&mut self, path: &str, source: &str) -> TokenList {
        let mut token_list = TokenList::new();

        for (index, line) in source.lines().enumerate() {
            let (mut tokens, _) = self.tokenize_line(path, index + 1, line);
            token_list.append(&mut tokens);
        }

        token_list
    }

    fn track_definition(&mut self, text: &str) {
        if !self.definition_open {
            if text == ":" {
                self.definition_open = true;
            }
        } else if text == ";" {
            self.definition_open = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &TokenList) -> Vec<&str> {
        tokens.iter().map(|token| token.text()).collect()
    }

    #[test]
    fn splits_on_all_whitespace() {
        let mut tokenizer = Tokenizer::new();
        let (tokens, more) = tokenizer.tokenize_line("<test>", 1, " 1\t2\r3  + \n");

        assert_eq!(texts(&tokens), vec!["1", "2", "3", "+"]);
        assert!(!more);
    }

    #[test]
    fn token_locations_track_columns() {
        let mut tokenizer = Tokenizer::new();
        let (tokens, _) = tokenizer.tokenize_line("<test>", 7, "dup  swap");

        assert_eq!(tokens[0].location().column(), 1);
        assert_eq!(tokens[1].location().column(), 6);
        assert_eq!(tokens[1].location().line(), 7);
    }

    #[test]
    fn string_literal_keeps_interior_whitespace() {
        let mut tokenizer = Tokenizer::new();
        let (tokens, _) = tokenizer.tokenize_line("<test>", 1, ".\" hello,  world\" 1 .");

        assert_eq!(texts(&tokens), vec![".\"", "hello,  world", "1", "."]);
    }

    #[test]
    fn string_literal_at_end_of_line_is_empty() {
        let mut tokenizer = Tokenizer::new();
        let (tokens, _) = tokenizer.tokenize_line("<test>", 1, "s\"");

        assert_eq!(texts(&tokens), vec!["s\"", ""]);
    }

    #[test]
    fn unterminated_literal_runs_to_end_of_line() {
        let mut tokenizer = Tokenizer::new();
        let (tokens, _) = tokenizer.tokenize_line("<test>", 1, "s\" boot.fs");

        assert_eq!(texts(&tokens), vec!["s\"", "boot.fs"]);
    }

    #[test]
    fn definition_state_spans_lines() {
        let mut tokenizer = Tokenizer::new();

        let (_, more) = tokenizer.tokenize_line("<test>", 1, ": sq");
        assert!(more);

        let (_, more) = tokenizer.tokenize_line("<test>", 2, "dup *");
        assert!(more);

        let (_, more) = tokenizer.tokenize_line("<test>", 3, ";");
        assert!(!more);
        assert!(!tokenizer.definition_open());
    }

    #[test]
    fn blank_line_stops_reading_without_changing_state() {
        let mut tokenizer = Tokenizer::new();
        let _ = tokenizer.tokenize_line("<test>", 1, ": sq");

        let (tokens, more) = tokenizer.tokenize_line("<test>", 2, "   \t");

        assert!(tokens.is_empty());
        assert!(!more);
        assert!(tokenizer.definition_open());
    }

    #[test]
    fn quoted_colon_does_not_open_a_definition() {
        let mut tokenizer = Tokenizer::new();
        let (_, more) = tokenizer.tokenize_line("<test>", 1, ".\" :\"");

        assert!(!more);
    }

    #[test]
    fn long_lines_are_truncated() {
        let mut tokenizer = Tokenizer::new();
        let line = format!("{} 12345", "x".repeat(MAX_LINE_LENGTH - 3));
        let (tokens, _) = tokenizer.tokenize_line("<test>", 1, &line);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text(), "12");
    }

    #[test]
    fn number_recognition() {
        assert!(is_number("42"));
        assert!(is_number("-5"));
        assert!(!is_number("-"));
        assert!(!is_number("--5"));
        assert!(!is_number("5-"));
        assert!(!is_number("+5"));
        assert!(!is_number(""));
        assert!(!is_number("0x10"));
    }

    #[test]
    fn out_of_range_numbers_saturate() {
        assert_eq!(to_cell("99999999999999999999"), Some(Cell::MAX));
        assert_eq!(to_cell("-99999999999999999999"), Some(Cell::MIN));
        assert_eq!(to_cell("-17"), Some(-17));
        assert_eq!(to_cell("dup"), None);
    }
}
