use crate::lang::tokenizing::{Token, TokenList};
use std::collections::VecDeque;

/// The queue of tokens waiting to be evaluated.  New input is appended at the back while word
/// bodies and loop bodies are spliced in at the front so that they run next.
#[derive(Default, Clone)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    /// Create an empty stream.
    pub fn new() -> TokenStream {
        TokenStream::default()
    }

    /// Are there any tokens left?
    pub fn has_next(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// How many tokens are pending.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is the stream empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Take the token at the front of the stream.
    pub fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Look at the token at the front of the stream without taking it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Append a token to the back of the stream.
    pub fn push_back(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    /// Append a list of tokens to the back of the stream, in order.
    pub fn extend(&mut self, tokens: TokenList) {
        self.tokens.extend(tokens);
    }

    /// Splice a list of tokens onto the front of the stream.  After the call the first token of
    /// the list is the next one returned and the rest follow in their original order.
    pub fn push_front_many(&mut self, tokens: &[Token]) {
        for token in tokens.iter().rev() {
            self.tokens.push_front(token.clone());
        }
    }

    /// Drop every pending token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Move the whole stream out, leaving this one empty.
    pub fn take(&mut self) -> TokenStream {
        std::mem::take(self)
    }

    /// Iterate over the pending tokens from front to back.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> TokenList {
        words.iter().map(|word| Token::synthetic(word)).collect()
    }

    fn drain(stream: &mut TokenStream) -> Vec<String> {
        let mut found = Vec::new();

        while let Some(token) = stream.next() {
            found.push(token.text().to_string());
        }

        found
    }

    #[test]
    fn spliced_tokens_run_first_in_order() {
        let mut stream = TokenStream::new();

        stream.extend(tokens(&["a", "b"]));
        stream.push_front_many(&tokens(&["x", "y", "z"]));

        assert_eq!(drain(&mut stream), vec!["x", "y", "z", "a", "b"]);
    }

    #[test]
    fn next_on_empty_stream_is_none() {
        let mut stream = TokenStream::new();

        assert!(!stream.has_next());
        assert!(stream.next().is_none());
        assert!(stream.peek().is_none());
    }

    #[test]
    fn take_leaves_the_stream_empty() {
        let mut stream = TokenStream::new();
        stream.extend(tokens(&["1", "2"]));

        let mut saved = stream.take();

        assert!(stream.is_empty());
        assert_eq!(saved.len(), 2);
        assert_eq!(drain(&mut saved), vec!["1", "2"]);
    }
}
