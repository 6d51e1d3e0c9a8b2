use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::TokenList},
    runtime::data_structures::data_space::Cell,
};
use std::fmt::{self, Display, Formatter};

/// A word defined by a script with `:`.  The body is the list of tokens captured between the name
/// and the closing `;`, comments already removed.  It is never parsed, only spliced back into the
/// token stream when the word is invoked.
#[derive(Clone)]
pub struct WordInfo {
    /// The location in the source where the word was defined.
    pub location: SourceLocation,

    /// The name of the word.
    pub name: String,

    /// The word's tokens, in order.
    pub body: TokenList,
}

/// A name created by `constant`, bound to an address in the data space.
#[derive(Clone)]
pub struct VariableInfo {
    /// The name of the variable.
    pub name: String,

    /// The data space address the name stands for.
    pub address: Cell,
}

/// The dictionary of script defined words.  It is append only and searched front to back, so when
/// a name is defined more than once the earliest definition is the one that is found.
#[derive(Default)]
pub struct Dictionary {
    words: Vec<WordInfo>,
}

/// List the words in definition order.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for word in self.words.iter() {
            write!(formatter, "{} ", word.name)?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary::default()
    }

    /// Append a new word.
    pub fn insert(&mut self, info: WordInfo) {
        self.words.push(info);
    }

    /// Find the first word with the given name.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.iter().find(|word| word.name == name)
    }

    /// How many words have been defined, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Has anything been defined yet?
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The index of names created by `constant`.  Same policy as the dictionary: append only, first
/// match wins.
#[derive(Default)]
pub struct VariableIndex {
    variables: Vec<VariableInfo>,
}

/// List the variables in definition order.
impl Display for VariableIndex {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        for variable in self.variables.iter() {
            write!(formatter, "{} ", variable.name)?;
        }

        Ok(())
    }
}

impl VariableIndex {
    /// Create a new empty index.
    pub fn new() -> VariableIndex {
        VariableIndex::default()
    }

    /// Append a new variable.
    pub fn insert(&mut self, name: String, address: Cell) {
        self.variables.push(VariableInfo { name, address });
    }

    /// Find the address of the first variable with the given name.
    pub fn try_get(&self, name: &str) -> Option<Cell> {
        self.variables
            .iter()
            .find(|variable| variable.name == name)
            .map(|variable| variable.address)
    }

    /// How many variables have been created, duplicates included.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Has anything been created yet?
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::tokenizing::Token;

    fn word(name: &str, body: &[&str]) -> WordInfo {
        WordInfo {
            location: SourceLocation::new(),
            name: name.to_string(),
            body: body.iter().map(|text| Token::synthetic(text)).collect(),
        }
    }

    #[test]
    fn earliest_definition_wins() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(word("sq", &["dup", "*"]));
        dictionary.insert(word("sq", &["drop"]));

        let found = dictionary.try_get("sq").map(|info| info.body.len());

        assert_eq!(found, Some(2));
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.try_get("cube").is_none());
    }

    #[test]
    fn variables_resolve_to_first_address() {
        let mut variables = VariableIndex::new();

        variables.insert("v".to_string(), 0);
        variables.insert("w".to_string(), 8);
        variables.insert("v".to_string(), 16);

        assert_eq!(variables.try_get("v"), Some(0));
        assert_eq!(variables.try_get("w"), Some(8));
        assert_eq!(variables.try_get("x"), None);
        assert_eq!(variables.to_string(), "v w v ");
    }

    #[test]
    fn dictionary_lists_in_definition_order() {
        let mut dictionary = Dictionary::new();

        dictionary.insert(word("b", &["1"]));
        dictionary.insert(word("a", &["2"]));

        assert_eq!(dictionary.to_string(), "b a ");
    }
}
