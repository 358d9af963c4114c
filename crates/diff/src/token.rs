use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unit a text is split into before diffing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Granularity {
    /// Every Unicode scalar value is a token
    #[display(fmt = "Character")]
    Character,

    /// Runs of word characters and runs of whitespace are tokens; any other
    /// character stands on its own
    #[display(fmt = "Word")]
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_alphanumeric() || c == '_' {
            CharClass::Word
        } else if c.is_whitespace() {
            CharClass::Space
        } else {
            CharClass::Other
        }
    }

    /// Whether two neighbouring characters of this class belong to one token
    fn joins(self) -> bool {
        self != CharClass::Other
    }
}

/// Split `text` into tokens borrowed from it.
///
/// Concatenating the returned tokens always yields `text` again.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Character => text
            .char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect(),
        Granularity::Word => split_words(text),
    }
}

fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (i, c) in text.char_indices() {
        let class = CharClass::of(c);
        if let Some(prev) = current {
            if prev != class || !class.joins() {
                tokens.push(&text[start..i]);
                start = i;
            }
        }
        current = Some(class);
    }

    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}
