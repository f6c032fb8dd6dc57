//! Splits document text into normalized word tokens.
//!
//! A token is a maximal run of word characters (alphanumeric or
//! underscore); every other character is a separator and is discarded.
//! Tokens are lower-cased according to the configured fold rule. The
//! returned iterator is lazy and borrows the text, so tokenization is
//! restartable by calling [`Tokenizer::tokens`] again.

use clap::ValueEnum;

/// The case-folding rule applied to every token.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum CaseFold {
    /// Fold `A..Z` only. The default.
    #[default]
    Ascii,
    /// Full Unicode lowercasing.
    Unicode,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Tokenizer {
    fold: CaseFold,
}

impl Tokenizer {
    pub fn new(fold: CaseFold) -> Self {
        Self { fold }
    }

    /// Lazily yield the normalized tokens of `text`, in order.
    ///
    /// An empty document yields an empty sequence. There are no error
    /// conditions; malformed encoding is the document source's concern.
    pub fn tokens<'a>(&self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        let fold = self.fold;
        text.split(|c: char| !is_word_char(c))
            .filter(|s| !s.is_empty())
            .map(move |s| match fold {
                CaseFold::Ascii => s.to_ascii_lowercase(),
                CaseFold::Unicode => s.to_lowercase(),
            })
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
