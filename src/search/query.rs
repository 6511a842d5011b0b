//! Compiled search targets.

use std::borrow::Cow;

/// Match granularity, picked from the target's length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Scan characters; a match is a character equal to the target
    Character,
    /// Split on whitespace; a match is a token equal to the target
    Token,
}

impl SearchMode {
    /// `Character` for targets of at most one character, `Token` otherwise
    pub fn for_target(target: &str) -> Self {
        if target.chars().nth(1).is_none() {
            SearchMode::Character
        } else {
            SearchMode::Token
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Character => "character",
            SearchMode::Token => "token",
        }
    }
}

/// A search target with its mode and case folding resolved.
///
/// Content is never folded as a whole and a record's cache is never
/// touched.
#[derive(Debug, Clone)]
pub struct SearchQuery<'a> {
    target: Cow<'a, str>,
    mode: SearchMode,
    case_sensitive: bool,
}

impl<'a> SearchQuery<'a> {
    pub fn compile(target: &'a str, case_sensitive: bool) -> Self {
        let mode = SearchMode::for_target(target);
        let target = if case_sensitive {
            Cow::Borrowed(target)
        } else {
            Cow::Owned(target.to_lowercase())
        };

        Self {
            target,
            mode,
            case_sensitive,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Whether one character of the content equals the target
    fn char_matches(&self, c: char) -> bool {
        if self.case_sensitive {
            self.target.chars().eq(std::iter::once(c))
        } else {
            c.to_lowercase().eq(self.target.chars())
        }
    }

    /// Whether one token of the content equals the target
    fn token_matches(&self, token: &str) -> bool {
        if self.case_sensitive {
            token == self.target()
        } else {
            token.to_lowercase() == self.target()
        }
    }

    /// Indexes of every match in `content`, in order.
    ///
    /// Character indexes in character mode, token indexes in token mode.
    /// Case folding is applied one character or token at a time, so indexes
    /// always count positions in `content` as given. An empty target never
    /// matches.
    pub fn match_indexes<'c>(&'c self, content: &'c str) -> Box<dyn Iterator<Item = usize> + 'c> {
        match self.mode {
            SearchMode::Character if self.target.is_empty() => Box::new(std::iter::empty()),
            SearchMode::Character => Box::new(
                content
                    .chars()
                    .enumerate()
                    .filter(move |(_, c)| self.char_matches(*c))
                    .map(|(index, _)| index),
            ),
            SearchMode::Token => Box::new(
                content
                    .split_whitespace()
                    .enumerate()
                    .filter(move |(_, token)| self.token_matches(token))
                    .map(|(index, _)| index),
            ),
        }
    }
}
