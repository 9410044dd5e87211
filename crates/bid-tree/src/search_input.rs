//! The call-by-call "speed dial" input.

use bid_core::{Call, CallGrammar, Strain};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InputToken {
    /// A level digit still waiting for its strain.
    Level(u8),
    Bid { level: u8, strain: Strain },
    /// Pass, double, redouble or any other typed token.
    Other(String),
}

impl fmt::Display for InputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputToken::Level(level) => write!(f, "{}", level),
            InputToken::Bid { level, strain } => write!(f, "{}{}", level, strain),
            InputToken::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Reads one typed token with the configured spellings: a bare level, a
/// call, or a remark in its normalized form.
fn parse_token(token: &str, grammar: &CallGrammar) -> InputToken {
    if let Some(level) = grammar.level(token) {
        return InputToken::Level(level);
    }
    match grammar.parse(token) {
        Some(Call::Bid { level, strain }) => InputToken::Bid { level, strain },
        Some(call) => InputToken::Other(call.render()),
        None => InputToken::Other(grammar.normalize(token)),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchInput {
    tokens: Vec<InputToken>,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input equal to an already normalized sequence.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], grammar: &CallGrammar) -> Self {
        Self {
            tokens: tokens
                .iter()
                .map(|t| parse_token(t.as_ref(), grammar))
                .collect(),
        }
    }

    /// Applies one key: a level digit, a strain letter, or a whole call.
    ///
    /// A strain right after a bare level completes that bid; anything else
    /// starts a new token.
    pub fn push_key(&mut self, key: &str, grammar: &CallGrammar) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        if let Some(strain) = grammar.strain(key) {
            if let Some(InputToken::Level(level)) = self.tokens.last().cloned() {
                self.tokens.pop();
                self.tokens.push(InputToken::Bid { level, strain });
                return;
            }
        }
        self.tokens.push(parse_token(key, grammar));
    }

    /// Shrinks a bid back to its bare level, or drops the last token.
    pub fn back(&mut self) {
        if let Some(InputToken::Bid { level, .. }) = self.tokens.pop() {
            self.tokens.push(InputToken::Level(level));
        }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[InputToken] {
        &self.tokens
    }

    pub fn sequence(&self) -> Vec<String> {
        self.tokens.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use bid_core::GrammarConfig;

    fn typed_with(grammar: &CallGrammar, keys: &[&str]) -> SearchInput {
        let mut input = SearchInput::new();
        for key in keys {
            input.push_key(key, grammar);
        }
        input
    }

    fn typed(keys: &[&str]) -> SearchInput {
        typed_with(CallGrammar::standard(), keys)
    }

    #[test]
    fn test_level_then_strain_makes_one_bid() {
        let input = typed(&["1", "C", "P", "2", "N"]);
        assert_eq!(input.sequence(), vec!["1C", "P", "2N"]);
    }

    #[test]
    fn test_strain_without_level_is_its_own_token() {
        let input = typed(&["1", "C", "H"]);
        assert_eq!(input.sequence(), vec!["1C", "H"]);
    }

    #[test]
    fn test_nt_key() {
        let input = typed(&["3", "NT"]);
        assert_eq!(
            input.tokens(),
            &[InputToken::Bid {
                level: 3,
                strain: Strain::NoTrump
            }]
        );
    }

    #[test]
    fn test_suit_symbol_keys() {
        let input = typed(&["1", "♣", "P", "2", "♥"]);
        assert_eq!(input.sequence(), vec!["1C", "P", "2H"]);
        assert_eq!(typed(&["3♠"]).sequence(), vec!["3S"]);
    }

    #[test]
    fn test_configured_spellings() {
        let mut config = GrammarConfig::default();
        config
            .strains
            .insert(Strain::NoTrump, vec!["N".into(), "NT".into(), "SA".into()]);
        config.levels = vec![1, 2, 3];
        let grammar = CallGrammar::new(&config).unwrap();

        let input = typed_with(&grammar, &["1", "SA"]);
        assert_eq!(
            input.tokens(),
            &[InputToken::Bid {
                level: 1,
                strain: Strain::NoTrump
            }]
        );
        // 4 is not a configured level, so it cannot start a bid.
        let input = typed_with(&grammar, &["4", "C"]);
        assert_eq!(input.sequence(), vec!["4", "C"]);
    }

    #[test]
    fn test_back_shrinks_then_pops() {
        let mut input = typed(&["1", "C", "X"]);
        input.back();
        assert_eq!(input.sequence(), vec!["1C"]);
        input.back();
        assert_eq!(input.sequence(), vec!["1"]);
        input.back();
        assert!(input.is_empty());
        input.back();
        assert!(input.is_empty());
    }

    #[test]
    fn test_specials_and_clear() {
        let mut input = typed(&["1", "D", "xx", "p"]);
        assert_eq!(input.sequence(), vec!["1D", "XX", "P"]);
        input.clear();
        assert!(input.is_empty());
    }

    #[test]
    fn test_whole_bid_key_can_be_shrunk() {
        let mut input = typed(&["2h"]);
        assert_eq!(input.sequence(), vec!["2H"]);
        input.back();
        assert_eq!(input.tokens(), &[InputToken::Level(2)]);
    }

    #[test]
    fn test_from_tokens() {
        let input = SearchInput::from_tokens(&["1N", "P", "GAMES"], CallGrammar::standard());
        assert_eq!(
            input.tokens()[0],
            InputToken::Bid {
                level: 1,
                strain: Strain::NoTrump
            }
        );
        assert_eq!(input.tokens()[1], InputToken::Other("P".into()));
        assert_eq!(input.sequence(), vec!["1N", "P", "GAMES"]);
    }
}
