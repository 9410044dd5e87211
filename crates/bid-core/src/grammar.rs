//! Which labels are real calls and which are free-text remarks.
//!
//! The accepted spellings are configuration, enumerated explicitly in
//! [`GrammarConfig`], and every comparison site goes through
//! [`CallGrammar::normalize`].

use crate::call::Call;
use crate::strain::Strain;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("level {0} is outside 1..=7")]
    InvalidLevel(u8),
    #[error("no spellings configured for {0}")]
    EmptySpellings(String),
    #[error("spelling '{0}' is configured for more than one call")]
    DuplicateSpelling(String),
    #[error("invalid call pattern: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    pub levels: Vec<u8>,
    pub strains: BTreeMap<Strain, Vec<String>>,
    pub pass: Vec<String>,
    pub double: Vec<String>,
    pub redouble: Vec<String>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        let spellings = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut strains = BTreeMap::new();
        strains.insert(Strain::Clubs, spellings(&["C", "♣"]));
        strains.insert(Strain::Diamonds, spellings(&["D", "♦"]));
        strains.insert(Strain::Hearts, spellings(&["H", "♥"]));
        strains.insert(Strain::Spades, spellings(&["S", "♠"]));
        strains.insert(Strain::NoTrump, spellings(&["N", "NT"]));
        Self {
            levels: (1..=7).collect(),
            strains,
            pass: spellings(&["P", "PASS"]),
            double: spellings(&["X", "DBL", "DOUBLE"]),
            redouble: spellings(&["XX", "RDBL", "REDOUBLE"]),
        }
    }
}

/// A compiled [`GrammarConfig`].
#[derive(Debug, Clone)]
pub struct CallGrammar {
    levels: BTreeSet<u8>,
    contract: Regex,
    no_trump_suffix: Regex,
    strains: HashMap<String, Strain>,
    specials: HashMap<String, Call>,
}

/// Upper-cases and drops all whitespace.
fn fold(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn alternation(spellings: &mut Vec<String>) -> String {
    // Longest first so "NT" wins over "N".
    spellings.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    spellings
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|")
}

impl CallGrammar {
    pub fn new(config: &GrammarConfig) -> Result<Self, GrammarError> {
        if config.levels.is_empty() {
            return Err(GrammarError::EmptySpellings("levels".into()));
        }
        let mut levels = BTreeSet::new();
        for &level in &config.levels {
            if !(1..=7).contains(&level) {
                return Err(GrammarError::InvalidLevel(level));
            }
            levels.insert(level);
        }
        let level_class: String = levels.iter().map(|&l| char::from(b'0' + l)).collect();

        let mut strains = HashMap::new();
        let mut no_trump = Vec::new();
        for strain in Strain::ALL {
            let list = config.strains.get(&strain).map(Vec::as_slice).unwrap_or(&[]);
            if list.is_empty() {
                return Err(GrammarError::EmptySpellings(format!("{:?}", strain)));
            }
            for spelling in list {
                let key = fold(spelling);
                if strains.insert(key.clone(), strain).is_some() {
                    return Err(GrammarError::DuplicateSpelling(key));
                }
                if strain == Strain::NoTrump {
                    no_trump.push(key);
                }
            }
        }

        let mut specials = HashMap::new();
        for (kind, list, call) in [
            ("pass", &config.pass, Call::Pass),
            ("double", &config.double, Call::Double),
            ("redouble", &config.redouble, Call::Redouble),
        ] {
            if list.is_empty() {
                return Err(GrammarError::EmptySpellings(kind.into()));
            }
            for spelling in list {
                let key = fold(spelling);
                if specials.insert(key.clone(), call).is_some() {
                    return Err(GrammarError::DuplicateSpelling(key));
                }
            }
        }

        let mut strain_keys: Vec<String> = strains.keys().cloned().collect();
        let contract = Regex::new(&format!(
            "^([{}])({})$",
            level_class,
            alternation(&mut strain_keys)
        ))?;
        let no_trump_suffix = Regex::new(&format!(
            "([{}])(?:{})",
            level_class,
            alternation(&mut no_trump)
        ))?;

        Ok(Self {
            levels,
            contract,
            no_trump_suffix,
            strains,
            specials,
        })
    }

    /// The grammar built from [`GrammarConfig::default`].
    pub fn standard() -> &'static CallGrammar {
        static STANDARD: OnceLock<CallGrammar> = OnceLock::new();
        STANDARD.get_or_init(|| {
            CallGrammar::new(&GrammarConfig::default()).expect("default grammar config is valid")
        })
    }

    pub fn parse(&self, label: &str) -> Option<Call> {
        let key = fold(label);
        if let Some(call) = self.specials.get(&key) {
            return Some(*call);
        }
        let caps = self.contract.captures(&key)?;
        let level = caps[1].parse::<u8>().ok()?;
        let strain = *self.strains.get(&caps[2])?;
        Some(Call::Bid { level, strain })
    }

    /// A configured level typed on its own.
    pub fn level(&self, key: &str) -> Option<u8> {
        let level = fold(key).parse::<u8>().ok()?;
        self.levels.contains(&level).then_some(level)
    }

    /// A configured strain spelling typed on its own.
    pub fn strain(&self, key: &str) -> Option<Strain> {
        self.strains.get(&fold(key)).copied()
    }

    /// The comparison token for a label.
    ///
    /// Calls map to their canonical token (`Pass` → `P`, `1NT` → `1N`).
    /// Remarks are upper-cased with whitespace removed and any level-NT
    /// collapsed to level-N.
    pub fn normalize(&self, label: &str) -> String {
        match self.parse(label) {
            Some(call) => call.render(),
            None => self
                .no_trump_suffix
                .replace_all(&fold(label), "${1}N")
                .into_owned(),
        }
    }
}

impl Default for CallGrammar {
    fn default() -> Self {
        CallGrammar::standard().clone()
    }
}
