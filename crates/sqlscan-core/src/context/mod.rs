//! Dialect contexts.
//!
//! A [`Context`] holds the keyword and operator classification of one
//! MySQL or MariaDB version together with the active SQL mode. It is an
//! explicit value: the lexer and the parser borrow it, nothing inside the
//! core keeps a global copy.

mod tables;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::Error;
use crate::lexer::TokenFlags;

/// Every dialect shipped with the crate, oldest first inside each family.
pub const REGISTERED: &[&str] = &[
    "MySql50000",
    "MySql50100",
    "MySql50500",
    "MySql50600",
    "MySql50700",
    "MySql80000",
    "MariaDb100000",
    "MariaDb100100",
    "MariaDb100200",
    "MariaDb100300",
    "MariaDb100400",
    "MariaDb100500",
    "MariaDb100600",
];

/// The dialect used when none is requested.
pub const DEFAULT_CONTEXT: &str = "MySql80000";

/// MariaDB forked from this MySQL release; older MySQL revisions apply to it.
const MARIADB_BASE: u32 = 50500;

/// A server family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    /// Oracle MySQL.
    MySql,
    /// MariaDB.
    MariaDb,
}

impl Family {
    /// The prefix used in context names.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::MySql => "MySql",
            Self::MariaDb => "MariaDb",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        if prefix.eq_ignore_ascii_case("MySql") {
            Some(Self::MySql)
        } else if prefix.eq_ignore_ascii_case("MariaDb") {
            Some(Self::MariaDb)
        } else {
            None
        }
    }
}

bitflags::bitflags! {
    /// Server SQL modes that change how text is classified.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct SqlMode: u32 {
        /// `"` quotes identifiers instead of strings.
        const ANSI_QUOTES = 1 << 0;
        /// Whitespace is allowed between a function name and `(`.
        const IGNORE_SPACE = 1 << 1;
        /// `REAL` is a synonym of `FLOAT` instead of `DOUBLE`.
        const REAL_AS_FLOAT = 1 << 2;
        /// `||` concatenates instead of being a logical OR.
        const PIPES_AS_CONCAT = 1 << 3;

        const ANSI = Self::ANSI_QUOTES.bits()
            | Self::IGNORE_SPACE.bits()
            | Self::REAL_AS_FLOAT.bits()
            | Self::PIPES_AS_CONCAT.bits();
    }
}

impl SqlMode {
    /// Parses a comma separated list of mode names.
    ///
    /// Unknown names are ignored, matching how the server reports rather
    /// than rejects modes it does not implement.
    #[must_use]
    pub fn parse(modes: &str) -> Self {
        modes
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .fold(Self::empty(), |acc, name| {
                acc | Self::from_name(&name.to_ascii_uppercase()).unwrap_or_else(Self::empty)
            })
    }
}

/// The keyword and operator rules of one dialect version.
#[derive(Debug, Clone)]
pub struct Context {
    name: String,
    family: Family,
    version: u32,
    keywords: HashMap<String, TokenFlags>,
    operators: HashMap<&'static str, TokenFlags>,
    keyword_max_words: usize,
    mode: SqlMode,
}

impl Context {
    /// Loads a registered context by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownContext`] if `name` is not registered.
    pub fn load(name: &str) -> Result<Self, Error> {
        let (family, version) = split_name(name)
            .filter(|(family, version)| is_registered(*family, *version))
            .ok_or_else(|| Error::UnknownContext(String::from(name)))?;
        Ok(Self::build(family, version))
    }

    /// Loads the registered context nearest to `name` without exceeding it.
    ///
    /// `MySql50712` resolves to `MySql50700`. Returns `None` if the family
    /// prefix is unknown or every registered version is newer.
    #[must_use]
    pub fn load_closest(name: &str) -> Option<Self> {
        let (family, version) = split_name(name)?;
        let version = Self::closest_version(family, version)?;
        tracing::debug!(requested = name, family = family.prefix(), version, "context resolved");
        Some(Self::build(family, version))
    }

    /// Returns the name of the registered context nearest to `name`.
    #[must_use]
    pub fn closest(name: &str) -> Option<String> {
        let (family, version) = split_name(name)?;
        Self::closest_version(family, version).map(|v| format!("{}{v}", family.prefix()))
    }

    fn closest_version(family: Family, version: u32) -> Option<u32> {
        registered()
            .filter(|(f, v)| *f == family && *v <= version)
            .map(|(_, v)| v)
            .max()
    }

    fn build(family: Family, version: u32) -> Self {
        let mut keywords: HashMap<String, TokenFlags> = tables::BASE_KEYWORDS
            .iter()
            .map(|(kw, flags)| (String::from(*kw), *flags))
            .collect();

        for revision in tables::REVISIONS {
            let applies = match (family, revision.family) {
                (Family::MySql, Family::MySql) | (Family::MariaDb, Family::MariaDb) => {
                    revision.since <= version
                }
                (Family::MariaDb, Family::MySql) => revision.since <= MARIADB_BASE,
                (Family::MySql, Family::MariaDb) => false,
            };
            if !applies {
                continue;
            }
            for kw in revision.removed {
                keywords.remove(*kw);
            }
            for (kw, flags) in revision.added {
                keywords.insert(String::from(*kw), *flags);
            }
        }

        let keyword_max_words = keywords
            .keys()
            .map(|kw| kw.split(' ').count())
            .max()
            .unwrap_or(1);

        Self {
            name: format!("{}{version}", family.prefix()),
            family,
            version,
            keywords,
            operators: tables::OPERATORS.iter().copied().collect(),
            keyword_max_words,
            mode: SqlMode::empty(),
        }
    }

    /// Returns this context with the given SQL mode.
    #[must_use]
    pub fn with_mode(mut self, mode: SqlMode) -> Self {
        self.mode = mode;
        self
    }

    /// The context name, e.g. `MySql80000`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn family(&self) -> Family {
        self.family
    }

    /// The flat version number, e.g. `100600`.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// The version as `(major, minor, patch)`.
    #[must_use]
    pub const fn version_parts(&self) -> (u32, u32, u32) {
        (
            self.version / 10_000,
            (self.version / 100) % 100,
            self.version % 100,
        )
    }

    #[must_use]
    pub const fn mode(&self) -> SqlMode {
        self.mode
    }

    /// Returns true if `mode` is fully enabled.
    #[must_use]
    pub const fn has_mode(&self, mode: SqlMode) -> bool {
        self.mode.contains(mode)
    }

    /// The largest number of words in a composed keyword.
    #[must_use]
    pub const fn keyword_max_words(&self) -> usize {
        self.keyword_max_words
    }

    /// Older registered versions of the same family, newest first.
    #[must_use]
    pub fn fallbacks(&self) -> Vec<String> {
        let mut older: Vec<u32> = registered()
            .filter(|(f, v)| *f == self.family && *v < self.version)
            .map(|(_, v)| v)
            .collect();
        older.sort_unstable_by(|a, b| b.cmp(a));
        older
            .into_iter()
            .map(|v| format!("{}{v}", self.family.prefix()))
            .collect()
    }

    /// Looks up a keyword. Whitespace inside composed keywords may be any run.
    #[must_use]
    pub fn lookup_keyword(&self, text: &str) -> Option<TokenFlags> {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        self.keywords.get(&normalized).copied()
    }

    /// Looks up an operator.
    #[must_use]
    pub fn lookup_operator(&self, text: &str) -> Option<TokenFlags> {
        let flags = self.operators.get(text).copied()?;
        if text == "||" && self.has_mode(SqlMode::PIPES_AS_CONCAT) {
            return Some(TokenFlags::OPERATOR_ARITHMETIC);
        }
        Some(flags)
    }

    /// Returns true if `word` is a reserved keyword.
    #[must_use]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.lookup_keyword(word)
            .is_some_and(|flags| flags.contains(TokenFlags::KEYWORD_RESERVED))
    }

    /// Returns true if `word` is a keyword of any kind.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.lookup_keyword(word).is_some()
    }

    /// Quotes an identifier when it would not survive unquoted.
    #[must_use]
    pub fn escape(&self, name: &str) -> String {
        let plain = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            && !name.chars().all(|c| c.is_ascii_digit());
        if plain && !self.is_reserved(name) {
            return String::from(name);
        }
        let quote = if self.has_mode(SqlMode::ANSI_QUOTES) {
            '"'
        } else {
            '`'
        };
        let mut escaped = String::with_capacity(name.len() + 2);
        escaped.push(quote);
        for c in name.chars() {
            if c == quote {
                escaped.push(quote);
            }
            escaped.push(c);
        }
        escaped.push(quote);
        escaped
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::build(Family::MySql, 80000)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn registered() -> impl Iterator<Item = (Family, u32)> {
    REGISTERED.iter().filter_map(|name| split_name(name))
}

fn is_registered(family: Family, version: u32) -> bool {
    registered().any(|(f, v)| f == family && v == version)
}

/// Splits `MariaDb100600` into its family and flat version.
fn split_name(name: &str) -> Option<(Family, u32)> {
    let digits = name.find(|c: char| c.is_ascii_digit())?;
    let family = Family::from_prefix(&name[..digits])?;
    let version = name[digits..].parse().ok()?;
    Some((family, version))
}
