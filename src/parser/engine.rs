use std::any::Any;
use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use crate::api::{ArgumentSpec, Schema};
use crate::model::Arity;
use crate::value::{ArgValue, ConversionError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A failure to parse a token list against a [`Schema`].
///
/// Every variant aborts the whole parse; no partial result is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The token list was empty - not even the program name placeholder.
    #[error("empty command line - expected the program name placeholder.")]
    EmptyCommandLine,

    /// One or more required arguments were absent at the end of the parse.
    #[error("missing required arguments: {}.", .0.join(", "))]
    MissingArguments(Vec<String>),

    /// A dash-prefixed token matched no option name or alias, or a bare token
    /// arrived with no positional slot left to receive it.
    #[error("unexpected argument '{0}'.")]
    UnexpectedArgument(String),

    /// The consumed window size violated the matched argument's arity.
    #[error("invalid number of values for '{name}' (provided={provided}, expected={expected}).")]
    InvalidArity {
        /// The matched argument's name.
        name: String,
        /// The number of value tokens actually consumed.
        provided: usize,
        /// The declared arity.
        expected: Arity,
    },

    /// A matched value failed its type conversion.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// The outcome of a successful parse: a mapping from argument name to its
/// dynamically typed value.
///
/// Keys are present only for arguments that were supplied or defaulted;
/// an absent key means "not given and no default."
#[derive(Debug, Default)]
pub struct Matches {
    values: HashMap<String, ArgValue>,
}

impl Matches {
    /// Typed lookup by argument name.
    /// Yields `None` if the key was never populated, or the stored value is
    /// not a `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name).and_then(|value| value.get::<T>())
    }

    /// Whether the argument was supplied or defaulted.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of populated arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no argument was populated.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Schema {
    /// Parse a token list against this schema.
    ///
    /// By convention `tokens[0]` is the program name placeholder; it is never
    /// matched against the schema.  Options and positionals may interleave
    /// freely: positionals consume bare tokens in declaration order wherever
    /// they appear in the stream.
    ///
    /// Value consumption is greedy and non-backtracking: each matched
    /// argument takes the consecutive non-dash tokens that follow, capped at
    /// its arity maximum.  Any dash-prefixed token stops the window, known
    /// option or not.
    ///
    /// ### Example
    /// ```
    /// use clargs::{ArgumentSpec, Schema};
    ///
    /// let schema = Schema::new(vec![
    ///     ArgumentSpec::positional::<String>("source"),
    ///     ArgumentSpec::option::<u32>("level").alias("l").default_value(0u32),
    /// ]);
    ///
    /// let matches = schema.parse(&["program", "main.c", "-l", "2"]).unwrap();
    /// assert_eq!(matches.get::<String>("source"), Some(&"main.c".to_string()));
    /// assert_eq!(matches.get::<u32>("level"), Some(&2));
    ///
    /// let matches = schema.parse(&["program", "main.c"]).unwrap();
    /// assert_eq!(matches.get::<u32>("level"), Some(&0));
    /// ```
    pub fn parse(&self, tokens: &[&str]) -> Result<Matches, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::EmptyCommandLine);
        }

        let mut missing: Vec<String> = self
            .positionals()
            .chain(self.options())
            .filter(|spec| spec.is_required())
            .map(|spec| spec.name().to_string())
            .collect();

        if tokens.len() == 1 && !missing.is_empty() {
            return Err(ParseError::MissingArguments(missing));
        }

        let mut pending: VecDeque<&ArgumentSpec> = self.positionals().collect();
        let mut values: HashMap<String, ArgValue> = HashMap::default();
        let mut index = 1;

        while index < tokens.len() {
            let token = tokens[index];

            let spec = if token.starts_with('-') {
                let name = token.trim_start_matches('-');
                let spec = self
                    .find_option(name)
                    .ok_or_else(|| ParseError::UnexpectedArgument(name.to_string()))?;
                // The option marker is never part of its values.
                index += 1;
                spec
            } else {
                pending
                    .pop_front()
                    .ok_or_else(|| ParseError::UnexpectedArgument(token.to_string()))?
            };

            let cap = spec.get_arity().maximum();
            let mut end = index;

            while end < tokens.len() && end - index < cap && !tokens[end].starts_with('-') {
                end += 1;
            }

            let window = &tokens[index..end];

            #[cfg(feature = "tracing_debug")]
            {
                let name = spec.name();
                let count = window.len();
                debug!("Matched '{name}' against {count} value token(s).");
            }

            if !spec.get_arity().admits(window.len()) {
                return Err(ParseError::InvalidArity {
                    name: spec.name().to_string(),
                    provided: window.len(),
                    expected: spec.get_arity(),
                });
            }

            let value = spec.convert(window)?;
            missing.retain(|name| name != spec.name());
            // A repeated option overwrites: the later occurrence wins.
            values.insert(spec.name().to_string(), value);
            index = end;
        }

        if !missing.is_empty() {
            return Err(ParseError::MissingArguments(missing));
        }

        for spec in self.positionals().chain(self.options()) {
            if !values.contains_key(spec.name()) {
                if let Some(fallback) = spec.default() {
                    values.insert(spec.name().to_string(), fallback);
                }
            }
        }

        Ok(Matches { values })
    }
}
