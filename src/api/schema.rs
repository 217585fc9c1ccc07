use std::collections::{HashMap, HashSet};

use crate::api::parameter::{ArgumentKind, ArgumentSpec};

/// The declared shape of a command line: positional arguments in consumption
/// order, plus options looked up by name or alias.
///
/// A `Schema` is immutable once built and carries no per-parse state, so it
/// may be re-used across any number of [`parse`](Schema::parse) calls.
///
/// ### Example
/// ```
/// use clargs::{ArgumentSpec, Schema};
///
/// let schema = Schema::new(vec![
///     ArgumentSpec::positional::<String>("source"),
///     ArgumentSpec::option::<u32>("level").alias("l"),
///     ArgumentSpec::flag("verbose"),
/// ]);
/// assert_eq!(schema.positionals().count(), 1);
/// assert_eq!(schema.options().count(), 2);
/// ```
pub struct Schema {
    positionals: Vec<ArgumentSpec>,
    options: Vec<ArgumentSpec>,
    by_name: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl Schema {
    /// Partition the declared specs into positionals (declaration order
    /// preserved) and options (keyed by name and alias).
    ///
    /// # Panics
    /// When two specs share a name, or two options share an alias.
    /// A colliding schema is a programmer error, not a parse-time condition.
    pub fn new(specs: Vec<ArgumentSpec>) -> Self {
        let mut positionals = Vec::default();
        let mut options: Vec<ArgumentSpec> = Vec::default();
        let mut names: HashSet<String> = HashSet::default();
        let mut by_name = HashMap::default();
        let mut by_alias = HashMap::default();

        for spec in specs.into_iter() {
            if !names.insert(spec.name().to_string()) {
                panic!(
                    "invalid schema - duplicate argument name '{name}'",
                    name = spec.name()
                );
            }

            match spec.kind() {
                ArgumentKind::Positional => positionals.push(spec),
                ArgumentKind::Option | ArgumentKind::Flag => {
                    let index = options.len();

                    if let Some(alias) = spec.get_alias() {
                        if by_alias.insert(alias.to_string(), index).is_some() {
                            panic!("invalid schema - duplicate option alias '{alias}'");
                        }
                    }

                    by_name.insert(spec.name().to_string(), index);
                    options.push(spec);
                }
            }
        }

        Self {
            positionals,
            options,
            by_name,
            by_alias,
        }
    }

    /// The positional arguments, in consumption order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.positionals.iter()
    }

    /// The options and flags, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.options.iter()
    }

    /// Whether the schema declares no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positionals.is_empty() && self.options.is_empty()
    }

    /// Resolve a dash-stripped token against the options.
    /// The full name is tried before the alias; both live in one flat
    /// namespace per option.
    pub(crate) fn find_option(&self, name: &str) -> Option<&ArgumentSpec> {
        self.by_name
            .get(name)
            .or_else(|| self.by_alias.get(name))
            .map(|&index| &self.options[index])
    }
}
