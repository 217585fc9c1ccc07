use std::any::Any;
use std::str::FromStr;

use crate::model::Arity;
use crate::value::{ArgValue, ConversionError};

/// How a declared argument matches input tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Matched by position amongst the bare (non-dash) tokens.
    Positional,
    /// Matched by a dash-prefixed name or alias token, followed by its value token(s).
    Option,
    /// A zero-arity option whose mere presence yields `true`.
    Flag,
}

type ScalarFn = Box<dyn Fn(&str) -> Result<ArgValue, ConversionError> + Send + Sync>;
type VariadicFn = Box<dyn Fn(&[String]) -> Result<ArgValue, ConversionError> + Send + Sync>;
type DefaultFn = Box<dyn Fn() -> ArgValue + Send + Sync>;

/// The conversion strategy stored on each spec.
/// Invoked uniformly by the engine, branching on the spec's arity.
pub(crate) enum Converter {
    /// Converts the single matched token.
    Scalar(ScalarFn),
    /// Converts the whole ordered window of matched tokens.
    Variadic(VariadicFn),
}

/// One declared argument: the unit of a [`Schema`](crate::Schema).
///
/// Build via the constructor families [`ArgumentSpec::positional`],
/// [`ArgumentSpec::variadic`], [`ArgumentSpec::option`],
/// [`ArgumentSpec::variadic_option`], and [`ArgumentSpec::flag`], then refine
/// with the builder methods.
pub struct ArgumentSpec {
    name: String,
    alias: Option<String>,
    kind: ArgumentKind,
    arity: Arity,
    required: bool,
    default: Option<DefaultFn>,
    description: Option<String>,
    converter: Converter,
}

impl std::fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let alias = match &self.alias {
            Some(a) => format!(" -{a},"),
            None => "".to_string(),
        };
        write!(
            f,
            "{kind:?}[{name},{alias} {arity}, required={required}]",
            kind = self.kind,
            name = self.name,
            arity = self.arity,
            required = self.required,
        )
    }
}

fn scalar_from_str<T>() -> Converter
where
    T: FromStr + Any + Send + Sync,
{
    Converter::Scalar(Box::new(|token: &str| {
        T::from_str(token)
            .map(ArgValue::new)
            .map_err(|_| ConversionError {
                token: token.to_string(),
                type_name: std::any::type_name::<T>(),
            })
    }))
}

fn variadic_from_str<T>() -> Converter
where
    T: FromStr + Any + Send + Sync,
{
    Converter::Variadic(Box::new(|tokens: &[String]| {
        let mut items: Vec<T> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let item = T::from_str(token).map_err(|_| ConversionError {
                token: token.clone(),
                type_name: std::any::type_name::<T>(),
            })?;
            items.push(item);
        }

        Ok(ArgValue::new(items))
    }))
}

impl ArgumentSpec {
    fn new(name: &str, kind: ArgumentKind, arity: Arity, converter: Converter) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
            kind,
            arity,
            required: false,
            default: None,
            description: None,
            converter,
        }
    }

    /// Create a positional argument taking precisely one value token, parsed as `T`.
    ///
    /// Plain string positionals are the `T = String` instantiation.
    ///
    /// ### Example
    /// ```
    /// use clargs::{ArgumentSpec, Schema};
    ///
    /// let schema = Schema::new(vec![ArgumentSpec::positional::<u32>("count")]);
    /// let matches = schema.parse(&["program", "5"]).unwrap();
    /// assert_eq!(matches.get::<u32>("count"), Some(&5));
    /// ```
    pub fn positional<T>(name: &str) -> Self
    where
        T: FromStr + Any + Send + Sync,
    {
        Self::new(
            name,
            ArgumentKind::Positional,
            Arity::Scalar,
            scalar_from_str::<T>(),
        )
    }

    /// Create a positional argument with an explicit conversion over its single token.
    pub fn positional_with(
        name: &str,
        convert: impl Fn(&str) -> Result<ArgValue, ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::Positional,
            Arity::Scalar,
            Converter::Scalar(Box::new(convert)),
        )
    }

    /// Create a variadic positional argument, parsed element-wise into a `Vec<T>`.
    ///
    /// Consumes between 1 and unlimited value tokens by default; narrow with
    /// [`ArgumentSpec::arity`].
    ///
    /// ### Example
    /// ```
    /// use clargs::{ArgumentSpec, Schema};
    ///
    /// let schema = Schema::new(vec![ArgumentSpec::variadic::<u32>("items")]);
    /// let matches = schema.parse(&["program", "1", "2", "3"]).unwrap();
    /// assert_eq!(matches.get::<Vec<u32>>("items"), Some(&vec![1, 2, 3]));
    /// ```
    pub fn variadic<T>(name: &str) -> Self
    where
        T: FromStr + Any + Send + Sync,
    {
        Self::new(
            name,
            ArgumentKind::Positional,
            Arity::Range(1, usize::MAX),
            variadic_from_str::<T>(),
        )
    }

    /// Create a variadic positional argument with an explicit conversion over the
    /// whole ordered token window.
    pub fn variadic_with(
        name: &str,
        convert: impl Fn(&[String]) -> Result<ArgValue, ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::Positional,
            Arity::Range(1, usize::MAX),
            Converter::Variadic(Box::new(convert)),
        )
    }

    /// Create an option taking precisely one value token, parsed as `T`.
    ///
    /// ### Example
    /// ```
    /// use clargs::{ArgumentSpec, Schema};
    ///
    /// let schema = Schema::new(vec![ArgumentSpec::option::<String>("output").alias("o")]);
    /// let matches = schema.parse(&["program", "-o", "out.bin"]).unwrap();
    /// assert_eq!(matches.get::<String>("output"), Some(&"out.bin".to_string()));
    /// ```
    pub fn option<T>(name: &str) -> Self
    where
        T: FromStr + Any + Send + Sync,
    {
        Self::new(
            name,
            ArgumentKind::Option,
            Arity::Scalar,
            scalar_from_str::<T>(),
        )
    }

    /// Create an option with an explicit conversion over its single value token.
    pub fn option_with(
        name: &str,
        convert: impl Fn(&str) -> Result<ArgValue, ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::Option,
            Arity::Scalar,
            Converter::Scalar(Box::new(convert)),
        )
    }

    /// Create a variadic option, parsed element-wise into a `Vec<T>`.
    pub fn variadic_option<T>(name: &str) -> Self
    where
        T: FromStr + Any + Send + Sync,
    {
        Self::new(
            name,
            ArgumentKind::Option,
            Arity::Range(1, usize::MAX),
            variadic_from_str::<T>(),
        )
    }

    /// Create a variadic option with an explicit conversion over the whole
    /// ordered token window.
    pub fn variadic_option_with(
        name: &str,
        convert: impl Fn(&[String]) -> Result<ArgValue, ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            ArgumentKind::Option,
            Arity::Range(1, usize::MAX),
            Converter::Variadic(Box::new(convert)),
        )
    }

    /// Create a boolean flag: an option consuming no value tokens.
    ///
    /// Absent, the flag parses to its default (`false` unless overridden);
    /// present, it parses to `true`.
    ///
    /// ### Example
    /// ```
    /// use clargs::{ArgumentSpec, Schema};
    ///
    /// let schema = Schema::new(vec![ArgumentSpec::flag("verbose").alias("v")]);
    ///
    /// let matches = schema.parse(&["program", "-v"]).unwrap();
    /// assert_eq!(matches.get::<bool>("verbose"), Some(&true));
    ///
    /// let matches = schema.parse(&["program"]).unwrap();
    /// assert_eq!(matches.get::<bool>("verbose"), Some(&false));
    /// ```
    pub fn flag(name: &str) -> Self {
        let mut spec = Self::new(
            name,
            ArgumentKind::Flag,
            Arity::Range(0, 0),
            Converter::Variadic(Box::new(|_| Ok(ArgValue::new(true)))),
        );
        spec.default.replace(Box::new(|| ArgValue::new(false)));
        spec
    }

    /// Set the short form for this option.
    ///
    /// Both the full name and the alias resolve to the same option; the full
    /// name is tried first during lookup.
    ///
    /// # Panics
    /// When applied to a positional argument, which is matched by position
    /// and can never carry an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        assert!(
            self.kind != ArgumentKind::Positional,
            "invalid schema - a positional argument cannot carry an alias"
        );
        self.alias.replace(alias.into());
        self
    }

    /// Mark this argument as required.
    /// A required argument absent from the input fails the parse.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the fallback value, used only when the argument is absent from the
    /// input and not required.
    ///
    /// The value must match the type produced by this spec's conversion, or
    /// later typed lookups will come back empty.
    pub fn default_value<T>(mut self, value: T) -> Self
    where
        T: Any + Clone + Send + Sync,
    {
        self.default
            .replace(Box::new(move || ArgValue::new(value.clone())));
        self
    }

    /// Document the help message for this argument.
    /// If repeated, only the final message applies.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Narrow the arity of a variadic argument to between `min` and `max`
    /// value tokens, inclusive.
    ///
    /// # Panics
    /// When applied to a scalar argument or a flag, whose arities are fixed.
    pub fn arity(mut self, min: usize, max: usize) -> Self {
        assert!(
            matches!(self.arity, Arity::Range(_, _)) && self.kind != ArgumentKind::Flag,
            "invalid schema - only variadic arguments take an explicit arity"
        );
        self.arity = Arity::Range(min, max);
        self
    }

    /// The unique name, also the lookup key in the parse output.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short form, if any.
    pub fn get_alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The token-matching strategy for this argument.
    pub fn kind(&self) -> ArgumentKind {
        self.kind
    }

    /// The number of value tokens this argument consumes.
    pub fn get_arity(&self) -> Arity {
        self.arity
    }

    /// Whether this argument must appear in the input.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The help message, if any.
    pub fn get_help(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn convert(&self, window: &[&str]) -> Result<ArgValue, ConversionError> {
        match &self.converter {
            Converter::Scalar(convert) => convert(window[0]),
            Converter::Variadic(convert) => {
                let owned: Vec<String> = window.iter().map(|token| token.to_string()).collect();
                convert(&owned)
            }
        }
    }

    pub(crate) fn default(&self) -> Option<ArgValue> {
        self.default.as_ref().map(|fallback| fallback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn positional_shape() {
        let spec = ArgumentSpec::positional::<u32>("count");
        assert_eq!(spec.name(), "count");
        assert_eq!(spec.kind(), ArgumentKind::Positional);
        assert_eq!(spec.get_arity(), Arity::Scalar);
        assert_eq!(spec.get_alias(), None);
        assert!(!spec.is_required());
        assert!(spec.default().is_none());
    }

    #[test]
    fn variadic_shape() {
        let spec = ArgumentSpec::variadic::<String>("items");
        assert_eq!(spec.kind(), ArgumentKind::Positional);
        assert_eq!(spec.get_arity(), Arity::Range(1, usize::MAX));

        let spec = spec.arity(2, 3);
        assert_eq!(spec.get_arity(), Arity::Range(2, 3));
    }

    #[test]
    fn option_shape() {
        let spec = ArgumentSpec::option::<String>("output").alias("o").required();
        assert_eq!(spec.kind(), ArgumentKind::Option);
        assert_eq!(spec.get_arity(), Arity::Scalar);
        assert_eq!(spec.get_alias(), Some("o"));
        assert!(spec.is_required());
    }

    #[test]
    fn flag_shape() {
        let spec = ArgumentSpec::flag("verbose");
        assert_eq!(spec.kind(), ArgumentKind::Flag);
        assert_eq!(spec.get_arity(), Arity::Range(0, 0));

        let absent = spec.default().unwrap();
        assert_eq!(absent.get::<bool>(), Some(&false));

        let present = spec.convert(&[]).unwrap();
        assert_eq!(present.get::<bool>(), Some(&true));
    }

    #[test]
    fn scalar_conversion() {
        let spec = ArgumentSpec::positional::<u32>("count");
        let value = spec.convert(&["5"]).unwrap();
        assert_eq!(value.get::<u32>(), Some(&5));
    }

    #[test]
    fn scalar_conversion_failure() {
        let spec = ArgumentSpec::positional::<u32>("count");
        let error = spec.convert(&["abc"]).unwrap_err();
        assert_eq!(
            error,
            ConversionError {
                token: "abc".to_string(),
                type_name: std::any::type_name::<u32>(),
            }
        );
    }

    #[test]
    fn variadic_conversion() {
        let spec = ArgumentSpec::variadic::<u32>("items");
        let value = spec.convert(&["1", "0", "2"]).unwrap();
        assert_eq!(value.get::<Vec<u32>>(), Some(&vec![1, 0, 2]));
    }

    #[rstest]
    #[case(vec!["abc"], "abc")]
    #[case(vec!["1", "abc", "2"], "abc")]
    fn variadic_conversion_failure(#[case] window: Vec<&str>, #[case] offender: &str) {
        let spec = ArgumentSpec::variadic::<u32>("items");
        let error = spec.convert(&window).unwrap_err();
        assert_eq!(error.token, offender);
    }

    #[test]
    fn custom_conversion() {
        let spec = ArgumentSpec::positional_with("upper", |token| {
            Ok(ArgValue::new(token.to_uppercase()))
        });
        let value = spec.convert(&["abc"]).unwrap();
        assert_eq!(value.get::<String>(), Some(&"ABC".to_string()));
    }

    #[test]
    fn custom_variadic_conversion() {
        let spec = ArgumentSpec::variadic_with("joined", |tokens| {
            Ok(ArgValue::new(tokens.join("+")))
        });
        let value = spec.convert(&["a", "b"]).unwrap();
        assert_eq!(value.get::<String>(), Some(&"a+b".to_string()));
    }

    #[test]
    fn default_value_repeatable() {
        let spec = ArgumentSpec::option::<u32>("count").default_value(3u32);
        assert_eq!(spec.default().unwrap().get::<u32>(), Some(&3));
        // The factory must be re-usable across parses.
        assert_eq!(spec.default().unwrap().get::<u32>(), Some(&3));
    }

    #[test]
    #[should_panic]
    fn positional_alias() {
        let _ = ArgumentSpec::positional::<String>("item").alias("i");
    }

    #[test]
    #[should_panic]
    fn scalar_arity() {
        let _ = ArgumentSpec::option::<String>("item").arity(1, 2);
    }

    #[test]
    #[should_panic]
    fn flag_arity() {
        let _ = ArgumentSpec::flag("verbose").arity(0, 1);
    }
}
