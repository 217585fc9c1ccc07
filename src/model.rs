/// The cardinality of value tokens an argument may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Precisely one value token.
    Scalar,
    /// Between `min` and `max` value tokens, inclusive.
    /// Flags use `Range(0, 0)`; unbounded variadics use `Range(min, usize::MAX)`.
    Range(usize, usize),
}

impl Arity {
    /// The fewest value tokens this arity accepts.
    pub fn minimum(&self) -> usize {
        match self {
            Arity::Scalar => 1,
            Arity::Range(min, _) => *min,
        }
    }

    /// The most value tokens this arity accepts.
    pub fn maximum(&self) -> usize {
        match self {
            Arity::Scalar => 1,
            Arity::Range(_, max) => *max,
        }
    }

    /// Whether `count` value tokens satisfy this arity.
    pub fn admits(&self, count: usize) -> bool {
        self.minimum() <= count && count <= self.maximum()
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Scalar => write!(f, "1"),
            Arity::Range(min, max) if *max == usize::MAX => write!(f, "{min}.."),
            Arity::Range(min, max) => write!(f, "{min}..={max}"),
        }
    }
}
