mod engine;
mod printer;

pub use engine::{Matches, ParseError};
pub use printer::HelpRenderer;
