mod parameter;
mod schema;

pub use parameter::{ArgumentKind, ArgumentSpec};
pub use schema::Schema;
