pub mod codec;
pub mod errors;
pub mod goal;

pub use codec::{
    parse_goals, serialize_goals, write_goals, ParsedGoals, SchemaVersion, DELAYED_BRACKET_HEADER,
    ORIGINAL_HEADER,
};
pub use errors::{GoalError, Result};
pub use goal::{Goal, GoalSet};
