pub mod eliminate_left_recursion;
pub mod error;
pub mod grammar;
pub mod interactive;
pub mod left_factoring;
pub mod naming;
pub mod options;
pub mod parse;
pub mod pretty_print;
pub use error::{ParseError, ParseErrorKind, TransformError};
pub use grammar::{Grammar, Production, Symbol};
pub use left_factoring::FactoringKind;
pub use naming::CollisionPolicy;
pub use options::TransformOptions;

pub const EPSILON: &str = "ε";
pub const PRIME: char = '\'';
