pub mod entities;
pub mod errors;
pub mod formatting;
pub mod identifier;
