//! Data loading and validation for rules, tricks, skaters and deck recipes.

mod builtin;
pub mod load;
pub mod schema;

pub use builtin::*;
pub use load::*;
pub use schema::*;
