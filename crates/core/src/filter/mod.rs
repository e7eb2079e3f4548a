//! Filter expressions: parsing and evaluation.
//!
//! ```
//! use vaultdash_core::filter::{parse_term, Operator};
//!
//! let term = parse_term(r#"!tags.containsAny("proj/todo", "home/todo")"#).unwrap();
//! assert_eq!(term.property, "tags");
//! assert_eq!(term.operator, Operator::NotContainsAny);
//! assert_eq!(term.values, vec!["proj/todo", "home/todo"]);
//! ```

pub mod eval;
pub mod parser;
pub mod types;

pub use eval::{PropertyBag, evaluate};
pub use parser::{parse_filter_set, parse_term};
pub use types::{Combine, FilterSet, FilterTerm, Operator};
