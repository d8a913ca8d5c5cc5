//! # Value Objects Core
//!
//! Schema-driven, immutable value objects with runtime type contracts.
//!
//! A record type is declared from an ordered field → contract mapping, with
//! optional defaults and auxiliary methods. Its instances are validated once
//! at construction and never change afterwards; "modified" records are new
//! records, validated from scratch.
//!
//! ## Key Concepts
//!
//! - **Contract**: A predicate over a [`Value`] plus a description
//! - **SchemaBuilder**: Collects fields and defaults, then creates a record type
//! - **RecordType**: The synthesized type; constructs and validates records
//! - **Record**: An immutable, structurally comparable instance
//!
//! ## Example
//!
//! ```rust
//! use vobj_core::{Contract, InfoMode, SchemaBuilder, Value};
//!
//! let person = SchemaBuilder::new(
//!     "Person",
//!     [("name", Contract::Str), ("age", Contract::Nat)],
//! )?
//! .create();
//!
//! let employee = SchemaBuilder::new(
//!     "Employee",
//!     [
//!         ("name", Contract::Str),
//!         ("age", Contract::Nat),
//!         ("title", Contract::maybe(Contract::Str)),
//!         ("salary", Contract::Nat),
//!     ],
//! )?
//! .default([("salary", Value::Int(10000))])?
//! .create();
//!
//! let p = person.named([("name", "Ally".into()), ("age", 19.into())])?;
//! let e = p.upgrade(&employee, [("title", Value::from("Student"))])?;
//! assert_eq!(e.get("salary"), Some(&Value::Int(10000)));
//! assert_eq!(e.downgrade(&person)?, p);
//!
//! assert_eq!(
//!     employee.info(InfoMode::Short),
//!     "Employee[name: String, age: Nat, title: String or null, salary: Nat (10000)]"
//! );
//! # Ok::<(), vobj_core::RecordError>(())
//! ```

pub mod contract;
pub mod error;
pub mod methods;
pub mod record;
pub mod schema;
pub mod value;

pub use contract::*;
pub use error::*;
pub use methods::*;
pub use record::*;
pub use schema::*;
pub use value::*;
