//! Auxiliary methods attached to a record type.

use crate::{Record, Result, Value};
use std::fmt;
use std::sync::Arc;

/// Signature of an auxiliary method: receives the instance, returns a value.
pub type MethodFn = Arc<dyn Fn(&Record) -> Result<Value> + Send + Sync>;

/// Named operations attached to a record type at creation.
///
/// The bodies are opaque to the record type; they see the instance and its
/// accessors, nothing else.
///
/// # Example
///
/// ```rust
/// use vobj_core::{Contract, Methods, SchemaBuilder, Value};
///
/// let methods = Methods::new().define("greeting", |p| {
///     let name = p.lookup("name")?.to_plain_string();
///     Ok(Value::from(format!("Hello, {name}")))
/// });
///
/// let person = SchemaBuilder::new("Person", [("name", Contract::Str)])?.create_with(methods);
/// let p = person.positional(vec!["Ann".into()])?;
/// assert_eq!(p.call("greeting")?, Value::from("Hello, Ann"));
/// # Ok::<(), vobj_core::RecordError>(())
/// ```
#[derive(Clone, Default)]
pub struct Methods {
    entries: Vec<(String, MethodFn)>,
}

impl Methods {
    /// Creates an empty method set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a method. A later definition with the same name replaces the
    /// earlier one.
    pub fn define<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(&Record) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let method: MethodFn = Arc::new(method);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = method,
            None => self.entries.push((name, method)),
        }
        self
    }

    /// Looks up a method by name.
    pub fn get(&self, name: &str) -> Option<&MethodFn> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, method)| method)
    }

    /// Method names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of methods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no methods are defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Methods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
