//! GridRow trait

use std::fmt;
use std::hash::Hash;

use super::Value;

/// Trait for records that can be listed in a [`Grid`](crate::grid::Grid).
///
/// The key must be unique within a dataset and stable across re-sorts,
/// re-paginations and reloads. Never derive it from a row's position.
///
/// # Example
///
/// ```
/// use console_lib::model::{GridRow, Value};
///
/// #[derive(Clone)]
/// struct Fruit {
///     id: u64,
///     name: String,
/// }
///
/// impl GridRow for Fruit {
///     type Key = u64;
///
///     fn key(&self) -> u64 {
///         self.id
///     }
///
///     fn value(&self, field: &str) -> Value {
///         match field {
///             "id" => self.id.into(),
///             "name" => self.name.as_str().into(),
///             _ => Value::Null,
///         }
///     }
/// }
/// ```
pub trait GridRow: Clone + Send + Sync + 'static {
    /// The key type identifying a row.
    type Key: Clone + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Return the unique key for this row.
    fn key(&self) -> Self::Key;

    /// Return the value of a named field, or `Value::Null` if unknown.
    fn value(&self, field: &str) -> Value;
}
