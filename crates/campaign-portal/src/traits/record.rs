//! Table row trait

use crate::error::Result;
use crate::model::{Campaign, Submission};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// A row of one of the portal tables.
///
/// # Example
///
/// ```rust,ignore
/// impl Record for Campaign {
///     fn table() -> &'static str { "campaigns" }
///     fn order_column() -> &'static str { "created_at" }
///     fn record_id(&self) -> &str { &self.id }
/// }
/// ```
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Table name on the REST endpoint
    fn table() -> &'static str;

    /// Column the collection is listed by, newest first
    fn order_column() -> &'static str;

    /// Primary key of this row
    fn record_id(&self) -> &str;

    /// Overlay the fields present in `patch` onto this row.
    ///
    /// Fields absent from the patch keep their current value.
    fn apply_patch<P: Serialize + ?Sized>(&self, patch: &P) -> Result<Self> {
        let mut current = serde_json::to_value(self)?;
        if let (Value::Object(target), Value::Object(fields)) =
            (&mut current, serde_json::to_value(patch)?)
        {
            for (key, value) in fields {
                target.insert(key, value);
            }
        }
        Ok(serde_json::from_value(current)?)
    }
}

impl Record for Campaign {
    fn table() -> &'static str {
        "campaigns"
    }

    fn order_column() -> &'static str {
        "created_at"
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Submission {
    fn table() -> &'static str {
        "submissions"
    }

    fn order_column() -> &'static str {
        "submitted_at"
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Position of the row with `id`
pub fn find_index<T: Record>(rows: &[T], id: &str) -> Option<usize> {
    rows.iter().position(|row| row.record_id() == id)
}
