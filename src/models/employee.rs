use std::fmt;

use serde::Serialize;

/// A single row of an org chart file.
///
/// Records are immutable values. Two records are the same employee only if
/// every field matches; names alone say nothing about identity, since an
/// organisation may employ several people called the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Id of the direct manager. Equal to `id` for the chief.
    pub manager_id: i64,
}

impl Employee {
    pub fn new(id: i64, name: impl Into<String>, manager_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            manager_id,
        }
    }

    /// Whether this employee answers to no one.
    pub fn is_chief(&self) -> bool {
        self.id == self.manager_id
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
