use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::models::Employee;

const UP: &str = "->";
const DOWN: &str = "<-";

/// The reporting path between two employees.
///
/// Runs from the first employee up through their managers to the lowest
/// common manager, then down to the second employee. The common manager
/// appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    path: Vec<Employee>,
    common_manager: usize,
}

impl PathResult {
    pub(super) fn new(path: Vec<Employee>, common_manager: usize) -> Self {
        debug_assert!(common_manager < path.len());
        Self {
            path,
            common_manager,
        }
    }

    pub fn nodes(&self) -> &[Employee] {
        &self.path
    }

    /// The lowest manager both employees report to, directly or not.
    pub fn common_manager(&self) -> &Employee {
        &self.path[self.common_manager]
    }

    /// Employees climbed through before reaching the common manager.
    pub fn upward(&self) -> &[Employee] {
        &self.path[..self.common_manager]
    }

    /// Employees descended through after the common manager.
    pub fn downward(&self) -> &[Employee] {
        &self.path[self.common_manager + 1..]
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always false: a path holds at least the common manager.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Serializes as the rendered path, the common manager and every employee
/// on the path in order.
impl Serialize for PathResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PathResult", 3)?;
        state.serialize_field("path", &self.to_string())?;
        state.serialize_field("common_manager", self.common_manager())?;
        state.serialize_field("employees", &self.path)?;
        state.end()
    }
}

/// Renders as `Kammy (-2) -> Kamek (-1) -> Bowser (0) <- Roy (3)`.
impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for employee in self.upward() {
            write!(f, "{} {} ", employee, UP)?;
        }
        write!(f, "{}", self.common_manager())?;
        for employee in self.downward() {
            write!(f, " {} {}", DOWN, employee)?;
        }
        Ok(())
    }
}
