//! Name-based queries over a hierarchy.
//!
//! People look employees up by name, but names are not unique. A query
//! resolves each name to every matching employee and runs one path search per
//! combination.

use thiserror::Error;

use crate::hierarchy::Hierarchy;
use crate::models::Employee;
use crate::path::{PathError, PathFinder, PathResult};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Employee \"{name}\" not found in the organisation")]
    UnknownEmployee { name: String },

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Collapse whitespace runs to single spaces, trim and lowercase.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Employees placed in the hierarchy whose name matches `name` once both are
/// normalised, in pre-order.
pub fn matching<'h>(hierarchy: &'h Hierarchy, name: &str) -> Vec<&'h Employee> {
    let wanted = normalize_name(name);
    hierarchy
        .employees()
        .filter(|employee| normalize_name(&employee.name) == wanted)
        .collect()
}

/// Shortest paths between every employee named `first` and every employee
/// named `second`.
pub fn shortest_paths(
    hierarchy: &Hierarchy,
    first: &str,
    second: &str,
) -> Result<Vec<PathResult>, QueryError> {
    let resolve = |name: &str| {
        let found = matching(hierarchy, name);
        if found.is_empty() {
            return Err(QueryError::UnknownEmployee {
                name: name.to_string(),
            });
        }
        Ok(found)
    };
    let firsts = resolve(first)?;
    let seconds = resolve(second)?;

    tracing::info!(
        "Finding shortest path between \"{}\" ({} matches) and \"{}\" ({} matches)",
        normalize_name(first),
        firsts.len(),
        normalize_name(second),
        seconds.len()
    );

    let mut results = Vec::with_capacity(firsts.len() * seconds.len());
    for a in &firsts {
        for b in &seconds {
            tracing::debug!("Searching for path between {} and {}", a, b);
            let mut finder = PathFinder::new(hierarchy);
            results.push(finder.find_shortest_path(a, b)?.clone());
        }
    }
    Ok(results)
}
