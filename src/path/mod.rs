//! Shortest reporting path between two employees.
//!
//! This is the lowest common ancestor problem on the management tree: find the
//! path from the chief down to each employee, and the last employee the two
//! paths share is their lowest common manager.

mod result;

use thiserror::Error;

use crate::hierarchy::{Hierarchy, NodeId, Organisation};
use crate::models::Employee;

pub use result::PathResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Employee {employee} not found in the organisation")]
    NotFound { employee: Employee },
}

/// Find the shortest reporting path from `from` to `to`.
///
/// Employees are matched by record equality, not by name.
pub fn find_shortest_path(
    hierarchy: &Hierarchy,
    from: &Employee,
    to: &Employee,
) -> Result<PathResult, PathError> {
    let not_found = |employee: &Employee| PathError::NotFound {
        employee: employee.clone(),
    };
    let org = hierarchy.organisation().ok_or_else(|| not_found(from))?;

    let path_to_from = path_to(org, from).ok_or_else(|| not_found(from))?;
    tracing::debug!("Path from chief to {}: {}", from, describe(org, &path_to_from));
    let path_to_to = path_to(org, to).ok_or_else(|| not_found(to))?;
    tracing::debug!("Path from chief to {}: {}", to, describe(org, &path_to_to));

    // Both paths start at the chief, so they share at least one node
    let shared = path_to_from
        .iter()
        .zip(&path_to_to)
        .take_while(|(a, b)| a == b)
        .count();
    let common = shared - 1;

    let path: Vec<Employee> = path_to_from[common..]
        .iter()
        .rev()
        .chain(&path_to_to[shared..])
        .map(|&node| org.employee(node).clone())
        .collect();
    let common_manager = path_to_from.len() - shared;

    tracing::info!(
        "Lowest common manager of {} and {} is {}",
        from,
        to,
        org.employee(path_to_from[common])
    );
    Ok(PathResult::new(path, common_manager))
}

/// Depth-first search for `target`, returning the nodes from the chief down to
/// it. The search stack doubles as the path: each entry is a node on the
/// current branch and the index of its next report to visit.
fn path_to(org: &Organisation, target: &Employee) -> Option<Vec<NodeId>> {
    let root = org.root();
    if org.employee(root) == target {
        return Some(vec![root]);
    }

    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    while let Some(&(node, next)) = stack.last() {
        let Some(&report) = org.reports(node).get(next) else {
            stack.pop();
            continue;
        };
        let top = stack.len() - 1;
        stack[top].1 += 1;

        if org.employee(report) == target {
            let mut path: Vec<NodeId> = stack.iter().map(|&(node, _)| node).collect();
            path.push(report);
            return Some(path);
        }
        stack.push((report, 0));
    }

    tracing::debug!("{} not found below {}", target, org.employee(root));
    None
}

fn describe(org: &Organisation, path: &[NodeId]) -> String {
    path.iter()
        .map(|&node| org.employee(node).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-shot path query against a hierarchy.
///
/// The first successful call to [`find_shortest_path`](Self::find_shortest_path)
/// fixes the result for the lifetime of the instance: later calls return it
/// unchanged, whatever employees they are given. Use a new `PathFinder` for
/// each pair of employees. A failed call leaves nothing cached.
pub struct PathFinder<'h> {
    hierarchy: &'h Hierarchy,
    result: Option<PathResult>,
}

impl<'h> PathFinder<'h> {
    pub fn new(hierarchy: &'h Hierarchy) -> Self {
        Self {
            hierarchy,
            result: None,
        }
    }

    pub fn find_shortest_path(
        &mut self,
        from: &Employee,
        to: &Employee,
    ) -> Result<&PathResult, PathError> {
        let result = match self.result.take() {
            Some(cached) => {
                tracing::debug!("Returning cached path {}", cached);
                cached
            }
            None => find_shortest_path(self.hierarchy, from, to)?,
        };
        let result: &PathResult = self.result.insert(result);
        Ok(result)
    }

    /// The cached result, if a query has succeeded.
    pub fn result(&self) -> Option<&PathResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn koopas() -> Vec<Employee> {
        vec![
            Employee::new(0, "Bowser", 0),
            Employee::new(-1, "Kamek", 0),
            Employee::new(-2, "Kammy", -1),
            Employee::new(3, "Roy", 0),
            Employee::new(180, "Koopa Paratroopa", 3),
        ]
    }

    fn path(employees: &[Employee], from: usize, to: usize) -> String {
        let hierarchy = Hierarchy::build(employees).unwrap();
        find_shortest_path(&hierarchy, &employees[from], &employees[to])
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_across_the_chief() {
        assert_eq!(
            path(&koopas(), 2, 3),
            "Kammy (-2) -> Kamek (-1) -> Bowser (0) <- Roy (3)"
        );
    }

    #[test]
    fn test_same_employee() {
        assert_eq!(path(&koopas(), 0, 0), "Bowser (0)");
        assert_eq!(path(&koopas(), 4, 4), "Koopa Paratroopa (180)");
    }

    #[test]
    fn test_up_to_manager() {
        assert_eq!(
            path(&koopas(), 4, 0),
            "Koopa Paratroopa (180) -> Roy (3) -> Bowser (0)"
        );
    }

    #[test]
    fn test_down_from_manager() {
        assert_eq!(path(&koopas(), 1, 2), "Kamek (-1) <- Kammy (-2)");
    }

    #[test]
    fn test_common_manager() {
        let employees = koopas();
        let hierarchy = Hierarchy::build(&employees).unwrap();
        let result = find_shortest_path(&hierarchy, &employees[4], &employees[2]).unwrap();

        assert_eq!(result.common_manager(), &employees[0]);
        assert_eq!(result.len(), 5);
        assert_eq!(result.upward(), &[employees[4].clone(), employees[3].clone()]);
        assert_eq!(result.downward(), &[employees[1].clone(), employees[2].clone()]);
    }

    #[test]
    fn test_not_found() {
        let employees = koopas();
        let hierarchy = Hierarchy::build(&employees).unwrap();
        let stranger = Employee::new(42, "Mario", 42);

        let err = find_shortest_path(&hierarchy, &employees[0], &stranger).unwrap_err();
        assert_eq!(err, PathError::NotFound { employee: stranger });
    }

    #[test]
    fn test_matches_whole_record_not_just_id() {
        let employees = koopas();
        let hierarchy = Hierarchy::build(&employees).unwrap();
        let impostor = Employee::new(3, "Not Roy", 0);

        assert!(find_shortest_path(&hierarchy, &impostor, &employees[0]).is_err());
    }

    #[test]
    fn test_empty_hierarchy() {
        let hierarchy = Hierarchy::build(&[]).unwrap();
        let bowser = Employee::new(0, "Bowser", 0);

        let err = find_shortest_path(&hierarchy, &bowser, &bowser).unwrap_err();
        assert_eq!(err, PathError::NotFound { employee: bowser });
    }

    #[test]
    fn test_path_finder_caches_first_result() {
        let employees = koopas();
        let hierarchy = Hierarchy::build(&employees).unwrap();
        let mut finder = PathFinder::new(&hierarchy);
        assert!(finder.result().is_none());

        let first = finder
            .find_shortest_path(&employees[2], &employees[3])
            .unwrap()
            .clone();
        let second = finder
            .find_shortest_path(&employees[0], &employees[0])
            .unwrap();

        assert_eq!(&first, second);
        assert_eq!(
            second.to_string(),
            "Kammy (-2) -> Kamek (-1) -> Bowser (0) <- Roy (3)"
        );
    }

    #[test]
    fn test_path_finder_does_not_cache_failure() {
        let employees = koopas();
        let hierarchy = Hierarchy::build(&employees).unwrap();
        let mut finder = PathFinder::new(&hierarchy);
        let stranger = Employee::new(42, "Mario", 42);

        assert!(finder.find_shortest_path(&stranger, &employees[0]).is_err());
        assert!(finder.result().is_none());

        let result = finder
            .find_shortest_path(&employees[3], &employees[0])
            .unwrap();
        assert_eq!(result.to_string(), "Roy (3) -> Bowser (0)");
    }

    #[test]
    fn test_deep_chain() {
        let depth: i64 = 10_000;
        let mut employees: Vec<Employee> = (0..depth)
            .map(|i| Employee::new(i, format!("Minion {}", i), (i - 1).max(0)))
            .collect();
        employees.push(Employee::new(-5, "Sidekick", 0));
        let hierarchy = Hierarchy::build(&employees).unwrap();

        let deepest = &employees[depth as usize - 1];
        let result = find_shortest_path(&hierarchy, deepest, &employees[depth as usize]).unwrap();

        assert_eq!(result.len(), depth as usize + 1);
        assert_eq!(result.common_manager(), &employees[0]);
    }
}
