//! Management tree reconstruction.
//!
//! An org chart file is a flat list of `(id, name, manager id)` rows. This
//! module turns that list into a single-rooted tree with the chief at the top
//! and every employee's direct reports beneath them, in the order the reports
//! appear in the input.
//!
//! Nodes live in an arena addressed by [`NodeId`]. Building and walking the
//! tree use explicit worklists, so very deep chains of command do not grow the
//! call stack.

mod walk;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::models::Employee;

pub use walk::Walk;

/// Rendering of the empty organisation.
pub const EMPTY_ORGANISATION: &str = "Empty organisation";

/// Errors raised while building a [`Hierarchy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    /// Zero or several employees answer to no one.
    #[error("Expected exactly one chief (an employee who is their own manager), found {}: [{}]", .candidates.len(), list(.candidates))]
    RootCardinality { candidates: Vec<Employee> },

    #[error("Employee id {id} is used by several records: [{}]", list(.employees))]
    DuplicateId { id: i64, employees: Vec<Employee> },
}

fn list(employees: &[Employee]) -> String {
    employees
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Index of a node inside an [`Organisation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    employee: Employee,
    reports: Vec<NodeId>,
}

/// A management tree, or the empty organisation when there were no records.
#[derive(Debug, Clone)]
pub enum Hierarchy {
    Empty,
    Organisation(Organisation),
}

/// A non-empty management tree.
///
/// The chief always occupies the first arena slot.
#[derive(Debug, Clone)]
pub struct Organisation {
    nodes: Vec<Node>,
    by_id: HashMap<i64, NodeId>,
    dangling: Vec<Employee>,
}

impl Hierarchy {
    /// Build the management tree from a flat list of employee records.
    ///
    /// Exactly one record must be its own manager; that employee becomes the
    /// root. Every other record is attached beneath the employee its
    /// `manager_id` names. Records whose chain of command never reaches the
    /// chief are left out of the tree and reported by
    /// [`Organisation::dangling`].
    pub fn build(employees: &[Employee]) -> Result<Self, HierarchyError> {
        if employees.is_empty() {
            tracing::debug!("No employee records; organisation is empty");
            return Ok(Self::Empty);
        }

        let chiefs: Vec<&Employee> = employees.iter().filter(|e| e.is_chief()).collect();
        if chiefs.len() != 1 {
            return Err(HierarchyError::RootCardinality {
                candidates: chiefs.into_iter().cloned().collect(),
            });
        }
        let chief = chiefs[0];

        check_unique_ids(employees)?;
        tracing::debug!("Chief is {}", chief);

        // Direct reports grouped by manager, each group in input order
        let mut reports_by_manager: HashMap<i64, Vec<&Employee>> = HashMap::new();
        for employee in employees.iter().filter(|e| !e.is_chief()) {
            reports_by_manager
                .entry(employee.manager_id)
                .or_default()
                .push(employee);
        }

        let mut org = Organisation {
            nodes: Vec::with_capacity(employees.len()),
            by_id: HashMap::with_capacity(employees.len()),
            dangling: Vec::new(),
        };
        let root = org.push(chief.clone());

        let mut pending = vec![root];
        while let Some(manager) = pending.pop() {
            let manager_id = org.employee(manager).id;
            let Some(reports) = reports_by_manager.remove(&manager_id) else {
                continue;
            };
            for report in reports {
                tracing::trace!("{} reports to {}", report, org.employee(manager));
                let node = org.push(report.clone());
                org.nodes[manager.0].reports.push(node);
                pending.push(node);
            }
        }

        org.dangling = employees
            .iter()
            .filter(|e| !org.by_id.contains_key(&e.id))
            .cloned()
            .collect();
        for employee in &org.dangling {
            tracing::warn!(
                "Dropping {}: manager {} is not part of the organisation",
                employee,
                employee.manager_id
            );
        }

        tracing::info!(
            "Built organisation of {} employees ({} dropped)",
            org.len(),
            org.dangling.len()
        );
        Ok(Self::Organisation(org))
    }

    pub fn organisation(&self) -> Option<&Organisation> {
        match self {
            Self::Empty => None,
            Self::Organisation(org) => Some(org),
        }
    }

    /// The employee at the top of the tree.
    pub fn chief(&self) -> Option<&Employee> {
        self.organisation().map(|org| org.employee(org.root()))
    }

    /// Number of employees placed in the tree.
    pub fn len(&self) -> usize {
        self.organisation().map_or(0, Organisation::len)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Placed employees in pre-order, chief first.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> + '_ {
        let org = self.organisation();
        self.walk()
            .filter_map(move |(node, _)| org.map(|org| org.employee(node)))
    }

    pub fn walk(&self) -> Walk<'_> {
        match self {
            Self::Empty => Walk::empty(),
            Self::Organisation(org) => org.walk(),
        }
    }

    /// Look up a placed employee by id.
    pub fn find(&self, id: i64) -> Option<&Employee> {
        let org = self.organisation()?;
        org.node_of(id).map(|node| org.employee(node))
    }

    /// Direct reports of the employee with the given id, in input order.
    /// Empty for individual contributors and unknown ids.
    pub fn reports_of(&self, id: i64) -> Vec<&Employee> {
        let Some(org) = self.organisation() else {
            return Vec::new();
        };
        org.node_of(id)
            .map(|node| {
                org.reports(node)
                    .iter()
                    .map(|&report| org.employee(report))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `employee` reports directly to `manager`.
    pub fn is_direct_report(&self, manager: &Employee, employee: &Employee) -> bool {
        self.find(manager.id) == Some(manager)
            && self.reports_of(manager.id).into_iter().any(|e| e == employee)
    }

    /// Records left out of the tree because their manager was never placed.
    pub fn dangling(&self) -> &[Employee] {
        match self {
            Self::Empty => &[],
            Self::Organisation(org) => org.dangling(),
        }
    }
}

impl Organisation {
    fn push(&mut self, employee: Employee) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.by_id.insert(employee.id, node);
        self.nodes.push(Node {
            employee,
            reports: Vec::new(),
        });
        node
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn employee(&self, node: NodeId) -> &Employee {
        &self.nodes[node.0].employee
    }

    pub fn reports(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].reports
    }

    pub fn node_of(&self, id: i64) -> Option<NodeId> {
        self.by_id.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the chief is placed before anyone else.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn dangling(&self) -> &[Employee] {
        &self.dangling
    }

    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }
}

fn check_unique_ids(employees: &[Employee]) -> Result<(), HierarchyError> {
    let mut seen: HashMap<i64, &Employee> = HashMap::with_capacity(employees.len());
    for employee in employees {
        if seen.insert(employee.id, employee).is_some() {
            return Err(HierarchyError::DuplicateId {
                id: employee.id,
                employees: employees
                    .iter()
                    .filter(|e| e.id == employee.id)
                    .cloned()
                    .collect(),
            });
        }
    }
    Ok(())
}

/// One line per employee, indented with a tab per level below the chief.
impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::Organisation(org) = self else {
            return f.write_str(EMPTY_ORGANISATION);
        };
        for (node, depth) in org.walk() {
            writeln!(f, "{}{}", "\t".repeat(depth), org.employee(node))?;
        }
        Ok(())
    }
}
