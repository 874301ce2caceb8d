//! ASCII tree rendering for management hierarchies.

use crate::hierarchy::{Hierarchy, NodeId, EMPTY_ORGANISATION};

/// Render a hierarchy as a box-drawing tree.
///
/// Example output:
/// ```text
/// Bowser (0)
/// ├── Kamek (-1)
/// │   └── Kammy (-2)
/// └── Roy (3)
///     ├── Koopa Troopa (100)
///     └── Koopa Paratroopa (180)
/// ```
pub fn render_tree(hierarchy: &Hierarchy) -> String {
    let Some(org) = hierarchy.organisation() else {
        return format!("{}\n", EMPTY_ORGANISATION);
    };

    let mut output = String::new();
    // (node, prefix, is_last, is_root)
    let mut pending: Vec<(NodeId, String, bool, bool)> = vec![(org.root(), String::new(), true, true)];

    while let Some((node, prefix, is_last, is_root)) = pending.pop() {
        if is_root {
            // Root: just the employee (no branch characters)
            output.push_str(&org.employee(node).to_string());
        } else {
            let branch = if is_last { "└── " } else { "├── " };
            output.push_str(&prefix);
            output.push_str(branch);
            output.push_str(&org.employee(node).to_string());
        }
        output.push('\n');

        let child_prefix = if is_root {
            String::new()
        } else {
            let continuation = if is_last { "    " } else { "│   " };
            format!("{}{}", prefix, continuation)
        };

        let reports = org.reports(node);
        for (i, &report) in reports.iter().enumerate().rev() {
            let report_is_last = i == reports.len() - 1;
            pending.push((report, child_prefix.clone(), report_is_last, false));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    fn render(employees: &[Employee]) -> String {
        render_tree(&Hierarchy::build(employees).unwrap())
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(&[]), "Empty organisation\n");
    }

    #[test]
    fn test_single_root() {
        let output = render(&[Employee::new(0, "Bowser", 0)]);
        assert_eq!(output, "Bowser (0)\n");
    }

    #[test]
    fn test_with_reports() {
        let output = render(&[
            Employee::new(0, "Bowser", 0),
            Employee::new(1, "Bowser Jr", 0),
            Employee::new(3, "Roy", 0),
        ]);
        assert_eq!(output, "Bowser (0)\n├── Bowser Jr (1)\n└── Roy (3)\n");
    }

    #[test]
    fn test_nested_reports() {
        let output = render(&[
            Employee::new(0, "Bowser", 0),
            Employee::new(-1, "Kamek", 0),
            Employee::new(-2, "Kammy", -1),
            Employee::new(3, "Roy", 0),
            Employee::new(100, "Koopa Troopa", 3),
            Employee::new(180, "Koopa Paratroopa", 3),
            Employee::new(7, "Morton", 0),
        ]);
        let expected = "Bowser (0)\n├── Kamek (-1)\n│   └── Kammy (-2)\n├── Roy (3)\n│   ├── Koopa Troopa (100)\n│   └── Koopa Paratroopa (180)\n└── Morton (7)\n";
        assert_eq!(output, expected);
    }
}
