use super::{NodeId, Organisation};

/// Pre-order traversal of an [`Organisation`], yielding each node with its
/// depth below the chief. Siblings come out in the order they were attached.
pub struct Walk<'a> {
    org: Option<&'a Organisation>,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Walk<'a> {
    pub(super) fn new(org: &'a Organisation) -> Self {
        Self {
            org: Some(org),
            stack: vec![(org.root(), 0)],
        }
    }

    pub(super) fn empty() -> Self {
        Self {
            org: None,
            stack: Vec::new(),
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let org = self.org?;
        let (node, depth) = self.stack.pop()?;
        // Reversed so the first report is popped first.
        self.stack
            .extend(org.reports(node).iter().rev().map(|&child| (child, depth + 1)));
        Some((node, depth))
    }
}
