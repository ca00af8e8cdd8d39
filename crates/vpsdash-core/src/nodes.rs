// ── Node listing ──
//
// Group and keyword filtering over a node snapshot.

use crate::model::Node;

/// Criteria for narrowing a node list. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeFilter {
    /// Exact group name, compared case-insensitively.
    pub group: Option<String>,
    /// Substring of the node name or any tag, case-insensitive.
    pub keyword: Option<String>,
}

impl NodeFilter {
    pub fn matches(&self, node: &Node) -> bool {
        let group = self.group.as_deref().map_or("", str::trim);
        if !group.is_empty() && !node.group.eq_ignore_ascii_case(group) {
            return false;
        }

        match self.keyword.as_deref().map(str::trim) {
            Some(kw) if !kw.is_empty() => {
                let kw = kw.to_lowercase();
                node.name.to_lowercase().contains(&kw)
                    || node.tags.iter().any(|t| t.to_lowercase().contains(&kw))
            }
            _ => true,
        }
    }

    pub fn apply<'a>(&self, nodes: &'a [Node]) -> Vec<&'a Node> {
        nodes.iter().filter(|n| self.matches(n)).collect()
    }
}

/// Distinct group names in first-seen order.
pub fn groups(nodes: &[Node]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for node in nodes {
        if !seen.contains(&node.group.as_str()) {
            seen.push(&node.group);
        }
    }
    seen
}
