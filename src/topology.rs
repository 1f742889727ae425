use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// One agent in the federation. Children are exclusively owned, so the
/// in-memory tree is acyclic by construction; insertion order of `children`
/// is the traversal and tie-break order for every search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub host: String,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(host: impl Into<String>) -> Result<Self, AgentError> {
        let host = host.into();
        if host.is_empty() {
            return Err(AgentError::EmptyHost);
        }
        Ok(Node {
            host,
            status: false,
            children: Vec::new(),
        })
    }

    /// Build a node per entry, silently dropping entries that fail
    /// construction (empty hosts) and preserving the order of the rest.
    pub fn from_hosts<I, S>(hosts: I) -> Vec<Node>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        hosts
            .into_iter()
            .filter_map(|host| Node::new(host).ok())
            .collect()
    }

    /// Scan direct children for an exact host match; with `recursive`,
    /// descend depth-first into each subtree, stopping at the first match.
    pub fn search(&self, host: &str, recursive: bool) -> bool {
        for child in &self.children {
            if child.host == host {
                return true;
            }
            if recursive && child.search(host, true) {
                return true;
            }
        }
        false
    }

    /// Same traversal as `search`, but sets the matched node's status in
    /// place. At most one node is updated per call, even when the host
    /// occurs in several branches.
    pub fn search_and_update_status(&mut self, host: &str, recursive: bool, status: bool) -> bool {
        for child in &mut self.children {
            if child.host == host {
                child.status = status;
                return true;
            }
            if recursive && child.search_and_update_status(host, true, status) {
                return true;
            }
        }
        false
    }

    /// Merge `new_node` into the tree by host identity. With
    /// `top_level_only` set and no direct child sharing the host, the node
    /// is appended as a new top-level child. Otherwise the matched node
    /// keeps all its scalar fields and only its children collection is
    /// replaced by `new_node`'s.
    pub fn insert_or_update(&mut self, new_node: Node, top_level_only: bool) {
        if top_level_only && !self.search(&new_node.host, false) {
            self.children.push(new_node);
            return;
        }
        self.merge(&new_node);
    }

    fn merge(&mut self, new_node: &Node) {
        for child in &mut self.children {
            if child.host == new_node.host {
                child.children = new_node.children.clone();
                return;
            }
            child.merge(new_node);
        }
    }

    /// Remove the first depth-first match from its parent's children,
    /// keeping the relative order of the remaining siblings.
    pub fn delete_by_host(&mut self, host: &str) -> bool {
        for index in 0..self.children.len() {
            if self.children[index].host == host {
                self.children.remove(index);
                return true;
            }
            if self.children[index].delete_by_host(host) {
                return true;
            }
        }
        false
    }

    /// Pre-order listing of the subtree, one host per line, indented by
    /// `indent_unit` repeated per depth level.
    pub fn render_tree(&self, indent_unit: &str, depth: usize, with_status: bool) -> String {
        let mut out = format!("{}{}", indent_unit.repeat(depth), self.host);
        if with_status {
            out.push_str(if self.status { "[ok]" } else { "[error]" });
        }
        for child in &self.children {
            out.push('\n');
            out.push_str(&child.render_tree(indent_unit, depth + 1, with_status));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT_HOST: &str = "source-prometheus:9090";

    fn feds_root() -> Vec<&'static str> {
        vec![
            "source-prometheus-1:9090",
            "source-prometheus-2:9090",
            "source-prometheus-3:9090",
        ]
    }

    /// Root with three children; first child has a grandchild subtree.
    fn sample_tree() -> Node {
        let mut root = Node::new(ROOT_HOST).unwrap();
        root.children = Node::from_hosts(feds_root());
        root.children[0].children = Node::from_hosts(vec![
            "source-prometheus-11:9090",
            "source-prometheus-12:9090",
        ]);
        root.children[0].children[0].children =
            Node::from_hosts(vec!["source-prometheus-111:9090"]);
        root
    }

    #[test]
    fn test_new_node() {
        let node = Node::new(ROOT_HOST).unwrap();
        assert_eq!(node.host, ROOT_HOST);
        assert!(!node.status);
        assert!(node.children.is_empty());

        assert!(matches!(Node::new(""), Err(AgentError::EmptyHost)));
    }

    #[test]
    fn test_new_node_renders_single_line() {
        let node = Node::new(ROOT_HOST).unwrap();
        assert_eq!(node.render_tree("  ", 0, false), ROOT_HOST);
    }

    #[test]
    fn test_from_hosts_drops_empty_entries() {
        let nodes = Node::from_hosts(feds_root());
        assert_eq!(nodes.len(), 3);

        let nodes = Node::from_hosts(vec!["a:9090", "", "c:9090"]);
        let hosts: Vec<_> = nodes.iter().map(|n| n.host.as_str()).collect();
        assert_eq!(hosts, vec!["a:9090", "c:9090"]);
    }

    #[test]
    fn test_search() {
        let root = sample_tree();

        assert!(root.search("source-prometheus-2:9090", false));
        assert!(!root.search("no-such-host:9090", true));

        // a grandchild is invisible to a non-recursive search
        assert!(!root.search("source-prometheus-11:9090", false));
        assert!(root.search("source-prometheus-11:9090", true));
        assert!(root.search("source-prometheus-111:9090", true));
    }

    #[test]
    fn test_search_and_update_status() {
        let mut root = sample_tree();

        assert!(root.search_and_update_status("source-prometheus-11:9090", true, true));
        assert!(root.children[0].children[0].status);

        // non-recursive update cannot reach a grandchild
        assert!(!root.search_and_update_status("source-prometheus-111:9090", false, true));
        assert!(!root.children[0].children[0].children[0].status);

        assert!(!root.search_and_update_status("no-such-host:9090", true, true));
    }

    #[test]
    fn test_update_status_first_match_only() {
        let mut root = Node::new(ROOT_HOST).unwrap();
        root.children = Node::from_hosts(vec!["a:9090", "b:9090"]);
        root.children[1].children = Node::from_hosts(vec!["dup:9090"]);
        root.children.push(Node::new("dup:9090").unwrap());

        // depth-first order reaches b's child before the top-level duplicate
        assert!(root.search_and_update_status("dup:9090", true, true));
        assert!(root.children[1].children[0].status);
        assert!(!root.children[2].status);
    }

    #[test]
    fn test_insert_or_update_appends_new_top_level_host() {
        let mut root = sample_tree();
        let before = root.children.len();

        root.insert_or_update(Node::new("source-prometheus-4:9090").unwrap(), true);
        assert_eq!(root.children.len(), before + 1);
        assert_eq!(root.children[before].host, "source-prometheus-4:9090");
    }

    #[test]
    fn test_insert_or_update_replaces_children_only() {
        let mut root = sample_tree();
        root.children[0].status = true;

        let mut replacement = Node::new("source-prometheus-1:9090").unwrap();
        replacement.status = false;
        replacement.children = Node::from_hosts(vec!["source-prometheus-99:9090"]);
        root.insert_or_update(replacement, true);

        // the matched node keeps its own status, only the subtree changes
        assert_eq!(root.children.len(), 3);
        assert!(root.children[0].status);
        assert_eq!(root.children[0].children.len(), 1);
        assert_eq!(root.children[0].children[0].host, "source-prometheus-99:9090");
    }

    #[test]
    fn test_insert_or_update_merges_nested_match() {
        let mut root = sample_tree();

        let mut update = Node::new("source-prometheus-11:9090").unwrap();
        update.children = Node::from_hosts(vec!["source-prometheus-112:9090"]);
        root.insert_or_update(update, false);

        let merged = &root.children[0].children[0];
        assert_eq!(merged.children.len(), 1);
        assert_eq!(merged.children[0].host, "source-prometheus-112:9090");
    }

    #[test]
    fn test_delete_by_host() {
        let mut root = sample_tree();

        assert!(root.delete_by_host("source-prometheus-11:9090"));
        assert!(!root.search("source-prometheus-11:9090", true));
        // the deleted node's subtree goes with it
        assert!(!root.search("source-prometheus-111:9090", true));

        assert!(!root.delete_by_host("no-such-host:9090"));
    }

    #[test]
    fn test_delete_preserves_sibling_order() {
        let mut root = sample_tree();
        assert!(root.delete_by_host("source-prometheus-2:9090"));

        let hosts: Vec<_> = root.children.iter().map(|n| n.host.as_str()).collect();
        assert_eq!(hosts, vec!["source-prometheus-1:9090", "source-prometheus-3:9090"]);
    }

    #[test]
    fn test_render_tree() {
        let mut root = Node::new("root:9090").unwrap();
        root.children = Node::from_hosts(vec!["a:9090", "b:9090"]);
        root.children[0].children = Node::from_hosts(vec!["aa:9090"]);

        let rendered = root.render_tree("  ", 0, false);
        assert_eq!(rendered, "root:9090\n  a:9090\n    aa:9090\n  b:9090");
    }

    #[test]
    fn test_render_tree_with_status() {
        let mut root = Node::new("root:9090").unwrap();
        root.status = true;
        root.children = Node::from_hosts(vec!["a:9090"]);

        let rendered = root.render_tree("-", 0, true);
        assert_eq!(rendered, "root:9090[ok]\n-a:9090[error]");
    }

    #[test]
    fn test_json_wire_shape() {
        let mut root = Node::new("x:9090").unwrap();
        root.status = true;
        root.children = Node::from_hosts(vec!["y:9090"]);

        let encoded = serde_json::to_value(&root).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "host": "x:9090",
                "status": true,
                "children": [{"host": "y:9090", "status": false, "children": []}],
            })
        );

        // sparse payloads fill in defaults
        let decoded: Node = serde_json::from_str(r#"{"host":"z:9090"}"#).unwrap();
        assert!(!decoded.status);
        assert!(decoded.children.is_empty());
    }
}
