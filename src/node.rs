use grid_util::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major index of a cell, `y * width + x`.
pub type NodeId = usize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeType {
    #[default]
    Default,
    Wall,
    Start,
    Target,
}

impl NodeType {
    /// Start and target cells are markers: painting and maze generation leave them alone.
    pub fn is_marker(self) -> bool {
        matches!(self, NodeType::Start | NodeType::Target)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeStatus {
    #[default]
    Unvisited,
    Opened,
    Closed,
}

/// A single grid cell. The search fields (`g`, `h`, `f`, `status`, `parent`) are scratch space
/// owned by the running search and are cleared before every run.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub x: i32,
    pub y: i32,
    pub node_type: NodeType,
    pub g: f64,
    /// Heuristic estimate, computed at most once per cell per search.
    pub h: Option<f64>,
    pub f: f64,
    pub status: NodeStatus,
    pub parent: Option<NodeId>,
    pub is_path: bool,
}

impl Node {
    pub fn new(id: NodeId, x: i32, y: i32, node_type: NodeType) -> Node {
        Node {
            id,
            x,
            y,
            node_type,
            g: 0.0,
            h: None,
            f: 0.0,
            status: NodeStatus::Unvisited,
            parent: None,
            is_path: false,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Builds a fresh cell that keeps only identity and type, then layers `keep` on top.
    pub fn rebuilt(&self, keep: &NodeChanges) -> Node {
        let mut node = Node::new(self.id, self.x, self.y, self.node_type);
        keep.apply(&mut node);
        node
    }

    pub(crate) fn clear_search(&mut self) {
        self.g = 0.0;
        self.h = None;
        self.f = 0.0;
        self.status = NodeStatus::Unvisited;
        self.parent = None;
        self.is_path = false;
    }
}

/// Partial update of the externally visible fields of a [Node]. Unset fields are left as they are.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeChanges {
    pub node_type: Option<NodeType>,
    pub status: Option<NodeStatus>,
    pub is_path: Option<bool>,
}

impl NodeChanges {
    pub fn new() -> NodeChanges {
        NodeChanges::default()
    }

    pub fn node_type(mut self, node_type: NodeType) -> NodeChanges {
        self.node_type = Some(node_type);
        self
    }

    pub fn status(mut self, status: NodeStatus) -> NodeChanges {
        self.status = Some(status);
        self
    }

    pub fn is_path(mut self, is_path: bool) -> NodeChanges {
        self.is_path = Some(is_path);
        self
    }

    /// Retains the visible state of `node`: its type, status and path flag.
    pub fn keep_visible(node: &Node) -> NodeChanges {
        NodeChanges::new()
            .node_type(node.node_type)
            .status(node.status)
            .is_path(node.is_path)
    }

    pub fn apply(&self, node: &mut Node) {
        if let Some(node_type) = self.node_type {
            node.node_type = node_type;
        }
        if let Some(status) = self.status {
            node.status = status;
        }
        if let Some(is_path) = self.is_path {
            node.is_path = is_path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilt_drops_search_fields() {
        let mut node = Node::new(7, 2, 1, NodeType::Wall);
        node.g = 3.0;
        node.h = Some(2.0);
        node.f = 5.0;
        node.parent = Some(6);
        node.status = NodeStatus::Closed;
        node.is_path = true;

        let rebuilt = node.rebuilt(&NodeChanges::new().is_path(true));
        assert_eq!(rebuilt.node_type, NodeType::Wall);
        assert_eq!(rebuilt.status, NodeStatus::Unvisited);
        assert_eq!(rebuilt.parent, None);
        assert_eq!(rebuilt.h, None);
        assert!(rebuilt.is_path);
    }

    #[test]
    fn changes_only_touch_set_fields() {
        let mut node = Node::new(0, 0, 0, NodeType::Start);
        node.status = NodeStatus::Opened;
        NodeChanges::new().is_path(true).apply(&mut node);
        assert_eq!(node.node_type, NodeType::Start);
        assert_eq!(node.status, NodeStatus::Opened);
        assert!(node.is_path);
    }
}
