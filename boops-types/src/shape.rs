//! Per-row envelope curves.

use serde::{Deserialize, Serialize};

use crate::SHAPE_MAXNODES;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    #[default]
    Point,
    AutoSmooth,
    SymmetricSmooth,
    Smooth,
    Corner,
}

impl NodeType {
    /// Numeric tag used by pattern files.
    pub fn id(self) -> u8 {
        match self {
            NodeType::Point => 0,
            NodeType::AutoSmooth => 1,
            NodeType::SymmetricSmooth => 2,
            NodeType::Smooth => 3,
            NodeType::Corner => 4,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(NodeType::Point),
            1 => Some(NodeType::AutoSmooth),
            2 => Some(NodeType::SymmetricSmooth),
            3 => Some(NodeType::Smooth),
            4 => Some(NodeType::Corner),
            _ => None,
        }
    }
}

/// A curve node: anchor point plus two bezier handles (relative).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_type: NodeType,
    pub point: Point,
    pub handle1: Point,
    pub handle2: Point,
}

impl Node {
    pub fn new(node_type: NodeType, point: Point, handle1: Point, handle2: Point) -> Self {
        Self { node_type, point, handle1, handle2 }
    }

    pub fn point(x: f64, y: f64) -> Self {
        Self { point: Point::new(x, y), ..Self::default() }
    }
}

/// Bounded node list. An empty shape means the row uses discrete pads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    nodes: Vec<Node>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut shape = Self::new();
        for node in nodes {
            if !shape.append_node(node) {
                break;
            }
        }
        shape
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.nodes.len() >= SHAPE_MAXNODES
    }

    /// Append a node. Returns false (and leaves the shape unchanged) at capacity.
    pub fn append_node(&mut self, node: Node) -> bool {
        if self.is_full() {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Insert a node at `index` (clamped to the end). Returns false at capacity.
    pub fn insert_node(&mut self, index: usize, node: Node) -> bool {
        if self.is_full() {
            return false;
        }
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, node);
        true
    }

    pub fn remove_node(&mut self, index: usize) -> Option<Node> {
        if index < self.nodes.len() {
            Some(self.nodes.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}
