use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Rgb;

/// Discriminant of a node, with the per-variant data the builder knows about.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Region { id: Option<String> },
    Scheme { id: String, region_id: Option<String> },
    Village { id: Option<String>, population: Option<f64>, average_lpcd: Option<f64> },
    CompletionCategory,
    LpcdCategory,
}

/// Payload-free view of `NodeKind`, used for palette lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    Root,
    Region,
    Scheme,
    Village,
    CompletionCategory,
    LpcdCategory,
}

impl NodeKind {
    pub fn tag(&self) -> KindTag {
        match self {
            NodeKind::Root => KindTag::Root,
            NodeKind::Region { .. } => KindTag::Region,
            NodeKind::Scheme { .. } => KindTag::Scheme,
            NodeKind::Village { .. } => KindTag::Village,
            NodeKind::CompletionCategory => KindTag::CompletionCategory,
            NodeKind::LpcdCategory => KindTag::LpcdCategory,
        }
    }
}

impl KindTag {
    pub fn to_str(&self) -> &'static str {
        match self {
            KindTag::Root => "root",
            KindTag::Region => "region",
            KindTag::Scheme => "scheme",
            KindTag::Village => "village",
            KindTag::CompletionCategory => "completion_category",
            KindTag::LpcdCategory => "lpcd_category",
        }
    }
}

/// Completion or water-supply health of a scheme or village.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Completed,  // Scheme: "Fully Completed"
    InProgress, // Scheme: anything else
    Good,       // Village: average LPCD >= 55
    Warning,    // Village: average LPCD >= 40
    Critical,   // Village: below 40 LPCD
}

impl Status {
    /// Parse a collaborator status string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fully completed" | "completed" => Some(Status::Completed),
            "in progress" | "progress" | "partially completed" => Some(Status::InProgress),
            "good" => Some(Status::Good),
            "warning" => Some(Status::Warning),
            "critical" => Some(Status::Critical),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::InProgress => "progress",
            Status::Good => "good",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }
}

/// Bucket a node was grouped into by a category view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AboveLpcd,
    BelowLpcd,
    FullyCompleted,
    InProgress,
}

impl Category {
    /// Parse a collaborator category string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "above 55 lpcd" | "above_lpcd" => Some(Category::AboveLpcd),
            "below 55 lpcd" | "below_lpcd" => Some(Category::BelowLpcd),
            "fully completed" | "fully_completed" => Some(Category::FullyCompleted),
            "in progress" | "in_progress" => Some(Category::InProgress),
            _ => None,
        }
    }

    /// Display label used for bucket nodes.
    pub fn label(&self) -> &'static str {
        match self {
            Category::AboveLpcd => "Above 55 LPCD",
            Category::BelowLpcd => "Below 55 LPCD",
            Category::FullyCompleted => "Fully Completed",
            Category::InProgress => "In Progress",
        }
    }
}

/// A node of the source hierarchy handed to the partition solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
    #[serde(default)]
    pub details: Value,
}

fn default_weight() -> f64 { 1.0 }

impl HierarchyNode {
    /// Create a childless node with the default weight of 1.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            weight: default_weight(),
            status: None,
            category: None,
            color: None,
            children: Vec::new(),
            details: Value::Null,
        }
    }

    /// Create an empty root node.
    pub fn root(name: impl Into<String>) -> Self {
        Self { weight: 0.0, ..Self::new(name, NodeKind::Root) }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_status(mut self, status: Option<Status>) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_color(mut self, color: Option<Rgb>) -> Self {
        self.color = color;
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_child(mut self, child: HierarchyNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: HierarchyNode) { self.children.push(child) }

    #[inline] pub fn is_leaf(&self) -> bool { self.children.is_empty() }

    /// Number of nodes in this subtree, including itself.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(HierarchyNode::len).sum::<usize>()
    }

    /// Depth of the deepest descendant (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children.iter().map(|c| c.height() + 1).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_category_parse_is_closed() {
        assert_eq!(Status::parse(" Fully Completed "), Some(Status::Completed));
        assert_eq!(Status::parse("warning"), Some(Status::Warning));
        assert_eq!(Status::parse("unknown-thing"), None);

        assert_eq!(Category::parse("Above 55 LPCD"), Some(Category::AboveLpcd));
        assert_eq!(Category::parse("below 55 lpcd"), Some(Category::BelowLpcd));
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn len_and_height() {
        let tree = HierarchyNode::root("R")
            .with_child(HierarchyNode::new("a", NodeKind::Region { id: None })
                .with_child(HierarchyNode::new("a1", NodeKind::CompletionCategory)))
            .with_child(HierarchyNode::new("b", NodeKind::Region { id: None }));

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.height(), 2);
        assert!(!tree.is_leaf());
        assert_eq!(tree.weight, 0.0);
        assert_eq!(tree.children[1].weight, 1.0);
    }

    #[test]
    fn weight_defaults_to_one_when_absent() {
        let node: HierarchyNode = serde_json::from_str(r#"{"name":"x","kind":{"type":"root"}}"#).unwrap();
        assert_eq!(node.weight, 1.0);
        assert!(node.children.is_empty());
        assert_eq!(node.kind.tag(), KindTag::Root);
    }
}
