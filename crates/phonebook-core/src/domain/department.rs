//! Department domain types.
//!
//! Departments form a forest: every department has at most one parent and
//! any number of children. Children are never stored, they are derived from
//! `parent_id` when the hierarchy is resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Database ID of the department.
    pub id: i64,
    /// Unique, trimmed display name.
    pub name: String,
    /// Parent department, `None` for roots.
    pub parent_id: Option<i64>,
    /// When the department was first stored.
    pub created_at: DateTime<Utc>,
}

impl Department {
    /// Whether this department sits at the top of the tree.
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A department that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Upsert payload for departments.
///
/// `id == None` creates a new department, otherwise the existing one is
/// renamed and/or moved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentForm {
    pub id: Option<i64>,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// A department together with the number of contacts assigned directly to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    #[serde(flatten)]
    pub department: Department,
    pub contact_count: u64,
}

/// A node of the materialized department forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTreeNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub children: Vec<Self>,
}

impl DepartmentTreeNode {
    /// Leaf node built from a department, children are attached by the resolver.
    pub fn leaf(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
            parent_id: department.parent_id,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Self::size).sum::<usize>()
    }

    /// Depth of this subtree; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}
