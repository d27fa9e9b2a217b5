//! Department hierarchy resolution.
//!
//! Every operation here performs exactly one bulk read of the department
//! table and answers from an in-memory adjacency index. Walks are bounded by
//! depth and track visited nodes, so malformed data containing a parent
//! cycle can never make them loop.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{Department, DepartmentTreeNode};
use crate::ports::{CoreError, DepartmentRepository};

/// In-memory adjacency index over one snapshot of the department table.
#[derive(Debug, Clone)]
pub struct HierarchySnapshot {
    departments: Vec<Department>,
    by_id: HashMap<i64, usize>,
    children: HashMap<i64, Vec<usize>>,
    roots: Vec<usize>,
}

/// Result of a bounded descendant walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescendantWalk {
    /// Descendants in depth-first preorder, start node excluded.
    pub departments: Vec<Department>,
    /// Whether some branch had children below the depth bound.
    pub depth_limit_reached: bool,
}

impl DescendantWalk {
    pub fn ids(&self) -> Vec<i64> {
        self.departments.iter().map(|d| d.id).collect()
    }
}

impl HierarchySnapshot {
    /// Index a bulk read. Children keep the order of `departments`.
    pub fn new(departments: Vec<Department>) -> Self {
        let mut by_id = HashMap::with_capacity(departments.len());
        let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (idx, dept) in departments.iter().enumerate() {
            by_id.insert(dept.id, idx);
            match dept.parent_id {
                Some(parent) => children.entry(parent).or_default().push(idx),
                None => roots.push(idx),
            }
        }

        Self {
            departments,
            by_id,
            children,
            roots,
        }
    }

    pub fn get(&self, id: i64) -> Option<&Department> {
        self.by_id.get(&id).map(|&idx| &self.departments[idx])
    }

    pub fn contains(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.departments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    fn children_of(&self, id: i64) -> &[usize] {
        self.children
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Walk every descendant of `start` at most `max_depth` levels down.
    ///
    /// Children of `start` are level 1. Each department appears at most once
    /// and `start` itself is never part of the result.
    pub fn descendants(&self, start: i64, max_depth: u32) -> DescendantWalk {
        let mut walk = DescendantWalk::default();
        let mut visited = HashSet::from([start]);
        let mut stack: Vec<(usize, u32)> = self
            .children_of(start)
            .iter()
            .rev()
            .map(|&idx| (idx, 1))
            .collect();

        if max_depth == 0 {
            walk.depth_limit_reached = !stack.is_empty();
            return walk;
        }

        while let Some((idx, depth)) = stack.pop() {
            let dept = &self.departments[idx];
            if !visited.insert(dept.id) {
                continue;
            }
            walk.departments.push(dept.clone());

            let below = self.children_of(dept.id);
            if depth >= max_depth {
                if below
                    .iter()
                    .any(|&c| !visited.contains(&self.departments[c].id))
                {
                    walk.depth_limit_reached = true;
                }
                continue;
            }
            stack.extend(below.iter().rev().map(|&c| (c, depth + 1)));
        }

        walk
    }

    /// Whether `candidate` is `id` or lies anywhere below it, at any depth.
    pub fn is_self_or_descendant(&self, id: i64, candidate: i64) -> bool {
        id == candidate
            || self
                .descendants(id, u32::MAX)
                .departments
                .iter()
                .any(|d| d.id == candidate)
    }

    /// Materialize the forest, keeping at most `max_depth` levels below a root.
    pub fn forest(&self, max_depth: u32) -> Vec<DepartmentTreeNode> {
        self.roots
            .iter()
            .map(|&idx| self.subtree(idx, max_depth))
            .collect()
    }

    fn subtree(&self, idx: usize, remaining: u32) -> DepartmentTreeNode {
        let dept = &self.departments[idx];
        let mut node = DepartmentTreeNode::leaf(dept);
        if remaining > 0 {
            node.children = self
                .children_of(dept.id)
                .iter()
                .map(|&c| self.subtree(c, remaining - 1))
                .collect();
        }
        node
    }
}

/// Resolves department subtrees for scoping and display.
pub struct HierarchyResolver {
    repo: Arc<dyn DepartmentRepository>,
    hierarchy_max_depth: u32,
    tree_max_depth: u32,
}

impl HierarchyResolver {
    pub fn new(
        repo: Arc<dyn DepartmentRepository>,
        hierarchy_max_depth: u32,
        tree_max_depth: u32,
    ) -> Self {
        Self {
            repo,
            hierarchy_max_depth,
            tree_max_depth,
        }
    }

    /// Load one snapshot of the whole department table.
    pub async fn snapshot(&self) -> Result<HierarchySnapshot, CoreError> {
        let departments = self.repo.list().await?;
        Ok(HierarchySnapshot::new(departments))
    }

    /// All descendants of a department, excluding the department itself.
    ///
    /// Returns `CoreError::NotFound` if the department doesn't exist. Hitting
    /// the depth bound is logged and yields the partial result.
    pub async fn get_descendants(&self, department_id: i64) -> Result<Vec<Department>, CoreError> {
        let snapshot = self.snapshot().await?;
        let walk = self.walk(&snapshot, department_id)?;
        Ok(walk.departments)
    }

    /// `{department_id} ∪ descendants`, as used to scope contact queries.
    pub async fn scope_ids(&self, department_id: i64) -> Result<Vec<i64>, CoreError> {
        let snapshot = self.snapshot().await?;
        let walk = self.walk(&snapshot, department_id)?;
        let mut ids = Vec::with_capacity(walk.departments.len() + 1);
        ids.push(department_id);
        ids.extend(walk.departments.iter().map(|d| d.id));
        debug!(department_id, scope = ids.len(), "Resolved department scope");
        Ok(ids)
    }

    /// Root departments with nested children down to the tree depth bound.
    pub async fn build_forest(&self) -> Result<Vec<DepartmentTreeNode>, CoreError> {
        let snapshot = self.snapshot().await?;
        Ok(snapshot.forest(self.tree_max_depth))
    }

    fn walk(
        &self,
        snapshot: &HierarchySnapshot,
        department_id: i64,
    ) -> Result<DescendantWalk, CoreError> {
        if !snapshot.contains(department_id) {
            return Err(CoreError::not_found("Department", department_id));
        }
        let walk = snapshot.descendants(department_id, self.hierarchy_max_depth);
        if walk.depth_limit_reached {
            warn!(
                department_id,
                max_depth = self.hierarchy_max_depth,
                collected = walk.departments.len(),
                "Max depth reached for department hierarchy"
            );
        }
        Ok(walk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dept(id: i64, parent_id: Option<i64>) -> Department {
        Department {
            id,
            name: format!("Dept {id}"),
            parent_id,
            created_at: Utc::now(),
        }
    }

    /// A linear chain 1 -> 2 -> ... -> n.
    fn chain(n: i64) -> Vec<Department> {
        (1..=n)
            .map(|id| dept(id, (id > 1).then(|| id - 1)))
            .collect()
    }

    fn ids(walk: &DescendantWalk) -> Vec<i64> {
        walk.ids()
    }

    #[test]
    fn test_abc_chain() {
        let snapshot = HierarchySnapshot::new(chain(3));
        assert_eq!(ids(&snapshot.descendants(1, 10)), vec![2, 3]);
        assert_eq!(ids(&snapshot.descendants(2, 10)), vec![3]);
        assert!(snapshot.descendants(3, 10).departments.is_empty());
    }

    #[test]
    fn test_preorder_by_store_order() {
        // 1 -> {2, 3}, 2 -> {4}, 3 -> {5}
        let snapshot = HierarchySnapshot::new(vec![
            dept(1, None),
            dept(2, Some(1)),
            dept(3, Some(1)),
            dept(4, Some(2)),
            dept(5, Some(3)),
        ]);
        assert_eq!(ids(&snapshot.descendants(1, 10)), vec![2, 4, 3, 5]);
    }

    #[test]
    fn test_start_node_excluded_and_no_duplicates() {
        let snapshot = HierarchySnapshot::new(vec![
            dept(1, None),
            dept(2, Some(1)),
            dept(3, Some(1)),
            dept(4, Some(3)),
            dept(5, None),
        ]);
        let walk = snapshot.descendants(1, 10);
        let got = ids(&walk);
        assert!(!got.contains(&1));
        assert!(!got.contains(&5));
        let unique: HashSet<_> = got.iter().collect();
        assert_eq!(unique.len(), got.len());
        assert_eq!(got.len(), 3);
        assert!(!walk.depth_limit_reached);
    }

    #[test]
    fn test_depth_bound_truncates() {
        let snapshot = HierarchySnapshot::new(chain(15));
        let walk = snapshot.descendants(1, 10);
        assert_eq!(ids(&walk), (2..=11).collect::<Vec<_>>());
        assert!(walk.depth_limit_reached);
    }

    #[test]
    fn test_exact_depth_is_not_truncation() {
        let snapshot = HierarchySnapshot::new(chain(11));
        let walk = snapshot.descendants(1, 10);
        assert_eq!(walk.departments.len(), 10);
        assert!(!walk.depth_limit_reached);
    }

    #[test]
    fn test_cycle_terminates() {
        // 1 -> 2 -> 3 -> 1 (corrupt data, no roots)
        let snapshot = HierarchySnapshot::new(vec![
            dept(1, Some(3)),
            dept(2, Some(1)),
            dept(3, Some(2)),
        ]);
        assert_eq!(ids(&snapshot.descendants(1, 10)), vec![2, 3]);
        assert!(snapshot.forest(5).is_empty());
    }

    #[test]
    fn test_is_self_or_descendant() {
        let snapshot = HierarchySnapshot::new(chain(4));
        assert!(snapshot.is_self_or_descendant(2, 2));
        assert!(snapshot.is_self_or_descendant(2, 4));
        assert!(!snapshot.is_self_or_descendant(2, 1));
    }

    #[test]
    fn test_forest_depth_bound() {
        let mut departments = chain(8);
        departments.push(dept(100, None));
        let snapshot = HierarchySnapshot::new(departments);

        let forest = snapshot.forest(5);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, 1);
        assert_eq!(forest[0].depth(), 5);
        assert_eq!(forest[0].size(), 6);
        assert_eq!(forest[1].id, 100);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_forest_serializes_nested_children() {
        let snapshot = HierarchySnapshot::new(chain(2));
        let json = serde_json::to_value(snapshot.forest(5)).unwrap();
        assert_eq!(json[0]["children"][0]["id"], 2);
        assert_eq!(json[0]["children"][0]["parent_id"], 1);
    }
}
