//! Table formatting utilities for CLI output.

use std::fmt::Write as _;

use phonebook_core::DepartmentTreeNode;

/// Truncates a string to a maximum number of characters, adding "..." if needed.
///
/// # Examples
///
/// ```rust
/// use phonebook_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Format an optional value for table display, returning a default if None.
pub fn format_optional<T: std::fmt::Display>(value: Option<&T>, default: &str) -> String {
    value.map_or_else(|| default.to_string(), ToString::to_string)
}

/// Zero-based page indexes shown around `current`, at most `window` on each side.
///
/// Empty when there are no pages.
pub fn pagination_window(current: u32, total_pages: u64, window: u32) -> Vec<u64> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = u64::from(current).min(total_pages - 1);
    let window = u64::from(window);
    let first = current.saturating_sub(window);
    let last = (current + window).min(total_pages - 1);
    (first..=last).collect()
}

/// One-line pager such as `« 1 [2] 3 4 »`, with one-based labels.
pub fn render_pager(current: u32, total_pages: u64, window: u32) -> String {
    let pages = pagination_window(current, total_pages, window);
    let (Some(&first), Some(&last)) = (pages.first(), pages.last()) else {
        return String::new();
    };

    let mut parts = Vec::with_capacity(pages.len() + 2);
    if first > 0 {
        parts.push("«".to_string());
    }
    for page in pages {
        if page == u64::from(current) {
            parts.push(format!("[{}]", page + 1));
        } else {
            parts.push((page + 1).to_string());
        }
    }
    if last + 1 < total_pages {
        parts.push("»".to_string());
    }
    parts.join(" ")
}

/// Render the department forest with box-drawing connectors.
pub fn render_tree(roots: &[DepartmentTreeNode]) -> String {
    let mut out = String::new();
    for root in roots {
        let _ = writeln!(out, "{} (#{})", root.name, root.id);
        render_children(&mut out, &root.children, "");
    }
    out
}

fn render_children(out: &mut String, children: &[DepartmentTreeNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let connector = if last { "└── " } else { "├── " };
        let _ = writeln!(out, "{prefix}{connector}{} (#{})", child.name, child.id);

        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(out, &child.children, &nested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: i64, name: &str, children: Vec<DepartmentTreeNode>) -> DepartmentTreeNode {
        DepartmentTreeNode {
            id,
            name: name.to_string(),
            parent_id: None,
            children,
        }
    }

    #[test]
    fn test_truncate_string_counts_characters() {
        assert_eq!(truncate_string("exactly10c", 10), "exactly10c");
        assert_eq!(truncate_string("Бухгалтерия", 8), "Бухга...");
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(&"IT"), "--"), "IT");
        assert_eq!(format_optional::<String>(None, "--"), "--");
    }

    #[test]
    fn test_pagination_window_clamps_to_bounds() {
        assert_eq!(pagination_window(0, 10, 3), vec![0, 1, 2, 3]);
        assert_eq!(pagination_window(5, 10, 3), vec![2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(pagination_window(9, 10, 3), vec![6, 7, 8, 9]);
        assert_eq!(pagination_window(0, 1, 3), vec![0]);
        assert!(pagination_window(0, 0, 3).is_empty());
    }

    #[test]
    fn test_pagination_window_past_last_page() {
        assert_eq!(pagination_window(7, 3, 1), vec![1, 2]);
    }

    #[test]
    fn test_render_pager() {
        assert_eq!(render_pager(0, 3, 3), "[1] 2 3");
        assert_eq!(render_pager(5, 10, 1), "« 5 [6] 7 »");
        assert_eq!(render_pager(0, 0, 3), "");
    }

    #[test]
    fn test_render_tree() {
        let forest = vec![node(
            1,
            "Head Office",
            vec![
                node(2, "IT", vec![node(4, "Support", vec![])]),
                node(3, "Sales", vec![]),
            ],
        )];
        let expected = "\
Head Office (#1)
├── IT (#2)
│   └── Support (#4)
└── Sales (#3)
";
        assert_eq!(render_tree(&forest), expected);
    }
}
