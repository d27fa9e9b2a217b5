//! Row types and mapping helpers for `SQLite` queries.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use phonebook_core::{
    Contact, Department, DepartmentSummary, PhoneCategory, Phones, RepositoryError,
};

/// Shared SELECT column list for department queries.
pub const DEPARTMENT_SELECT_COLUMNS: &str = "d.id, d.name, d.parent_id, d.created_at";

/// Shared SELECT column list for contact queries (joins the department name).
pub const CONTACT_SELECT_COLUMNS: &str = "c.id, c.last_name, c.first_name, c.middle_name, c.position, c.department_id, d.name AS department_name, c.created_at, c.updated_at";

/// Contacts joined with their department, for use after `SELECT ... FROM`.
pub const CONTACT_FROM: &str = "contacts c LEFT JOIN departments d ON d.id = c.department_id";

/// Separator between name fields in `search_key`.
const KEY_SEPARATOR: char = '\u{1f}';

#[derive(sqlx::FromRow)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub created_at: String,
}

#[derive(sqlx::FromRow)]
pub struct DepartmentSummaryRow {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub created_at: String,
    pub contact_count: i64,
}

#[derive(sqlx::FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(sqlx::FromRow)]
pub struct PhoneRow {
    pub contact_id: i64,
    pub category: String,
    pub number: String,
}

/// Parse a `SQLite` `datetime('now')` value, falling back to the current time.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    let trimmed = s.trim_end_matches(" UTC");
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<DepartmentRow> for Department {
    fn from(row: DepartmentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            created_at: parse_datetime(&row.created_at),
        }
    }
}

impl From<DepartmentSummaryRow> for DepartmentSummary {
    fn from(row: DepartmentSummaryRow) -> Self {
        Self {
            department: Department {
                id: row.id,
                name: row.name,
                parent_id: row.parent_id,
                created_at: parse_datetime(&row.created_at),
            },
            contact_count: to_u64(row.contact_count),
        }
    }
}

/// Convert a contact row plus its phones into a domain `Contact`.
pub fn row_to_contact(row: ContactRow, phones: Phones) -> Contact {
    Contact {
        id: row.id,
        last_name: row.last_name,
        first_name: row.first_name,
        middle_name: row.middle_name,
        position: row.position,
        department_id: row.department_id,
        department_name: row.department_name,
        phones,
        created_at: parse_datetime(&row.created_at),
        updated_at: parse_datetime(&row.updated_at),
    }
}

/// Group phone rows by contact. Rows with an unknown category are skipped.
pub fn group_phones(rows: Vec<PhoneRow>) -> HashMap<i64, Phones> {
    let mut grouped: HashMap<i64, Phones> = HashMap::new();
    for row in rows {
        if let Some(category) = PhoneCategory::parse(&row.category) {
            grouped
                .entry(row.contact_id)
                .or_default()
                .get_mut(category)
                .insert(row.number);
        }
    }
    grouped
}

/// Lowercased name fields joined by a unit separator.
///
/// Validation rejects control characters in names and queries, so a search
/// fragment cannot match across a field boundary.
pub fn search_key(last: &str, first: &str, middle: Option<&str>) -> String {
    let mut key = last.to_lowercase();
    key.push(KEY_SEPARATOR);
    key.push_str(&first.to_lowercase());
    key.push(KEY_SEPARATOR);
    if let Some(middle) = middle {
        key.push_str(&middle.to_lowercase());
    }
    key
}

/// `LIKE` pattern matching `fragment` anywhere, case folded, with wildcards escaped.
///
/// Use together with `ESCAPE '\'`.
pub fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        if ch != KEY_SEPARATOR {
            pattern.push(ch);
        }
    }
    pattern.push('%');
    pattern
}

/// Comma-separated `?` placeholders for an `IN (...)` list.
pub fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

pub fn to_u64(n: i64) -> u64 {
    u64::try_from(n).unwrap_or_default()
}

/// Map `SQLx` errors to `RepositoryError`.
pub fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    let msg = e.to_string();
    if msg.contains("UNIQUE constraint failed") {
        return RepositoryError::AlreadyExists(msg);
    }
    if msg.contains("FOREIGN KEY constraint failed") || msg.contains("CHECK constraint failed") {
        return RepositoryError::Constraint(msg);
    }
    RepositoryError::Storage(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sqlite_datetime() {
        let dt = parse_datetime("2024-03-01 12:30:45");
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:45+00:00");
    }

    #[test]
    fn test_search_key_is_lowercase_unicode() {
        assert_eq!(
            search_key("Иванов", "Иван", Some("Петрович")),
            "иванов\u{1f}иван\u{1f}петрович"
        );
        assert_eq!(search_key("Smith", "John", None), "smith\u{1f}john\u{1f}");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Ab"), "%ab%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_group_phones() {
        let rows = vec![
            PhoneRow {
                contact_id: 1,
                category: "work".to_string(),
                number: "12345".to_string(),
            },
            PhoneRow {
                contact_id: 1,
                category: "personal".to_string(),
                number: "67890".to_string(),
            },
            PhoneRow {
                contact_id: 2,
                category: "fax".to_string(),
                number: "00000".to_string(),
            },
        ];
        let grouped = group_phones(rows);
        assert_eq!(grouped[&1].work.len(), 1);
        assert_eq!(grouped[&1].personal.len(), 1);
        assert!(!grouped.contains_key(&2));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(3), "?, ?, ?");
        assert_eq!(placeholders(1), "?");
    }
}
