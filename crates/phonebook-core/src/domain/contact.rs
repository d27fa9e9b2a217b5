//! Contact domain types and field validation.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum length of each name field.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of the position field.
pub const MAX_POSITION_LEN: usize = 255;

/// Maximum number of phone numbers per category.
pub const MAX_PHONES_PER_CATEGORY: usize = 5;

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+0-9()\-\s]{5,20}$").expect("phone pattern must compile")
});

/// Phone number categories stored for a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneCategory {
    Work,
    WorkMobile,
    Personal,
}

impl PhoneCategory {
    pub const ALL: [Self; 3] = [Self::Work, Self::WorkMobile, Self::Personal];

    /// Parse a category from its storage representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "work" => Some(Self::Work),
            "work_mobile" => Some(Self::WorkMobile),
            "personal" => Some(Self::Personal),
            _ => None,
        }
    }

    /// Storage representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::WorkMobile => "work_mobile",
            Self::Personal => "personal",
        }
    }

    /// Name of the form field holding this category.
    const fn field(self) -> &'static str {
        match self {
            Self::Work => "work_phones",
            Self::WorkMobile => "work_mobile_phones",
            Self::Personal => "personal_phones",
        }
    }
}

impl std::fmt::Display for PhoneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three categorized phone sets of a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phones {
    pub work: BTreeSet<String>,
    pub work_mobile: BTreeSet<String>,
    pub personal: BTreeSet<String>,
}

impl Phones {
    /// Numbers of one category.
    pub const fn get(&self, category: PhoneCategory) -> &BTreeSet<String> {
        match category {
            PhoneCategory::Work => &self.work,
            PhoneCategory::WorkMobile => &self.work_mobile,
            PhoneCategory::Personal => &self.personal,
        }
    }

    /// Mutable access to one category.
    pub fn get_mut(&mut self, category: PhoneCategory) -> &mut BTreeSet<String> {
        match category {
            PhoneCategory::Work => &mut self.work,
            PhoneCategory::WorkMobile => &mut self.work_mobile,
            PhoneCategory::Personal => &mut self.personal,
        }
    }

    /// Iterate over every `(category, number)` pair in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (PhoneCategory, &str)> {
        PhoneCategory::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter().map(move |n| (c, n.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.work.is_empty() && self.work_mobile.is_empty() && self.personal.is_empty()
    }

    /// Copy with every number trimmed and blank entries dropped.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut out = Self::default();
        for (category, number) in self.iter() {
            let number = number.trim();
            if !number.is_empty() {
                out.get_mut(category).insert(number.to_string());
            }
        }
        out
    }
}

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
    pub department_id: Option<i64>,
    /// Name of the assigned department, joined in by the store for display.
    pub department_name: Option<String>,
    pub phones: Phones,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// "Last First Middle".
    pub fn full_name(&self) -> String {
        format_full_name(&self.last_name, &self.first_name, self.middle_name.as_deref())
    }

    /// "Last F.M.".
    pub fn short_name(&self) -> String {
        let mut out = self.last_name.trim().to_string();
        if let Some(first) = self.first_name.trim().chars().next() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push(first);
            out.push('.');
            if let Some(middle) = self
                .middle_name
                .as_deref()
                .and_then(|m| m.trim().chars().next())
            {
                out.push(middle);
                out.push('.');
            }
        }
        out
    }

    /// Identity tuple used for duplicate detection.
    pub fn identity(&self) -> ContactIdentity {
        ContactIdentity {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            position: self.position.clone(),
        }
    }
}

/// A contact that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
    pub department_id: Option<i64>,
    pub phones: Phones,
}

/// Fields that identify a contact for duplicate checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactIdentity {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
}

impl ContactIdentity {
    /// Copy with every field trimmed and a blank middle name collapsed to `None`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            middle_name: normalize_optional(self.middle_name.as_deref()),
            position: self.position.trim().to_string(),
        }
    }
}

/// Upsert payload for contacts.
///
/// `id == None` inserts, otherwise the stored contact is overwritten,
/// including a wholesale replacement of its phone sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub id: Option<i64>,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub position: String,
    pub department_id: Option<i64>,
    pub phones: Phones,
}

impl ContactForm {
    /// Identity tuple of the submitted data, normalized.
    pub fn identity(&self) -> ContactIdentity {
        ContactIdentity {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            middle_name: self.middle_name.clone(),
            position: self.position.clone(),
        }
        .normalized()
    }

    /// Trimmed payload ready for the store.
    pub fn to_new_contact(&self) -> NewContact {
        let identity = self.identity();
        NewContact {
            last_name: identity.last_name,
            first_name: identity.first_name,
            middle_name: identity.middle_name,
            position: identity.position,
            department_id: self.department_id,
            phones: self.phones.normalized(),
        }
    }
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Validate a contact form, returning the first violated constraint.
pub fn validate_contact_form(form: &ContactForm) -> Result<(), FieldError> {
    require_text("last_name", &form.last_name, MAX_NAME_LEN)?;
    require_text("first_name", &form.first_name, MAX_NAME_LEN)?;
    if let Some(middle) = &form.middle_name {
        if has_control_chars(middle) {
            return Err(FieldError::new(
                "middle_name",
                "must not contain control characters",
            ));
        }
        if middle.trim().chars().count() > MAX_NAME_LEN {
            return Err(FieldError::new(
                "middle_name",
                format!("must not exceed {MAX_NAME_LEN} characters"),
            ));
        }
    }
    require_text("position", &form.position, MAX_POSITION_LEN)?;

    let phones = form.phones.normalized();
    for category in PhoneCategory::ALL {
        let numbers = phones.get(category);
        if numbers.len() > MAX_PHONES_PER_CATEGORY {
            return Err(FieldError::new(
                category.field(),
                format!("at most {MAX_PHONES_PER_CATEGORY} numbers allowed"),
            ));
        }
        if let Some(bad) = numbers.iter().find(|n| !is_valid_phone(n)) {
            return Err(FieldError::new(
                category.field(),
                format!("invalid phone number '{bad}'"),
            ));
        }
    }
    Ok(())
}

/// Whether a phone number matches the accepted format.
pub fn is_valid_phone(number: &str) -> bool {
    PHONE_PATTERN.is_match(number)
}

/// Whether `value` contains characters such as tabs or unit separators.
pub fn has_control_chars(value: &str) -> bool {
    value.chars().any(char::is_control)
}

/// "Last First Middle", skipping blank parts.
pub fn format_full_name(last: &str, first: &str, middle: Option<&str>) -> String {
    [Some(last), Some(first), middle]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "must not be blank"));
    }
    if has_control_chars(trimmed) {
        return Err(FieldError::new(field, "must not contain control characters"));
    }
    if trimmed.chars().count() > max {
        return Err(FieldError::new(
            field,
            format!("must not exceed {max} characters"),
        ));
    }
    Ok(())
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
