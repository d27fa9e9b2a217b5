//! Contact and department display utilities for CLI output.

use phonebook_core::{Contact, Department, DepartmentSummary, Page, PhoneCategory};

use super::tables::{format_optional, print_separator, render_pager, truncate_string};

/// Label printed in front of a phone category.
const fn category_label(category: PhoneCategory) -> &'static str {
    match category {
        PhoneCategory::Work => "Work",
        PhoneCategory::WorkMobile => "Mobile",
        PhoneCategory::Personal => "Personal",
    }
}

/// Comma-separated phone numbers of one category.
fn phones_of(contact: &Contact, category: PhoneCategory) -> String {
    contact
        .phones
        .get(category)
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print one page of contacts followed by the pager line.
pub fn display_contact_page(page: &Page<Contact>, window: u32) {
    if page.items.is_empty() {
        println!("No contacts found.");
        return;
    }

    println!(
        "{:<5} {:<32} {:<24} {:<20} Work phones",
        "ID", "Name", "Position", "Department"
    );
    print_separator(100);

    for contact in &page.items {
        println!(
            "{:<5} {:<32} {:<24} {:<20} {}",
            contact.id,
            truncate_string(&contact.full_name(), 31),
            truncate_string(&contact.position, 23),
            truncate_string(
                &format_optional(contact.department_name.as_ref(), "--"),
                19
            ),
            phones_of(contact, PhoneCategory::Work),
        );
    }

    println!();
    println!(
        "Page {} of {} ({} contact(s))   {}",
        page.page + 1,
        page.total_pages.max(1),
        page.total_elements,
        render_pager(page.page, page.total_pages, window)
    );
}

/// Print every field of a contact.
pub fn display_contact(contact: &Contact) {
    println!("  ID: {}", contact.id);
    println!("  Name: {}", contact.full_name());
    println!("  Short: {}", contact.short_name());
    println!("  Position: {}", contact.position);
    println!(
        "  Department: {}",
        format_optional(contact.department_name.as_ref(), "--")
    );
    for category in PhoneCategory::ALL {
        let numbers = phones_of(contact, category);
        if !numbers.is_empty() {
            println!("  {} phones: {numbers}", category_label(category));
        }
    }
    println!(
        "  Updated: {}",
        contact.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

/// Print departments with their direct contact counts.
pub fn display_department_summaries(summaries: &[DepartmentSummary]) {
    if summaries.is_empty() {
        println!("No departments found.");
        return;
    }

    println!("{:<5} {:<36} {:<8} Contacts", "ID", "Name", "Parent");
    print_separator(60);
    for summary in summaries {
        let dept = &summary.department;
        println!(
            "{:<5} {:<36} {:<8} {}",
            dept.id,
            truncate_string(&dept.name, 35),
            format_optional(dept.parent_id.as_ref(), "--"),
            summary.contact_count
        );
    }
}

/// Print a plain department list.
pub fn display_departments(departments: &[Department]) {
    if departments.is_empty() {
        println!("No departments found.");
        return;
    }

    println!("{:<5} {:<36} Parent", "ID", "Name");
    print_separator(50);
    for dept in departments {
        println!(
            "{:<5} {:<36} {}",
            dept.id,
            truncate_string(&dept.name, 35),
            format_optional(dept.parent_id.as_ref(), "--")
        );
    }
}
