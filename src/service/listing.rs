use std::cmp::Ordering;

use serde::Serialize;

use super::ContactService;
use crate::error::ContactResult;
use crate::models::Contact;

/// Sort key for contact listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    FirstName,
    LastName,
    Company,
    Email,
    CreatedAt,
}

impl SortField {
    /// Case-insensitive; unknown names fall back to first name.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "lastname" | "last" => Self::LastName,
            "company" => Self::Company,
            "email" => Self::Email,
            "createdat" | "created" => Self::CreatedAt,
            _ => Self::FirstName,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Company => "company",
            Self::Email => "email",
            Self::CreatedAt => "createdat",
        }
    }

    fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
        match self {
            Self::FirstName => compare_text(Some(&a.first_name), Some(&b.first_name)),
            Self::LastName => compare_text(a.last_name.as_ref(), b.last_name.as_ref()),
            Self::Company => compare_text(a.company.as_ref(), b.company.as_ref()),
            Self::Email => compare_text(a.email.as_ref(), b.email.as_ref()),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

/// Absent sorts lowest; present values compare case-insensitively.
fn compare_text(a: Option<&String>, b: Option<&String>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// One page of a sorted listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub contacts: Vec<Contact>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page_number: usize,
    pub page_size: usize,
}

impl ContactService<'_> {
    /// All contacts ordered by `field`.
    pub fn sorted_list(&self, field: SortField, ascending: bool) -> ContactResult<Vec<Contact>> {
        let mut contacts = self.all()?;
        if ascending {
            contacts.sort_by(|a, b| field.compare(a, b));
        } else {
            contacts.sort_by(|a, b| field.compare(b, a));
        }
        Ok(contacts)
    }

    /// Page `page_number` (1-based) of the sorted listing. Both the page number
    /// and page size are clamped to at least 1; a page past the end is empty.
    pub fn paginate(
        &self,
        page_number: usize,
        page_size: usize,
        field: SortField,
        ascending: bool,
    ) -> ContactResult<Page> {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);

        let sorted = self.sorted_list(field, ascending)?;
        let total_count = sorted.len();
        let total_pages = total_count.div_ceil(page_size);

        let offset = (page_number - 1).saturating_mul(page_size);
        let contacts = sorted.into_iter().skip(offset).take(page_size).collect();

        Ok(Page {
            contacts,
            total_count,
            total_pages,
            page_number,
            page_size,
        })
    }
}
