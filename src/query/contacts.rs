//! Contact search and list ordering.

use super::contains_ignore_case;
use crate::entities::Contact;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Contact list ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactSort {
    #[default]
    Name,
    Company,
    /// Newest first.
    Created,
    /// Most recently active first.
    LastActivity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactQuery {
    /// Matched against name, email, company and role.
    pub search: String,
    pub sort: ContactSort,
}

impl ContactQuery {
    pub fn new(search: impl Into<String>, sort: ContactSort) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }
}

/// Contacts matching `query.search`, ordered by `query.sort`.
///
/// Contacts without a timestamp sort as the earliest, which puts them
/// last under the descending date orders.
pub fn filter_contacts<'a>(contacts: &'a [Contact], query: &ContactQuery) -> Vec<&'a Contact> {
    let needle = query.search.to_lowercase();
    let mut matched: Vec<&Contact> = contacts
        .iter()
        .filter(|c| {
            [&c.name, &c.email, &c.company, &c.role]
                .into_iter()
                .any(|field| contains_ignore_case(field, &needle))
        })
        .collect();

    match query.sort {
        ContactSort::Name => matched.sort_by(|a, b| cmp_folded(&a.name, &b.name)),
        ContactSort::Company => matched.sort_by(|a, b| cmp_folded(&a.company, &b.company)),
        ContactSort::Created => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ContactSort::LastActivity => matched.sort_by(|a, b| b.last_activity.cmp(&a.last_activity)),
    }
    matched
}

fn cmp_folded(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}
