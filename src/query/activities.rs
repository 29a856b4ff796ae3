//! Activity log search and ordering.

use super::contains_ignore_case;
use crate::entities::{Activity, ActivityType};
use serde::{Deserialize, Serialize};

/// Activity list ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivitySort {
    #[default]
    Newest,
    Oldest,
    /// Lexicographic by type name.
    Type,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityQuery {
    /// Matched against the description.
    pub search: String,
    /// `None` keeps every type.
    pub activity_type: Option<ActivityType>,
    pub sort: ActivitySort,
}

impl ActivityQuery {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..Default::default()
        }
    }

    pub fn of_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = Some(activity_type);
        self
    }

    pub fn sorted(mut self, sort: ActivitySort) -> Self {
        self.sort = sort;
        self
    }
}

pub fn filter_activities<'a>(
    activities: &'a [Activity],
    query: &ActivityQuery,
) -> Vec<&'a Activity> {
    let needle = query.search.to_lowercase();
    let mut matched: Vec<&Activity> = activities
        .iter()
        .filter(|a| query.activity_type.map_or(true, |t| a.activity_type == t))
        .filter(|a| contains_ignore_case(&a.description, &needle))
        .collect();

    match query.sort {
        ActivitySort::Newest => matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        ActivitySort::Oldest => matched.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        ActivitySort::Type => {
            matched.sort_by(|a, b| a.activity_type.as_str().cmp(b.activity_type.as_str()))
        }
    }
    matched
}
