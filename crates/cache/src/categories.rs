//! List categories and their cache keys

use std::fmt;

const KEY_PREFIX: &str = "things:";

/// A cacheable list read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    Inbox,
    Today,
    Upcoming,
    Anytime,
    Someday,
    Projects,
    Areas,
    Tags,
}

impl CacheCategory {
    pub const ALL: [CacheCategory; 8] = [
        CacheCategory::Inbox,
        CacheCategory::Today,
        CacheCategory::Upcoming,
        CacheCategory::Anytime,
        CacheCategory::Someday,
        CacheCategory::Projects,
        CacheCategory::Areas,
        CacheCategory::Tags,
    ];

    /// Categories whose contents change when any to-do changes
    pub const TODO_BEARING: [CacheCategory; 5] = [
        CacheCategory::Inbox,
        CacheCategory::Today,
        CacheCategory::Upcoming,
        CacheCategory::Anytime,
        CacheCategory::Someday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheCategory::Inbox => "inbox",
            CacheCategory::Today => "today",
            CacheCategory::Upcoming => "upcoming",
            CacheCategory::Anytime => "anytime",
            CacheCategory::Someday => "someday",
            CacheCategory::Projects => "projects",
            CacheCategory::Areas => "areas",
            CacheCategory::Tags => "tags",
        }
    }

    /// Cache key, `things:<category>`
    pub fn key(&self) -> String {
        format!("{KEY_PREFIX}{}", self.as_str())
    }

    /// Name of the script that reads this list, `get-<category>`
    pub fn script_name(&self) -> String {
        format!("get-{}", self.as_str())
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
