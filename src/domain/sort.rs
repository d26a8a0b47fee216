// src/domain/sort.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Client-side ordering applied to the filtered note list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    #[default]
    TitleAscending,
    TitleDescending,
    DateAscending,
    DateDescending,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::TitleAscending,
        SortOption::TitleDescending,
        SortOption::DateAscending,
        SortOption::DateDescending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::TitleAscending => "title-ascending",
            SortOption::TitleDescending => "title-descending",
            SortOption::DateAscending => "date-ascending",
            SortOption::DateDescending => "date-descending",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid sort option '{}'. Valid options: {}",
                    s,
                    SortOption::ALL.map(|o| o.as_str()).join(", ")
                )
            })
    }
}
