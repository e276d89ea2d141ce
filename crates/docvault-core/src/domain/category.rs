use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category assigned by the server's classifier. The set is closed: the stats
/// endpoint reports exactly one counter per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentCategory {
    Math,
    Algo,
    Histoire,
    Autres,
}

/// Display metadata for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub key: DocumentCategory,
    pub label: &'static str,
    pub icon: &'static str,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 4] = [Self::Math, Self::Algo, Self::Histoire, Self::Autres];

    /// Wire value, also used as the `category` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Algo => "algo",
            Self::Histoire => "histoire",
            Self::Autres => "autres",
        }
    }

    pub fn info(self) -> CategoryInfo {
        match self {
            Self::Math => CategoryInfo {
                key: self,
                label: "Mathématiques",
                icon: "📊",
            },
            Self::Algo => CategoryInfo {
                key: self,
                label: "Algorithme",
                icon: "💻",
            },
            Self::Histoire => CategoryInfo {
                key: self,
                label: "Histoire",
                icon: "📚",
            },
            Self::Autres => CategoryInfo {
                key: self,
                label: "Autres",
                icon: "📄",
            },
        }
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document category: {0} (expected math, algo, histoire or autres)")]
pub struct UnknownCategory(pub String);

impl FromStr for DocumentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
