//! Fixed site taxonomy: historical eras and site categories.
//!
//! Both enumerations have exactly six values. The canonical names are the
//! ones stored in the `eras` / `categories` lookup tables and exposed over the
//! API, so serde uses them verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Historical period a site belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "Каменный век")]
    StoneAge,
    #[serde(rename = "Бронзовый век")]
    BronzeAge,
    #[serde(rename = "Железный век")]
    IronAge,
    #[serde(rename = "Римская эпоха")]
    Roman,
    #[serde(rename = "Средневековье")]
    Medieval,
    #[serde(rename = "Современность")]
    Modern,
}

impl Era {
    pub const ALL: [Era; 6] = [
        Era::StoneAge,
        Era::BronzeAge,
        Era::IronAge,
        Era::Roman,
        Era::Medieval,
        Era::Modern,
    ];

    /// Era assigned during import when a fixture names an unknown era.
    pub const FALLBACK: Era = Era::Modern;

    /// Canonical display / storage name.
    pub fn name(self) -> &'static str {
        match self {
            Era::StoneAge => "Каменный век",
            Era::BronzeAge => "Бронзовый век",
            Era::IronAge => "Железный век",
            Era::Roman => "Римская эпоха",
            Era::Medieval => "Средневековье",
            Era::Modern => "Современность",
        }
    }

    /// Exact-match lookup by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|era| era.name() == name)
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of archaeological site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Поселения")]
    Settlement,
    #[serde(rename = "Захоронения")]
    Burial,
    #[serde(rename = "Артефакты")]
    Artifact,
    #[serde(rename = "Крепости")]
    Fortress,
    #[serde(rename = "Религиозные")]
    Religious,
    #[serde(rename = "Остальное")]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Settlement,
        Category::Burial,
        Category::Artifact,
        Category::Fortress,
        Category::Religious,
        Category::Other,
    ];

    /// Category assigned during import when a fixture names an unknown one.
    pub const FALLBACK: Category = Category::Other;

    pub fn name(self) -> &'static str {
        match self {
            Category::Settlement => "Поселения",
            Category::Burial => "Захоронения",
            Category::Artifact => "Артефакты",
            Category::Fortress => "Крепости",
            Category::Religious => "Религиозные",
            Category::Other => "Остальное",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_names_round_trip_through_lookup() {
        for era in Era::ALL {
            assert_eq!(Era::from_name(era.name()), Some(era));
        }
    }

    #[test]
    fn category_names_round_trip_through_lookup() {
        for category in Category::ALL {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
    }

    #[test]
    fn lookup_is_exact_match() {
        assert_eq!(Era::from_name("бронзовый век"), None);
        assert_eq!(Era::from_name(" Бронзовый век"), None);
        assert_eq!(Category::from_name("Settlement"), None);
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Era::BronzeAge).unwrap();
        assert_eq!(json, "\"Бронзовый век\"");

        let parsed: Category = serde_json::from_str("\"Крепости\"").unwrap();
        assert_eq!(parsed, Category::Fortress);
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Era::Roman.to_string(), "Римская эпоха");
        assert_eq!(Category::Other.to_string(), "Остальное");
    }
}
