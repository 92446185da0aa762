use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of inventory item being listed.
///
/// Parsing is total: any tag that is not recognised maps to [`ResourceCategory::Vm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceCategory {
    #[default]
    Vm,
    SqlDatabase,
    SqlServer,
    MysqlFlexible,
    /// Generic database listing kept for older bookmarks and configs.
    Database,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 5] = [
        ResourceCategory::Vm,
        ResourceCategory::SqlDatabase,
        ResourceCategory::SqlServer,
        ResourceCategory::MysqlFlexible,
        ResourceCategory::Database,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ResourceCategory::Vm => "vm",
            ResourceCategory::SqlDatabase => "sqlDatabase",
            ResourceCategory::SqlServer => "sqlServer",
            ResourceCategory::MysqlFlexible => "mysqlFlexible",
            ResourceCategory::Database => "database",
        }
    }

    /// Parse a category tag, falling back to `vm` for anything unknown.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.tag().eq_ignore_ascii_case(tag))
            .unwrap_or_else(|| {
                log::warn!("Unknown resource category '{}', using vm", tag);
                ResourceCategory::default()
            })
    }

    pub fn is_legacy(self) -> bool {
        matches!(self, ResourceCategory::Database)
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<&str> for ResourceCategory {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl From<String> for ResourceCategory {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<ResourceCategory> for String {
    fn from(category: ResourceCategory) -> Self {
        category.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for category in ResourceCategory::ALL {
            assert_eq!(ResourceCategory::parse(category.tag()), category);
        }
        assert_eq!(ResourceCategory::parse("SQLSERVER"), ResourceCategory::SqlServer);
        assert_eq!(ResourceCategory::parse(" mysqlFlexible "), ResourceCategory::MysqlFlexible);
    }

    #[test]
    fn test_unknown_tag_fails_closed_to_vm() {
        assert_eq!(ResourceCategory::parse("storageAccount"), ResourceCategory::Vm);
        assert_eq!(ResourceCategory::parse(""), ResourceCategory::Vm);
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&ResourceCategory::SqlDatabase).unwrap();
        assert_eq!(json, "\"sqlDatabase\"");

        let parsed: ResourceCategory = serde_json::from_str("\"database\"").unwrap();
        assert_eq!(parsed, ResourceCategory::Database);
        assert!(parsed.is_legacy());

        let unknown: ResourceCategory = serde_json::from_str("\"cosmos\"").unwrap();
        assert_eq!(unknown, ResourceCategory::Vm);
    }
}
