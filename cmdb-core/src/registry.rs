// Resource Type Registry - one declarative entry per category
// Endpoint, display label, column schema and row-key fields all live here so a
// new category is a single table addition.

use crate::category::ResourceCategory;

const UNKNOWN: &str = "unknown";
const NOT_SPECIFIED: &str = "not specified";

/// One table column: header label, candidate record fields (first displayable
/// value wins) and the text shown when none of them is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub header: &'static str,
    pub fields: &'static [&'static str],
    pub fallback: &'static str,
}

const fn column(
    header: &'static str,
    fields: &'static [&'static str],
    fallback: &'static str,
) -> ColumnDef {
    ColumnDef {
        header,
        fields,
        fallback,
    }
}

const NAME: ColumnDef = column("Name", &["name"], UNKNOWN);
const LOCATION: ColumnDef = column("Location", &["location"], UNKNOWN);
const STATUS: ColumnDef = column("Status", &["status"], UNKNOWN);
const OWNER: ColumnDef = column("IT Owner", &["owner"], NOT_SPECIFIED);
const VERSION: ColumnDef = column("Version", &["version"], UNKNOWN);
const SERVER: ColumnDef = column("Server", &["server"], UNKNOWN);
const SUB_ID: ColumnDef = column("Sub ID", &["subscription_id", "id"], UNKNOWN);

const VM_KEY: &[&str] = &["vm_id", "id"];
const DATABASE_KEY: &[&str] = &["database_id", "id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceType {
    pub category: ResourceCategory,
    pub label: &'static str,
    pub endpoint: &'static str,
    pub columns: &'static [ColumnDef],
    pub row_key: &'static [&'static str],
}

impl ResourceType {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.header).collect()
    }
}

static REGISTRY: [ResourceType; 5] = [
    ResourceType {
        category: ResourceCategory::Vm,
        label: "Virtual Machines",
        endpoint: "/api/vms",
        columns: &[
            NAME,
            column("VM ID", &["vm_id", "resource_id", "id"], UNKNOWN),
            LOCATION,
            column("OS", &["os_type", "os"], UNKNOWN),
            column("Size", &["vm_size", "size", "type"], UNKNOWN),
            STATUS,
            OWNER,
        ],
        row_key: VM_KEY,
    },
    ResourceType {
        category: ResourceCategory::SqlDatabase,
        label: "SQL Databases",
        endpoint: "/api/sqldatabases",
        columns: &[NAME, SERVER, LOCATION, VERSION, STATUS, OWNER],
        row_key: DATABASE_KEY,
    },
    ResourceType {
        category: ResourceCategory::SqlServer,
        label: "SQL Servers",
        endpoint: "/api/sqlservers",
        columns: &[NAME, SUB_ID, LOCATION, VERSION, STATUS, OWNER],
        row_key: DATABASE_KEY,
    },
    ResourceType {
        category: ResourceCategory::MysqlFlexible,
        label: "MySQL Flexible Servers",
        endpoint: "/api/mysqlflexible",
        columns: &[NAME, SUB_ID, LOCATION, VERSION, STATUS, OWNER],
        row_key: DATABASE_KEY,
    },
    ResourceType {
        category: ResourceCategory::Database,
        label: "Databases (legacy)",
        endpoint: "/api/databases",
        columns: &[
            NAME,
            column("Type", &["db_type", "type"], UNKNOWN),
            SERVER,
            LOCATION,
            STATUS,
            OWNER,
        ],
        row_key: DATABASE_KEY,
    },
];

/// Look up the registry entry for a category. Total: every category has an
/// entry, and a missing one would resolve to the `vm` default.
pub fn resolve(category: ResourceCategory) -> &'static ResourceType {
    REGISTRY
        .iter()
        .find(|entry| entry.category == category)
        .unwrap_or(&REGISTRY[0])
}

pub fn resolve_tag(tag: &str) -> &'static ResourceType {
    resolve(ResourceCategory::parse(tag))
}

/// Entries offered in the category menu, in display order.
pub fn selectable() -> impl Iterator<Item = &'static ResourceType> {
    REGISTRY.iter().filter(|entry| !entry.category.is_legacy())
}
