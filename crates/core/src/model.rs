//! Wire records the workflow reads and writes.
//!
//! Only the fields the migration touches are modeled; ids arrive as
//! JSON numbers and are carried without committing to a width.

use serde::{Deserialize, Serialize};

/// A device group as returned by the group-listing endpoints.
///
/// `field` and `value` are the rule criteria of dynamic groups. They
/// are preserved in the record but never used by static migration.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceGroup {
    #[serde(default)]
    pub id: Option<serde_json::Number>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default)]
    pub include_custom_devices: bool,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// A device record. Member listings carry addresses; search results
/// carry the system-local id. Neither id nor addresses are guaranteed
/// present, and device ids are never portable across systems.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub ipaddr4: String,
    #[serde(default)]
    pub ipaddr6: String,
}

/// Creation body for a group on the destination system.
///
/// `dynamic` is always submitted as false: this tool never creates
/// dynamic groups, whatever the source record said.
#[derive(Debug, Serialize)]
pub struct GroupCreate<'a> {
    pub description: &'a str,
    pub dynamic: bool,
    pub include_custom_devices: bool,
    pub name: &'a str,
}

/// Counters accumulated over one driver pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Groups returned by the source listing, dynamic ones included.
    pub groups_listed: usize,
    /// Static groups whose destination counterpart was resolved.
    pub groups_migrated: usize,
    /// Devices successfully assigned across all groups.
    pub devices_assigned: usize,
}
