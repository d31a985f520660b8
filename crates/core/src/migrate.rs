//! The migration workflow: list, resolve, fetch, assign, drive.
//!
//! Every component is a free function over `&dyn SystemApi`. Progress
//! lines and warnings go to a caller-supplied writer so the pass is
//! fully observable in tests; the binary passes stdout.
//!
//! Failure policy, preserved deliberately: listing, lookup, creation
//! and search calls halt the whole pass on any unexpected outcome,
//! while a rejected assignment only warns and moves on. A re-run picks
//! up skipped devices; a broken structural call means the run itself
//! is bad.

use std::io::Write;

use crate::api::{ApiResponse, SystemApi};
use crate::error::MigrateError;
use crate::model::{Device, DeviceGroup, GroupCreate, MigrationReport};

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_NO_CONTENT: u16 = 204;

/// Fetch device groups from `api`, constrained to non-exhaustive
/// (`all=false`) results and filtered by name substring (`filter` may
/// be empty). Dynamic groups are included; the driver filters them.
pub fn list_source_groups(
    api: &dyn SystemApi,
    filter: &str,
) -> Result<Vec<DeviceGroup>, MigrateError> {
    let operation = "listing device groups";
    let path = format!("devicegroups?all=false&name={}", urlencode(filter));
    let response = api.get(&path)?;
    expect_status(&response, STATUS_OK, api, operation)?;
    response.decode(operation)
}

/// Find the destination-side id of the group named like `group`,
/// creating the group when the lookup comes back empty.
///
/// Returns `Ok(None)` when the lookup returned candidates but none
/// matches the name exactly; callers skip such groups rather than
/// treating this as a failure.
pub fn resolve_group(
    api: &dyn SystemApi,
    group: &DeviceGroup,
) -> Result<Option<String>, MigrateError> {
    let operation = format!("looking up device group '{}'", group.name);
    let path = format!("devicegroups?all=false&name={}", urlencode(&group.name));
    let response = api.get(&path)?;
    expect_status(&response, STATUS_OK, api, &operation)?;
    let candidates: Vec<DeviceGroup> = response.decode(&operation)?;

    if candidates.is_empty() {
        return create_group(api, group).map(Some);
    }

    Ok(candidates
        .into_iter()
        .find(|candidate| candidate.name == group.name)
        .and_then(|candidate| candidate.id)
        .map(|id| id.to_string()))
}

/// Create the group on `api` and return the new id, parsed from the
/// last path segment of the `location` response header.
fn create_group(api: &dyn SystemApi, group: &DeviceGroup) -> Result<String, MigrateError> {
    let operation = format!("creating device group '{}'", group.name);
    let body = serde_json::to_value(GroupCreate {
        description: &group.description,
        dynamic: false,
        include_custom_devices: group.include_custom_devices,
        name: &group.name,
    })
    .map_err(|e| MigrateError::Decode {
        operation: operation.clone(),
        message: e.to_string(),
    })?;

    let response = api.post("devicegroups", &body)?;
    expect_status(&response, STATUS_CREATED, api, &operation)?;

    response
        .location
        .as_deref()
        .and_then(|location| location.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .ok_or_else(|| MigrateError::Decode {
            operation,
            message: "creation response carried no usable location header".to_string(),
        })
}

/// IPv4 addresses of the group's member devices, in API order.
///
/// Devices without an IPv4 address contribute an empty string; the
/// driver treats those as unresolvable, not as errors here.
pub fn member_addresses(
    api: &dyn SystemApi,
    group_id: &str,
) -> Result<Vec<String>, MigrateError> {
    let operation = format!("listing members of device group {group_id}");
    let response = api.get(&format!("devicegroups/{group_id}/devices"))?;
    expect_status(&response, STATUS_OK, api, &operation)?;
    let devices: Vec<Device> = response.decode(&operation)?;
    Ok(devices.into_iter().map(|device| device.ipaddr4).collect())
}

/// Resolve an IP address to a device id on `api`.
///
/// Zero matches yield `Ok(None)`. With several matches the first one
/// in the order the API returned wins, after exactly one warning on
/// `out` — no local ordering is imposed.
pub fn find_device_id(
    api: &dyn SystemApi,
    ip: &str,
    out: &mut dyn Write,
) -> Result<Option<u64>, MigrateError> {
    let operation = format!("searching for device {ip}");
    let path = format!("devices?search_type=ip%20address&value={}", urlencode(ip));
    let response = api.get(&path)?;
    expect_status(&response, STATUS_OK, api, &operation)?;
    let matches: Vec<Device> = response.decode(&operation)?;

    if matches.len() > 1 {
        let _ = writeln!(out, "More than one device with IP {ip}; using the first match.");
    }

    match matches.first() {
        None => Ok(None),
        Some(device) => device.id.map(Some).ok_or_else(|| MigrateError::Decode {
            operation,
            message: "device search result carried no id".to_string(),
        }),
    }
}

/// Attach `device_id` to the destination group.
///
/// Anything other than 204 is warned about on `out` and reported as
/// `Ok(false)` — a single rejected assignment must not abort the rest
/// of the migration. Transport failures still propagate as errors.
pub fn assign_device(
    api: &dyn SystemApi,
    group_id: &str,
    device_id: u64,
    ip: &str,
    out: &mut dyn Write,
) -> Result<bool, MigrateError> {
    let body = serde_json::json!({ "assign": [device_id] });
    let response = api.post(&format!("devicegroups/{group_id}/devices"), &body)?;

    if response.status != STATUS_NO_CONTENT {
        let _ = writeln!(
            out,
            "Could not assign device {ip} to device group {group_id}: status {}",
            response.status
        );
        return Ok(false);
    }

    Ok(true)
}

/// Drive one full migration pass from `src` to `dst`.
///
/// Dynamic groups are skipped outright — no lookup, no member fetch,
/// no assignment. There is no rollback: a fatal error partway through
/// leaves the destination with whatever the completed calls produced.
pub fn run_migration(
    src: &dyn SystemApi,
    dst: &dyn SystemApi,
    filter: &str,
    out: &mut dyn Write,
) -> Result<MigrationReport, MigrateError> {
    let groups = list_source_groups(src, filter)?;

    let _ = writeln!(out, "Device groups queried from {}.", src.label());
    let _ = writeln!(out, "Total groups (including dynamic): {}", groups.len());
    let _ = writeln!(out, "Migrating static groups and their member devices");

    let mut report = MigrationReport {
        groups_listed: groups.len(),
        ..MigrationReport::default()
    };

    for group in &groups {
        if group.dynamic {
            continue;
        }

        let _ = writeln!(out, "{} -- {}", group.name, group.description);

        let Some(dst_group_id) = resolve_group(dst, group)? else {
            let _ = writeln!(
                out,
                "Could not resolve device group {} on {}; skipping.",
                group.name,
                dst.label()
            );
            continue;
        };

        let src_group_id = group
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| MigrateError::Decode {
                operation: "listing device groups".to_string(),
                message: format!("group '{}' carried no id", group.name),
            })?;

        report.groups_migrated += 1;

        let mut assigned = 0usize;
        for ip in member_addresses(src, &src_group_id)? {
            let device_id = if ip.is_empty() {
                None
            } else {
                find_device_id(dst, &ip, out)?
            };

            match device_id {
                None => {
                    let _ = writeln!(out, "Device {ip} not found for device group {dst_group_id}");
                }
                Some(device_id) => {
                    if assign_device(dst, &dst_group_id, device_id, &ip, out)? {
                        assigned += 1;
                    }
                }
            }
        }

        report.devices_assigned += assigned;
        let _ = writeln!(out, "{assigned} devices migrated");
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{} device groups migrated", report.groups_migrated);
    Ok(report)
}

fn expect_status(
    response: &ApiResponse,
    expected: u16,
    api: &dyn SystemApi,
    operation: &str,
) -> Result<(), MigrateError> {
    if response.status == expected {
        Ok(())
    } else {
        Err(MigrateError::UnexpectedStatus {
            system: api.label().to_string(),
            operation: operation.to_string(),
            expected,
            actual: response.status,
        })
    }
}

/// Percent-encode a query parameter value (space becomes `%20`).
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for &byte in s.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
