//! Compatibility diff computation engine.
//!
//! The core entry point is [`compute_diff`], which compares two
//! [`SchemaSnapshot`]s and produces a [`Report`] of breaking changes.
//!
//! Every level follows the same shape: index `current` by the level's
//! identity key, walk `previous` in declaration order, report a removal on a
//! miss (without descending), and run the level's structural checks on a hit.

use std::collections::{BTreeMap, BTreeSet};

use crate::diff::model::{Problem, Report};
use crate::errors::IncompatibleSchema;
use crate::model::{
    EnumDefinition, FieldDefinition, FileDefinition, MessageDefinition, MethodDefinition,
    SchemaSnapshot, ServiceDefinition,
};

/// Index a slice by a borrowed key.
///
/// Keys are unique within a well-formed snapshot; if they are not, the first
/// occurrence wins.
fn index_by<'a, T, K, F>(items: &'a [T], key: F) -> BTreeMap<K, &'a T>
where
    K: Ord,
    F: Fn(&'a T) -> K,
{
    let mut index = BTreeMap::new();
    for item in items {
        index.entry(key(item)).or_insert(item);
    }
    index
}

/// Compute the breaking changes between two schema snapshots.
///
/// Pure and deterministic: neither input is mutated and identical inputs
/// always produce an identical, identically ordered report. Additions never
/// produce a problem.
///
/// Traversal order is files, then per file the package check followed by
/// enums, services and messages, each in the order they appear in `previous`.
pub fn compute_diff(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Report {
    let mut report = Report::new();
    let files = index_by(&current.files, |f| f.name.as_str());

    for file in &previous.files {
        match files.get(file.name.as_str()) {
            Some(next) => diff_file(file, next, &mut report),
            None => report.push(Problem::RemovedFile {
                file: file.name.clone(),
            }),
        }
    }

    report
}

/// Compute the diff and turn a non-empty report into an error.
///
/// # Errors
///
/// - [`IncompatibleSchema`] - at least one breaking change was found; the
///   error owns the full report
pub fn check_compatibility(
    previous: &SchemaSnapshot,
    current: &SchemaSnapshot,
) -> Result<Report, IncompatibleSchema> {
    let report = compute_diff(previous, current);
    if report.is_empty() {
        Ok(report)
    } else {
        Err(IncompatibleSchema { report })
    }
}

fn diff_file(previous: &FileDefinition, current: &FileDefinition, report: &mut Report) {
    if previous.package != current.package {
        report.push(Problem::ChangedPackage {
            old: previous.package.clone(),
            new: current.package.clone(),
        });
    }

    let enums = index_by(&current.enums, |e| e.name.as_str());
    for definition in &previous.enums {
        match enums.get(definition.name.as_str()) {
            Some(next) => diff_enum(definition, next, report),
            None => report.push(Problem::RemovedEnum {
                name: definition.name.clone(),
            }),
        }
    }

    let services = index_by(&current.services, |s| s.name.as_str());
    for service in &previous.services {
        match services.get(service.name.as_str()) {
            Some(next) => diff_service(service, next, report),
            None => report.push(Problem::RemovedService {
                name: service.name.clone(),
            }),
        }
    }

    let messages = index_by(&current.messages, |m| m.name.as_str());
    for message in &previous.messages {
        match messages.get(message.name.as_str()) {
            Some(next) => diff_message(message, next, report),
            None => report.push(Problem::RemovedMessage {
                message: message.name.clone(),
            }),
        }
    }
}

/// Enum values are matched on two axes.
///
/// A name that survives under a different number is reported as
/// `ChangeEnumValue` and takes precedence over the number check for that
/// value. Otherwise a value is removed only when neither its name nor its
/// number survives; a rename under a surviving number is compatible.
fn diff_enum(previous: &EnumDefinition, current: &EnumDefinition, report: &mut Report) {
    let by_name = index_by(&current.values, |v| v.name.as_str());
    let numbers: BTreeSet<i32> = current.values.iter().map(|v| v.number).collect();

    for value in &previous.values {
        match by_name.get(value.name.as_str()) {
            Some(next) if next.number != value.number => {
                report.push(Problem::ChangeEnumValue {
                    name: value.name.clone(),
                    old: value.number,
                    new: next.number,
                });
            }
            Some(_) => {}
            None if !numbers.contains(&value.number) => {
                report.push(Problem::RemovedEnumValue {
                    name: value.name.clone(),
                });
            }
            None => {}
        }
    }
}

fn diff_service(previous: &ServiceDefinition, current: &ServiceDefinition, report: &mut Report) {
    let methods = index_by(&current.methods, |m| m.name.as_str());
    for method in &previous.methods {
        match methods.get(method.name.as_str()) {
            Some(next) => diff_method(method, next, report),
            None => report.push(Problem::RemovedServiceMethod {
                name: method.name.clone(),
            }),
        }
    }
}

fn diff_method(previous: &MethodDefinition, current: &MethodDefinition, report: &mut Report) {
    if previous.input_type != current.input_type {
        report.push(Problem::ChangedService {
            method: previous.name.clone(),
            old: previous.input_type.clone(),
            new: current.input_type.clone(),
        });
    }
    if previous.output_type != current.output_type {
        report.push(Problem::ChangedService {
            method: previous.name.clone(),
            old: previous.output_type.clone(),
            new: current.output_type.clone(),
        });
    }
    if previous.client_streaming != current.client_streaming
        || previous.server_streaming != current.server_streaming
    {
        report.push(Problem::ChangedServiceStreaming {
            method: previous.name.clone(),
        });
    }
}

fn diff_message(previous: &MessageDefinition, current: &MessageDefinition, report: &mut Report) {
    let fields = index_by(&current.fields, |f| f.number);
    for field in &previous.fields {
        match fields.get(&field.number) {
            Some(next) => diff_field(field, next, report),
            None => report.push(Problem::RemovedField {
                field: field.name.clone(),
            }),
        }
    }
}

fn diff_field(previous: &FieldDefinition, current: &FieldDefinition, report: &mut Report) {
    if previous.field_type != current.field_type {
        report.push(Problem::ChangedFieldType {
            field: previous.name.clone(),
            old: previous.field_type,
            new: current.field_type,
        });
    }
    if previous.label != current.label {
        report.push(Problem::ChangedFieldLabel {
            field: previous.name.clone(),
            old: previous.label,
            new: current.label,
        });
    }
}
