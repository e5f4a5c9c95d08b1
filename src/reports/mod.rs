//! Report registry and record cleaners
//!
//! Every report the tap can extract is registered here with its endpoint,
//! key properties and cleaner. A cleaner is a pure function from a raw API
//! row to a normalized record; it never fails, and fields that are absent or
//! cannot be coerced come out as JSON `null`.
//!
//! The JSON schema of a report is derived from the same field table its
//! cleaner uses, so emitted records always match the advertised schema.

mod fields;
mod intervention_details;
mod registry;

pub use fields::{clean_with, schema_for, Field, FieldKind};
pub use registry::{all, lookup, Cleaner, Report, INTERVENTION_DETAILS};

#[cfg(test)]
mod tests;
