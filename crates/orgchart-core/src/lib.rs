//! Orgchart Core Types
//!
//! This crate provides the value types shared by every stage of the
//! organizational chart pipeline. It includes:
//!
//! - **Identifiers**: Reference-counted person identifiers ([`identifier::Id`])
//! - **Geometry**: Layout coordinates and extents ([`geometry`] module)
//! - **Rows**: Raw spreadsheet-style input rows ([`row`] module)
//! - **People**: Validated person records ([`person`] module)

pub mod geometry;
pub mod identifier;
pub mod person;
pub mod row;
