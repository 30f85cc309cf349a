//! Callout Core Types and Definitions
//!
//! This crate provides the foundational types shared by every stage of the
//! callout table compiler. It includes:
//!
//! - **Geometry**: The normalized coordinate frame of a shape ([`geometry::ShapeFrame`])
//! - **Identifiers**: Table keys derived from document names ([`identifier::CalloutId`])
//! - **Entries**: The unit of output ([`entry::CalloutEntry`])
//! - **Tables**: The ordered, default-carrying result ([`table::CalloutTable`])

pub mod entry;
pub mod geometry;
pub mod identifier;
pub mod table;
