//! Breadboard Core Types and Definitions
//!
//! This crate provides the foundational types for Breadboard schematic
//! diagrams. It includes:
//!
//! - **Geometry**: Points, sizes, bounds, grid snapping and quarter-turn rotation ([`geometry`] module)
//! - **Identifiers**: Component/connection ids and interned labels ([`identifier`] module)
//! - **Pins**: Pin layout policies that generate a component's pins ([`pin`] module)
//! - **Kinds**: Component kinds with their default sizes and presets ([`kind`] module)

pub mod geometry;
pub mod identifier;
pub mod kind;
pub mod pin;
