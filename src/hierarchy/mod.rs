//! Class hierarchies and the hierarchy-aware map
//!
//! Rust has no runtime class objects, so a model hierarchy is described with
//! [`ClassRef`] descriptors: a type identity plus its direct bases. Types opt
//! in through [`Class`] (usually `#[derive(Class)]`), and every `Class` value
//! is an [`Instance`] whose class can be read back at runtime.
//!
//! - `class.rs` - descriptors, the is-a relation and the query union
//! - `map.rs` - `HierarchyMap`, an ordered map with is-a containment

mod class;
mod map;

pub use class::{Class, ClassQuery, ClassRef, Instance};
pub use map::HierarchyMap;
