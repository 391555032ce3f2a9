#![forbid(unsafe_code)]

//! Property-to-style compiler.
//!
//! Widgets carry untyped-looking property bags (`"#4B39EF"`,
//! `"only(left: 8)"`, `"semiBold"`); renderers want concrete pixels,
//! channels, and enums. This crate is the single place that translation
//! happens: [`compile`] turns one widget's property list into a
//! [`StyleDescriptor`] without touching the tree or any shared state.
//!
//! Invariants
//!
//! - Compilation is pure: same properties in, same descriptor out.
//! - Compilation is total: malformed values degrade to absent fields,
//!   never to errors or panics.
//! - Unknown property names are ignored.

pub mod color;
pub mod compile;
pub mod insets;

pub use color::Rgba;
pub use compile::{
    AlignPoint, CrossAxisAlign, FlexStyle, MainAxisAlign, MainAxisSize, Shadow, ShadowLayer,
    StyleDescriptor, alignment_pair, compile, font_weight, shadow_for_elevation,
};
pub use insets::Insets;
