//! # bl-core — Label core for big-label
//!
//! Renders a short label as large block letters on a character-cell
//! surface and gives every live label its own background color.
//!
//! - **[`glyph`]** — the 5×7 bitmap catalog, case-insensitive, `?` for the rest
//! - **[`palette`]** — the twelve candidate background colors
//! - **[`assign`]** — tiered color selection and the seeded picker
//! - **[`compose`]** — block-glyph and plain-text fallback rendering
//! - **[`instance`]** — a live label bound to one surface, label resolution
//! - **[`subsystem`]** — the registry, color memory, and lifecycle callbacks
//! - **[`options`]** — fallback label and foreground color
//!
//! Everything here is single-threaded and infallible. Terminal I/O lives in
//! `bl-term`; the `big-label` binary wires the two together.

pub mod assign;
pub mod compose;
pub mod glyph;
pub mod instance;
pub mod options;
pub mod palette;
pub mod subsystem;

pub use instance::{LabelContext, LabelInstance, SurfaceId};
pub use options::LabelOptions;
pub use subsystem::{LabelSubsystem, Transition};
