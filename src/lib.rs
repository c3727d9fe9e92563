//! Single-user freeform pinboard engine.
//!
//! Pins (text, image or list notes) sit on an infinite board that the user
//! pans and zooms. Every committed change is recorded in a bounded undo/redo
//! history, pins can belong to named groups, and the whole board survives
//! reloads through a client-local key/value store. The host UI forwards raw
//! pointer, wheel and keyboard events to the engine and reacts to the
//! returned [`engine::Action`]s; it never mutates board state itself.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] with storage, and testable [`engine::EngineCore`] |
//! | [`doc`] | Pin, group and snapshot types with their wire format |
//! | [`history`] | Bounded past/present/future history stack |
//! | [`groups`] | Group registry with case-insensitive name uniqueness |
//! | [`camera`] | Viewport pan/zoom and coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`persistence`] | Storage backends and best-effort save/restore |
//! | [`config`] | Configuration with environment overrides |
//! | [`error`] | Edit rejection errors |
//! | [`consts`] | Shared constants (zoom limits, history depth, storage keys) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod groups;
pub mod history;
pub mod input;
pub mod persistence;
