//! Font Loader - Width based web font load detection
//!
//! This crate detects when a web font has taken effect by rendering test
//! text in hidden probes and comparing the widths against generic family
//! baselines. Rendering is delegated to a host through the traits in
//! `host`, so the engine runs against a browser binding or an in-memory
//! test double alike.
//!
//! # Modules
//!
//! - `host`: Measurement and style sheet host traits, RAII probe rulers
//! - `fallback`: Generic family baselines and width classification
//! - `capabilities`: Engine quirks derived from the user agent
//! - `config`: Timeout, poll interval and default test text
//! - `watcher`: Detection sessions and their state machine
//! - `loader`: Loading all families of a `font` value, with events
//! - `font_face`: `@font-face` descriptors and rule rendering

mod capabilities;
mod config;
mod error;
pub mod fallback;
pub mod font_face;
pub mod host;
pub mod loader;
pub mod watcher;

pub use capabilities::*;
pub use config::*;
pub use error::*;

pub use fallback::{FallbackWidths, GenericFamily, WidthClass};
pub use font_face::FontFaceDescriptors;
pub use host::{MeasurementHost, ProbeStyle, Ruler, StyleSheetHost};
pub use loader::{FontLoader, LoadEvent, LoadReport};
pub use watcher::{CancelToken, FontWatcher, Session, SessionState};
