//! Storefront domain events.
//!
//! Events describe what a selection aggregate decided; the UI layer consumes
//! them to re-render price and availability.

pub mod event;

pub use event::Event;
