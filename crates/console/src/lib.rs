//! Interactive console for the lost-and-found tracker.
//!
//! [`session::Session`] drives the menus over any async line source and
//! sink; [`startup::run`] wires it to stdin/stdout and the on-disk store.

pub mod errors;
pub mod menu;
pub mod render;
pub mod session;
pub mod startup;

pub use startup::run;
