//! Process-level helpers shared by the console crate and the binary.

pub mod utils;
