//! Simple undirected graphs read from graph6 strings.

mod error;
mod graph;
pub mod graph6;
#[cfg(feature = "python")]
mod python;

pub use self::{error::*, graph::*};
