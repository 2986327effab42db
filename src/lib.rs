//! Tacklor library
//!
//! Fishing conditions engine: the conditions snapshot and its invariants,
//! solar phases, zones, species recommendations, and the weather and
//! strategy collaborators used by the binary.

pub mod cli;
pub mod data;
pub mod expert;
pub mod labels;
pub mod recommend;
pub mod report;
pub mod solar;
pub mod store;
pub mod strategy;
pub mod sync;
pub mod zones;
