//! Zero-dimensional control volumes of the squish model
pub mod chamber;
pub mod squish;
