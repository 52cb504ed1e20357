//! Internal helpers
pub(crate) mod hashing;
pub(crate) mod sets;
