//! Service-layer helpers

pub mod transfer;
