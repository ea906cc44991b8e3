//! Adapters implementing the domain's speaker port.

pub mod speakers;
