//! Wire protocol shared between the invitation service and its dashboard.

pub mod protocol;

pub use protocol::*;
