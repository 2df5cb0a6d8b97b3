//! Database query functions organized by domain.

pub mod claims;
pub mod events;
pub mod farms;
pub mod instance;
pub mod positions;
