//! Domain types for the fares feed.
//!
//! This module contains the small value types that the rest of the crate
//! is built from. All types enforce their invariants at construction time,
//! so code that receives them can trust their validity.

mod date;
mod nlc;
mod ticket;

pub use date::{FareDate, InvalidDate, ValidityWindow};
pub use nlc::{InvalidNlc, Nlc};
pub use ticket::{InvalidTicketCode, TicketCode};
