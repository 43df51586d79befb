//! The stage progression state machine and the requirement ledger.
//!
//! Together these own every transition of an application through the ordered
//! approval stages: entering a stage seeds its requirement rows, requirement
//! updates re-derive stage completion, and a completed stage either advances
//! the application or finishes it.

pub mod ledger;
pub mod progression;
pub mod sequence;

#[cfg(test)]
mod tests;
