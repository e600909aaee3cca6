//! Utility helpers shared across the widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from widget logic
//! to improve reuse and testability.

pub mod dom;
#[cfg(feature = "hydrate")]
pub mod js;
pub mod lookup;
pub mod scalar;
pub mod storage;
#[cfg(test)]
pub(crate) mod test_dom;
