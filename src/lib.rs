//! # site-widgets
//!
//! WASM widgets for the site shell: an unread-message badge on the
//! "Site message" navigation item and a day/night theme switcher.
//!
//! Widget logic is platform-free and tested natively; browser glue
//! (`web-sys`, `gloo-net`, `wasm-bindgen`) compiles only with the `hydrate`
//! feature and plugs in at small traits.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`badge`] | Cached paint, identity resolution, live refresh of the unread dot |
//! | [`theme`] | Theme preference, apply, selector sync |
//! | [`net`] | Transport trait and the unread query |
//! | [`config`] | Backend config injected into the badge |
//! | [`util`] | Storage, ordered element lookup, `web-sys` helpers |
//! | [`error`] | Failure causes per boundary |
//! | [`consts`] | Storage keys, selectors, CSS |

pub mod badge;
pub mod config;
pub mod consts;
pub mod error;
pub mod net;
#[cfg(feature = "hydrate")]
pub mod start;
pub mod theme;
pub mod util;
