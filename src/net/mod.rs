//! Networking for the badge widget.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` abstracts the HTTP GET, `unread` builds and interprets the
//! one query the badge needs.

pub mod transport;
pub mod unread;
