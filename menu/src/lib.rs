//! # Menu Core
//!
//! Data lifecycle for a single-restaurant menu.
//!
//! ## Flow
//!
//! Remote menu source → parser → local store → queries.
//!
//! - One GET against the remote JSON document (`model::MENU_ENDPOINT` by
//!   default), decoded all-or-nothing into [`model::Dish`] records.
//! - The decoded set fully replaces the on-disk snapshot held by
//!   [`store::MenuStore`]. The replace commits through a temp-file rename,
//!   so readers only ever see the previous snapshot or the complete new one.
//! - Search and detail lookups run locally against the snapshot. Matching is
//!   a case- and accent-insensitive substring test on the dish title,
//!   results ordered by folded title.
//!
//! Any failure along the way (transport, decode, commit) leaves the store
//! exactly as it was. There is no retry and no partial merge.
//!
//! ## Session
//!
//! [`session::Session`] is the device-preference mirror: registered profile
//! fields plus the logged-in flag, persisted with the same commit scheme as
//! the menu snapshot. It is handed to whoever needs it rather than living in
//! process-global state.

pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod sync;
pub mod utils;
