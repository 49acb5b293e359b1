//! Workbook core: persistence bridge, state machine and view derivations.

pub mod error;
pub mod hash;
pub mod kv;
pub mod session;
pub mod state;
pub mod store;
pub mod time;
pub mod types;
pub mod view;
