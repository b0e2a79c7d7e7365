//! Session domain module.
//!
//! The session is the in-memory working set; `SessionManager` applies user
//! actions to it and to the snapshot store.
//!
//! # Module Structure
//!
//! - `model`: `Session` and its `ScriptBinding`
//! - `manager`: `SessionManager` and save outcomes

mod manager;
mod manager_test;
mod model;

pub use manager::{SaveOutcome, SaveRejection, SessionManager};
pub use model::{ScriptBinding, Session};
