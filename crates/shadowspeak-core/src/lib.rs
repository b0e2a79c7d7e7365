//! ShadowSpeak core: sentence segmentation, reversible merge/split editing
//! and the bounded snapshot store for practice sessions.
//!
//! ```
//! use shadowspeak_core::script::InMemoryScriptRepository;
//! use shadowspeak_core::session::SessionManager;
//!
//! let mut manager = SessionManager::with_repository(InMemoryScriptRepository::new());
//! manager.start("First sentence. Second sentence.");
//! assert!(manager.merge(0));
//! assert_eq!(manager.sentences(), vec!["First sentence. Second sentence."]);
//! assert!(manager.split(0));
//! assert_eq!(manager.sentences().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod practice;
pub mod script;
pub mod sentence;
pub mod session;

// Re-export common error type
pub use error::{Result, ShadowError};
