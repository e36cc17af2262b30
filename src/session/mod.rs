/*!
 * Per-user session state.
 *
 * This module provides:
 * - The `SessionStore` abstraction handlers are given at startup
 * - An in-memory implementation living for the process lifetime
 */

pub mod store;

// Re-export main types
pub use store::{InMemorySessionStore, SessionStore, UserSession};
