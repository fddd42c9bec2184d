//! Agents and the collaboration loop — the heart of Boardroom.
//!
//! Two agents take turns on a shared problem:
//!
//! 1. **Receive** a message (the caller's prompt, or the other agent's reply)
//! 2. **Ground** it with matching documents from the agent's knowledge store
//! 3. **Compose** the prompt (role + incoming message + knowledge + instructions)
//! 4. **Complete** via the configured provider and trim the answer
//! 5. **Check** the answer against the termination policy
//!
//! The loop continues until an answer is conclusive or the iteration cap is
//! reached. Provider failures and cancellation end the run early with the
//! transcript accumulated so far.

pub mod agent;
pub mod collaboration;
pub mod persona;
pub mod prompt;
pub mod termination;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use agent::{Agent, ModelSettings};
pub use collaboration::{
    CollaborationLoop, CollaborationResult, CollaborationState, DEFAULT_MAX_ITERATIONS, Outcome,
    Turn,
};
pub use termination::{CONCLUSION_PHRASES, KeywordDetector, TerminationPolicy};
