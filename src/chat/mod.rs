//! Chat surface: conversation state and the session driving the advisor

pub mod conversation;
pub mod session;

pub use conversation::Conversation;
pub use session::{ChatSession, SubmitOutcome};
