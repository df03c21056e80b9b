//! chat_session - The chat session engine
//!
//! Turns a user utterance into an incrementally revealed assistant reply:
//! - `log` - the append-only conversation log with the stale-write guard
//! - `phase` - the Idle / Sending / Revealing session state machine
//! - `router` - remote model vs deterministic local fallback
//! - `typewriter` - paced character-by-character reveal of a finished reply
//! - `events` - structured updates a UI consumes to mirror the session
//! - `session` - the `ChatSession` orchestrator tying it all together

pub mod events;
pub mod log;
pub mod phase;
pub mod router;
pub mod session;
pub mod typewriter;

pub use events::{MessageUpdate, SessionUpdate};
pub use log::ConversationLog;
pub use phase::SessionPhase;
pub use router::{route, ReplySource};
pub use session::{ChatSession, SendOutcome};
pub use typewriter::{Typewriter, DEFAULT_STEP};
