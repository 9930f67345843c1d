//! Amora Relationship Engine
//!
//! Owns the state machine over like/match/block edges and the compensating
//! unlike transition, derives matches from reciprocal likes, adjusts fame
//! ratings, and computes the potential-match candidate pool.
//!
//! # Examples
//!
//! ```no_run
//! use amora_engine::{LikeOutcome, RelationshipEngine};
//! use amora_domain::UserId;
//! # async fn demo(engine: RelationshipEngine) -> Result<(), amora_engine::EngineError> {
//! match engine.like(UserId(1), UserId(2)).await? {
//!     LikeOutcome::Matched(edge) => println!("matched: {:?}", edge),
//!     LikeOutcome::Liked(edge) => println!("liked: {:?}", edge),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod filter;
mod locks;

pub use config::FilterConfig;
pub use engine::{
    LikeOutcome, RelationshipEngine, REPUTATION_BLOCK, REPUTATION_LIKE, REPUTATION_REPORT,
    REPUTATION_UNLIKE,
};
pub use error::EngineError;
pub use filter::{CandidateFilter, PotentialMatch};
