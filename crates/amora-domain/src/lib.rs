//! Amora Domain Layer
//!
//! Core types and trait interfaces for the Interaction & Notification
//! Engine. This crate holds the pure domain model (user identifiers,
//! relationship edges, notification kinds, geo primitives) plus the trait
//! seams every external collaborator is consumed through.
//!
//! ## Key Concepts
//!
//! - **Interaction**: a directed like/match/block edge between two users
//! - **Match**: the symmetric relationship formed by reciprocal likes
//! - **Notification**: a fact delivered to one user about another, with
//!   unseen-message deduplication
//! - **Fame rating**: a reputation score adjusted by social actions
//!
//! ## Architecture
//!
//! Infrastructure implementations (stores, transports) live in other
//! crates; this one defines the contracts they satisfy.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geo;
pub mod interaction;
pub mod message;
pub mod notification;
pub mod profile;
pub mod traits;
pub mod user;

// Re-exports for convenience
pub use error::{StoreError, TransportError};
pub use geo::GeoPoint;
pub use interaction::{Interaction, InteractionKind};
pub use message::{ChatMessage, PresenceStatus};
pub use notification::{Notification, NotificationId, NotificationKind};
pub use profile::{CandidateQuery, Gender, LookingFor, Profile};
pub use user::{pair_key, UserId};
