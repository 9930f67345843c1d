//! Amora Notification Deduplicator
//!
//! Creates notifications with at-most-one-unseen-duplicate semantics: a new
//! notification is stored only if no unseen notification with an identical
//! message already exists for the recipient. Repeated identical events
//! therefore collapse into a single unseen entry, and start accumulating
//! again once the recipient marks their feed as seen.
//!
//! The typed constructors (`notify_like`, `notify_match`, ...) are the
//! write path the rest of the system uses; each composes its message from
//! the kind's single template, which is what makes dedupe-by-message
//! meaningful.

#![warn(missing_docs)]

mod error;
mod notifier;

pub use error::NotifyError;
pub use notifier::Notifier;
