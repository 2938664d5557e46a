//! Shared vocabulary for parlor chat games.
//!
//! Every game crate keys its records by [`ConversationId`] and names its
//! players with [`Participant`], so the store and the turn timer can treat
//! all game kinds uniformly through [`TurnBased`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ids;
mod kind;
mod participant;

pub use ids::{ConversationId, PlayerId};
pub use kind::{GameKind, TurnBased};
pub use participant::Participant;
