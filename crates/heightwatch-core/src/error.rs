//! Session-level error type.
//!
//! Every variant is an expected, user-facing condition. None of them leave
//! the session partially mutated.

use heightwatch_logic::profile::ProfileError;
use heightwatch_logic::room_config::RoomConfigError;

use crate::registry::{ParticipantId, RoomId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("invalid room configuration: {}", join_errors(.0))]
    InvalidRoom(Vec<RoomConfigError>),

    #[error("invalid participant profile: {}", join_errors(.0))]
    InvalidProfile(Vec<ProfileError>),

    #[error("no room matches join code {0:?}")]
    NotFound(String),

    #[error("room {0} has ended and no longer accepts participants")]
    RoomClosed(String),

    #[error("room {code} is full ({max} participants)")]
    Capacity { code: String, max: usize },

    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
}

impl SessionError {
    /// True for the validation variants: a form field needs fixing.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRoom(_) | Self::InvalidProfile(_))
    }
}

fn join_errors<E: std::fmt::Display>(errors: &[E]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SessionError>;
