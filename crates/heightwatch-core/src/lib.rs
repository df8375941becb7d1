//! HeightWatch Core - Classroom Session Engine
//!
//! Stateful side of the work-at-height training simulator. A facilitator
//! opens a room, trainees join with a `SIM-NNNN` code, and once the room is
//! started the movement engine walks trainees between the four site zones,
//! re-running the risk evaluators from `heightwatch-logic` after each move.
//!
//! # Architecture
//!
//! - **Registry**: rooms in creation order, participants keyed by id
//! - **Movement engine**: one timer gate, random moves for running rooms
//! - **Simulation**: owns registry, engine, RNG and the simulation clock
//!
//! # Example
//!
//! ```rust,no_run
//! use heightwatch_core::prelude::*;
//!
//! let mut sim = Simulation::new(EngineConfig::default());
//! let room = sim.create_room(RoomConfig {
//!     facilitator_name: "Ana".into(),
//!     facilitator_contact: "ana@example.org".into(),
//!     organization: "Site Safety Institute".into(),
//!     ..RoomConfig::default()
//! })?;
//! let code = sim.room(room).map(|r| r.code.clone()).unwrap_or_default();
//! sim.join_with_generated_profile(&code, "Trainee 1")?;
//! sim.start_simulation(room)?;
//!
//! loop {
//!     sim.update(1.0);
//! }
//! # Ok::<(), SessionError>(())
//! ```

pub mod engine;
pub mod error;
pub mod generation;
pub mod registry;
pub mod sensors;
pub mod session;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::EngineConfig;
    pub use crate::error::SessionError;
    pub use crate::registry::{Participant, ParticipantId, Room, RoomId};
    pub use crate::session::{SessionSnapshot, Simulation};
    pub use heightwatch_logic::constants::Zone;
    pub use heightwatch_logic::profile::ParticipantProfile;
    pub use heightwatch_logic::room_config::RoomConfig;
}
