//! Atrium Core Library
//!
//! Models, SQLite storage, and the guest-to-zone auto-allocator for the
//! Atrium room-block administration platform.

pub mod allocator;
pub mod error;
pub mod invariants;
pub mod models;
pub mod storage;

pub use allocator::{AllocationOutcome, Allocator, EventLocks};
pub use error::{Error, Result};
pub use models::*;
pub use storage::{
    ActivityRepository, ActivityStore, Database, EventRepository, EventStore, GuestRepository,
    GuestStore, RoomBlockRepository, RoomBlockStore, Storage,
};
