//! # TutorBook Core
//!
//! Domain model and scheduling engine for a private tutor's book of students.
//!
//! - **Models**: money, time ranges, dates, lessons, persons
//! - **Clash**: whether two lessons' occurrences ever coincide
//! - **Fees**: accruing outstanding fees for lessons held since the last launch
//! - **Roster**: the person list, enforcing clash-free lessons and answering schedule queries
//!
//! Everything here is pure and synchronous. Storage and wall-clock time are
//! supplied by the caller.

pub mod clash;
pub mod errors;
pub mod fees;
pub mod models;
pub mod roster;
