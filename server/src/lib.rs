//! Family Health Journal server.
//!
//! Parents log a short daily health check-in (mood, energy, inflammation,
//! digestion, notes) for themselves and their children, plus what was eaten
//! and taken that day.

pub mod backend;
