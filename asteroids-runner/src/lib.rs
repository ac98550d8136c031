//! Headless episode harness for the asteroids simulation: a registry of
//! trivial controllers, a single-episode runner, and a parallel benchmark
//! sweep. Planning controllers live with the host, not here.

pub mod benchmark;
pub mod controllers;
pub mod runner;
