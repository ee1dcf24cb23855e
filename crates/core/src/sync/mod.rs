//! Synchronization of analysis records onto a scheduling service

pub mod engine;
pub mod ports;
pub mod resolver;
pub mod schedule;

pub use engine::SyncEngine;
pub use resolver::ScheduleResourceResolver;
