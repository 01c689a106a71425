//! CampSync Storage - Record store abstraction
//!
//! This crate provides the persistent record store for CampSync,
//! supporting PostgreSQL and an in-memory backend.

pub mod db;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use db::DatabasePool;
pub use memory::MemoryRecordStore;
pub use models::*;
pub use postgres::PgRecordStore;
pub use store::{create_record_store, RecordStore};
