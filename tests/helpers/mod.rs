//! Test helpers module
//!
//! Store doubles, seeded users and a PostgreSQL test database.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_data;

pub use database_helper::*;
pub use test_data::*;
