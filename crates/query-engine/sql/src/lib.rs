//! Filter trees and their translation to parameterized PostgreSQL.

pub mod sql;
