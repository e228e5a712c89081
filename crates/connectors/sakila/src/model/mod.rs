//! The entities of the Sakila database and the filters clients send for them.

pub mod actor;
pub mod category;
pub mod film;
pub mod join_tables;
pub mod language;

pub use actor::{Actor, ActorFilter};
pub use category::{Category, CategoryFilter};
pub use film::{Film, FilmFilter};
pub use language::{Language, LanguageFilter};
