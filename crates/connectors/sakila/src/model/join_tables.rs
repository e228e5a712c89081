//! Bridge tables of the many-to-many relationships.

pub const FILM_ACTOR: &str = "film_actor";
pub const FILM_ACTOR_FILM_ID: &str = "film_id";
pub const FILM_ACTOR_ACTOR_ID: &str = "actor_id";

pub const FILM_CATEGORY: &str = "film_category";
pub const FILM_CATEGORY_FILM_ID: &str = "film_id";
pub const FILM_CATEGORY_CATEGORY_ID: &str = "category_id";
