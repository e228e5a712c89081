//! Keyed loads used to resolve relationships without a filter.

use std::collections::HashMap;

use query_engine_execution::error::Error;
use query_engine_execution::loader::{load_many_by_key, load_one_by_key, Value};

use crate::model::{Actor, Category, Film, Language};

const FILMS_BY_ID: &str = "SELECT film_id, title, description, length, language_id, original_language_id FROM film WHERE film_id = ANY($1)";
const ACTORS_BY_ID: &str =
    "SELECT actor_id, first_name, last_name FROM actor WHERE actor_id = ANY($1)";
const CATEGORIES_BY_ID: &str =
    "SELECT category_id, name FROM category WHERE category_id = ANY($1)";
const LANGUAGES_BY_ID: &str =
    "SELECT language_id, name FROM language WHERE language_id = ANY($1)";

const ACTOR_IDS_BY_FILM_ID: &str = "SELECT film_id AS __loader_key, actor_id AS __value FROM film_actor WHERE film_id = ANY($1)";
const FILM_IDS_BY_ACTOR_ID: &str = "SELECT actor_id AS __loader_key, film_id AS __value FROM film_actor WHERE actor_id = ANY($1)";
const CATEGORY_IDS_BY_FILM_ID: &str = "SELECT film_id AS __loader_key, category_id AS __value FROM film_category WHERE film_id = ANY($1)";
const FILM_IDS_BY_CATEGORY_ID: &str = "SELECT category_id AS __loader_key, film_id AS __value FROM film_category WHERE category_id = ANY($1)";

pub async fn films(pool: &sqlx::PgPool, ids: &[i32]) -> Result<HashMap<i32, Film>, Error> {
    load_one_by_key(pool, FILMS_BY_ID, ids).await
}

pub async fn actors(pool: &sqlx::PgPool, ids: &[i32]) -> Result<HashMap<i32, Actor>, Error> {
    load_one_by_key(pool, ACTORS_BY_ID, ids).await
}

pub async fn categories(
    pool: &sqlx::PgPool,
    ids: &[i32],
) -> Result<HashMap<i32, Category>, Error> {
    load_one_by_key(pool, CATEGORIES_BY_ID, ids).await
}

pub async fn languages(
    pool: &sqlx::PgPool,
    ids: &[i32],
) -> Result<HashMap<i32, Language>, Error> {
    load_one_by_key(pool, LANGUAGES_BY_ID, ids).await
}

/// The ids of the actors of each film.
pub async fn actor_ids_of_films(
    pool: &sqlx::PgPool,
    film_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, Error> {
    ids_by_key(pool, ACTOR_IDS_BY_FILM_ID, film_ids).await
}

/// The ids of the films of each actor.
pub async fn film_ids_of_actors(
    pool: &sqlx::PgPool,
    actor_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, Error> {
    ids_by_key(pool, FILM_IDS_BY_ACTOR_ID, actor_ids).await
}

/// The ids of the categories of each film.
pub async fn category_ids_of_films(
    pool: &sqlx::PgPool,
    film_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, Error> {
    ids_by_key(pool, CATEGORY_IDS_BY_FILM_ID, film_ids).await
}

pub async fn film_ids_of_categories(
    pool: &sqlx::PgPool,
    category_ids: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, Error> {
    ids_by_key(pool, FILM_IDS_BY_CATEGORY_ID, category_ids).await
}

async fn ids_by_key(
    pool: &sqlx::PgPool,
    query: &str,
    keys: &[i32],
) -> Result<HashMap<i32, Vec<i32>>, Error> {
    let loaded = load_many_by_key::<Value<i32>, i32>(pool, query, keys).await?;

    Ok(loaded
        .into_iter()
        .map(|(key, values)| (key, values.into_iter().map(|Value(id)| id).collect()))
        .collect())
}
