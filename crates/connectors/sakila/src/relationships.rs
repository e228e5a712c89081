//! Resolve the relationships between entities for many parents at once.
//!
//! A relationship requested without a filter is served by keyed loads: one load of the bridge
//! ids for every parent, then one load of the related rows. With a filter, the related rows of
//! each parent are selected through the bridge table by a translated query.
//!
//! Results are keyed by the id of the parent.

use std::collections::HashMap;

use sqlx::postgres::PgRow;
use sqlx::FromRow;

use query_engine_sql::sql::ast::JoinedTable;
use query_engine_sql::sql::string::Param;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::InputFilter;

use crate::error::QueryError;
use crate::loaders;
use crate::model::join_tables::{FILM_ACTOR, FILM_ACTOR_ACTOR_ID, FILM_ACTOR_FILM_ID};
use crate::model::join_tables::{FILM_CATEGORY, FILM_CATEGORY_CATEGORY_ID, FILM_CATEGORY_FILM_ID};
use crate::model::{Actor, ActorFilter, Category, Film, FilmFilter, Language};
use crate::query;
use crate::state::State;

/// The actors of one film.
pub fn actors_of_film(film_id: i32) -> JoinedTable {
    JoinedTable {
        join_table: FILM_ACTOR.to_string(),
        join_table_join_column: FILM_ACTOR_ACTOR_ID.to_string(),
        data_table_join_column: Actor::COLUMN_ACTOR_ID.to_string(),
        join_table_filter_column: FILM_ACTOR_FILM_ID.to_string(),
        join_table_filter_value: Param::Int4(film_id),
    }
}

/// The films of one actor.
pub fn films_of_actor(actor_id: i32) -> JoinedTable {
    JoinedTable {
        join_table: FILM_ACTOR.to_string(),
        join_table_join_column: FILM_ACTOR_FILM_ID.to_string(),
        data_table_join_column: Film::COLUMN_FILM_ID.to_string(),
        join_table_filter_column: FILM_ACTOR_ACTOR_ID.to_string(),
        join_table_filter_value: Param::Int4(actor_id),
    }
}

/// The films of one category.
pub fn films_of_category(category_id: i32) -> JoinedTable {
    JoinedTable {
        join_table: FILM_CATEGORY.to_string(),
        join_table_join_column: FILM_CATEGORY_FILM_ID.to_string(),
        data_table_join_column: Film::COLUMN_FILM_ID.to_string(),
        join_table_filter_column: FILM_CATEGORY_CATEGORY_ID.to_string(),
        join_table_filter_value: Param::Int4(category_id),
    }
}

pub async fn film_actors<S: AsRef<str>>(
    state: &State,
    films: &[Film],
    fields: &[S],
    filter: Option<&ActorFilter>,
) -> Result<HashMap<i32, Vec<Actor>>, QueryError> {
    let film_ids = unique_ids(films.iter().map(|film| film.film_id));
    if film_ids.is_empty() {
        return Ok(HashMap::new());
    }

    match filter {
        Some(filter) => query_per_parent(state, &film_ids, fields, filter, actors_of_film).await,
        None => {
            let actor_ids = loaders::actor_ids_of_films(&state.pool, &film_ids).await?;
            let actors = loaders::actors(&state.pool, &flatten(&actor_ids)).await?;
            Ok(group_related(&film_ids, &actor_ids, &actors))
        }
    }
}

pub async fn actor_films<S: AsRef<str>>(
    state: &State,
    actors: &[Actor],
    fields: &[S],
    filter: Option<&FilmFilter>,
) -> Result<HashMap<i32, Vec<Film>>, QueryError> {
    let actor_ids = unique_ids(actors.iter().map(|actor| actor.actor_id));
    if actor_ids.is_empty() {
        return Ok(HashMap::new());
    }

    match filter {
        Some(filter) => query_per_parent(state, &actor_ids, fields, filter, films_of_actor).await,
        None => {
            let film_ids = loaders::film_ids_of_actors(&state.pool, &actor_ids).await?;
            let films = loaders::films(&state.pool, &flatten(&film_ids)).await?;
            Ok(group_related(&actor_ids, &film_ids, &films))
        }
    }
}

pub async fn category_films<S: AsRef<str>>(
    state: &State,
    categories: &[Category],
    fields: &[S],
    filter: Option<&FilmFilter>,
) -> Result<HashMap<i32, Vec<Film>>, QueryError> {
    let category_ids = unique_ids(categories.iter().map(|category| category.category_id));
    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    match filter {
        Some(filter) => {
            query_per_parent(state, &category_ids, fields, filter, films_of_category).await
        }
        None => {
            let film_ids = loaders::film_ids_of_categories(&state.pool, &category_ids).await?;
            let films = loaders::films(&state.pool, &flatten(&film_ids)).await?;
            Ok(group_related(&category_ids, &film_ids, &films))
        }
    }
}

pub async fn film_categories(
    state: &State,
    films: &[Film],
) -> Result<HashMap<i32, Vec<Category>>, QueryError> {
    let film_ids = unique_ids(films.iter().map(|film| film.film_id));
    if film_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let category_ids = loaders::category_ids_of_films(&state.pool, &film_ids).await?;
    let categories = loaders::categories(&state.pool, &flatten(&category_ids)).await?;
    Ok(group_related(&film_ids, &category_ids, &categories))
}

/// The language of every film. A dangling key yields an empty language.
pub async fn film_languages(
    state: &State,
    films: &[Film],
) -> Result<HashMap<i32, Language>, QueryError> {
    if films.is_empty() {
        return Ok(HashMap::new());
    }

    let language_ids = unique_ids(films.iter().map(|film| film.language_id));
    let languages = loaders::languages(&state.pool, &language_ids).await?;
    Ok(films
        .iter()
        .map(|film| {
            let language = languages.get(&film.language_id).cloned();
            (film.film_id, language.unwrap_or_default())
        })
        .collect())
}

/// The original language of the films that have one.
pub async fn film_original_languages(
    state: &State,
    films: &[Film],
) -> Result<HashMap<i32, Language>, QueryError> {
    let language_ids = unique_ids(films.iter().filter_map(|film| film.original_language_id));
    if language_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let languages = loaders::languages(&state.pool, &language_ids).await?;
    Ok(films
        .iter()
        .filter_map(|film| {
            let language = languages.get(&film.original_language_id?)?;
            Some((film.film_id, language.clone()))
        })
        .collect())
}

// a joined table names a single parent, so a filtered relationship costs one query per parent
async fn query_per_parent<T, F, S>(
    state: &State,
    parent_ids: &[i32],
    fields: &[S],
    filter: &F,
    joined_table: fn(i32) -> JoinedTable,
) -> Result<HashMap<i32, Vec<T>>, QueryError>
where
    T: TypeInfo + for<'r> FromRow<'r, PgRow>,
    F: InputFilter,
    S: AsRef<str>,
{
    let mut related = HashMap::with_capacity(parent_ids.len());
    for &parent_id in parent_ids {
        let rows =
            query::query::<T, F, S>(state, fields, Some(filter), Some(joined_table(parent_id)))
                .await?;
        related.insert(parent_id, rows);
    }
    Ok(related)
}

fn unique_ids(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

fn flatten(ids_by_parent: &HashMap<i32, Vec<i32>>) -> Vec<i32> {
    unique_ids(ids_by_parent.values().flatten().copied())
}

/// Gather the related rows of every parent, ordered by id.
///
/// Every parent gets an entry, empty when nothing is related to it. Ids without a loaded row
/// are skipped.
fn group_related<T: Clone>(
    parent_ids: &[i32],
    related_ids: &HashMap<i32, Vec<i32>>,
    rows: &HashMap<i32, T>,
) -> HashMap<i32, Vec<T>> {
    parent_ids
        .iter()
        .map(|parent_id| {
            let ids = related_ids.get(parent_id).map(Vec::as_slice).unwrap_or_default();
            let related = unique_ids(ids.iter().copied())
                .iter()
                .filter_map(|id| rows.get(id).cloned())
                .collect();
            (*parent_id, related)
        })
        .collect()
}
