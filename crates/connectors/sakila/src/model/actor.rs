use serde::{Deserialize, Serialize};

use query_engine_execution::loader::WithId;
use query_engine_sql::sql::ast::FilterGroup;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::{
    collect_fields, eq, is_in, is_not_in, join_table, neq, InputFilter,
};

use super::join_tables::{FILM_ACTOR, FILM_ACTOR_ACTOR_ID, FILM_ACTOR_FILM_ID};
use super::{Film, FilmFilter};

/// A row of `actor`. Columns that were not selected keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[sqlx(default)]
    pub actor_id: i32,
    #[sqlx(default)]
    pub first_name: String,
    #[sqlx(default)]
    pub last_name: String,
}

impl Actor {
    pub const TABLE: &'static str = "actor";

    pub const COLUMN_ACTOR_ID: &'static str = "actor_id";
    pub const COLUMN_FIRST_NAME: &'static str = "first_name";
    pub const COLUMN_LAST_NAME: &'static str = "last_name";
}

impl TypeInfo for Actor {
    const COLLECTION_NAME: &'static str = Actor::TABLE;

    fn column_for_field(field: &str) -> Option<&'static str> {
        match field {
            "actorId" => Some(Self::COLUMN_ACTOR_ID),
            "firstName" => Some(Self::COLUMN_FIRST_NAME),
            "lastName" => Some(Self::COLUMN_LAST_NAME),
            "films" => Some(Self::COLUMN_ACTOR_ID),
            _ => None,
        }
    }
}

impl WithId<i32> for Actor {
    fn id(&self) -> &i32 {
        &self.actor_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ActorFilter {
    pub and: Option<Vec<ActorFilter>>,
    pub or: Option<Vec<ActorFilter>>,

    pub film: Option<Box<FilmFilter>>,

    pub first_name_eq: Option<String>,
    pub first_name_in: Option<Vec<String>>,
    pub first_name_not_eq: Option<String>,
    pub first_name_not_in: Option<Vec<String>>,

    pub last_name_eq: Option<String>,
    pub last_name_in: Option<Vec<String>>,
    pub last_name_not_eq: Option<String>,
    pub last_name_not_in: Option<Vec<String>>,
}

impl InputFilter for ActorFilter {
    const TABLE_NAME: &'static str = Actor::TABLE;

    fn and_filters(&self) -> &[Self] {
        self.and.as_deref().unwrap_or_default()
    }

    fn or_filters(&self) -> &[Self] {
        self.or.as_deref().unwrap_or_default()
    }

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| {
            eq(g, Actor::COLUMN_FIRST_NAME, self.first_name_eq.as_ref());
            neq(g, Actor::COLUMN_FIRST_NAME, self.first_name_not_eq.as_ref());
            is_in(g, Actor::COLUMN_FIRST_NAME, self.first_name_in.as_ref());
            is_not_in(g, Actor::COLUMN_FIRST_NAME, self.first_name_not_in.as_ref());

            eq(g, Actor::COLUMN_LAST_NAME, self.last_name_eq.as_ref());
            neq(g, Actor::COLUMN_LAST_NAME, self.last_name_not_eq.as_ref());
            is_in(g, Actor::COLUMN_LAST_NAME, self.last_name_in.as_ref());
            is_not_in(g, Actor::COLUMN_LAST_NAME, self.last_name_not_in.as_ref());

            join_table(
                g,
                self.film.as_deref(),
                FILM_ACTOR,
                FILM_ACTOR_ACTOR_ID,
                FILM_ACTOR_FILM_ID,
                Actor::COLUMN_ACTOR_ID,
                Film::COLUMN_FILM_ID,
            );
        });
    }
}
