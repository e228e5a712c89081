use serde::{Deserialize, Serialize};

use query_engine_execution::loader::WithId;
use query_engine_sql::sql::ast::FilterGroup;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::{
    collect_fields, contains, eq, gt, gte, is_in, is_not_in, is_null, join_column, join_table, lt,
    lte, neq, InputFilter,
};

use super::join_tables::{FILM_ACTOR, FILM_ACTOR_ACTOR_ID, FILM_ACTOR_FILM_ID};
use super::join_tables::{FILM_CATEGORY, FILM_CATEGORY_CATEGORY_ID, FILM_CATEGORY_FILM_ID};
use super::{Actor, ActorFilter, Category, CategoryFilter, Language, LanguageFilter};

/// A row of `film`. Columns that were not selected keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    #[sqlx(default)]
    pub film_id: i32,
    #[sqlx(default)]
    pub language_id: i32,
    #[sqlx(default)]
    pub original_language_id: Option<i32>,
    #[sqlx(default)]
    pub title: String,
    #[sqlx(default)]
    pub description: Option<String>,
    #[sqlx(default)]
    pub length: i16,
}

impl Film {
    pub const TABLE: &'static str = "film";

    pub const COLUMN_FILM_ID: &'static str = "film_id";
    pub const COLUMN_TITLE: &'static str = "title";
    pub const COLUMN_DESCRIPTION: &'static str = "description";
    pub const COLUMN_LENGTH: &'static str = "length";
    pub const COLUMN_LANGUAGE_ID: &'static str = "language_id";
    pub const COLUMN_ORIGINAL_LANGUAGE_ID: &'static str = "original_language_id";
}

impl TypeInfo for Film {
    const COLLECTION_NAME: &'static str = Film::TABLE;

    fn column_for_field(field: &str) -> Option<&'static str> {
        match field {
            "filmId" => Some(Self::COLUMN_FILM_ID),
            "title" => Some(Self::COLUMN_TITLE),
            "description" => Some(Self::COLUMN_DESCRIPTION),
            "length" => Some(Self::COLUMN_LENGTH),
            "actors" | "categories" => Some(Self::COLUMN_FILM_ID),
            "language" => Some(Self::COLUMN_LANGUAGE_ID),
            "originalLanguage" => Some(Self::COLUMN_ORIGINAL_LANGUAGE_ID),
            _ => None,
        }
    }
}

impl WithId<i32> for Film {
    fn id(&self) -> &i32 {
        &self.film_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FilmFilter {
    pub and: Option<Vec<FilmFilter>>,
    pub or: Option<Vec<FilmFilter>>,

    pub actor: Option<Box<ActorFilter>>,
    pub category: Option<Box<CategoryFilter>>,
    pub language: Option<Box<LanguageFilter>>,
    pub original_language: Option<Box<LanguageFilter>>,

    pub title_eq: Option<String>,
    pub title_not_eq: Option<String>,
    pub title_in: Option<Vec<String>>,
    pub title_not_in: Option<Vec<String>>,
    pub title_contains: Option<String>,

    pub length_eq: Option<i16>,
    pub length_gt: Option<i16>,
    pub length_gte: Option<i16>,
    pub length_lt: Option<i16>,
    pub length_lte: Option<i16>,

    pub original_language_is_null: Option<bool>,
}

impl InputFilter for FilmFilter {
    const TABLE_NAME: &'static str = Film::TABLE;

    fn and_filters(&self) -> &[Self] {
        self.and.as_deref().unwrap_or_default()
    }

    fn or_filters(&self) -> &[Self] {
        self.or.as_deref().unwrap_or_default()
    }

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| {
            eq(g, Film::COLUMN_TITLE, self.title_eq.as_ref());
            neq(g, Film::COLUMN_TITLE, self.title_not_eq.as_ref());
            is_in(g, Film::COLUMN_TITLE, self.title_in.as_ref());
            is_not_in(g, Film::COLUMN_TITLE, self.title_not_in.as_ref());
            contains(g, Film::COLUMN_TITLE, self.title_contains.as_ref());

            eq(g, Film::COLUMN_LENGTH, self.length_eq.as_ref());
            lt(g, Film::COLUMN_LENGTH, self.length_lt.as_ref());
            lte(g, Film::COLUMN_LENGTH, self.length_lte.as_ref());
            gt(g, Film::COLUMN_LENGTH, self.length_gt.as_ref());
            gte(g, Film::COLUMN_LENGTH, self.length_gte.as_ref());

            is_null(
                g,
                Film::COLUMN_ORIGINAL_LANGUAGE_ID,
                self.original_language_is_null.as_ref(),
            );

            join_column(
                g,
                self.language.as_deref(),
                Film::COLUMN_LANGUAGE_ID,
                Language::COLUMN_LANGUAGE_ID,
            );
            join_column(
                g,
                self.original_language.as_deref(),
                Film::COLUMN_ORIGINAL_LANGUAGE_ID,
                Language::COLUMN_LANGUAGE_ID,
            );

            join_table(
                g,
                self.category.as_deref(),
                FILM_CATEGORY,
                FILM_CATEGORY_FILM_ID,
                FILM_CATEGORY_CATEGORY_ID,
                Film::COLUMN_FILM_ID,
                Category::COLUMN_CATEGORY_ID,
            );
            join_table(
                g,
                self.actor.as_deref(),
                FILM_ACTOR,
                FILM_ACTOR_FILM_ID,
                FILM_ACTOR_ACTOR_ID,
                Film::COLUMN_FILM_ID,
                Actor::COLUMN_ACTOR_ID,
            );
        });
    }
}
