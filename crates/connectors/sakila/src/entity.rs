//! Requests over an entity chosen at runtime, with the filter given as JSON.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use query_engine_sql::sql::execution_plan::ExecutionPlan;

use crate::error::QueryError;
use crate::model::{
    Actor, ActorFilter, Category, CategoryFilter, Film, FilmFilter, Language, LanguageFilter,
};
use crate::query;
use crate::relationships;
use crate::state::State;

const NO_FIELDS: &[&str] = &[];

/// The queryable entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Film,
    Actor,
    Category,
    Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity '{0}', expected one of film, actor, category, language")]
pub struct UnknownEntity(pub String);

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Film,
        Entity::Actor,
        Entity::Category,
        Entity::Language,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Entity::Film => Film::TABLE,
            Entity::Actor => Actor::TABLE,
            Entity::Category => Category::TABLE,
            Entity::Language => Language::TABLE,
        }
    }

    /// The relationships that can be included alongside the rows of this entity.
    pub fn relationships(self) -> &'static [Relationship] {
        match self {
            Entity::Film => &[
                Relationship::Actors,
                Relationship::Categories,
                Relationship::Language,
                Relationship::OriginalLanguage,
            ],
            Entity::Actor | Entity::Category => &[Relationship::Films],
            Entity::Language => &[],
        }
    }

    /// Reject relationships this entity does not have.
    pub fn check_include(self, include: &[Relationship]) -> Result<(), QueryError> {
        match include
            .iter()
            .copied()
            .find(|relationship| !self.relationships().contains(relationship))
        {
            Some(relationship) => Err(self.unsupported(relationship)),
            None => Ok(()),
        }
    }

    // the field selecting the id of a row
    fn id_field(self) -> &'static str {
        match self {
            Entity::Film => "filmId",
            Entity::Actor => "actorId",
            Entity::Category => "categoryId",
            Entity::Language => "languageId",
        }
    }

    /// The requested fields, plus those holding the keys the included relationships are
    /// resolved with. Requesting no fields already selects every column.
    pub fn fields_with_keys<S: AsRef<str>>(
        self,
        fields: &[S],
        include: &[Relationship],
    ) -> Vec<String> {
        let mut fields: Vec<String> = fields.iter().map(|f| f.as_ref().to_string()).collect();
        if !fields.is_empty() && !include.is_empty() {
            fields.push(self.id_field().to_string());
            fields.extend(include.iter().map(|relationship| relationship.field().to_string()));
        }
        fields
    }

    fn unsupported(self, relationship: Relationship) -> QueryError {
        QueryError::UnsupportedRelationship {
            entity: self,
            relationship,
        }
    }

    /// Translate a request without touching the database.
    pub fn plan<S: AsRef<str>>(
        self,
        fields: &[S],
        filter: Option<serde_json::Value>,
    ) -> Result<ExecutionPlan, QueryError> {
        match self {
            Entity::Film => {
                query::plan::<Film, _, S>(fields, parse_filter::<FilmFilter>(filter)?.as_ref(), None)
            }
            Entity::Actor => query::plan::<Actor, _, S>(
                fields,
                parse_filter::<ActorFilter>(filter)?.as_ref(),
                None,
            ),
            Entity::Category => query::plan::<Category, _, S>(
                fields,
                parse_filter::<CategoryFilter>(filter)?.as_ref(),
                None,
            ),
            Entity::Language => query::plan::<Language, _, S>(
                fields,
                parse_filter::<LanguageFilter>(filter)?.as_ref(),
                None,
            ),
        }
    }

    /// Run a request and return the rows as JSON.
    ///
    /// Each relationship in `include` is resolved for every row at once and attached to the
    /// rows under its field.
    pub async fn query<S: AsRef<str>>(
        self,
        state: &State,
        fields: &[S],
        filter: Option<serde_json::Value>,
        include: &[Relationship],
    ) -> Result<serde_json::Value, QueryError> {
        self.check_include(include)?;
        let fields = self.fields_with_keys(fields, include);

        match self {
            Entity::Film => {
                let filter = parse_filter::<FilmFilter>(filter)?;
                let films =
                    query::query::<Film, _, _>(state, fields.as_slice(), filter.as_ref(), None)
                        .await?;

                let mut related = Vec::with_capacity(include.len());
                for &relationship in include {
                    let by_film = match relationship {
                        Relationship::Actors => to_json_by_id(
                            relationships::film_actors(state, &films, NO_FIELDS, None).await?,
                        )?,
                        Relationship::Categories => {
                            to_json_by_id(relationships::film_categories(state, &films).await?)?
                        }
                        Relationship::Language => {
                            to_json_by_id(relationships::film_languages(state, &films).await?)?
                        }
                        Relationship::OriginalLanguage => to_json_by_id(
                            relationships::film_original_languages(state, &films).await?,
                        )?,
                        Relationship::Films => return Err(self.unsupported(relationship)),
                    };
                    related.push((relationship, by_film));
                }
                with_related(&films, |film| film.film_id, &related)
            }
            Entity::Actor => {
                let filter = parse_filter::<ActorFilter>(filter)?;
                let actors =
                    query::query::<Actor, _, _>(state, fields.as_slice(), filter.as_ref(), None)
                        .await?;

                let mut related = Vec::with_capacity(include.len());
                for &relationship in include {
                    let by_actor = match relationship {
                        Relationship::Films => to_json_by_id(
                            relationships::actor_films(state, &actors, NO_FIELDS, None).await?,
                        )?,
                        other => return Err(self.unsupported(other)),
                    };
                    related.push((relationship, by_actor));
                }
                with_related(&actors, |actor| actor.actor_id, &related)
            }
            Entity::Category => {
                let filter = parse_filter::<CategoryFilter>(filter)?;
                let categories =
                    query::query::<Category, _, _>(state, fields.as_slice(), filter.as_ref(), None)
                        .await?;

                let mut related = Vec::with_capacity(include.len());
                for &relationship in include {
                    let by_category = match relationship {
                        Relationship::Films => to_json_by_id(
                            relationships::category_films(state, &categories, NO_FIELDS, None)
                                .await?,
                        )?,
                        other => return Err(self.unsupported(other)),
                    };
                    related.push((relationship, by_category));
                }
                with_related(&categories, |category| category.category_id, &related)
            }
            Entity::Language => {
                let filter = parse_filter::<LanguageFilter>(filter)?;
                let languages =
                    query::query::<Language, _, _>(state, fields.as_slice(), filter.as_ref(), None)
                        .await?;
                with_related(&languages, |language| language.language_id, &[])
            }
        }
    }

    /// Explain a request.
    pub async fn explain<S: AsRef<str>>(
        self,
        state: &State,
        fields: &[S],
        filter: Option<serde_json::Value>,
    ) -> Result<BTreeMap<String, String>, QueryError> {
        match self {
            Entity::Film => {
                let filter = parse_filter::<FilmFilter>(filter)?;
                query::explain::<Film, _, S>(state, fields, filter.as_ref(), None).await
            }
            Entity::Actor => {
                let filter = parse_filter::<ActorFilter>(filter)?;
                query::explain::<Actor, _, S>(state, fields, filter.as_ref(), None).await
            }
            Entity::Category => {
                let filter = parse_filter::<CategoryFilter>(filter)?;
                query::explain::<Category, _, S>(state, fields, filter.as_ref(), None).await
            }
            Entity::Language => {
                let filter = parse_filter::<LanguageFilter>(filter)?;
                query::explain::<Language, _, S>(state, fields, filter.as_ref(), None).await
            }
        }
    }
}

impl FromStr for Entity {
    type Err = UnknownEntity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .into_iter()
            .find(|entity| entity.table().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEntity(s.to_string()))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// Related rows that can be included with the rows of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Actors,
    Films,
    Categories,
    Language,
    OriginalLanguage,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown relationship '{0}', expected one of actors, films, categories, language, originalLanguage"
)]
pub struct UnknownRelationship(pub String);

impl Relationship {
    pub const ALL: [Relationship; 5] = [
        Relationship::Actors,
        Relationship::Films,
        Relationship::Categories,
        Relationship::Language,
        Relationship::OriginalLanguage,
    ];

    /// The field the related rows are attached under.
    pub fn field(self) -> &'static str {
        match self {
            Relationship::Actors => "actors",
            Relationship::Films => "films",
            Relationship::Categories => "categories",
            Relationship::Language => "language",
            Relationship::OriginalLanguage => "originalLanguage",
        }
    }
}

impl FromStr for Relationship {
    type Err = UnknownRelationship;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Relationship::ALL
            .into_iter()
            .find(|relationship| relationship.field().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownRelationship(s.to_string()))
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field())
    }
}

/// A missing or `null` filter places no constraint.
pub fn parse_filter<F: DeserializeOwned>(
    filter: Option<serde_json::Value>,
) -> Result<Option<F>, QueryError> {
    match filter {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(QueryError::InvalidFilter),
    }
}

fn to_json_by_id<T: Serialize>(
    related: HashMap<i32, T>,
) -> Result<HashMap<i32, serde_json::Value>, QueryError> {
    related
        .into_iter()
        .map(|(id, rows)| {
            serde_json::to_value(rows)
                .map(|value| (id, value))
                .map_err(QueryError::Serialization)
        })
        .collect()
}

/// Serialize the rows, attaching the related rows of each under the relationship's field.
/// A row with nothing related gets `null`.
fn with_related<T: Serialize>(
    rows: &[T],
    id: impl Fn(&T) -> i32,
    related: &[(Relationship, HashMap<i32, serde_json::Value>)],
) -> Result<serde_json::Value, QueryError> {
    let rows = rows
        .iter()
        .map(|row| -> Result<serde_json::Value, QueryError> {
            let mut value = serde_json::to_value(row).map_err(QueryError::Serialization)?;
            if let Some(object) = value.as_object_mut() {
                for (relationship, by_id) in related {
                    let entry = by_id.get(&id(row)).cloned().unwrap_or_default();
                    object.insert(relationship.field().to_string(), entry);
                }
            }
            Ok(value)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(film_id: i32, title: &str) -> Film {
        Film {
            film_id,
            title: title.to_string(),
            ..Film::default()
        }
    }

    #[test]
    fn related_rows_are_attached_under_the_relationship() {
        let films = [film(1, "ACADEMY DINOSAUR"), film(2, "ACE GOLDFINGER")];
        let actors = HashMap::from([(1, serde_json::json!([{ "firstName": "PENELOPE" }]))]);
        let languages = HashMap::from([
            (1, serde_json::json!({ "name": "English" })),
            (2, serde_json::json!({ "name": "English" })),
        ]);

        let rows = with_related(
            &films,
            |film| film.film_id,
            &[
                (Relationship::Actors, actors),
                (Relationship::Language, languages),
            ],
        )
        .unwrap();

        insta::assert_json_snapshot!(rows, @r###"
        [
          {
            "actors": [
              {
                "firstName": "PENELOPE"
              }
            ],
            "description": null,
            "filmId": 1,
            "language": {
              "name": "English"
            },
            "languageId": 0,
            "length": 0,
            "originalLanguageId": null,
            "title": "ACADEMY DINOSAUR"
          },
          {
            "actors": null,
            "description": null,
            "filmId": 2,
            "language": {
              "name": "English"
            },
            "languageId": 0,
            "length": 0,
            "originalLanguageId": null,
            "title": "ACE GOLDFINGER"
          }
        ]
        "###);
    }
}
