use serde::{Deserialize, Serialize};

use query_engine_execution::loader::WithId;
use query_engine_sql::sql::ast::FilterGroup;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::{
    collect_fields, contains, eq, is_in, is_not_in, neq, InputFilter,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    #[sqlx(default)]
    pub language_id: i32,
    #[sqlx(default)]
    pub name: String,
}

impl Language {
    pub const TABLE: &'static str = "language";

    pub const COLUMN_LANGUAGE_ID: &'static str = "language_id";
    pub const COLUMN_NAME: &'static str = "name";
}

impl TypeInfo for Language {
    const COLLECTION_NAME: &'static str = Language::TABLE;

    fn column_for_field(field: &str) -> Option<&'static str> {
        match field {
            "languageId" => Some(Self::COLUMN_LANGUAGE_ID),
            "name" => Some(Self::COLUMN_NAME),
            _ => None,
        }
    }
}

impl WithId<i32> for Language {
    fn id(&self) -> &i32 {
        &self.language_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LanguageFilter {
    pub name_eq: Option<String>,
    pub name_in: Option<Vec<String>>,
    pub name_not_eq: Option<String>,
    pub name_not_in: Option<Vec<String>>,
    pub name_contains: Option<String>,
}

impl InputFilter for LanguageFilter {
    const TABLE_NAME: &'static str = Language::TABLE;

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| {
            eq(g, Language::COLUMN_NAME, self.name_eq.as_ref());
            neq(g, Language::COLUMN_NAME, self.name_not_eq.as_ref());
            is_in(g, Language::COLUMN_NAME, self.name_in.as_ref());
            is_not_in(g, Language::COLUMN_NAME, self.name_not_in.as_ref());
            contains(g, Language::COLUMN_NAME, self.name_contains.as_ref());
        });
    }
}
