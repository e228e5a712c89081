use serde::{Deserialize, Serialize};

use query_engine_execution::loader::WithId;
use query_engine_sql::sql::ast::FilterGroup;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::{
    collect_fields, eq, is_in, is_not_in, neq, InputFilter,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[sqlx(default)]
    pub category_id: i32,
    #[sqlx(default)]
    pub name: String,
}

impl Category {
    pub const TABLE: &'static str = "category";

    pub const COLUMN_CATEGORY_ID: &'static str = "category_id";
    pub const COLUMN_NAME: &'static str = "name";
}

impl TypeInfo for Category {
    const COLLECTION_NAME: &'static str = Category::TABLE;

    fn column_for_field(field: &str) -> Option<&'static str> {
        match field {
            "categoryId" => Some(Self::COLUMN_CATEGORY_ID),
            "name" => Some(Self::COLUMN_NAME),
            "films" => Some(Self::COLUMN_CATEGORY_ID),
            _ => None,
        }
    }
}

impl WithId<i32> for Category {
    fn id(&self) -> &i32 {
        &self.category_id
    }
}

/// Categories have no boolean nesting.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryFilter {
    pub name_eq: Option<String>,
    pub name_in: Option<Vec<String>>,
    pub name_not_eq: Option<String>,
    pub name_not_in: Option<Vec<String>>,
}

impl InputFilter for CategoryFilter {
    const TABLE_NAME: &'static str = Category::TABLE;

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| {
            eq(g, Category::COLUMN_NAME, self.name_eq.as_ref());
            neq(g, Category::COLUMN_NAME, self.name_not_eq.as_ref());
            is_in(g, Category::COLUMN_NAME, self.name_in.as_ref());
            is_not_in(g, Category::COLUMN_NAME, self.name_not_in.as_ref());
        });
    }
}
