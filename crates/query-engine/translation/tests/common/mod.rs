//! A small library schema used to exercise the translation.
//!
//! book(book_id, title, subtitle, pages, author_id)
//! author(author_id, name)
//! tag(tag_id, label), bridged to book by book_tag(book_id, tag_id)

use query_engine_sql::sql::ast::FilterGroup;
use query_engine_sql::sql::string::SQL;
use query_engine_translation::translation::query::fields::TypeInfo;
use query_engine_translation::translation::query::filtering::{
    collect_fields, contains, eq, gt, is_in, is_null, join_column, join_table, lte,
    InputFilter,
};
use query_engine_translation::translation::{self, query::filtering};

pub struct Book;

impl TypeInfo for Book {
    const COLLECTION_NAME: &'static str = "book";

    fn column_for_field(field: &str) -> Option<&'static str> {
        match field {
            "title" => Some("title"),
            "subtitle" => Some("subtitle"),
            "pages" => Some("pages"),
            "author" => Some("author_id"),
            "tags" => Some("book_id"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub and: Option<Vec<BookFilter>>,
    pub or: Option<Vec<BookFilter>>,

    pub author: Option<Box<AuthorFilter>>,
    pub tag: Option<Box<TagFilter>>,

    pub title_eq: Option<String>,
    pub title_in: Option<Vec<String>>,
    pub pages_gt: Option<i32>,
    pub pages_lte: Option<i32>,
    pub subtitle_is_null: Option<bool>,
}

impl InputFilter for BookFilter {
    const TABLE_NAME: &'static str = "book";

    fn and_filters(&self) -> &[Self] {
        self.and.as_deref().unwrap_or_default()
    }

    fn or_filters(&self) -> &[Self] {
        self.or.as_deref().unwrap_or_default()
    }

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| {
            eq(g, "title", self.title_eq.as_ref());
            is_in(g, "title", self.title_in.as_ref());
            gt(g, "pages", self.pages_gt.as_ref());
            lte(g, "pages", self.pages_lte.as_ref());
            is_null(g, "subtitle", self.subtitle_is_null.as_ref());

            join_column(g, self.author.as_deref(), "author_id", "author_id");
            join_table(
                g,
                self.tag.as_deref(),
                "book_tag",
                "book_id",
                "tag_id",
                "book_id",
                "tag_id",
            );
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthorFilter {
    pub name_eq: Option<String>,
    pub name_contains: Option<String>,
}

impl InputFilter for AuthorFilter {
    const TABLE_NAME: &'static str = "author";

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| {
            eq(g, "name", self.name_eq.as_ref());
            contains(g, "name", self.name_contains.as_ref());
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    pub label_eq: Option<String>,
}

impl InputFilter for TagFilter {
    const TABLE_NAME: &'static str = "tag";

    fn collect_into(&self, group: &mut FilterGroup) {
        collect_fields(group, self, |g| eq(g, "label", self.label_eq.as_ref()));
    }
}

pub fn title_eq(title: &str) -> BookFilter {
    BookFilter {
        title_eq: Some(title.to_string()),
        ..BookFilter::default()
    }
}

/// Translate a book filter selecting `title` and return the statement.
pub fn translate_books(filter: Option<&BookFilter>) -> SQL {
    translation::query::translate::<Book, BookFilter, &str>(&["title"], filter, None)
        .unwrap()
        .query_sql()
}

/// The filter tree of a book filter.
pub fn book_tree(filter: &BookFilter) -> FilterGroup {
    filtering::table_filter(Some(filter)).filter_group
}
