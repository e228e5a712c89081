use query_engine_sql::sql::ast::*;
use query_engine_sql::sql::convert::select_to_sql;
use query_engine_sql::sql::execution_plan::simple_exec_plan;
use query_engine_sql::sql::helpers::{joined_select, simple_select};
use query_engine_sql::sql::string::{Param, SQL};
use similar_asserts::assert_eq;

fn actor_filter(first_name: &str) -> TableFilter {
    let mut actor = TableFilter::new("actor");
    actor
        .filter_group
        .add_filter(ValueFilter::new(Operation::Eq, "first_name", first_name));
    actor
}

fn film_actors(actor: TableFilter) -> JoinTableFilter {
    JoinTableFilter::new(actor, "film_actor", "film_id", "film_id", "actor_id", "actor_id")
}

fn actor_films(film: TableFilter) -> JoinTableFilter {
    JoinTableFilter::new(film, "film_actor", "actor_id", "actor_id", "film_id", "film_id")
}

/// The `$n` placeholders of a statement, in the order they appear.
fn placeholders(sql: &str) -> Vec<usize> {
    sql.split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
                .parse()
                .unwrap()
        })
        .collect()
}

fn assert_params_aligned(sql: &SQL) {
    let expected: Vec<usize> = (1..=sql.params.len()).collect();
    assert_eq!(placeholders(&sql.sql), expected);
    assert_eq!(sql.param_index, sql.params.len());
}

#[test]
fn it_converts_an_unfiltered_select() {
    let select = simple_select(&["film_id", "title"], TableFilter::new("film"));
    assert_eq!(
        select_to_sql(&select),
        SQL {
            sql: "SELECT T0.film_id, T0.title FROM film AS T0".to_string(),
            params: vec![],
            param_index: 0,
        }
    );
}

#[test]
fn it_selects_the_root_star_without_columns() {
    let select = simple_select::<&str>(&[], TableFilter::new("film"));
    insta::assert_snapshot!(select_to_sql(&select).sql, @"SELECT T0.* FROM film AS T0");
}

#[test]
fn it_converts_a_value_and_a_join_table_filter() {
    let mut film = TableFilter::new("film");
    film.filter_group
        .add_filter(ValueFilter::new(Operation::Eq, "title", "ACADEMY"));
    film.filter_group
        .add_filter(film_actors(actor_filter("PENELOPE")));

    let sql = select_to_sql(&simple_select(&["film_id", "title"], film));

    insta::assert_snapshot!(sql.sql, @"SELECT T0.film_id, T0.title FROM film AS T0 WHERE (T0.title = $1 AND EXISTS(SELECT TRUE FROM film_actor AS T1 INNER JOIN actor AS T2 ON T2.actor_id = T1.actor_id WHERE T1.film_id = T0.film_id AND T2.first_name = $2))");
    assert_eq!(
        sql.params,
        vec![Param::from("ACADEMY"), Param::from("PENELOPE")]
    );
}

#[test]
fn a_single_child_is_never_bracketed() {
    let mut film = TableFilter::new("film");
    film.filter_group
        .add_filter(ValueFilter::new(Operation::Gt, "length", 100_i16));

    let sql = select_to_sql(&simple_select(&["title"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.title FROM film AS T0 WHERE T0.length > $1");
    assert_eq!(sql.params, vec![Param::Int2(100)]);
}

#[test]
fn a_nested_group_of_the_other_combinator_is_bracketed() {
    let mut or = FilterGroup::new(Combinator::Or);
    or.add_filter(ValueFilter::new(Operation::Eq, "title", "A"));
    or.add_filter(ValueFilter::unary(Operation::IsNull, "original_language_id"));

    let mut film = TableFilter::new("film");
    film.filter_group
        .add_filter(ValueFilter::new(Operation::Lte, "length", 60_i16));
    film.filter_group.add_group(or);

    let sql = select_to_sql(&simple_select(&["title"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.title FROM film AS T0 WHERE (T0.length <= $1 AND (T0.title = $2 OR T0.original_language_id IS NULL))");
    assert_eq!(sql.params, vec![Param::Int2(60), Param::from("A")]);
}

#[test]
fn a_lone_or_group_under_the_root_keeps_only_its_own_brackets() {
    let mut or = FilterGroup::new(Combinator::Or);
    or.add_filter(ValueFilter::new(Operation::Eq, "title", "A"));
    or.add_filter(ValueFilter::new(Operation::Eq, "title", "B"));

    let mut film = TableFilter::new("film");
    film.filter_group.add_group(or);

    let sql = select_to_sql(&simple_select(&["title"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.title FROM film AS T0 WHERE (T0.title = $1 OR T0.title = $2)");
}

#[test]
fn null_checks_bind_no_parameters() {
    let mut film = TableFilter::new("film");
    film.filter_group
        .add_filter(ValueFilter::unary(Operation::IsNull, "a"));
    film.filter_group
        .add_filter(ValueFilter::unary(Operation::IsNotNull, "b"));
    film.filter_group
        .add_filter(ValueFilter::new(Operation::Eq, "c", 3));

    let sql = select_to_sql(&simple_select(&["c"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.c FROM film AS T0 WHERE (T0.a IS NULL AND T0.b IS NOT NULL AND T0.c = $1)");
    assert_eq!(sql.params, vec![Param::Int4(3)]);
    assert_params_aligned(&sql);
}

#[test]
fn a_null_check_ignores_a_value_it_was_given() {
    let mut film = TableFilter::new("film");
    film.filter_group.add_filter(ValueFilter {
        operation: Operation::IsNotNull,
        column: "original_language_id".to_string(),
        value: Some(Param::from(1)),
    });

    let sql = select_to_sql(&simple_select(&["title"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.title FROM film AS T0 WHERE T0.original_language_id IS NOT NULL");
    assert!(sql.params.is_empty());
}

#[test]
fn it_renders_every_operation() {
    let mut film = TableFilter::new("film");
    let group = &mut film.filter_group;
    group.add_filter(ValueFilter::new(Operation::Neq, "a", 1));
    group.add_filter(ValueFilter::new(Operation::Lt, "b", 2));
    group.add_filter(ValueFilter::new(Operation::Gte, "c", 3));
    group.add_filter(ValueFilter::new(Operation::In, "d", vec![4, 5]));
    group.add_filter(ValueFilter::new(
        Operation::NotIn,
        "e",
        vec!["x".to_string()],
    ));
    group.add_filter(ValueFilter::new(Operation::Contains, "f", "ACAD"));

    let sql = select_to_sql(&simple_select(&["a"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.a FROM film AS T0 WHERE (T0.a <> $1 AND T0.b < $2 AND T0.c >= $3 AND T0.d = ANY($4) AND T0.e <> ANY($5) AND T0.f LIKE '%' || $6 || '%')");
    assert_eq!(
        sql.params,
        vec![
            Param::Int4(1),
            Param::Int4(2),
            Param::Int4(3),
            Param::Int4Array(vec![4, 5]),
            Param::StringArray(vec!["x".to_string()]),
            Param::from("ACAD"),
        ]
    );
}

#[test]
fn an_empty_join_column_filter_checks_only_the_relationship() {
    let mut film = TableFilter::new("film");
    film.filter_group.add_filter(JoinColumnFilter::new(
        TableFilter::new("language"),
        "language_id",
        "language_id",
    ));

    let sql = select_to_sql(&simple_select(&["title"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.title FROM film AS T0 WHERE EXISTS(SELECT TRUE FROM language AS T1 WHERE T1.language_id = T0.language_id)");
    assert!(sql.params.is_empty());
}

#[test]
fn nested_joins_correlate_with_the_enclosing_table() {
    let mut language = TableFilter::new("language");
    language
        .filter_group
        .add_filter(ValueFilter::new(Operation::Eq, "name", "English"));

    let mut inner_film = TableFilter::new("film");
    inner_film.filter_group.add_filter(JoinColumnFilter::new(
        language,
        "language_id",
        "language_id",
    ));

    let mut actor = TableFilter::new("actor");
    actor.filter_group.add_filter(actor_films(inner_film));

    let mut film = TableFilter::new("film");
    film.filter_group.add_filter(film_actors(actor));
    film.filter_group
        .add_filter(ValueFilter::new(Operation::Eq, "title", "ACADEMY"));

    let sql = select_to_sql(&simple_select::<&str>(&[], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.* FROM film AS T0 WHERE (EXISTS(SELECT TRUE FROM film_actor AS T1 INNER JOIN actor AS T2 ON T2.actor_id = T1.actor_id WHERE T1.film_id = T0.film_id AND EXISTS(SELECT TRUE FROM film_actor AS T3 INNER JOIN film AS T4 ON T4.film_id = T3.film_id WHERE T3.actor_id = T2.actor_id AND EXISTS(SELECT TRUE FROM language AS T5 WHERE T5.language_id = T4.language_id AND T5.name = $1))) AND T0.title = $2)");
    assert_eq!(
        sql.params,
        vec![Param::from("English"), Param::from("ACADEMY")]
    );
    assert_params_aligned(&sql);
}

#[test]
fn sibling_joins_get_distinct_aliases() {
    let mut film = TableFilter::new("film");
    film.filter_group
        .add_filter(film_actors(actor_filter("PENELOPE")));
    film.filter_group
        .add_filter(film_actors(actor_filter("NICK")));

    let sql = select_to_sql(&simple_select(&["title"], film));
    insta::assert_snapshot!(sql.sql, @"SELECT T0.title FROM film AS T0 WHERE (EXISTS(SELECT TRUE FROM film_actor AS T1 INNER JOIN actor AS T2 ON T2.actor_id = T1.actor_id WHERE T1.film_id = T0.film_id AND T2.first_name = $1) AND EXISTS(SELECT TRUE FROM film_actor AS T3 INNER JOIN actor AS T4 ON T4.actor_id = T3.actor_id WHERE T3.film_id = T0.film_id AND T4.first_name = $2))");
    assert_params_aligned(&sql);
}

fn actors_of_film(film_id: i32) -> JoinedTable {
    JoinedTable {
        join_table: "film_actor".to_string(),
        join_table_join_column: "actor_id".to_string(),
        data_table_join_column: "actor_id".to_string(),
        join_table_filter_column: "film_id".to_string(),
        join_table_filter_value: Param::Int4(film_id),
    }
}

#[test]
fn a_joined_table_without_filters_still_has_a_where_clause() {
    let select = joined_select(
        &["actor_id", "first_name"],
        TableFilter::new("actor"),
        actors_of_film(7),
    );

    let sql = select_to_sql(&select);
    insta::assert_snapshot!(sql.sql, @"SELECT T0.actor_id, T0.first_name FROM film_actor AS J INNER JOIN actor AS T0 ON J.actor_id = T0.actor_id WHERE J.film_id = $1");
    assert_eq!(sql.params, vec![Param::Int4(7)]);
}

#[test]
fn a_joined_table_is_combined_with_the_filter() {
    let select = joined_select(&["first_name"], actor_filter("NICK"), actors_of_film(7));

    let sql = select_to_sql(&select);
    insta::assert_snapshot!(sql.sql, @"SELECT T0.first_name FROM film_actor AS J INNER JOIN actor AS T0 ON J.actor_id = T0.actor_id WHERE T0.first_name = $1 AND J.film_id = $2");
    assert_eq!(sql.params, vec![Param::from("NICK"), Param::Int4(7)]);
}

#[test]
fn explain_prefixes_the_query() {
    let plan = simple_exec_plan(simple_select(&["title"], actor_filter("NICK")));
    assert_eq!(plan.root_table, "actor");
    assert_eq!(
        plan.explain_query_sql().sql,
        format!("EXPLAIN {}", plan.query_sql().sql)
    );
}

#[test]
#[should_panic(expected = "has no value to bind")]
fn a_missing_value_is_a_contract_violation() {
    let mut film = TableFilter::new("film");
    film.filter_group.add_filter(ValueFilter {
        operation: Operation::Eq,
        column: "title".to_string(),
        value: None,
    });

    select_to_sql(&simple_select(&["title"], film));
}
