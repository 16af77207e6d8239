// tests/lower_tests.rs

use mongosql::ast::{CmpOp, Expr, SortDirection, SortSpec};
use mongosql::{Error, Lower, Statement, TranslationError, Value, compile, parse, to_json};
use serde_json::json;

fn compile_json(query: &str) -> serde_json::Value {
    compile(query)
        .unwrap_or_else(|e| panic!("failed to compile {:?}: {}", query, e))
        .into()
}

fn translation_error(query: &str) -> TranslationError {
    match compile(query) {
        Err(Error::Translation(e)) => e,
        other => panic!("Expected a translation error for {:?}, got {:?}", query, other),
    }
}

// ============================================================================
// Literals and Symbols
// ============================================================================

#[test]
fn test_literals() {
    assert_eq!(compile_json("42"), json!(42));
    assert_eq!(compile_json("-42"), json!(-42));
    assert_eq!(compile_json("2.5"), json!(2.5));
    assert_eq!(compile_json("'text'"), json!("text"));
    assert_eq!(compile_json("true"), json!(true));
    assert_eq!(compile_json("null"), json!(null));
}

#[test]
fn test_integers_stay_integers() {
    assert_eq!(compile("7").unwrap(), Value::Integer(7));
    assert_eq!(compile("7.0").unwrap(), Value::Float(7.0));
}

#[test]
fn test_symbol_is_bare_name() {
    assert_eq!(compile_json("author.name"), json!("author.name"));
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_equality_shorthand() {
    assert_eq!(compile_json("field == 'value'"), json!({"field": "value"}));
}

#[test]
fn test_comparison_operators() {
    let test_cases = vec![
        ("a != 1", json!({"a": {"$ne": 1}})),
        ("a < 1", json!({"a": {"$lt": 1}})),
        ("a <= 1", json!({"a": {"$lte": 1}})),
        ("a > 1", json!({"a": {"$gt": 1}})),
        ("a >= 1", json!({"a": {"$gte": 1}})),
        ("a IN [1, 2]", json!({"a": {"$in": [1, 2]}})),
    ];

    for (input, expected) in test_cases {
        assert_eq!(compile_json(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_comparison_right_side_is_lowered() {
    assert_eq!(
        compile_json("total > price * 2"),
        json!({"total": {"$gt": {"$multiply": ["price", 2]}}})
    );
}

#[test]
fn test_comparison_requires_field_on_left() {
    let err = translation_error("1 == a");
    assert_eq!(
        err,
        TranslationError::ComparisonTarget {
            op: CmpOp::Equal,
            found: "integer"
        }
    );
    assert_eq!(
        err.to_string(),
        "cannot translate `==` comparison: left operand must be a field name, found integer"
    );
}

#[test]
fn test_chained_comparison_fails() {
    // (a < b) < c: the outer left side is a comparison
    let err = translation_error("a < b < c");
    assert!(matches!(
        err,
        TranslationError::ComparisonTarget {
            op: CmpOp::LessThan,
            found: "comparison"
        }
    ));
}

#[test]
fn test_not_applied_to_field_fails_in_comparison() {
    let err = translation_error("NOT a == 1");
    assert!(matches!(
        err,
        TranslationError::ComparisonTarget {
            found: "NOT expression",
            ..
        }
    ));
}

#[test]
fn test_nested_translation_error_surfaces() {
    let err = translation_error("SELECT * FROM c WHERE a == 1 AND 'x' > 2");
    assert!(matches!(
        err,
        TranslationError::ComparisonTarget {
            op: CmpOp::GreaterThan,
            found: "string"
        }
    ));
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_flattened_and() {
    assert_eq!(
        compile_json("a == 1 AND b == 2 AND c == 3"),
        json!({"$and": [{"a": 1}, {"b": 2}, {"c": 3}]})
    );
}

#[test]
fn test_select_where_and() {
    assert_eq!(
        compile_json(r#"SELECT * FROM coll WHERE foo == "Spam" AND bar == "Eggs""#),
        json!({"filter": {"$and": [{"foo": "Spam"}, {"bar": "Eggs"}]}})
    );
}

#[test]
fn test_or_of_ands() {
    assert_eq!(
        compile_json("a == 1 OR b == 2 AND c != 3"),
        json!({"$or": [{"a": 1}, {"$and": [{"b": 2}, {"c": {"$ne": 3}}]}]})
    );
}

#[test]
fn test_not() {
    assert_eq!(
        compile_json("NOT (a > 1)"),
        json!({"$not": {"a": {"$gt": 1}}})
    );
}

// ============================================================================
// Arithmetic and Calls
// ============================================================================

#[test]
fn test_arithmetic_operators() {
    let test_cases = vec![
        ("'$x' + 1", json!({"$add": ["$x", 1]})),
        ("'$x' - 1", json!({"$subtract": ["$x", 1]})),
        ("'$x' * 1", json!({"$multiply": ["$x", 1]})),
        ("'$x' / 1", json!({"$divide": ["$x", 1]})),
        ("'$x' % 1", json!({"$mod": ["$x", 1]})),
    ];

    for (input, expected) in test_cases {
        assert_eq!(compile_json(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_negated_field_reference() {
    assert_eq!(
        compile_json("-'$score'"),
        json!({"$subtract": [0, "$score"]})
    );
}

#[test]
fn test_function_call() {
    assert_eq!(
        compile_json("concat('$first', ' ', '$last')"),
        json!({"$concat": ["$first", " ", "$last"]})
    );
    assert_eq!(compile_json("now()"), json!({"$now": []}));
}

// ============================================================================
// Documents and Lists
// ============================================================================

#[test]
fn test_documents() {
    assert_eq!(compile_json("{}"), json!({}));
    assert_eq!(
        compile_json("{title = 1, stats = {pv = '$pageViews'}}"),
        json!({"title": 1, "stats": {"pv": "$pageViews"}})
    );
    assert_eq!(
        compile_json(r#"{a: 1, "b c": [1, 2,], c = null}"#),
        json!({"a": 1, "b c": [1, 2], "c": null})
    );
}

#[test]
fn test_document_last_write_wins() {
    let value = compile("{a = 1, b = 2, a = 3}").unwrap();
    assert_eq!(to_json(&value), r#"{"a":3,"b":2}"#);
}

#[test]
fn test_document_keeps_source_order() {
    let value = compile("{zeta = 1, alpha = 2, mid = 3}").unwrap();
    assert_eq!(value.keys(), vec!["zeta", "alpha", "mid"]);
}

// ============================================================================
// SELECT
// ============================================================================

#[test]
fn test_select_star_is_empty_descriptor() {
    assert_eq!(compile_json("SELECT * FROM c"), json!({}));
}

#[test]
fn test_select_all_parts() {
    let query = "SELECT field, field1 FROM mycollection \
                 WHERE field == 'value' LIMIT 100 SKIP 20 \
                 SORT field1 ASC, field2 DESC";
    let value = compile(query).unwrap();

    assert_eq!(
        to_json(&value),
        r#"{"filter":{"field":"value"},"projection":["field","field1"],"limit":100,"skip":20,"sort":{"field1":1,"field2":-1}}"#
    );
}

#[test]
fn test_select_descriptor_key_order_ignores_clause_order() {
    let value = compile("SELECT a FROM c SORT a DESC SKIP 1 LIMIT 2 WHERE a > 0").unwrap();
    assert_eq!(value.keys(), vec!["filter", "projection", "limit", "skip", "sort"]);
}

#[test]
fn test_select_sort_only() {
    assert_eq!(
        compile_json("SELECT * FROM c ORDER BY b DESC, a"),
        json!({"sort": {"b": -1, "a": 1}})
    );
}

#[test]
fn test_find_descriptor() {
    let Statement::Select(select) = parse("SELECT a FROM c WHERE a IN [1] LIMIT 3").unwrap() else {
        panic!("Expected SELECT");
    };
    let descriptor = select.find_descriptor().unwrap();

    assert_eq!(descriptor.projection, Some(vec!["a".to_string()]));
    assert_eq!(descriptor.limit, Some(3));
    assert_eq!(descriptor.skip, None);
    assert_eq!(descriptor.sort, None);
    assert_eq!(
        descriptor.filter.map(serde_json::Value::from),
        Some(json!({"a": {"$in": [1]}}))
    );
}

// ============================================================================
// AGGREGATE
// ============================================================================

#[test]
fn test_aggregate_project() {
    assert_eq!(
        compile_json("AGGREGATE article PROJECT title = 1, doctoredPageViews = \"$pageViews\" + 10"),
        json!({
            "aggregate": "article",
            "pipeline": [
                {"$project": {"title": 1, "doctoredPageViews": {"$add": ["$pageViews", 10]}}}
            ]
        })
    );
}

#[test]
fn test_aggregate_project_fields() {
    assert_eq!(
        compile_json("AGGREGATE article PROJECT title = 1, author = 1"),
        json!({
            "aggregate": "article",
            "pipeline": [{"$project": {"title": 1, "author": 1}}]
        })
    );
    assert_eq!(
        compile_json("AGGREGATE c PROJECT a = 1, a = 2"),
        json!({"aggregate": "c", "pipeline": [{"$project": {"a": 2}}]})
    );
}

#[test]
fn test_aggregate_project_as_syntax() {
    assert_eq!(
        compile_json("AGGREGATE article PROJECT '$author' AS writer, 1 AS title"),
        json!({
            "aggregate": "article",
            "pipeline": [{"$project": {"writer": "$author", "title": 1}}]
        })
    );
}

#[test]
fn test_aggregate_repeated_project_appends() {
    assert_eq!(
        compile_json("AGGREGATE c PROJECT a = 1 PROJECT b = 1"),
        json!({
            "aggregate": "c",
            "pipeline": [{"$project": {"a": 1}}, {"$project": {"b": 1}}]
        })
    );
}

#[test]
fn test_aggregate_project_last_write_wins() {
    let value = compile("AGGREGATE c PROJECT a = 1, b = 2, a = 0").unwrap();
    assert_eq!(
        to_json(&value),
        r#"{"aggregate":"c","pipeline":[{"$project":{"a":0,"b":2}}]}"#
    );
}

#[test]
fn test_aggregate_empty_pipeline() {
    assert_eq!(
        compile_json("AGGREGATE c"),
        json!({"aggregate": "c", "pipeline": []})
    );
}

#[test]
fn test_aggregate_all_stages() {
    let query = "AGGREGATE article \
                 MATCH author == 'dave' AND score > 70 \
                 UNWIND '$tags' \
                 GROUP _id = '$tags', views = sum('$pageViews') \
                 SORT views DESC \
                 SKIP 5 \
                 LIMIT 10 \
                 GEO_NEAR {near: [-73.99, 40.73], distanceField: 'dist'}";

    assert_eq!(
        compile_json(query),
        json!({
            "aggregate": "article",
            "pipeline": [
                {"$match": {"$and": [{"author": "dave"}, {"score": {"$gt": 70}}]}},
                {"$unwind": "$tags"},
                {"$group": {"_id": "$tags", "views": {"$sum": ["$pageViews"]}}},
                {"$sort": {"views": -1}},
                {"$skip": 5},
                {"$limit": 10},
                {"$geoNear": {"near": [-73.99, 40.73], "distanceField": "dist"}}
            ]
        })
    );
}

#[test]
fn test_deeply_nested_stage_is_a_parse_error() {
    let document = format!("{}1{}", "{a = ".repeat(10_000), "}".repeat(10_000));
    let result = compile(&format!("AGGREGATE c PROJECT x = {}", document));
    assert!(matches!(
        result,
        Err(Error::Parse(mongosql::ParseError::TooDeep { .. }))
    ));
}

#[test]
fn test_aggregate_translation_error_in_match() {
    let err = translation_error("AGGREGATE c MATCH 3 > 1");
    assert!(matches!(err, TranslationError::ComparisonTarget { .. }));
}

// ============================================================================
// Direct AST Lowering
// ============================================================================

#[test]
fn test_lower_is_repeatable() {
    let statement = parse("SELECT a FROM c WHERE a == 1 OR b IN [2, 3] SORT a").unwrap();
    let first = statement.lower().unwrap();
    let second = statement.lower().unwrap();
    assert_eq!(to_json(&first), to_json(&second));
}

#[test]
fn test_lower_hand_built_tree() {
    let expr = Expr::comparison(CmpOp::Equal, Expr::symbol("a"), Expr::Integer(1))
        .and(Expr::comparison(CmpOp::Equal, Expr::symbol("b"), Expr::Integer(2)))
        .and(Expr::comparison(CmpOp::Equal, Expr::symbol("c"), Expr::Integer(3)));

    assert_eq!(
        serde_json::Value::from(expr.lower().unwrap()),
        json!({"$and": [{"a": 1}, {"b": 2}, {"c": 3}]})
    );
}

#[test]
fn test_lower_sort_spec() {
    let spec: SortSpec = [
        ("created", SortDirection::Descending),
        ("title", SortDirection::Ascending),
    ]
    .into_iter()
    .collect();

    assert_eq!(to_json(&spec.lower().unwrap()), r#"{"created":-1,"title":1}"#);
}
