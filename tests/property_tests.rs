use mongosql::ast::TokenKind;
use mongosql::{Error, Lower, TranslationError, Value, compile, parse, to_json, tokenize};
use proptest::prelude::*;

fn arb_field() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}(\\.[a-z_][a-z0-9_]{0,4})?".prop_filter("reserved word", |name| {
        TokenKind::keyword(&name.to_ascii_uppercase()).is_none()
            && !matches!(name.as_str(), "true" | "false" | "null")
    })
}

fn arb_literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..100_000).prop_map(|n| n.to_string()),
        (0i64..100_000).prop_map(|n| format!("-{n}")),
        (0u32..1000, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| format!("'{s}'")),
        Just("true".to_string()),
        Just("null".to_string()),
    ]
}

fn arb_comparison() -> impl Strategy<Value = String> {
    (
        arb_field(),
        prop_oneof![
            Just("=="),
            Just("!="),
            Just("<"),
            Just("<="),
            Just(">"),
            Just(">=")
        ],
        arb_literal(),
    )
        .prop_map(|(field, op, value)| format!("{field} {op} {value}"))
}

fn arb_condition(depth: u32) -> BoxedStrategy<String> {
    if depth == 0 {
        return arb_comparison().boxed();
    }

    let nested = (
        arb_condition(depth - 1),
        prop_oneof![Just("AND"), Just("OR")],
        arb_condition(depth - 1),
    )
        .prop_map(|(lhs, op, rhs)| format!("({lhs}) {op} ({rhs})"));
    prop_oneof![arb_comparison(), nested].boxed()
}

fn arb_trivia() -> impl Strategy<Value = String> {
    let text = "[a-zA-Z0-9 ]{0,16}";
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\r\n".to_string()),
            text.prop_map(|t| format!("// {t}\n")),
            text.prop_map(|t| format!("# {t}\n")),
            text.prop_map(|t| format!("-- {t}\n")),
            text.prop_map(|t| format!("/* {t}\n{t} */")),
        ],
        0..8,
    )
    .prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn lowering_is_idempotent(condition in arb_condition(3)) {
        let statement = parse(&format!("SELECT * FROM c WHERE {condition}"))
            .expect("generated condition should parse");
        let first = statement.lower().expect("generated condition should lower");
        let second = statement.lower().expect("generated condition should lower");
        prop_assert_eq!(to_json(&first), to_json(&second));
    }

    #[test]
    fn non_field_comparison_fails(
        left in arb_literal(),
        op in prop_oneof![Just("=="), Just("!="), Just("<"), Just(">="), Just("IN")],
        right in arb_literal(),
    ) {
        let result = compile(&format!("{left} {op} {right}"));
        let is_comparison_target =
            matches!(result, Err(Error::Translation(TranslationError::ComparisonTarget { .. })));
        prop_assert!(is_comparison_target, "unexpected result {:?}", result);
    }

    #[test]
    fn equality_uses_shorthand(field in arb_field(), n in 0i64..i64::MAX) {
        let value = compile(&format!("{field} == {n}")).expect("equality should compile");
        prop_assert_eq!(value, Value::single(field, Value::Integer(n)));
    }

    #[test]
    fn and_chains_flatten(conditions in prop::collection::vec(arb_comparison(), 2..8)) {
        let value = compile(&conditions.join(" AND ")).expect("chain should compile");
        let children = value
            .get("$and")
            .and_then(Value::as_array)
            .expect("chain should lower to $and");
        prop_assert_eq!(children.len(), conditions.len());
        prop_assert!(children.iter().all(|child| child.get("$and").is_none()));
    }

    #[test]
    fn or_chains_flatten(conditions in prop::collection::vec(arb_comparison(), 2..8)) {
        let value = compile(&conditions.join(" OR ")).expect("chain should compile");
        let children = value
            .get("$or")
            .and_then(Value::as_array)
            .expect("chain should lower to $or");
        prop_assert_eq!(children.len(), conditions.len());
    }

    #[test]
    fn trivia_yields_no_tokens(input in arb_trivia()) {
        let tokens: Vec<_> = tokenize(&input).collect();
        prop_assert!(tokens.is_empty(), "tokens from {:?}: {:?}", input, tokens);
    }

    #[test]
    fn trivia_does_not_change_meaning(before in arb_trivia(), after in arb_trivia()) {
        let query = "SELECT a FROM c WHERE a > 1 LIMIT 2";
        let padded = format!("{before}{query}\n{after}");
        prop_assert_eq!(parse(&padded).expect("padded query should parse"), parse(query).unwrap());
    }

    #[test]
    fn string_literals_survive(text in "[^'\\\\\n]{0,24}") {
        let value = compile(&format!("'{text}'")).expect("string should compile");
        prop_assert_eq!(value, Value::String(text));
    }
}
