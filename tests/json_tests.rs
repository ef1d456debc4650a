use std::collections::BTreeMap;

use curly::{Job, Kind, Lexer, TokenType, Value};

fn lex(input: &str) -> Vec<(TokenType, String)> {
    let mut job = Job::new(input);
    Lexer::new(&mut job).analyze();
    job.tokens()
        .iter()
        .map(|token| (token.token_type, token.symbol.clone()))
        .collect()
}

fn serialize(input: &str, indent: usize) -> String {
    Value::parse(input).dump(indent, ' ')
}

#[test]
fn lexer_literals() {
    assert_eq!(lex("true"), vec![(TokenType::Literal, "true".to_string())]);
    assert_eq!(lex("false"), vec![(TokenType::Literal, "false".to_string())]);
    assert_eq!(lex("null"), vec![(TokenType::Literal, "null".to_string())]);
}

#[test]
fn lexer_numbers() {
    assert_eq!(lex("3.14"), vec![(TokenType::Number, "3.14".to_string())]);
    assert_eq!(lex("-3.14e+2"), vec![(TokenType::Number, "-3.14e+2".to_string())]);

    // A leading plus is not part of the number grammar.
    assert_eq!(lex("+3.14"), vec![(TokenType::None, "+".to_string())]);
}

#[test]
fn lexer_strings() {
    assert_eq!(lex(r#""a string""#), vec![(TokenType::String, "a string".to_string())]);

    assert_eq!(
        lex(r#""a string""another string""#),
        vec![
            (TokenType::String, "a string".to_string()),
            (TokenType::String, "another string".to_string()),
        ]
    );

    // Unterminated: the partial token is still recorded.
    assert_eq!(
        lex("\"a string\nwill break on the newline symbol\""),
        vec![(TokenType::String, "a string".to_string())]
    );
}

#[test]
fn lexer_containers() {
    for input in ["[]", "[\n\n\n]"] {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].1, "[");
        assert_eq!(tokens[1].1, "]");
    }
    for input in ["{}", "{\n\n\n}"] {
        let tokens = lex(input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].1, "{");
        assert_eq!(tokens[1].1, "}");
    }
}

#[test]
fn parser_scalars() {
    let value = Value::parse("null");
    assert_eq!((value.kind(), value.size()), (Kind::Null, 0));

    let value = Value::parse("true");
    assert_eq!((value.kind(), value.size()), (Kind::Bool, 1));

    let value = Value::parse("false");
    assert_eq!((value.kind(), value.size()), (Kind::Bool, 1));

    let value = Value::parse("3.14");
    assert_eq!((value.kind(), value.size()), (Kind::Number, 1));

    let value = Value::parse(r#""a string""#);
    assert_eq!((value.kind(), value.size()), (Kind::String, 1));
}

#[test]
fn parser_malformed_arrays() {
    for input in ["[", "[ 123", "[ 123,", "[ 123, ]", "[ 123 456 ]"] {
        let value = Value::parse(input);
        assert_eq!(value.kind(), Kind::Null, "{input} should fail");
    }

    let value = Value::parse("[]");
    assert_eq!((value.kind(), value.size()), (Kind::Array, 0));

    let value = Value::parse(r#"[ "element", 3.14 ]"#);
    assert_eq!((value.kind(), value.size()), (Kind::Array, 2));
}

#[test]
fn parser_malformed_objects() {
    for input in [
        "{",
        r#"{ "name""#,
        r#"{ "name":"#,
        r#"{ "name":,"#,
        r#"{ "name":"value""#,
        r#"{ "name":"value","#,
        r#"{ "name":"value", }"#,
        r#"{ "name" "value" }"#,
        r#"{ 123 }"#,
    ] {
        let value = Value::parse(input);
        assert_eq!(value.kind(), Kind::Null, "{input} should fail");
    }

    let value = Value::parse("{}");
    assert_eq!((value.kind(), value.size()), (Kind::Object, 0));

    let value = Value::parse(r#"{ "name": "value", "name2": 3.14 }"#);
    assert_eq!((value.kind(), value.size()), (Kind::Object, 2));
}

#[test]
fn parser_multiple_root_elements() {
    assert_eq!(Value::parse("54 false").kind(), Kind::Null);
    assert_eq!(Value::parse("3.14, 666").kind(), Kind::Null);
    assert_eq!(Value::parse("true\nfalse").kind(), Kind::Null);
}

#[test]
fn into_value_conversions() {
    let value = Value::default();
    assert_eq!((value.kind(), value.size()), (Kind::Null, 0));

    let value = Value::from(());
    assert_eq!((value.kind(), value.size()), (Kind::Null, 0));

    let value = Value::from(true);
    assert_eq!((value.kind(), value.size()), (Kind::Bool, 1));

    let value = Value::from(666);
    assert_eq!((value.kind(), value.size()), (Kind::Number, 1));

    let value = Value::from(3.14);
    assert_eq!((value.kind(), value.size()), (Kind::Number, 1));

    let value = Value::from("my string");
    assert_eq!((value.kind(), value.size()), (Kind::String, 1));

    let value = Value::from(String::from("my string"));
    assert_eq!((value.kind(), value.size()), (Kind::String, 1));

    let value = Value::from(vec!["element", "element2", "element3"]);
    assert_eq!((value.kind(), value.size()), (Kind::Array, 3));

    let mut map: BTreeMap<String, &str> = BTreeMap::new();
    map.insert("name".to_string(), "value");
    map.insert("name2".to_string(), "value2");
    let value = Value::from(map);
    assert_eq!((value.kind(), value.size()), (Kind::Object, 2));

    let value = Value::from(None::<bool>);
    assert_eq!(value.kind(), Kind::Null);
    let value = Value::from(Some(1u8));
    assert_eq!(value.kind(), Kind::Number);
}

#[test]
fn from_value_accessors() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from(666).as_number(), Some(666.0));
    assert_eq!(Value::from("my string").as_str(), Some("my string"));

    let mut value = Value::Null;
    value.push("string");
    value.push(3.14);
    value.push(true);
    value.push(());
    assert_eq!(value[0].as_str(), Some("string"));
    assert_eq!(value[1].as_number(), Some(3.14));
    assert_eq!(value[2].as_bool(), Some(true));
    assert!(value[3].is_null());
    assert_eq!(value.get(4), None);

    let mut nested = Value::Null;
    nested["name"] = "value".into();
    nested["nest 1-deep"]["number"] = 1.into();
    nested["nest 2-deep"]["nest 1-deep"]["bool"] = true.into();
    assert_eq!(nested["name"].as_str(), Some("value"));
    assert_eq!(nested["nest 1-deep"]["number"].as_number(), Some(1.0));
    assert_eq!(nested["nest 2-deep"]["nest 1-deep"]["bool"].as_bool(), Some(true));
    assert!(nested.contains_key("name"));
    assert!(!nested.contains_key("missing"));
}

#[test]
fn implicit_container_conversion() {
    let mut array = Value::Null;
    array[0] = Value::Null;
    assert_eq!(array.kind(), Kind::Array);

    let mut array_push = Value::Null;
    array_push.push("element");
    array_push.push(vec!["nested element"]);
    assert_eq!(array_push.kind(), Kind::Array);
    assert_eq!(array_push[1].kind(), Kind::Array);

    let mut object = Value::Null;
    object[""] = Value::Null;
    assert_eq!(object.kind(), Kind::Object);

    let mut object_insert = Value::Null;
    object_insert.insert("name", "value");
    let mut nested = Value::Null;
    nested.insert("nested name", "value");
    object_insert.insert("name2", nested);
    assert_eq!(object_insert.kind(), Kind::Object);
    assert_eq!(object_insert["name2"].kind(), Kind::Object);
}

#[test]
fn serializer_scalars() {
    assert_eq!(serialize("", 0), "null");
    assert_eq!(serialize("null", 0), "null");
    assert_eq!(serialize("true", 0), "true");
    assert_eq!(serialize("false", 0), "false");
    assert_eq!(serialize("3.14", 0), "3.14");
    assert_eq!(serialize(r#""string""#, 0), r#""string""#);

    assert_eq!(serialize("\n\n\n", 0), "null");
    assert_eq!(serialize("null\n", 0), "null");
    assert_eq!(serialize("3.14\n", 0), "3.14");
}

#[test]
fn serializer_arrays() {
    assert_eq!(serialize("[\n\n\n]", 0), "[]");
    assert_eq!(serialize("[null]", 0), "[null]");
    assert_eq!(serialize("[true]", 0), "[true]");
    assert_eq!(serialize("[false]", 0), "[false]");
    assert_eq!(serialize("[3.14]", 0), "[3.14]");
    assert_eq!(serialize(r#"["string"]"#, 0), r#"["string"]"#);

    assert_eq!(serialize("[\n\n\n]", 4), "[\n]");
    assert_eq!(serialize("[null]", 4), "[\n    null\n]");
    assert_eq!(serialize("[3.14]", 4), "[\n    3.14\n]");
    assert_eq!(serialize(r#"["string"]"#, 4), "[\n    \"string\"\n]");

    // No trailing comma after the last element.
    assert_eq!(serialize("[1]", 0), "[1]");
    assert_eq!(serialize("[1,2]", 0), "[1,2]");
    assert_eq!(serialize("[1,2,3]", 0), "[1,2,3]");
}

#[test]
fn serializer_objects() {
    assert_eq!(serialize(r#"{"n1":"v1"}"#, 0), r#"{"n1":"v1"}"#);
    assert_eq!(serialize(r#"{"n1":"v1", "n2":"v2"}"#, 0), r#"{"n1":"v1","n2":"v2"}"#);
    assert_eq!(
        serialize(r#"{"n1":"v1", "n2":"v2", "n3":"v3"}"#, 0),
        r#"{"n1":"v1","n2":"v2","n3":"v3"}"#
    );
}

#[test]
fn serializer_reorders_members_alphabetically() {
    let input = r#"{
	"object member one": [
		"array element one"
	],
	"object member two": [
		"array element one",
		"array element two"
	],
	"object member three": [
		"array element one",
		2,
		3.0,
		4.56,
		true,
		false,
		null
	],
	"object member four": 3.14,
	"object member five": "value five",
	"object member six": null,
	"object member seven": { "no": 0 }
}"#;

    let expected = r#"{
    "object member five": "value five",
    "object member four": 3.14,
    "object member one": [
        "array element one"
    ],
    "object member seven": {
        "no": 0
    },
    "object member six": null,
    "object member three": [
        "array element one",
        2,
        3,
        4.56,
        true,
        false,
        null
    ],
    "object member two": [
        "array element one",
        "array element two"
    ]
}"#;

    assert_eq!(serialize(input, 4), expected);
}

#[test]
fn parse_dump_round_trip() {
    let document = r#"{"a":[1,2.5,true,null],"b":"text with \"escape\"","c":{"d":[]}}"#;
    let value = Value::parse(document);
    assert_eq!(value.dump(0, ' '), document);
}
