//! JSON export of trees

use anneal_parser::{parse_program, parse_query};
use serde_json::json;

#[test]
fn test_serialize_leaf() {
    let query = parse_query("?- n(7)").unwrap();
    let numeral = query.child(0).unwrap().children()[0].child(1).unwrap().child(0).unwrap();
    let value = serde_json::to_value(numeral).unwrap();
    assert_eq!(
        value,
        json!({
            "kind": "Numeral",
            "value": { "Int": 7 },
            "location": { "line": 1, "column": 6, "offset": 5, "length": 1 },
            "children": []
        })
    );
}

#[test]
fn test_serialize_program_shape() {
    let program = parse_program("a :- b, c.").unwrap();
    let value = serde_json::to_value(&program).unwrap();

    assert_eq!(value["kind"], "Program");
    assert_eq!(value["value"]["Text"], "a :- b, c.");
    let clause = &value["children"][0];
    assert_eq!(clause["kind"], "Clause");
    assert_eq!(clause["children"][1]["kind"], "PredicateList");
    assert_eq!(clause["children"][1]["children"].as_array().unwrap().len(), 2);
}
