use mata::{Env, Error, Object};
use pretty_assertions::assert_eq;

fn run(source: &str) -> Object {
    match mata::run(source, &Env::new().shared()) {
        Ok(object) => object,
        Err(err) => panic!("{}", err),
    }
}

fn integers(values: &[i64]) -> Object {
    Object::array(values.iter().map(|v| Object::Integer(*v)).collect())
}

#[test]
fn map_over_array() {
    let source = r#"
        let map = fn(arr, f) {
            let iter = fn(arr, accumulated) {
                if (len(arr) == 0) {
                    accumulated
                } else {
                    iter(rest(arr), push(accumulated, f(first(arr))));
                }
            };
            iter(arr, []);
        };
        let a = [1, 2, 3, 4, 5];
        let double = fn(x) { x * 2 };
        map(a, double);
    "#;

    assert_eq!(run(source), integers(&[2, 4, 6, 8, 10]));
}

#[test]
fn reduce_over_array() {
    let source = r#"
        let reduce = fn(arr, initial, f) {
            let iter = fn(arr, result) {
                if (len(arr) == 0) {
                    result
                } else {
                    iter(rest(arr), f(result, first(arr)));
                }
            };
            iter(arr, initial);
        };
        let sum = fn(arr) {
            reduce(arr, 0, fn(initial, el) { initial + el });
        };
        sum([1, 2, 3, 4, 5]);
    "#;

    assert_eq!(run(source), Object::Integer(15));
}

#[test]
fn hash_of_people() {
    let source = r#"
        let people = [{"name": "Alice", "age": 24}, {"name": "Anna", "age": 28}];
        let getName = fn(person) { person["name"]; };
        getName(people[0]) + " & " + getName(people[1]);
    "#;

    assert_eq!(run(source), Object::String("Alice & Anna".to_owned()));
}

#[test]
fn display_text_of_results() {
    assert_eq!(run("[1, \"two\", [true]]").to_string(), "[1, two, [true]]");
    assert_eq!(run(r#"{"k": [1]}"#).to_string(), "{k: [1]}");
    assert_eq!(run("fn(a, b) { a * b }").to_string(), "fn(a, b){\n(a * b)\n}");
    assert_eq!(run("len").to_string(), "builtin function");
    assert_eq!(run("5 + true").to_string(), "ERROR: type mismatch: INTEGER + BOOLEAN");
    assert_eq!(run("if (false) { 1 }").to_string(), "null");
}

#[test]
fn one_env_across_lines() {
    let env = Env::new().shared();
    let lines = [
        ("let counter = 0;", Object::Null),
        ("let bump = fn(by) { counter = counter + by; };", Object::Null),
        ("bump(2)", Object::Integer(2)),
        ("bump(3)", Object::Integer(5)),
        ("counter", Object::Integer(5)),
    ];

    for (line, expected) in lines {
        assert_eq!(mata::run(line, &env).ok(), Some(expected), "line {:?}", line);
    }
}

#[test]
fn syntax_errors_are_not_evaluated() {
    let env = Env::new().shared();

    match mata::run("let x = ; let = 2;", &env) {
        Err(Error::Parse(errors)) => assert_eq!(
            errors.0,
            vec![
                "no prefix parse function for ; found",
                "expected next token to be IDENT, got = instead",
                "no prefix parse function for = found",
            ]
        ),
        other => panic!("expected parse errors, got {:?}", other),
    }

    assert_eq!(env.borrow().get("x"), None);
}

#[test]
fn runtime_errors_stay_values() {
    let result = mata::run("let f = fn(x) { x }; f(1, 2)", &Env::new().shared());
    assert_eq!(result.ok(), Some(Object::Error("want 1 Arguments get=2".to_owned())));
}

#[test]
fn ast_rendering_through_parse() {
    let program = match mata::parse("let x = 1 + 2 * 3; return -x;") {
        Ok(program) => program,
        Err(err) => panic!("{}", err),
    };

    assert_eq!(program.to_string(), "let x = (1 + (2 * 3));return (-x);");
}
