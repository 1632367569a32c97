mod common;

use common::ScriptedPrompter;
use kiln::catalog::{Catalog, TemplateDescriptor};
use kiln::generate::Charset;
use kiln::resolver::{initial_selection, resolve_variables};

fn template(variables: &str) -> TemplateDescriptor {
    let content = format!(
        r#"[{{ "name": "t", "repository": "https://github.com/acme/t", "variables": {variables} }}]"#
    );
    Catalog::parse(&content).unwrap().find("t").unwrap().clone()
}

#[test_log::test]
fn test_one_value_per_declared_variable() {
    let template = template(
        r#"[{ "name": "APP_NAME", "prompt": "Name?" },
            { "name": "PORT", "prompt": "Port?", "type": "number", "default": 8080 },
            { "name": "TOKEN", "generate": "hex", "length": 8 }]"#,
    );
    let prompter = ScriptedPrompter::new(&[Some("demo"), None]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(context.len(), 3);
    let names: Vec<&str> = context.iter().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["APP_NAME", "PORT", "TOKEN"]);
    assert_eq!(context.get("APP_NAME"), Some("demo"));
    assert_eq!(context.get("PORT"), Some("8080"));
    assert_eq!(prompter.remaining(), 0);
}

#[test_log::test]
fn test_later_default_sees_earlier_value() {
    let template = template(
        r#"[{ "name": "A", "prompt": "A?", "default": "x" },
            { "name": "B", "prompt": "B for {{ A }}?", "default": "{{A}}-suffix" }]"#,
    );
    let prompter = ScriptedPrompter::new(&[Some("hello"), None]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(context.get("B"), Some("hello-suffix"));
    assert_eq!(prompter.messages.borrow()[1], "B for hello?");
}

#[test_log::test]
fn test_reference_to_later_variable_is_empty() {
    let template = template(
        r#"[{ "name": "A", "prompt": "A?", "default": "[{{ B }}]" },
            { "name": "B", "prompt": "B?" }]"#,
    );
    let prompter = ScriptedPrompter::new(&[None, Some("late")]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(context.get("A"), Some("[]"));
}

#[test_log::test]
fn test_select_initial_index_follows_default() {
    let template = template(
        r#"[{ "name": "S", "prompt": "Pick", "type": "select",
              "options": ["a", "b", "c"], "default": "b" },
            { "name": "T", "prompt": "Pick", "type": "select",
              "options": ["a", "b", "c"], "default": "z" }]"#,
    );
    let prompter = ScriptedPrompter::new(&[None, Some("c")]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(*prompter.initial_selections.borrow(), vec![1, 0]);
    assert_eq!(context.get("S"), Some("b"));
    assert_eq!(context.get("T"), Some("c"));
}

#[test]
fn test_initial_selection() {
    let options: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    assert_eq!(initial_selection(&options, "b"), 1);
    assert_eq!(initial_selection(&options, "missing"), 0);
    assert_eq!(initial_selection(&options, ""), 0);
}

#[test_log::test]
fn test_required_value_is_asked_again() {
    let template = template(r#"[{ "name": "APP_NAME", "prompt": "Name?", "required": true }]"#);
    let prompter = ScriptedPrompter::new(&[Some(""), Some(""), Some("demo")]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(context.get("APP_NAME"), Some("demo"));
    assert_eq!(prompter.messages.borrow().len(), 3);
}

#[test_log::test]
fn test_number_is_asked_again_until_numeric() {
    let template = template(r#"[{ "name": "PORT", "prompt": "Port?", "type": "number" }]"#);
    let prompter = ScriptedPrompter::new(&[Some("eighty"), Some("80")]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(context.get("PORT"), Some("80"));
}

#[test_log::test]
fn test_confirm_and_password() {
    let template = template(
        r#"[{ "name": "STRICT", "prompt": "Strict?", "type": "confirm", "default": true },
            { "name": "PASS", "prompt": "Password?", "type": "password" }]"#,
    );
    let prompter = ScriptedPrompter::new(&[None, Some("s3cret")]);

    let context = resolve_variables(&template, &prompter).unwrap();

    assert_eq!(context.get("STRICT"), Some("true"));
    assert_eq!(context.get("PASS"), Some("s3cret"));
}

#[test_log::test]
fn test_generated_values() {
    let template = template(
        r#"[{ "name": "PIN", "generate": "numeric", "length": 4 },
            { "name": "SECRET", "generate": "alphanumeric" }]"#,
    );
    let prompter = ScriptedPrompter::new(&[]);

    let first = resolve_variables(&template, &prompter).unwrap();
    let second = resolve_variables(&template, &prompter).unwrap();

    let pin = first.get("PIN").unwrap();
    assert_eq!(pin.len(), 4);
    assert!(pin.chars().all(|c| Charset::Numeric.contains(c)));
    assert_eq!(first.get("SECRET").unwrap().len(), 30);
    assert_ne!(first.get("SECRET"), second.get("SECRET"));
    assert!(prompter.messages.borrow().is_empty());
}
