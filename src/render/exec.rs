//! Executes compiled instructions against a stack of JSON scopes.

use super::parse::{Instruction, Name};
use serde_json::Value;

pub fn execute(instructions: &[Instruction], root: &Value) -> String {
    let mut out = String::new();
    let mut scopes = vec![root];
    run(instructions, 0, instructions.len(), &mut scopes, &mut out);
    out
}

fn run<'v>(
    instructions: &[Instruction],
    mut pc: usize,
    end: usize,
    scopes: &mut Vec<&'v Value>,
    out: &mut String,
) {
    while pc < end {
        match &instructions[pc] {
            Instruction::Text(text) => out.push_str(text),
            Instruction::Variable { name, escape } => {
                if let Some(value) = lookup(scopes, name) {
                    let text = stringify(value);
                    if *escape {
                        escape_html_into(&text, out);
                    } else {
                        out.push_str(&text);
                    }
                }
            }
            Instruction::SectionStart {
                name,
                inverted,
                end: close,
            } => {
                let value = lookup(scopes, name);
                let body = pc + 1;
                if *inverted {
                    if !value.is_some_and(is_truthy) {
                        run(instructions, body, *close, scopes, out);
                    }
                } else {
                    match value {
                        Some(Value::Array(items)) => {
                            for item in items {
                                scopes.push(item);
                                run(instructions, body, *close, scopes, out);
                                scopes.pop();
                            }
                        }
                        Some(v) if is_truthy(v) => {
                            scopes.push(v);
                            run(instructions, body, *close, scopes, out);
                            scopes.pop();
                        }
                        _ => {}
                    }
                }
                pc = *close;
            }
            Instruction::SectionEnd => {}
        }
        pc += 1;
    }
}

/// Resolve `name` against the scope stack, innermost scope first.
///
/// Only the first path segment falls back through enclosing scopes; the rest
/// must resolve inside the value it found.
pub fn lookup<'v>(scopes: &[&'v Value], name: &Name) -> Option<&'v Value> {
    if name.is_implicit() {
        return scopes.last().copied();
    }
    let (first, rest) = name.segments().split_first()?;
    let mut found = scopes.iter().rev().find_map(|scope| scope.get(first.as_str()))?;
    for segment in rest {
        found = found.as_object()?.get(segment.as_str())?;
    }
    Some(found)
}

/// Falsy: null, `false`, zero, `""`, `[]` and `{}`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text substituted for a variable tag.
///
/// Booleans are spelled `True`/`False` so existing templates render the same
/// text they did under the Python generator.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn escape_html_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn stringify_scalars() {
        assert_eq!(stringify(&json!(null)), "");
        assert_eq!(stringify(&json!("a&b")), "a&b");
        assert_eq!(stringify(&json!(true)), "True");
        assert_eq!(stringify(&json!(false)), "False");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!([1, "x"])), r#"[1,"x"]"#);
    }

    #[test]
    fn escapes_html_specials() {
        let mut out = String::new();
        escape_html_into(r#"<a href="x">Tom & Jerry's</a>"#, &mut out);
        assert_eq!(
            out,
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }
}
