//! Lua literal output.

use std::fmt::Write;

use crate::value::{Key, Value, format_float};

const KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Renders all values of one input line: `a, b, c;\n`.
pub fn render(values: &[Value]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_value(&mut out, value);
    }
    out.push_str(";\n");
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("nil"),
        Value::Bool(b) => {
            let _ = write!(out, "{b}");
        }
        Value::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(x) => out.push_str(&format_float(*x)),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('{');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push('}');
        }
        Value::Map(entries) => write_map(out, entries),
        Value::Error(message) => {
            out.push_str("{error = ");
            write_string(out, message);
            out.push('}');
        }
    }
}

fn write_map(out: &mut String, entries: &[(Key, Value)]) {
    let positional = Value::positional_prefix(entries);
    out.push('{');
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if i >= positional {
            write_key(out, key);
            out.push_str(" = ");
        }
        write_value(out, value);
    }
    out.push('}');
}

fn write_key(out: &mut String, key: &Key) {
    match key {
        Key::Index(index) => {
            let _ = write!(out, "[{index}]");
        }
        Key::Name(name) if is_identifier(name) => out.push_str(name),
        Key::Name(name) => {
            out.push('[');
            write_string(out, name);
            out.push(']');
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !KEYWORDS.contains(&name)
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::Array(values.iter().copied().map(Value::Integer).collect())
    }

    #[test]
    fn test_scalars_joined_with_semicolon() {
        assert_eq!(render(&[Value::Integer(4)]), "4;\n");
        assert_eq!(render(&[]), ";\n");
        assert_eq!(
            render(&[Value::Integer(1), Value::string("2"), Value::Integer(3)]),
            "1, \"2\", 3;\n"
        );
    }

    #[test]
    fn test_tables() {
        assert_eq!(render(&[ints(&[1, 2, 3])]), "{1, 2, 3};\n");

        let values = [
            Value::Array(vec![
                Value::Integer(10),
                Value::Integer(20),
                Value::Null,
                Value::Integer(30),
            ]),
            Value::Array(vec![]),
            Value::Array(vec![Value::Null]),
            Value::map([("data", Value::string("hello world"))]),
        ];
        assert_eq!(
            render(&values),
            "{10, 20, nil, 30}, {}, {nil}, {data = \"hello world\"};\n"
        );
    }

    #[test]
    fn test_error_marker() {
        assert_eq!(render(&[Value::error("test")]), "{error = \"test\"};\n");
    }

    #[test]
    fn test_mixed_map_puts_positional_first() {
        let value = Value::map([
            (Key::Index(1), Value::string("Hi")),
            (Key::from("data"), Value::Integer(123)),
            (Key::from("not"), Value::Bool(true)),
            (Key::Index(5), Value::Null),
        ]);
        assert_eq!(
            render(&[value]),
            "{\"Hi\", data = 123, [\"not\"] = true, [5] = nil};\n"
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            render(&[Value::string("a\"b\\c\nd\u{1}")]),
            "\"a\\\"b\\\\c\\nd\\001\";\n"
        );
    }
}
