//! Key lookups in bundled configuration text.
//!
//! Every lookup is a pure function of the key and the text. A file that fails
//! to parse simply does not contain the key.

use figment::providers::{Format, Yaml};
use figment::value::{Dict, Value};
use figment::{Figment, Profile, Provider};
use std::collections::HashMap;

/// Parses text using `java.util.Properties` line rules.
///
/// - blank lines and lines starting with `#` or `!` are skipped,
/// - a line ending in an odd number of backslashes continues on the next line,
/// - the key ends at the first unescaped `=`, `:` or whitespace,
/// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded.
///
/// When a key repeats, the last definition wins.
pub fn parse_properties(text: &str) -> HashMap<String, String> {
    let mut properties = HashMap::new();
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let mut logical = line.trim_start().to_string();
        if logical.is_empty() || logical.starts_with('#') || logical.starts_with('!') {
            continue;
        }
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }
        let (key, value) = split_property(&logical);
        properties.insert(unescape(key), unescape(value));
    }
    properties
}

/// String value of `key` in properties text.
pub fn properties_string(key: &str, text: &str) -> Option<String> {
    parse_properties(text).remove(key)
}

/// String value of `key` in YAML text.
///
/// Only scalar strings match; a number under the key is a typed mismatch.
pub fn yaml_string(key: &str, text: &str) -> Option<String> {
    yaml_value(key, text)?.as_str().map(str::to_string)
}

/// Integer value of `key` in YAML text.
///
/// Only scalar numbers match; a quoted number under the key is a typed mismatch.
pub fn yaml_integer(key: &str, text: &str) -> Option<i128> {
    let value = yaml_value(key, text)?;
    value.to_i128().or_else(|| value.to_u128().and_then(|n| i128::try_from(n).ok()))
}

/// Only the first document of a multi-document stream is consulted.
fn yaml_value(key: &str, text: &str) -> Option<Value> {
    let data = Figment::from(Yaml::string(&first_document(text))).data().ok()?;
    let root = data.get(&Profile::Default)?;
    find(root, key).cloned()
}

/// Text of the first YAML document, without its `---` start marker.
fn first_document(text: &str) -> String {
    let mut document = String::with_capacity(text.len());
    let mut has_content = false;
    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed.starts_with("--- ") {
            if has_content {
                break;
            }
            continue;
        }
        if trimmed == "..." {
            break;
        }
        if !trimmed.is_empty() && !trimmed.trim_start().starts_with('#') {
            has_content = true;
        }
        document.push_str(line);
        document.push('\n');
    }
    document
}

/// Resolves a dotted key against nested maps, flat dotted keys, or any mix
/// of the two (`server: {port: 1}`, `server.port: 1`, `a.b: {c: 1}`).
fn find<'a>(dict: &'a Dict, key: &str) -> Option<&'a Value> {
    if let Some(value) = dict.get(key) {
        return Some(value);
    }
    key.match_indices('.').find_map(|(idx, _)| {
        let child = dict.get(&key[..idx])?.as_dict()?;
        find(child, &key[idx + 1..])
    })
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_property(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            },
            _ => {},
        }
    }
    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\x0c']))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => out.push_str(&hex),
                }
            },
            Some(other) => out.push(other),
            None => {},
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("server.port=9090", "server.port", "9090")]
    #[case("server.port = 9090", "server.port", "9090")]
    #[case("server.port:9090", "server.port", "9090")]
    #[case("server.port 9090", "server.port", "9090")]
    #[case("   server.port=9090   ", "server.port", "9090   ")]
    #[case("greeting=hello world", "greeting", "hello world")]
    #[case("url=jdbc:postgresql://db:5432/x", "url", "jdbc:postgresql://db:5432/x")]
    #[case(r"path\ with\ spaces=yes", "path with spaces", "yes")]
    #[case(r"unicode=caf\u00e9", "unicode", "café")]
    #[case("flag", "flag", "")]
    #[case("-Dspring.application.name=orders", "-Dspring.application.name", "orders")]
    #[case("--server.port=9090", "--server.port", "9090")]
    fn test_parse_properties_line(#[case] text: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(properties_string(key, text).as_deref(), Some(value));
    }

    #[test]
    fn test_parse_properties_document() {
        let text = "# comment\n\
                    ! also a comment\n\
                    \n\
                    spring.application.name=first\n\
                    list=a,\\\n    b,\\\n    c\n\
                    spring.application.name=second\n";
        let properties = parse_properties(text);
        assert_eq!(properties.len(), 2);
        assert_eq!(properties.get("spring.application.name").map(String::as_str), Some("second"));
        assert_eq!(properties.get("list").map(String::as_str), Some("a,b,c"));
    }

    #[test]
    fn test_escaped_backslash_is_not_continuation() {
        let properties = parse_properties("dir=C:\\\\\nnext=1\n");
        assert_eq!(properties.get("dir").map(String::as_str), Some("C:\\"));
        assert_eq!(properties.get("next").map(String::as_str), Some("1"));
    }

    #[rstest]
    #[case("server:\n  port: 9090\n", Some(9090))]
    #[case("server.port: 9090\n", Some(9090))]
    #[case("server:\n  port: \"9090\"\n", None)]
    #[case("server:\n  address: 0.0.0.0\n", None)]
    #[case("server: [1, 2]\n", None)]
    #[case("not: [valid yaml", None)]
    #[case("", None)]
    fn test_yaml_integer(#[case] text: &str, #[case] expected: Option<i128>) {
        assert_eq!(yaml_integer("server.port", text), expected);
    }

    #[rstest]
    #[case("spring:\n  application:\n    name: orders\n", Some("orders"))]
    #[case("spring.application.name: orders\n", Some("orders"))]
    #[case("spring:\n  application.name: orders\n", Some("orders"))]
    #[case("spring.application:\n  name: orders\n", Some("orders"))]
    #[case("spring:\n  application:\n    name: 42\n", None)]
    #[case("spring:\n  profiles: dev\n", None)]
    fn test_yaml_string(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(yaml_string("spring.application.name", text).as_deref(), expected);
    }

    #[rstest]
    #[case("server.port: -1\n", Some(-1))]
    #[case("server.port: 0\n", Some(0))]
    #[case("server.port: 18446744073709551615\n", Some(18_446_744_073_709_551_615))]
    fn test_yaml_integer_sign(#[case] text: &str, #[case] expected: Option<i128>) {
        assert_eq!(yaml_integer("server.port", text), expected);
    }

    const PROFILES: &str = "server:\n  port: 9090\nspring:\n  application:\n    name: orders\n\
        ---\n\
        spring:\n  config:\n    activate:\n      on-profile: prod\nserver:\n  port: 80\n";

    #[test]
    fn test_yaml_multi_document_reads_first() {
        assert_eq!(yaml_integer("server.port", PROFILES), Some(9090));
        assert_eq!(yaml_string("spring.application.name", PROFILES).as_deref(), Some("orders"));
        assert_eq!(yaml_string("spring.config.activate.on-profile", PROFILES), None);
    }

    #[rstest]
    #[case("---\nserver:\n  port: 1\n---\nserver:\n  port: 2\n", Some(1))]
    #[case("# leading comment\n--- # profile: default\nserver.port: 3\n", Some(3))]
    #[case("server.port: 4\n...\nserver.port: 5\n", Some(4))]
    fn test_yaml_document_markers(#[case] text: &str, #[case] expected: Option<i128>) {
        assert_eq!(yaml_integer("server.port", text), expected);
    }
}
