//! URL template resolution.
//!
//! Related-resource URLs are built in two explicit passes:
//!
//! 1. [`format_fields`] substitutes `{field}` and `{field[key]}` references
//!    with values taken from the owning resource's document. Doubled braces
//!    (`{{` and `}}`) are emitted as single literal braces, so a default
//!    template such as `repos/{owner[login]}/{name}/branches{{/branch}}`
//!    becomes `repos/octocat/Hello-World/branches{/branch}`.
//! 2. [`expand`] performs RFC 6570 expansion of the remaining template with
//!    caller-supplied variables. Undefined variables are omitted.
//!
//! # Example
//!
//! ```rust
//! use github_api::rest::template::{expand, format_fields, FieldRef, TemplateError};
//!
//! let stage_one: Result<String, TemplateError> =
//!     format_fields("users/{login}/starred{{/owner}}{{/repo}}", |field: &FieldRef<'_>| {
//!         assert_eq!(field.name, "login");
//!         Ok("octocat".to_string())
//!     });
//! let stage_one = stage_one.unwrap();
//! assert_eq!(stage_one, "users/octocat/starred{/owner}{/repo}");
//!
//! let url = expand(&stage_one, &[("owner", "rust-lang")]);
//! assert_eq!(url, "users/octocat/starred/rust-lang");
//! ```

use std::fmt::Write as _;

use thiserror::Error;

/// Errors raised while parsing a stage-one template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` opened a field reference that was never closed.
    #[error("Unclosed field reference at byte {position} in template '{template}'")]
    UnclosedField {
        /// The offending template.
        template: String,
        /// Byte offset of the opening brace.
        position: usize,
    },

    /// A single `}` appeared outside a field reference.
    #[error("Single '}}' encountered at byte {position} in template '{template}'")]
    UnmatchedClosingBrace {
        /// The offending template.
        template: String,
        /// Byte offset of the brace.
        position: usize,
    },

    /// A field reference is empty or has malformed `[key]` indexing.
    #[error("Malformed field reference '{{{field}}}' in template '{template}'")]
    MalformedField {
        /// The offending template.
        template: String,
        /// The text between the braces.
        field: String,
    },
}

/// A stage-one field reference: `{name}` or `{name[key][key]...}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRef<'a> {
    /// The top-level document key.
    pub name: &'a str,
    /// Keys applied in order to descend into nested objects.
    pub keys: Vec<&'a str>,
}

impl<'a> FieldRef<'a> {
    fn parse(template: &str, expr: &'a str) -> Result<Self, TemplateError> {
        let malformed = || TemplateError::MalformedField {
            template: template.to_string(),
            field: expr.to_string(),
        };

        let (name, mut rest) = expr.find('[').map_or((expr, ""), |idx| expr.split_at(idx));
        if name.is_empty() {
            return Err(malformed());
        }

        let mut keys = Vec::new();
        while !rest.is_empty() {
            let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
            let end = inner.find(']').ok_or_else(malformed)?;
            let key = &inner[..end];
            if key.is_empty() {
                return Err(malformed());
            }
            keys.push(key);
            rest = &inner[end + 1..];
        }

        Ok(Self { name, keys })
    }
}

/// Runs the first expansion pass over `template`.
///
/// Every `{...}` field reference is handed to `resolve`, whose output is
/// inserted verbatim. `{{` and `}}` become literal `{` and `}`.
///
/// # Errors
///
/// Returns the resolver's error unchanged, or a [`TemplateError`] (converted
/// into `E`) when the template's braces are malformed.
pub fn format_fields<E, F>(template: &str, mut resolve: F) -> Result<String, E>
where
    E: From<TemplateError>,
    F: FnMut(&FieldRef<'_>) -> Result<String, E>,
{
    let mut out = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push_str(&template[literal_start..i]);
                out.push('{');
                i += 2;
                literal_start = i;
            }
            b'{' => {
                out.push_str(&template[literal_start..i]);
                let close = template[i + 1..].find('}').ok_or_else(|| {
                    TemplateError::UnclosedField {
                        template: template.to_string(),
                        position: i,
                    }
                })?;
                let expr = &template[i + 1..i + 1 + close];
                let field = FieldRef::parse(template, expr)?;
                out.push_str(&resolve(&field)?);
                i += close + 2;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push_str(&template[literal_start..i]);
                out.push('}');
                i += 2;
                literal_start = i;
            }
            b'}' => {
                return Err(TemplateError::UnmatchedClosingBrace {
                    template: template.to_string(),
                    position: i,
                }
                .into());
            }
            _ => i += 1,
        }
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}

/// Expansion behaviour of an RFC 6570 operator.
struct Operator {
    first: &'static str,
    separator: &'static str,
    named: bool,
    if_empty: &'static str,
    allow_reserved: bool,
}

impl Operator {
    const SIMPLE: Self = Self {
        first: "",
        separator: ",",
        named: false,
        if_empty: "",
        allow_reserved: false,
    };

    const fn for_char(c: char) -> Option<Self> {
        let (first, separator, named, if_empty, allow_reserved) = match c {
            '+' => ("", ",", false, "", true),
            '#' => ("#", ",", false, "", true),
            '.' => (".", ".", false, "", false),
            '/' => ("/", "/", false, "", false),
            ';' => (";", ";", true, "", false),
            '?' => ("?", "&", true, "=", false),
            '&' => ("&", "&", true, "=", false),
            _ => return None,
        };
        Some(Self {
            first,
            separator,
            named,
            if_empty,
            allow_reserved,
        })
    }
}

/// Runs the second expansion pass: RFC 6570 expansion with `vars`.
///
/// Supports the simple, reserved (`+`), fragment (`#`), label (`.`), path
/// segment (`/`), path parameter (`;`), query (`?`) and query continuation
/// (`&`) operators, comma-separated variable lists and `:n` prefix
/// modifiers. Variables missing from `vars` are omitted. Text outside
/// expressions and unterminated expressions are copied unchanged.
#[must_use]
pub fn expand(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        expand_expression(&mut out, &after[..close], vars);
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

fn expand_expression(out: &mut String, expression: &str, vars: &[(&str, &str)]) {
    let mut chars = expression.chars();
    let (operator, var_list) = match chars.next().and_then(Operator::for_char) {
        Some(op) => (op, chars.as_str()),
        None => (Operator::SIMPLE, expression),
    };

    let mut first = true;
    for varspec in var_list.split(',') {
        let varspec = varspec.trim().trim_end_matches('*');
        let (name, prefix) = match varspec.split_once(':') {
            Some((name, len)) => (name.trim(), len.trim().parse::<usize>().ok()),
            None => (varspec, None),
        };

        let Some(value) = lookup(vars, name) else {
            continue;
        };
        let value = prefix.map_or(value, |len| truncate_chars(value, len));

        out.push_str(if first {
            operator.first
        } else {
            operator.separator
        });
        first = false;

        if operator.named {
            out.push_str(name);
            if value.is_empty() {
                out.push_str(operator.if_empty);
                continue;
            }
            out.push('=');
        }

        if operator.allow_reserved {
            encode_reserved(out, value);
        } else {
            out.push_str(&urlencoding::encode(value));
        }
    }
}

fn lookup<'v>(vars: &[(&str, &'v str)], name: &str) -> Option<&'v str> {
    vars.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

fn truncate_chars(value: &str, len: usize) -> &str {
    value
        .char_indices()
        .nth(len)
        .map_or(value, |(idx, _)| &value[..idx])
}

const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

fn encode_reserved(out: &mut String, value: &str) {
    let bytes = value.as_bytes();
    for (idx, c) in value.char_indices() {
        let keep = c.is_ascii_alphanumeric() || "-._~".contains(c) || RESERVED.contains(c);
        let triplet = c == '%'
            && bytes.get(idx + 1).is_some_and(u8::is_ascii_hexdigit)
            && bytes.get(idx + 2).is_some_and(u8::is_ascii_hexdigit);

        if keep || triplet {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
}
