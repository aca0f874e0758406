use crate::error::RenderError;
use crate::values::Values;
use log::{debug, trace};
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "message";

/// Actions starting with one of these words are tera statements rather than
/// expressions.
const STATEMENTS: &[&str] = &[
    "if", "elif", "else", "endif", "for", "endfor", "break", "continue", "set", "set_global",
    "filter", "endfilter",
];

/// The opening and closing markers that bound an action in template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    left: String,
    right: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            left: String::from("{"),
            right: String::from("}"),
        }
    }
}

impl Delimiters {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Result<Self, RenderError> {
        let (left, right) = (left.into(), right.into());

        if left.is_empty() || right.is_empty() {
            return Err(RenderError::InvalidDelimiters { left, right });
        }

        Ok(Self { left, right })
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }
}

/// Renders template text through tera, using its own pair of delimiters.
#[derive(Debug, Clone, Default)]
pub struct Templater {
    delimiters: Delimiters,
}

impl Templater {
    pub fn new(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn render(&self, text: &str, values: &Values) -> Result<String, RenderError> {
        let source = self.translate(text)?;
        trace!("Translated template '{}' to '{}'", text, source);

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, &source)
            .map_err(|e| RenderError::parse(text, e))?;

        let mut context = Context::new();
        for (key, value) in values {
            context.insert(key.as_str(), value);
        }

        debug!("Rendering template with {} values", values.len());

        tera.render(TEMPLATE_NAME, &context)
            .map_err(RenderError::execute)
    }

    /// Rewrites every action bounded by the configured delimiters into a tera
    /// statement or expression. Every `{` in literal text is emitted as an
    /// expression of its own, so literal text never opens a tera tag.
    fn translate(&self, text: &str) -> Result<String, RenderError> {
        let left = self.delimiters.left.as_str();
        let right = self.delimiters.right.as_str();

        let mut out = String::with_capacity(text.len() + 16);
        let mut rest = text;
        let mut offset = 0;

        while let Some(start) = rest.find(left) {
            push_literal(&mut out, &rest[..start]);

            let action_start = start + left.len();
            let action = &rest[action_start..];
            let Some(end) = find_closing(action, right) else {
                return Err(RenderError::UnclosedAction {
                    offset: offset + start,
                    delimiter: String::from(right),
                });
            };

            let body = action[..end].trim();
            match is_statement(body) {
                true => {
                    out.push_str("{% ");
                    out.push_str(body);
                    out.push_str(" %}");
                }
                false => {
                    out.push_str("{{ ");
                    out.push_str(body);
                    out.push_str(" }}");
                }
            }

            let consumed = action_start + end + right.len();
            offset += consumed;
            rest = &rest[consumed..];
        }

        push_literal(&mut out, rest);

        Ok(out)
    }
}

fn push_literal(out: &mut String, literal: &str) {
    let mut parts = literal.split('{');

    if let Some(first) = parts.next() {
        out.push_str(first);
    }

    for part in parts {
        out.push_str(r#"{{ "{" }}"#);
        out.push_str(part);
    }
}

fn is_statement(body: &str) -> bool {
    let word = body
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .next()
        .unwrap_or_default();

    STATEMENTS.contains(&word)
}

/// Byte offset of the first closing marker in `action` that is not inside a
/// quoted string.
fn find_closing(action: &str, right: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in action.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        if action[i..].starts_with(right) {
            return Some(i);
        }

        if matches!(c, '"' | '\'' | '`') {
            quote = Some(c);
        }
    }

    None
}
