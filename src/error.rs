use std::error::Error as _;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("text to format was not provided")]
    EmptyText,

    #[error("invalid delimiters '{left}' and '{right}': markers must not be empty")]
    InvalidDelimiters { left: String, right: String },

    #[error("template: unclosed action starting at byte {offset}, expected '{delimiter}'")]
    UnclosedAction { offset: usize, delimiter: String },

    #[error("template {text:?}: {message}")]
    Parse {
        text: String,
        message: String,
        #[source]
        source: tera::Error,
    },

    #[error("template: {message}")]
    Execute {
        message: String,
        #[source]
        source: tera::Error,
    },
}

impl RenderError {
    pub(crate) fn parse(text: &str, source: tera::Error) -> Self {
        RenderError::Parse {
            text: String::from(text),
            message: describe(&source),
            source,
        }
    }

    pub(crate) fn execute(source: tera::Error) -> Self {
        RenderError::Execute {
            message: describe(&source),
            source,
        }
    }

    /// True when the template text itself is malformed.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            RenderError::UnclosedAction { .. } | RenderError::Parse { .. }
        )
    }
}

/// An error whose description is a formatted message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormattedError(pub(crate) String);

impl FormattedError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

// Tera reports the useful part of a failure in the source chain, the top level
// only names the template. It is kept when there is nothing below it.
fn describe(error: &tera::Error) -> String {
    let Some(mut source) = error.source() else {
        return error.to_string();
    };

    let mut message = source.to_string();
    while let Some(cause) = source.source() {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause;
    }

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_skips_the_template_name() {
        let inner = tera::Error::msg("Variable `name` not found in context");
        let outer = tera::Error::chain("Failed to render 'message'", inner);

        assert_eq!(describe(&outer), "Variable `name` not found in context");
    }

    #[test]
    fn describe_walks_the_source_chain() {
        let innermost = tera::Error::msg("expected `}}`");
        let inner = tera::Error::chain("Syntax error", innermost);
        let outer = tera::Error::chain("Failed to parse 'message'", inner);

        assert_eq!(describe(&outer), "Syntax error: expected `}}`");
    }

    #[test]
    fn describe_keeps_a_lone_error() {
        assert_eq!(describe(&tera::Error::msg("bad")), "bad");
    }

    #[test]
    fn empty_text_message() {
        assert_eq!(
            RenderError::EmptyText.to_string(),
            "text to format was not provided"
        );
    }

    #[test]
    fn parse_kinds() {
        let unclosed = RenderError::UnclosedAction {
            offset: 0,
            delimiter: String::from("}"),
        };
        assert!(unclosed.is_parse());
        assert!(RenderError::parse("{", tera::Error::msg("bad")).is_parse());
        assert!(!RenderError::execute(tera::Error::msg("bad")).is_parse());
        assert!(!RenderError::EmptyText.is_parse());
    }
}
