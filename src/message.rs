use crate::error::{FormattedError, RenderError};
use crate::templater::{Delimiters, Templater};
use crate::values::{Value, Values};
use log::debug;
use std::fmt;

/// Template text paired with the values substituted into it.
///
/// ```
/// let mut msg = slump::Message::new("Hello, {name}");
/// msg.set("name", "Gopher");
///
/// assert_eq!(msg.to_string(), "Hello, Gopher");
/// ```
///
/// Rendering goes through [`Message::render`]. The [`Display`](fmt::Display)
/// implementation never fails: when rendering does, it writes the error's
/// description instead. The same text is what a `Message` reports when used
/// as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    text: String,
    values: Values,
    delimiters: Delimiters,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            values: Values::new(),
            delimiters: Delimiters::default(),
        }
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn set_delimiters(&mut self, delimiters: Delimiters) {
        self.delimiters = delimiters;
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Values {
        &mut self.values
    }

    pub fn add<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.add(values);
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn del(&mut self, key: &str) {
        self.values.del(key);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn keys(&self) -> Vec<&str> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has_values(&self) -> bool {
        self.values.has_values()
    }

    /// Renders the text against the values.
    ///
    /// Empty text is an error. Text with no values is returned as is, without
    /// being parsed, so plain text never fails.
    pub fn render(&self) -> Result<String, RenderError> {
        if self.text.is_empty() {
            return Err(RenderError::EmptyText);
        }

        if !self.has_values() {
            debug!("No values set, returning text unchanged");
            return Ok(self.text.clone());
        }

        Templater::new(self.delimiters.clone()).render(&self.text, &self.values)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render() {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Message {}

/// Formats `text` with `values` in one go.
///
/// ```
/// let s = slump::format("Hello, {name}", [("name", "Gopher")]);
/// assert_eq!(s, "Hello, Gopher");
/// ```
pub fn format<I, K, V>(text: &str, values: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut m = Message::new(text);
    m.add(values);
    m.to_string()
}

/// Formats `text` with `values` into an error.
///
/// ```
/// let path = "filename.txt";
/// let err = slump::err("no such file or directory: {path}", [("path", path)]);
///
/// assert_eq!(err.to_string(), "no such file or directory: filename.txt");
/// ```
pub fn err<I, K, V>(text: &str, values: I) -> FormattedError
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    FormattedError(format(text, values))
}
