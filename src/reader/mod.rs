mod node;
mod parser;

use camino::Utf8Path;
use kdl::KdlDocument;
use log::debug;
use std::{fs, io};
use thiserror::Error;

use crate::message::Message;
use crate::templater::Delimiters;
use crate::values::Values;

pub use parser::{ParserError, ParserErrorData};

/// Contents of a message file.
#[derive(Debug, Default)]
pub struct MessageFile {
    pub delimiters: Option<Delimiters>,
    pub template: Option<String>,
    pub values: Values,
}

impl MessageFile {
    pub fn into_message(self) -> Message {
        let mut message = Message::new(self.template.unwrap_or_default())
            .with_delimiters(self.delimiters.unwrap_or_default());
        message.add(self.values);

        message
    }
}

#[derive(Debug, Error)]
pub enum MessageFileReadError {
    #[error("unable to read message file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid KDL: {0}")]
    Syntax(#[from] kdl::KdlError),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

pub fn open_and_read(path: &Utf8Path) -> Result<MessageFile, MessageFileReadError> {
    debug!("Reading message file {}", path);
    let content = fs::read_to_string(path)?;

    read(&content)
}

pub fn read(content: &str) -> Result<MessageFile, MessageFileReadError> {
    let doc: KdlDocument = content.parse()?;
    let mut message_file = MessageFile::default();

    for node in doc.nodes() {
        parser::parse_node(node, &mut message_file)?;
    }

    Ok(message_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::Value;
    use std::io::Write;

    const FILE: &str = r#"
delimiters "<%" "%>"
template "<% lang %> <% version %> is released"
values {
    lang "Go"
    version "1.7"
}
"#;

    #[test]
    fn reads_and_renders() {
        let file = read(FILE).unwrap();

        assert_eq!(file.values.get("lang"), Some(&Value::from("Go")));
        assert_eq!(file.into_message().to_string(), "Go 1.7 is released");
    }

    #[test]
    fn open_and_read_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(FILE.as_bytes()).unwrap();

        let path = Utf8Path::from_path(tmp.path()).unwrap();
        let file = open_and_read(path).unwrap();

        assert_eq!(file.delimiters, Some(Delimiters::new("<%", "%>").unwrap()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("missing.kdl");

        assert!(matches!(
            open_and_read(&path),
            Err(MessageFileReadError::Io(_))
        ));
    }

    #[test]
    fn invalid_kdl_is_syntax_error() {
        assert!(matches!(
            read("values {"),
            Err(MessageFileReadError::Syntax(_))
        ));
    }

    #[test]
    fn empty_file_gives_empty_message() {
        let message = read("").unwrap().into_message();

        assert_eq!(message.text(), "");
        assert!(message.is_empty());
    }
}
