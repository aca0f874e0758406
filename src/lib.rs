//! Simple string templates.
//!
//! A [`Message`] pairs template text with a store of named [`Values`]. Actions
//! in the text are bounded by a pair of [`Delimiters`] (`{` and `}` unless
//! configured otherwise) and evaluated by [tera](https://keats.github.io/tera/):
//!
//! ```
//! let mut msg = slump::Message::new("{lang} {version} is released");
//! msg.add([("lang", "Go"), ("version", "1.7")]);
//!
//! assert_eq!(msg.render().unwrap(), "Go 1.7 is released");
//! ```
//!
//! [`format()`] and [`err()`] cover the one-shot case.

pub mod error;
pub mod message;
pub mod reader;
pub mod templater;
pub mod values;

pub use error::{FormattedError, RenderError};
pub use message::{err, format, Message};
pub use templater::{Delimiters, Templater};
pub use values::{Value, Values};
