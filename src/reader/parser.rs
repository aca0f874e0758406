use super::{node, MessageFile};
use crate::templater::Delimiters;
use crate::values::Value;
use kdl::{KdlDocument, KdlNode, KdlValue};
use log::trace;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ParserError(pub String, pub ParserErrorData);

#[derive(Debug, Clone, PartialEq)]
pub enum ParserErrorData {
    UnknownNode { name: String },
    MissingArgument { name: String },
    InvalidType { name: String },
    InvalidDelimiters,
}

pub fn parse_node(node: &KdlNode, message_file: &mut MessageFile) -> Result<(), ParserError> {
    let node_name = node.name().value();
    let Some(node_type) = node::get_node_type_by_name(node_name) else {
        return Err(ParserError(
            format!("Unknown node '{node_name}'"),
            ParserErrorData::UnknownNode {
                name: node_name.to_string(),
            },
        ));
    };

    match node_type {
        node::NodeType::Delimiters => parse_delimiters(node, message_file),
        node::NodeType::Template => parse_template(node, message_file),
        node::NodeType::Values => parse_values(node, message_file),
    }
}

pub fn parse_delimiters(node: &KdlNode, message_file: &mut MessageFile) -> Result<(), ParserError> {
    let left = node.get("left").or_else(|| node.get(0));
    let right = node.get("right").or_else(|| node.get(1));

    let (Some(left), Some(right)) = (left, right) else {
        return Err(ParserError(
            String::from("Delimiters need a left and a right marker"),
            ParserErrorData::MissingArgument {
                name: String::from(if left.is_none() { "left" } else { "right" }),
            },
        ));
    };

    let (Some(left), Some(right)) = (left.as_string(), right.as_string()) else {
        return Err(ParserError(
            String::from("Delimiters must be strings"),
            ParserErrorData::InvalidType {
                name: String::from("delimiters"),
            },
        ));
    };

    let delimiters = Delimiters::new(left, right).map_err(|e| {
        ParserError(e.to_string(), ParserErrorData::InvalidDelimiters)
    })?;

    message_file.delimiters = Some(delimiters);

    Ok(())
}

pub fn parse_template(node: &KdlNode, message_file: &mut MessageFile) -> Result<(), ParserError> {
    let Some(text) = node.get(0) else {
        return Err(ParserError(
            String::from("Missing argument 'text'"),
            ParserErrorData::MissingArgument {
                name: String::from("text"),
            },
        ));
    };

    let Some(text) = text.as_string() else {
        return Err(ParserError(
            String::from("Template must be a string"),
            ParserErrorData::InvalidType {
                name: String::from("template"),
            },
        ));
    };

    message_file.template = Some(String::from(text));

    Ok(())
}

pub fn parse_values(node: &KdlNode, message_file: &mut MessageFile) -> Result<(), ParserError> {
    let Some(children) = node.children() else {
        return Ok(());
    };

    for child in children.nodes() {
        let name = child.name().value();
        let value = parse_value(child)?;
        trace!("Value '{}' = {:?}", name, value);

        message_file.values.set(name, value);
    }

    Ok(())
}

/// A node with an argument is a scalar. A node with children is a list when
/// every child is named `-`, a map otherwise.
fn parse_value(node: &KdlNode) -> Result<Value, ParserError> {
    let name = node.name().value();

    if let Some(children) = node.children() {
        return parse_value_children(children);
    }

    match node.entries().iter().find(|e| e.name().is_none()) {
        Some(entry) => kdl_value_to_value(name, entry.value()),
        None => Err(ParserError(
            format!("Value '{name}' is missing"),
            ParserErrorData::MissingArgument {
                name: name.to_string(),
            },
        )),
    }
}

fn parse_value_children(children: &KdlDocument) -> Result<Value, ParserError> {
    let nodes = children.nodes();

    if !nodes.is_empty() && nodes.iter().all(|n| n.name().value() == "-") {
        let items = nodes
            .iter()
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()?;

        return Ok(Value::List(items));
    }

    let mut map = BTreeMap::new();
    for child in nodes {
        map.insert(child.name().value().to_string(), parse_value(child)?);
    }

    Ok(Value::Map(map))
}

fn kdl_value_to_value(name: &str, value: &KdlValue) -> Result<Value, ParserError> {
    match value {
        KdlValue::String(s) => Ok(Value::String(s.clone())),
        KdlValue::Integer(i) => i64::try_from(*i).map(Value::Int).map_err(|_| {
            ParserError(
                format!("Integer value '{name}' is out of range"),
                ParserErrorData::InvalidType {
                    name: name.to_string(),
                },
            )
        }),
        KdlValue::Float(f) => Ok(Value::Float(*f)),
        KdlValue::Bool(b) => Ok(Value::Bool(*b)),
        KdlValue::Null => Ok(Value::Null),
    }
}
