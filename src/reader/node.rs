pub enum NodeType {
    Delimiters,
    Template,
    Values,
}

pub fn get_node_type_by_name(name: &str) -> Option<NodeType> {
    match name {
        "delimiters" | "delims" => Some(NodeType::Delimiters),
        "template" | "text" => Some(NodeType::Template),
        "values" | "vars" => Some(NodeType::Values),
        _ => None,
    }
}
