//! Generic configuration tree
//!
//! Build tools describe plugin configuration as nested elements. A
//! [`ConfigNode`] is that element tree, independent of the file format it
//! was read from. YAML maps onto it like XML would:
//!
//! ```text
//! additionalPluginDependencies:        <additionalPluginDependencies>
//!   - plugin:                            <plugin>
//!       groupId: org.mule                  <groupId>org.mule</groupId>
//! ```
//!
//! A sequence item that is a single-key mapping becomes a child element
//! named by that key; any other item becomes an `item` element.

use serde_yaml::Value;

use crate::common::string_utils::is_blank;

const SEQUENCE_ITEM: &str = "item";

/// One element of a configuration tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigNode {
    name: String,
    value: Option<String>,
    numeric: bool,
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            numeric: false,
            children: Vec::new(),
        }
    }

    #[allow(dead_code)] // used in tests
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[allow(dead_code)] // used in tests
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    #[allow(dead_code)] // used in tests
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the value was written as an unquoted YAML number
    ///
    /// Such values have already lost their original text: `1.10` reads as `1.1`.
    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    /// First child element with the given name
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Non-blank value of the first child element with the given name
    pub fn child_value(&self, name: &str) -> Option<&str> {
        self.child(name)
            .and_then(ConfigNode::value)
            .filter(|value| !is_blank(value))
    }

    /// Convert a YAML value into an element named `name`
    pub fn from_yaml(name: impl Into<String>, value: &Value) -> Self {
        let mut node = ConfigNode::new(name);
        match value {
            Value::Null => {}
            Value::Bool(b) => node.value = Some(b.to_string()),
            Value::Number(n) => {
                node.value = Some(n.to_string());
                node.numeric = true;
            }
            Value::String(s) => node.value = Some(s.clone()),
            Value::Sequence(items) => {
                node.children = items.iter().map(sequence_item).collect();
            }
            Value::Mapping(mapping) => {
                node.children = mapping
                    .iter()
                    .map(|(key, child)| ConfigNode::from_yaml(key_name(key), child))
                    .collect();
            }
            Value::Tagged(tagged) => return ConfigNode::from_yaml(node.name, &tagged.value),
        }
        node
    }
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

fn sequence_item(item: &Value) -> ConfigNode {
    if let Value::Mapping(mapping) = item {
        if mapping.len() == 1 {
            if let Some((key, value)) = mapping.iter().next() {
                return ConfigNode::from_yaml(key_name(key), value);
            }
        }
    }
    ConfigNode::from_yaml(SEQUENCE_ITEM, item)
}
