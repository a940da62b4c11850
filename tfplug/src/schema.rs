//! Schema types and builders for tfplug
//!
//! This module provides the schema system for defining resource and data source
//! schemas, including attribute types, nested blocks, and validation.

use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};
use crate::validator::Validator;
use std::collections::HashMap;
use std::sync::Arc;

/// AttributeType defines the type system for Terraform attributes
/// This must match Terraform's type system exactly
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number, // Always f64
    Bool,
    List(Box<AttributeType>),               // Ordered, allows duplicates
    Set(Box<AttributeType>),                // Unordered, no duplicates
    Map(Box<AttributeType>),                // String keys only
    Object(HashMap<String, AttributeType>), // Fixed structure
}

impl AttributeType {
    /// Whether a known, non-null value has this type
    pub fn accepts(&self, value: &Dynamic) -> bool {
        match (self, value) {
            (_, Dynamic::Null) | (_, Dynamic::Unknown) => true,
            (AttributeType::String, Dynamic::String(_)) => true,
            (AttributeType::Number, Dynamic::Number(_)) => true,
            (AttributeType::Bool, Dynamic::Bool(_)) => true,
            (AttributeType::List(elem), Dynamic::List(items))
            | (AttributeType::Set(elem), Dynamic::List(items)) => {
                items.iter().all(|item| elem.accepts(item))
            }
            (AttributeType::Map(elem), Dynamic::Map(entries)) => {
                entries.values().all(|item| elem.accepts(item))
            }
            (AttributeType::Object(fields), Dynamic::Map(entries)) => entries
                .iter()
                .all(|(k, v)| fields.get(k).is_some_and(|t| t.accepts(v))),
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Number => "number",
            AttributeType::Bool => "bool",
            AttributeType::List(_) => "list",
            AttributeType::Set(_) => "set",
            AttributeType::Map(_) => "map",
            AttributeType::Object(_) => "object",
        }
    }
}

/// Schema is returned by providers/resources/data sources
/// Version is used for state migration
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64,
    pub block: Block,
}

impl Schema {
    /// Validate a configuration value against the schema: required and
    /// computed-only attributes, value types, block counts and every
    /// attached validator
    pub fn validate(&self, config: &DynamicValue) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.block
            .validate_value(&config.value, &AttributePath::root(), &mut diagnostics);
        tracing::trace!(count = diagnostics.len(), "schema validation finished");
        diagnostics
    }

    /// Names of every attribute and block that forces replacement
    pub fn force_new_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.block.collect_force_new("", &mut paths);
        paths
    }
}

/// Block represents a configuration block
#[derive(Debug, Clone)]
pub struct Block {
    pub attributes: Vec<Attribute>,
    pub block_types: Vec<NestedBlock>,
    pub description: String,
    pub deprecated: bool,
}

impl Block {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            block_types: Vec::new(),
            description: String::new(),
            deprecated: false,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn nested_block(&self, name: &str) -> Option<&NestedBlock> {
        self.block_types.iter().find(|b| b.type_name == name)
    }

    fn validate_value(
        &self,
        value: &Dynamic,
        path: &AttributePath,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let empty = HashMap::new();
        let entries = match value {
            Dynamic::Map(entries) => entries,
            Dynamic::Null => &empty,
            Dynamic::Unknown => return,
            other => {
                diagnostics.push(
                    Diagnostic::error(
                        "Incorrect block value type",
                        format!("Expected an object, got {}", other.type_name()),
                    )
                    .with_attribute(path.clone()),
                );
                return;
            }
        };

        for attr in &self.attributes {
            let attr_path = path.clone().attribute(&attr.name);
            let attr_value = entries.get(&attr.name).unwrap_or(&Dynamic::Null);
            attr.validate_value(attr_value, &attr_path, diagnostics);
        }

        for block in &self.block_types {
            let block_path = path.clone().attribute(&block.type_name);
            let block_value = entries.get(&block.type_name).unwrap_or(&Dynamic::Null);
            block.validate_value(block_value, &block_path, diagnostics);
        }
    }

    fn collect_force_new(&self, prefix: &str, paths: &mut Vec<String>) {
        for attr in &self.attributes {
            if attr.force_new {
                paths.push(format!("{}{}", prefix, attr.name));
            }
        }
        for block in &self.block_types {
            let nested_prefix = format!("{}{}.", prefix, block.type_name);
            block.block.collect_force_new(&nested_prefix, paths);
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

/// Attribute represents a single configuration attribute
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// Changing the value replaces the remote object instead of updating it
    pub force_new: bool,
    pub validators: Vec<Arc<dyn Validator>>,
    /// Validators applied to every element of a list or set value
    pub element_validators: Vec<Arc<dyn Validator>>,
    pub deprecated: bool,
}

// Manual Debug implementation since validators don't implement Debug
impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field("force_new", &self.force_new)
            .field(
                "validators",
                &format!(
                    "{} validators",
                    self.validators.len() + self.element_validators.len()
                ),
            )
            .field("deprecated", &self.deprecated)
            .finish()
    }
}

impl Attribute {
    fn validate_value(
        &self,
        value: &Dynamic,
        path: &AttributePath,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if value.is_null() {
            if self.required {
                diagnostics.push(
                    Diagnostic::error(
                        "Missing required argument",
                        format!("The argument \"{}\" is required, but no definition was found.", self.name),
                    )
                    .with_attribute(path.clone()),
                );
            }
            return;
        }

        if matches!(value, Dynamic::Unknown) {
            return;
        }

        if self.computed && !self.optional && !self.required {
            diagnostics.push(
                Diagnostic::error(
                    "Value for unconfigurable attribute",
                    format!("Can't configure a value for \"{}\": its value will be decided automatically.", self.name),
                )
                .with_attribute(path.clone()),
            );
            return;
        }

        if !self.r#type.accepts(value) {
            diagnostics.push(
                Diagnostic::error(
                    "Incorrect attribute value type",
                    format!(
                        "Inappropriate value for attribute \"{}\": {} required, got {}.",
                        self.name,
                        self.r#type.name(),
                        value.type_name()
                    ),
                )
                .with_attribute(path.clone()),
            );
            return;
        }

        for validator in &self.validators {
            validator.validate(value, path, diagnostics);
        }

        if let Dynamic::List(items) = value {
            for (idx, item) in items.iter().enumerate() {
                let item_path = path.clone().index(idx as i64);
                for validator in &self.element_validators {
                    validator.validate(item, &item_path, diagnostics);
                }
            }
        }
    }
}

/// NestedBlock represents a nested configuration block
#[derive(Debug, Clone)]
pub struct NestedBlock {
    pub type_name: String,
    pub block: Block,
    pub nesting: NestingMode,
    pub min_items: i64,
    pub max_items: i64,
    pub computed: bool,
}

impl NestedBlock {
    fn validate_value(
        &self,
        value: &Dynamic,
        path: &AttributePath,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if matches!(value, Dynamic::Unknown) {
            return;
        }

        let single;
        let items: &[Dynamic] = match (self.nesting, value) {
            (_, Dynamic::Null) => &[],
            (NestingMode::List, Dynamic::List(items)) | (NestingMode::Set, Dynamic::List(items)) => {
                items
            }
            (NestingMode::Single, Dynamic::Map(_)) => {
                single = [value.clone()];
                &single
            }
            _ => {
                diagnostics.push(
                    Diagnostic::error(
                        "Incorrect block value type",
                        format!("Block \"{}\" has an unexpected shape", self.type_name),
                    )
                    .with_attribute(path.clone()),
                );
                return;
            }
        };

        if self.computed {
            if !items.is_empty() {
                diagnostics.push(
                    Diagnostic::error(
                        "Value for unconfigurable attribute",
                        format!("Can't configure a value for \"{}\": its value will be decided automatically.", self.type_name),
                    )
                    .with_attribute(path.clone()),
                );
            }
            return;
        }

        let count = items.len() as i64;
        if count < self.min_items {
            diagnostics.push(
                Diagnostic::error(
                    "Insufficient blocks",
                    format!(
                        "At least {} \"{}\" blocks are required.",
                        self.min_items, self.type_name
                    ),
                )
                .with_attribute(path.clone()),
            );
        }
        if self.max_items > 0 && count > self.max_items {
            diagnostics.push(
                Diagnostic::error(
                    "Too many blocks",
                    format!(
                        "No more than {} \"{}\" blocks are allowed.",
                        self.max_items, self.type_name
                    ),
                )
                .with_attribute(path.clone()),
            );
        }

        for (idx, item) in items.iter().enumerate() {
            let item_path = match self.nesting {
                NestingMode::Single => path.clone(),
                _ => path.clone().index(idx as i64),
            };
            self.block.validate_value(item, &item_path, diagnostics);
        }
    }
}

/// NestingMode defines how nested blocks are structured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NestingMode {
    Single,
    List,
    Set,
}

/// AttributeBuilder provides fluent API for building attributes
/// ALWAYS use this instead of constructing Attribute directly
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    /// Create a new attribute builder
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                force_new: false,
                validators: Vec::new(),
                element_validators: Vec::new(),
                deprecated: false,
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.attribute.force_new = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.attribute.deprecated = true;
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attribute.validators.push(Arc::new(validator));
        self
    }

    pub fn element_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attribute.element_validators.push(Arc::new(validator));
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// NestedBlockBuilder builds list, set and single nested blocks
pub struct NestedBlockBuilder {
    nested: NestedBlock,
}

impl NestedBlockBuilder {
    pub fn new(type_name: &str, nesting: NestingMode) -> Self {
        Self {
            nested: NestedBlock {
                type_name: type_name.to_string(),
                block: Block::new(),
                nesting,
                min_items: 0,
                max_items: 0,
                computed: false,
            },
        }
    }

    pub fn list(type_name: &str) -> Self {
        Self::new(type_name, NestingMode::List)
    }

    pub fn set(type_name: &str) -> Self {
        Self::new(type_name, NestingMode::Set)
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.nested.block.description = desc.to_string();
        self
    }

    /// Mark the block as required (at least one item)
    pub fn required(mut self) -> Self {
        self.nested.min_items = self.nested.min_items.max(1);
        self
    }

    /// Computed blocks are populated by the provider only
    pub fn computed(mut self) -> Self {
        self.nested.computed = true;
        self
    }

    pub fn max_items(mut self, max: i64) -> Self {
        self.nested.max_items = max;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.nested.block.attributes.push(attr);
        self
    }

    pub fn block(mut self, block: NestedBlock) -> Self {
        self.nested.block.block_types.push(block);
        self
    }

    pub fn build(self) -> NestedBlock {
        self.nested
    }
}

/// SchemaBuilder provides fluent API for building schemas
/// ALWAYS use this for consistency
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            schema: Schema {
                version: 0,
                block: Block::new(),
            },
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.schema.version = version;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.schema.block.attributes.push(attr);
        self
    }

    pub fn block(mut self, block: NestedBlock) -> Self {
        self.schema.block.block_types.push(block);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.schema.block.description = desc.to_string();
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.schema.block.deprecated = true;
        self
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl std::default::Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
