//! Expected-state data model
//!
//! A [`TokenFile`] is the locally computed state that a sync run pushes to
//! the remote design tool: collections of mode-keyed [`Variable`]s plus
//! composite [`Style`]s. Identity is always the `name`; remote ids are never
//! used for diffing.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Primitive type of a variable's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolvedType {
    Float,
    Color,
    String,
    Boolean,
}

fn opaque() -> f64 {
    1.0
}

/// An RGBA color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// A single mode value of a variable.
///
/// Equality is structural: colors compare channel by channel and floats
/// compare exactly, with no rounding tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Boolean(bool),
    Float(f64),
    String(String),
    Color(Rgba),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Boolean(b) => write!(f, "{}", b),
            TokenValue::Float(n) => write!(f, "{}", n),
            TokenValue::String(s) => write!(f, "{:?}", s),
            TokenValue::Color(c) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a),
        }
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        TokenValue::Float(value)
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        TokenValue::Boolean(value)
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::String(value.to_string())
    }
}

impl From<Rgba> for TokenValue {
    fn from(value: Rgba) -> Self {
        TokenValue::Color(value)
    }
}

/// A named, mode-keyed primitive token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Hierarchical slash path, e.g. `space/100`. Unique within a sync call.
    pub name: String,
    pub resolved_type: ResolvedType,
    pub values_by_mode: BTreeMap<String, TokenValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Variable {
    /// Create a variable with no mode values
    pub fn new(name: impl Into<String>, resolved_type: ResolvedType) -> Self {
        Self {
            name: name.into(),
            resolved_type,
            values_by_mode: BTreeMap::new(),
            description: None,
        }
    }

    /// Set the value for a mode
    pub fn with_value(mut self, mode: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.values_by_mode.insert(mode.into(), value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Kind of a composite style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleKind {
    Effect,
    Text,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKind::Effect => write!(f, "Effect"),
            StyleKind::Text => write!(f, "Text"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// One shadow-like entry of an effect style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    pub offset: Offset,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectProperties {
    pub effects: Vec<Effect>,
}

/// Pre-resolved typography values; all lengths are absolute pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProperties {
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub line_height: f64,
    pub letter_spacing: f64,
}

/// Style payload, discriminated by the `type` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties", rename_all = "UPPERCASE")]
pub enum StyleProperties {
    Effect(EffectProperties),
    Text(TextProperties),
}

/// A composite remote object with no batch API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    #[serde(flatten)]
    pub properties: StyleProperties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Style {
    pub fn effect(name: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            name: name.into(),
            properties: StyleProperties::Effect(EffectProperties { effects }),
            description: None,
        }
    }

    pub fn text(name: impl Into<String>, properties: TextProperties) -> Self {
        Self {
            name: name.into(),
            properties: StyleProperties::Text(properties),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> StyleKind {
        match self.properties {
            StyleProperties::Effect(_) => StyleKind::Effect,
            StyleProperties::Text(_) => StyleKind::Text,
        }
    }
}

/// A group of variables sharing a mode axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub modes: Vec<String>,
    pub variables: Vec<Variable>,
}

/// The expected state pushed by a sync run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenFile {
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub styles: Vec<Style>,
}

/// Payload for the atomic bulk initialization call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupPayload {
    pub collections: Vec<Collection>,
}

impl TokenFile {
    /// Parse a token file from JSON
    ///
    /// # Example
    ///
    /// ```
    /// use tsync_core::TokenFile;
    ///
    /// let file = TokenFile::from_json(r#"{
    ///     "collections": [{
    ///         "name": "primitives",
    ///         "modes": ["default"],
    ///         "variables": [{
    ///             "name": "space/100",
    ///             "resolvedType": "FLOAT",
    ///             "valuesByMode": { "default": 8 }
    ///         }]
    ///     }]
    /// }"#).unwrap();
    ///
    /// assert_eq!(file.all_variables().len(), 1);
    /// assert!(file.styles.is_empty());
    /// ```
    pub fn from_json(content: &str) -> Result<Self> {
        let file: TokenFile = serde_json::from_str(content)?;
        Ok(file)
    }

    /// Load and parse a token file from disk
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::TokenFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check the name-uniqueness and mode invariants a sync run relies on
    pub fn validate(&self) -> Result<()> {
        let mut variable_names = HashSet::new();
        for collection in &self.collections {
            if collection.modes.is_empty() {
                return Err(Error::InvalidCollection {
                    collection: collection.name.clone(),
                    message: "no modes declared".to_string(),
                });
            }
            for variable in &collection.variables {
                if !variable_names.insert(variable.name.as_str()) {
                    return Err(Error::DuplicateVariable {
                        name: variable.name.clone(),
                    });
                }
                if let Some(mode) = variable
                    .values_by_mode
                    .keys()
                    .find(|mode| !collection.modes.contains(*mode))
                {
                    return Err(Error::InvalidCollection {
                        collection: collection.name.clone(),
                        message: format!(
                            "variable {} uses undeclared mode {}",
                            variable.name, mode
                        ),
                    });
                }
            }
        }

        let mut style_names = HashSet::new();
        for style in &self.styles {
            if !style_names.insert(style.name.as_str()) {
                return Err(Error::DuplicateStyle {
                    name: style.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Variables of every collection, concatenated in collection order
    pub fn all_variables(&self) -> Vec<Variable> {
        self.collections
            .iter()
            .flat_map(|c| c.variables.iter().cloned())
            .collect()
    }

    /// Build the payload for atomic initialization
    pub fn setup_payload(&self) -> SetupPayload {
        SetupPayload {
            collections: self.collections.clone(),
        }
    }
}
