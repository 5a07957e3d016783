//! Scripted style operations
//!
//! Styles have no batch API, so each create or update is sent as a small
//! generated script. Generation goes through two steps: a [`StyleOperation`]
//! lowers to a list of [`Instruction`]s from a fixed set, and
//! [`render`] serializes that list to the remote scripting dialect. Tests can
//! assert on the instruction list instead of matching script text.

mod render;

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};

use crate::model::{Effect, Style, StyleKind, StyleProperties, TextProperties};

pub use render::render;

/// Whether a style is created or updated in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAction {
    Create,
    Update,
}

impl fmt::Display for StyleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleAction::Create => write!(f, "create"),
            StyleAction::Update => write!(f, "update"),
        }
    }
}

/// Font identity as the remote tool names it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

/// Map a numeric font weight to the remote tool's style name.
///
/// Unknown weights fall back to `Regular`.
pub fn font_style_for_weight(weight: u16) -> &'static str {
    match weight {
        100 => "Thin",
        200 => "Extra Light",
        300 => "Light",
        400 => "Regular",
        500 => "Medium",
        600 => "Semi Bold",
        700 => "Bold",
        800 => "Extra Bold",
        900 => "Black",
        _ => "Regular",
    }
}

/// One step of a generated style script
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Instantiate a new local style and bind it as `style`
    CreateStyle(StyleKind),
    /// Bind the existing local style named `name` as `style`, or throw
    FindStyle { kind: StyleKind, name: String },
    SetName(String),
    /// Await loading of a font before text properties are set
    LoadFont(FontName),
    SetProperty {
        property: &'static str,
        value: Value,
    },
}

/// A create or update of a single style
#[derive(Debug, Clone, PartialEq)]
pub enum StyleOperation {
    CreateEffect {
        name: String,
        effects: Vec<Effect>,
        description: Option<String>,
    },
    UpdateEffect {
        name: String,
        effects: Vec<Effect>,
        description: Option<String>,
    },
    CreateText {
        name: String,
        text: TextProperties,
        description: Option<String>,
    },
    UpdateText {
        name: String,
        text: TextProperties,
        description: Option<String>,
    },
}

impl StyleOperation {
    pub fn new(style: &Style, action: StyleAction) -> Self {
        let name = style.name.clone();
        let description = style.description.clone();
        match (&style.properties, action) {
            (StyleProperties::Effect(props), StyleAction::Create) => StyleOperation::CreateEffect {
                name,
                effects: props.effects.clone(),
                description,
            },
            (StyleProperties::Effect(props), StyleAction::Update) => StyleOperation::UpdateEffect {
                name,
                effects: props.effects.clone(),
                description,
            },
            (StyleProperties::Text(text), StyleAction::Create) => StyleOperation::CreateText {
                name,
                text: text.clone(),
                description,
            },
            (StyleProperties::Text(text), StyleAction::Update) => StyleOperation::UpdateText {
                name,
                text: text.clone(),
                description,
            },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StyleOperation::CreateEffect { name, .. }
            | StyleOperation::UpdateEffect { name, .. }
            | StyleOperation::CreateText { name, .. }
            | StyleOperation::UpdateText { name, .. } => name,
        }
    }

    /// Lower the operation to its instruction list
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut out = Vec::new();
        match self {
            StyleOperation::CreateEffect {
                name,
                effects,
                description,
            } => {
                out.push(Instruction::CreateStyle(StyleKind::Effect));
                out.push(Instruction::SetName(name.clone()));
                out.push(set("effects", effects_value(effects)));
                push_description(&mut out, description);
            }
            StyleOperation::UpdateEffect {
                name,
                effects,
                description,
            } => {
                out.push(Instruction::FindStyle {
                    kind: StyleKind::Effect,
                    name: name.clone(),
                });
                out.push(set("effects", effects_value(effects)));
                // Always set; an absent description clears the remote one
                out.push(set(
                    "description",
                    Value::String(description.clone().unwrap_or_default()),
                ));
            }
            StyleOperation::CreateText {
                name,
                text,
                description,
            } => {
                out.push(Instruction::CreateStyle(StyleKind::Text));
                out.push(Instruction::SetName(name.clone()));
                push_text(&mut out, text);
                push_description(&mut out, description);
            }
            StyleOperation::UpdateText {
                name,
                text,
                description,
            } => {
                out.push(Instruction::FindStyle {
                    kind: StyleKind::Text,
                    name: name.clone(),
                });
                push_text(&mut out, text);
                push_description(&mut out, description);
            }
        }
        out
    }
}

fn set(property: &'static str, value: Value) -> Instruction {
    Instruction::SetProperty { property, value }
}

fn push_description(out: &mut Vec<Instruction>, description: &Option<String>) {
    if let Some(description) = description {
        out.push(set("description", Value::String(description.clone())));
    }
}

fn push_text(out: &mut Vec<Instruction>, text: &TextProperties) {
    let font = FontName {
        family: text.font_family.clone(),
        style: font_style_for_weight(text.font_weight).to_string(),
    };
    out.push(Instruction::LoadFont(font.clone()));
    out.push(set(
        "fontName",
        json!({ "family": font.family, "style": font.style }),
    ));
    out.push(set("fontSize", json!(text.font_size)));
    out.push(set(
        "lineHeight",
        json!({ "unit": "PIXELS", "value": text.line_height }),
    ));
    out.push(set(
        "letterSpacing",
        json!({ "unit": "PIXELS", "value": text.letter_spacing }),
    ));
}

fn effects_value(effects: &[Effect]) -> Value {
    Value::Array(
        effects
            .iter()
            .map(|effect| {
                json!({
                    "type": effect.effect_type,
                    "color": effect.color,
                    "offset": effect.offset,
                    "radius": effect.radius,
                    "spread": effect.spread.unwrap_or(0.0),
                    "visible": true,
                    "blendMode": "NORMAL",
                })
            })
            .collect(),
    )
}

/// Generate the script that creates or updates `style`
pub fn generate_style_plugin_code(style: &Style, action: StyleAction) -> String {
    render(&StyleOperation::new(style, action).instructions())
}
