//! Builders for token-sync test data.

use tsync_core::{
    Collection, Effect, EffectType, Offset, ResolvedType, Rgba, Style, TextProperties, TokenFile,
    Variable,
};

/// Mode name used by single-mode fixtures
pub const DEFAULT_MODE: &str = "default";

/// A FLOAT variable with one value in [`DEFAULT_MODE`]
pub fn float_var(name: &str, value: f64) -> Variable {
    Variable::new(name, ResolvedType::Float).with_value(DEFAULT_MODE, value)
}

/// `count` FLOAT variables named `{prefix}/0000`, `{prefix}/0001`, ...
pub fn numbered_vars(prefix: &str, count: usize) -> Vec<Variable> {
    (0..count)
        .map(|i| float_var(&format!("{}/{:04}", prefix, i), i as f64))
        .collect()
}

/// A token file with one single-mode collection and no styles
pub fn token_file(variables: Vec<Variable>) -> TokenFile {
    TokenFile {
        collections: vec![Collection {
            name: "primitives".to_string(),
            modes: vec![DEFAULT_MODE.to_string()],
            variables,
        }],
        styles: Vec::new(),
    }
}

/// A token file with one single-mode collection and the given styles
pub fn token_file_with_styles(variables: Vec<Variable>, styles: Vec<Style>) -> TokenFile {
    TokenFile {
        styles,
        ..token_file(variables)
    }
}

/// A one-layer drop shadow effect style
pub fn shadow_style(name: &str) -> Style {
    Style::effect(
        name,
        vec![Effect {
            effect_type: EffectType::DropShadow,
            offset: Offset { x: 0.0, y: 2.0 },
            radius: 4.0,
            spread: Some(0.0),
            color: Rgba::new(0.0, 0.0, 0.0, 0.1),
        }],
    )
}

/// A text style in Inter at the given size and weight
pub fn text_style(name: &str, size: f64, weight: u16) -> Style {
    Style::text(
        name,
        TextProperties {
            font_family: "Inter".to_string(),
            font_size: size,
            font_weight: weight,
            line_height: size * 1.5,
            letter_spacing: 0.0,
        },
    )
}
