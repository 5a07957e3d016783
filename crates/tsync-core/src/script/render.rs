//! Serializer from style instructions to plugin script text

use serde_json::Value;

use super::Instruction;

/// Quote a string as a script literal; JSON string syntax is valid here
fn string_literal(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Render an instruction list as a self-invoking async script.
///
/// The script binds the target style to `style` and resolves to its id.
/// Output depends only on the instruction list.
pub fn render(instructions: &[Instruction]) -> String {
    let mut lines = vec!["(async () => {".to_string()];

    for instruction in instructions {
        match instruction {
            Instruction::CreateStyle(kind) => {
                lines.push(format!("  const style = figma.create{}Style();", kind));
            }
            Instruction::FindStyle { kind, name } => {
                lines.push(format!(
                    "  const style = figma.getLocal{}Styles().find((s) => s.name === {});",
                    kind,
                    string_literal(name)
                ));
                lines.push("  if (!style) {".to_string());
                lines.push(format!(
                    "    throw new Error({});",
                    string_literal(&format!("{} style not found: {}", kind, name))
                ));
                lines.push("  }".to_string());
            }
            Instruction::SetName(name) => {
                lines.push(format!("  style.name = {};", string_literal(name)));
            }
            Instruction::LoadFont(font) => {
                lines.push(format!(
                    "  await figma.loadFontAsync({{ family: {}, style: {} }});",
                    string_literal(&font.family),
                    string_literal(&font.style)
                ));
            }
            Instruction::SetProperty { property, value } => {
                lines.push(format!("  style.{} = {};", property, value));
            }
        }
    }

    lines.push("  return style.id;".to_string());
    lines.push("})()".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effect, EffectType, Offset, Rgba, Style, StyleKind, TextProperties};
    use crate::script::{FontName, StyleAction, generate_style_plugin_code};

    #[test]
    fn test_render_effect_create() {
        let style = Style::effect(
            "shadow/sm",
            vec![Effect {
                effect_type: EffectType::DropShadow,
                offset: Offset { x: 0.0, y: 1.0 },
                radius: 2.0,
                spread: None,
                color: Rgba::new(0.0, 0.0, 0.0, 0.05),
            }],
        );

        let code = generate_style_plugin_code(&style, StyleAction::Create);

        insta::assert_snapshot!(code, @r#"
        (async () => {
          const style = figma.createEffectStyle();
          style.name = "shadow/sm";
          style.effects = [{"blendMode":"NORMAL","color":{"a":0.05,"b":0.0,"g":0.0,"r":0.0},"offset":{"x":0.0,"y":1.0},"radius":2.0,"spread":0.0,"type":"DROP_SHADOW","visible":true}];
          return style.id;
        })()
        "#);
    }

    #[test]
    fn test_render_find_throws_when_missing() {
        let code = render(&[Instruction::FindStyle {
            kind: StyleKind::Text,
            name: "body/md".to_string(),
        }]);

        assert!(code.contains("figma.getLocalTextStyles().find((s) => s.name === \"body/md\")"));
        assert!(code.contains("throw new Error(\"Text style not found: body/md\");"));
        assert!(!code.contains("createTextStyle"));
    }

    #[test]
    fn test_render_escapes_names() {
        let code = render(&[Instruction::SetName("quote \"x\"\nline".to_string())]);
        assert!(code.contains(r#"style.name = "quote \"x\"\nline";"#), "got: {}", code);
    }

    #[test]
    fn test_render_load_font_is_awaited() {
        let code = render(&[Instruction::LoadFont(FontName {
            family: "Inter".to_string(),
            style: "Semi Bold".to_string(),
        })]);
        assert!(code.contains(r#"await figma.loadFontAsync({ family: "Inter", style: "Semi Bold" });"#));
    }

    #[test]
    fn test_render_text_update_uses_absolute_pixels() {
        let style = Style::text(
            "body/md",
            TextProperties {
                font_family: "Inter".to_string(),
                font_size: 16.0,
                font_weight: 400,
                line_height: 24.0,
                letter_spacing: 0.0,
            },
        )
        .with_description("Body copy");

        let code = generate_style_plugin_code(&style, StyleAction::Update);

        assert!(code.contains(r#"style.lineHeight = {"unit":"PIXELS","value":24.0};"#));
        assert!(code.contains(r#"style.letterSpacing = {"unit":"PIXELS","value":0.0};"#));
        assert!(code.contains(r#"style.fontSize = 16.0;"#));
        assert!(code.contains(r#"style.description = "Body copy";"#));
        assert!(code.ends_with("})()"));
    }
}
