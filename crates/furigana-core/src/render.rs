//! Markup for aligned units.
//!
//! Every renderer shares one rule: a unit is printed plain when it has no
//! reading, an empty reading, or a reading identical to its base.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::RenderSettings;
use crate::unit::AlignmentUnit;

pub trait Renderer {
    fn render_unit(&self, unit: &AlignmentUnit, out: &mut String);

    fn render_line(&self, units: &[AlignmentUnit]) -> String {
        let mut out = String::new();
        for unit in units {
            self.render_unit(unit, &mut out);
        }
        out
    }
}

/// `<ruby=READING>BASE</ruby>`
pub struct RubyTagRenderer;

impl Renderer for RubyTagRenderer {
    fn render_unit(&self, unit: &AlignmentUnit, out: &mut String) {
        match unit.visible_reading() {
            Some(reading) => {
                out.push_str("<ruby=");
                out.push_str(reading);
                out.push('>');
                out.push_str(&unit.base);
                out.push_str("</ruby>");
            }
            None => out.push_str(&unit.base),
        }
    }
}

/// `{BASE|READING}`, the furigana syntax of markdown note vaults.
pub struct BraceRenderer;

impl Renderer for BraceRenderer {
    fn render_unit(&self, unit: &AlignmentUnit, out: &mut String) {
        match unit.visible_reading() {
            Some(reading) => {
                out.push('{');
                out.push_str(&unit.base);
                out.push('|');
                out.push_str(reading);
                out.push('}');
            }
            None => out.push_str(&unit.base),
        }
    }
}

/// A run of a word-processor paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocRun {
    Text { text: String, size_pt: u32 },
    Field { instruction: String, size_pt: u32 },
}

/// Word `EQ` fields that stack the reading over the base.
#[derive(Debug, Clone)]
pub struct EqFieldRenderer {
    pub font_name: String,
    pub base_font_pt: u32,
    pub ruby_hps: u32,
    pub ruby_raise_pt: u32,
}

impl EqFieldRenderer {
    pub fn from_settings(s: &RenderSettings) -> Self {
        Self {
            font_name: s.font_name.clone(),
            base_font_pt: s.base_font_pt,
            ruby_hps: s.ruby_hps,
            ruby_raise_pt: s.ruby_raise_pt,
        }
    }

    /// Field instruction text for one annotated unit.
    pub fn instruction(&self, base: &str, reading: &str) -> String {
        format!(
            "EQ \\* jc2 \\* \"Font:{}\" \\* hps{} \\o\\ad(\\s\\up {}({}),{})",
            self.font_name, self.ruby_hps, self.ruby_raise_pt, reading, base
        )
    }

    /// Paragraph runs for a document writer: plain runs and field runs, all
    /// at the base font size.
    pub fn runs(&self, units: &[AlignmentUnit]) -> Vec<DocRun> {
        units
            .iter()
            .map(|unit| match unit.visible_reading() {
                Some(reading) => DocRun::Field {
                    instruction: self.instruction(&unit.base, reading),
                    size_pt: self.base_font_pt,
                },
                None => DocRun::Text {
                    text: unit.base.clone(),
                    size_pt: self.base_font_pt,
                },
            })
            .collect()
    }
}

impl Renderer for EqFieldRenderer {
    /// Fields are written in field-code view, `{ EQ ... }`.
    fn render_unit(&self, unit: &AlignmentUnit, out: &mut String) {
        match unit.visible_reading() {
            Some(reading) => {
                out.push_str("{ ");
                out.push_str(&self.instruction(&unit.base, reading));
                out.push_str(" }");
            }
            None => out.push_str(&unit.base),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    RubyTag,
    Brace,
    EqField,
}

impl RenderFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderFormat::RubyTag => "ruby_tag",
            RenderFormat::Brace => "brace",
            RenderFormat::EqField => "eq_field",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown render format: {0} (expected ruby_tag, brace or eq_field)")]
pub struct ParseRenderFormatError(String);

impl FromStr for RenderFormat {
    type Err = ParseRenderFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ruby_tag" | "ruby" => Ok(RenderFormat::RubyTag),
            "brace" | "obsidian" => Ok(RenderFormat::Brace),
            "eq_field" | "eq" => Ok(RenderFormat::EqField),
            _ => Err(ParseRenderFormatError(s.to_string())),
        }
    }
}

pub fn renderer_for(format: RenderFormat, settings: &RenderSettings) -> Box<dyn Renderer + Send + Sync> {
    match format {
        RenderFormat::RubyTag => Box::new(RubyTagRenderer),
        RenderFormat::Brace => Box::new(BraceRenderer),
        RenderFormat::EqField => Box::new(EqFieldRenderer::from_settings(settings)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> Vec<AlignmentUnit> {
        vec![
            AlignmentUnit::annotated("会", "あ"),
            AlignmentUnit::plain("おう"),
            AlignmentUnit::annotated("漢", "漢"),
        ]
    }

    fn eq() -> EqFieldRenderer {
        EqFieldRenderer {
            font_name: "Noto Sans JP Light".to_string(),
            base_font_pt: 16,
            ruby_hps: 18,
            ruby_raise_pt: 17,
        }
    }

    #[test]
    fn ruby_tag() {
        assert_eq!(RubyTagRenderer.render_line(&units()), "<ruby=あ>会</ruby>おう漢");
    }

    #[test]
    fn brace() {
        assert_eq!(BraceRenderer.render_line(&units()), "{会|あ}おう漢");
    }

    #[test]
    fn empty_line_renders_empty() {
        assert_eq!(RubyTagRenderer.render_line(&[]), "");
        assert_eq!(BraceRenderer.render_line(&[]), "");
    }

    #[test]
    fn eq_instruction() {
        assert_eq!(
            eq().instruction("会", "あ"),
            r#"EQ \* jc2 \* "Font:Noto Sans JP Light" \* hps18 \o\ad(\s\up 17(あ),会)"#
        );
    }

    #[test]
    fn eq_runs_dedup() {
        let runs = eq().runs(&units());
        assert_eq!(runs.len(), 3);
        assert!(matches!(runs[0], DocRun::Field { size_pt: 16, .. }));
        assert_eq!(
            runs[2],
            DocRun::Text {
                text: "漢".to_string(),
                size_pt: 16
            }
        );
    }

    #[test]
    fn eq_render_line_uses_field_codes() {
        let line = eq().render_line(&units()[..2]);
        assert!(line.starts_with("{ EQ "));
        assert!(line.ends_with(" }おう"));
    }

    #[test]
    fn format_from_str() {
        assert_eq!("ruby_tag".parse::<RenderFormat>().unwrap(), RenderFormat::RubyTag);
        assert_eq!("obsidian".parse::<RenderFormat>().unwrap(), RenderFormat::Brace);
        assert_eq!("eq".parse::<RenderFormat>().unwrap(), RenderFormat::EqField);
        assert!("html".parse::<RenderFormat>().is_err());
        assert_eq!(RenderFormat::EqField.to_string(), "eq_field");
    }
}
