//! # Rendering Module
//!
//! Read-only projections of a finished character for output.

pub mod sheet;

pub use sheet::*;

/// Output formats the sheet can be rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetFormat {
    #[default]
    Text,
    Json,
}

impl SheetFormat {
    /// Renders `sheet` in this format.
    pub fn render(self, sheet: &CharacterSheet<'_>) -> crate::NpcGenResult<String> {
        match self {
            SheetFormat::Text => Ok(sheet.to_string()),
            SheetFormat::Json => sheet.to_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{utils, CharacterBuilder, GenerationConfig, Generator};

    #[test]
    fn test_formats_render_the_same_character() {
        let config = GenerationConfig::for_testing(31);
        let mut rng = utils::create_rng(&config);
        let character = CharacterBuilder::new().generate(&config, &mut rng).unwrap();
        let sheet = CharacterSheet::new(&character);

        let text = SheetFormat::default().render(&sheet).unwrap();
        assert!(text.contains(&format!("HP: {}", character.hp)));

        let json = SheetFormat::Json.render(&sheet).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hp"], character.hp);
    }
}
