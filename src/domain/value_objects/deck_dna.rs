//! Deck DNA - the extracted style profile of a reference deck
//!
//! Every section is lenient on input: a provider response that omits a
//! section (or a field) gets the house default for it. The profile is not
//! validated beyond that.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckDna {
    pub layout: LayoutRules,
    pub typography: TypographyRules,
    pub color_palette: ColorPalette,
    pub exhibits: ExhibitConventions,
    pub narrative: NarrativeConventions,
    pub compliance: ComplianceConventions,
    pub slide_archetypes: SlideArchetypes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutRules {
    #[serde(deserialize_with = "grid_columns_or_default")]
    pub grid_columns: u32,
    pub margins: String,
    pub title_position: String,
    pub content_density: String,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            grid_columns: DEFAULT_GRID_COLUMNS,
            margins: "0.5in all sides".to_string(),
            title_position: "top-left".to_string(),
            content_density: "high".to_string(),
        }
    }
}

const DEFAULT_GRID_COLUMNS: u32 = 12;

fn grid_columns_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::optional_count(deserializer)?.unwrap_or(DEFAULT_GRID_COLUMNS))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyRules {
    pub heading_font: String,
    pub body_font: String,
    pub heading_size: String,
    pub body_size: String,
}

impl Default for TypographyRules {
    fn default() -> Self {
        Self {
            heading_font: "Arial".to_string(),
            body_font: "Arial".to_string(),
            heading_size: "24pt".to_string(),
            body_size: "12pt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub text: String,
    pub background: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#003366".to_string(),
            secondary: "#0066CC".to_string(),
            accent: "#FF9900".to_string(),
            text: "#333333".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

/// How charts and tables are drawn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExhibitConventions {
    pub chart_style: String,
    pub table_style: String,
    pub number_format: String,
    pub source_line: bool,
}

impl Default for ExhibitConventions {
    fn default() -> Self {
        Self {
            chart_style: "clean, minimal gridlines".to_string(),
            table_style: "banded rows, right-aligned numbers".to_string(),
            number_format: "$M with one decimal".to_string(),
            source_line: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NarrativeConventions {
    pub flow: String,
    pub action_titles: bool,
    pub executive_summary_first: bool,
}

impl Default for NarrativeConventions {
    fn default() -> Self {
        Self {
            flow: "situation-complication-resolution".to_string(),
            action_titles: true,
            executive_summary_first: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceConventions {
    pub citation_format: String,
    pub disclaimer: String,
    pub confidentiality_marking: bool,
}

impl Default for ComplianceConventions {
    fn default() -> Self {
        Self {
            citation_format: "Source: [Provider], [Date]".to_string(),
            disclaimer: "Confidential - for discussion purposes only".to_string(),
            confidentiality_marking: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SlideArchetypes(pub Vec<String>);

impl Default for SlideArchetypes {
    fn default() -> Self {
        Self(
            [
                "title",
                "executive-summary",
                "section-divider",
                "chart-with-takeaways",
                "table",
                "two-column-comparison",
                "appendix",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults_for_missing_sections() {
        let dna: DeckDna = serde_json::from_value(serde_json::json!({
            "typography": {"headingFont": "Georgia"},
            "slideArchetypes": ["title", "chart"]
        }))
        .unwrap();

        assert_eq!(dna.typography.heading_font, "Georgia");
        assert_eq!(dna.typography.body_font, "Arial");
        assert_eq!(dna.color_palette, ColorPalette::default());
        assert_eq!(dna.slide_archetypes.0, vec!["title", "chart"]);
    }

    #[test]
    fn test_grid_columns_accepts_string_and_falls_back_when_unreadable() {
        let dna: DeckDna = serde_json::from_value(serde_json::json!({
            "layout": {"gridColumns": "16", "margins": "1in"}
        }))
        .unwrap();
        assert_eq!(dna.layout.grid_columns, 16);
        assert_eq!(dna.layout.margins, "1in");

        let dna: DeckDna = serde_json::from_value(serde_json::json!({
            "layout": {"gridColumns": "wide"}
        }))
        .unwrap();
        assert_eq!(dna.layout.grid_columns, DEFAULT_GRID_COLUMNS);
    }

    #[test]
    fn test_default_profile_lists_archetypes() {
        assert!(!DeckDna::default().slide_archetypes.0.is_empty());
    }
}
