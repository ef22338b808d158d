//! Prompt building functions for the generation stages

use crate::domain::value_objects::{MarketResearch, PresentationFormData};

/// Domains the research provider is restricted to
pub const RESEARCH_DOMAINS: [&str; 10] = [
    "pitchbook.com",
    "crunchbase.com",
    "cbinsights.com",
    "bloomberg.com",
    "reuters.com",
    "wsj.com",
    "ft.com",
    "mckinsey.com",
    "statista.com",
    "sec.gov",
];

const RESEARCH_QUERY_SUFFIX: &str =
    "market size growth trends competitive landscape industry analysis";

/// Build the style-extraction prompt that yields a Deck DNA JSON object
pub fn build_deck_dna_prompt(form: &PresentationFormData) -> String {
    let mut prompt = String::new();

    prompt.push_str(&format!(
        "You are a presentation design analyst at a private equity firm. Extract the \
         design DNA for a {} prepared for {}.\n\n",
        form.presentation_type, form.company_name
    ));

    if !form.reference_files.is_empty() {
        let names: Vec<&str> = form.reference_files.iter().map(|f| f.name.as_str()).collect();
        prompt.push_str(&format!("REFERENCE DECKS: {}\n\n", names.join(", ")));
    }

    prompt.push_str(
        r##"Return ONLY a JSON object with this structure:
```json
{
  "layout": {"gridColumns": 12, "margins": "...", "titlePosition": "...", "contentDensity": "..."},
  "typography": {"headingFont": "...", "bodyFont": "...", "headingSize": "...", "bodySize": "..."},
  "colorPalette": {"primary": "#...", "secondary": "#...", "accent": "#...", "text": "#...", "background": "#..."},
  "exhibits": {"chartStyle": "...", "tableStyle": "...", "numberFormat": "...", "sourceLine": true},
  "narrative": {"flow": "...", "actionTitles": true, "executiveSummaryFirst": true},
  "compliance": {"citationFormat": "...", "disclaimer": "...", "confidentialityMarking": true},
  "slideArchetypes": ["title", "executive-summary", "..."]
}
```
"##,
    );

    prompt
}

/// Free-text research query: company, optional requirements, fixed suffix
pub fn build_research_query(form: &PresentationFormData) -> String {
    match form.research_requirements() {
        Some(requirements) => format!(
            "{} {} {}",
            form.company_name, requirements, RESEARCH_QUERY_SUFFIX
        ),
        None => format!("{} {}", form.company_name, RESEARCH_QUERY_SUFFIX),
    }
}

/// Build the competitor landscape prompt
///
/// The serialized research is cut to `research_budget` characters.
pub fn build_competitive_prompt(
    form: &PresentationFormData,
    research: &MarketResearch,
    research_budget: usize,
) -> String {
    let research_json = serde_json::to_string(research).unwrap_or_default();
    let research_excerpt = truncate_chars(&research_json, research_budget);

    let mut prompt = String::new();

    prompt.push_str(&format!(
        "Analyze the competitive landscape for {} ({}).\n",
        form.company_name, form.presentation_type
    ));
    prompt.push_str(&format!("INVESTMENT THESIS: {}\n\n", form.investment_thesis));
    prompt.push_str("MARKET RESEARCH:\n");
    prompt.push_str(research_excerpt);
    prompt.push_str("\n\n");

    prompt.push_str(
        r#"Provide:
1. Competitor identification (5-8 direct and adjacent competitors)
2. Metric comparison (revenue, growth, funding, headcount where known)
3. Product positioning of the company relative to competitors
4. Momentum signals (hiring, funding rounds, launches, partnerships)

Return ONLY a JSON object:
```json
{
  "competitors": [
    {"name": "...", "description": "...", "metrics": {"revenue": "...", "growth": "..."}, "positioning": "...", "momentumSignals": ["..."]}
  ],
  "positioning": "...",
  "marketShare": "..."
}
```
"#,
    );

    prompt
}

/// Build the slide outline prompt (JSON array of 15-20 titles)
pub fn build_architecture_prompt(form: &PresentationFormData) -> String {
    format!(
        "Create a slide outline for a {} about {}.\n\
         TARGET AUDIENCE: {}\n\
         INVESTMENT THESIS: {}\n\n\
         Return ONLY a JSON array of 15-20 slide titles, in presentation order, for example:\n\
         [\"Title Slide\", \"Executive Summary\", \"Investment Highlights\"]\n",
        form.presentation_type, form.company_name, form.target_audience, form.investment_thesis
    )
}

/// Natural-language brief submitted to the deck builder
pub fn build_deck_brief(form: &PresentationFormData) -> String {
    let mut brief = String::new();

    brief.push_str(&format!(
        "Create a professional {} for {}.\n\n",
        form.presentation_type, form.company_name
    ));
    brief.push_str(&format!("Target audience: {}\n", form.target_audience));
    brief.push_str(&format!("Investment thesis: {}\n", form.investment_thesis));

    if let Some(requirements) = form.research_requirements() {
        brief.push_str(&format!("Research focus: {}\n", requirements));
    }

    brief.push_str(
        "\nUse an institutional private equity style: action titles, sourced exhibits, \
         consistent number formatting and a clear investment narrative.",
    );

    brief
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
