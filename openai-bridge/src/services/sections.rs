//! Splits a free-text case analysis into labeled sections.
//!
//! Each heading is searched independently over the whole text. The section
//! body runs from just after the first occurrence of the heading up to the
//! next blank line. Headings that also occur inside another section's body
//! therefore match at that earlier position; no cursor is carried between
//! headings.

use serde::Serialize;
use std::collections::BTreeMap;

/// Value of a section whose heading does not appear in the text.
pub const MISSING_SECTION: &str = "N/A";

const SECTION_BREAK: &str = "\n\n";

/// Sections of a case analysis, in response order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Overview,
    LegalOptions,
    Risks,
    RecommendedStrategy,
    NextSteps,
}

/// Headings the case-analysis prompt asks the model to use.
pub const CASE_ANALYSIS_HEADINGS: [(&str, SectionKey); 5] = [
    ("EVALUACIÓN GENERAL", SectionKey::Overview),
    ("OPCIONES LEGALES", SectionKey::LegalOptions),
    ("ANÁLISIS DE RIESGOS", SectionKey::Risks),
    ("ESTRATEGIA RECOMENDADA", SectionKey::RecommendedStrategy),
    ("PASOS PRÁCTICOS", SectionKey::NextSteps),
];

/// Extract one value per heading key. Every key in `headings` is present in
/// the result; keys whose label is absent map to [`MISSING_SECTION`].
pub fn extract_sections<K: Ord + Copy>(
    text: &str,
    headings: &[(&str, K)],
) -> BTreeMap<K, String> {
    let mut sections: BTreeMap<K, String> = headings
        .iter()
        .map(|(_, key)| (*key, MISSING_SECTION.to_string()))
        .collect();

    for (label, key) in headings {
        if let Some(body) = section_after(text, label) {
            sections.insert(*key, body.to_string());
        }
    }

    sections
}

/// Extract the five case-analysis sections.
pub fn extract_case_sections(text: &str) -> BTreeMap<SectionKey, String> {
    extract_sections(text, &CASE_ANALYSIS_HEADINGS)
}

fn section_after<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    if label.is_empty() {
        return None;
    }
    let (_, rest) = text.split_once(label)?;
    let body = match rest.split_once(SECTION_BREAK) {
        Some((body, _)) => body,
        None => rest,
    };
    Some(body.trim())
}
