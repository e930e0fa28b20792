//! Content catalog: the read-only table of event templates, names, and
//! narrative text the engine draws from.
//!
//! The engine only depends on the [`ContentCatalog`] trait. [`TableCatalog`]
//! is the YAML-backed implementation; [`TableCatalog::builtin`] loads the
//! content shipped with the crate.

use std::path::Path;

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use reign_types::{
    AttributeDelta, AttributeKind, Attributes, Ending, EventCategory, EventTemplate, NameLists,
    OptionTemplate, ReignStage, SuddenReason,
};

/// Builtin catalog source.
const BUILTIN_CATALOG: &str = include_str!("../content/catalog.yaml");

/// Morality above which an abdication reads as virtuous.
const VIRTUOUS_MORALITY_PCT: i64 = 70;

/// Popularity below which an abdication reads as unmourned.
const UNPOPULAR_PCT: i64 = 30;

/// Errors that can occur when loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A template has no options to choose from.
    #[error("event template has no options: {title}")]
    EmptyOptions {
        /// Title of the offending template.
        title: String,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Read-only source of narrative content.
pub trait ContentCatalog {
    /// Ordinary event templates for one category.
    fn templates(&self, category: EventCategory) -> &[EventTemplate];

    /// Critical event templates.
    fn critical_templates(&self) -> &[EventTemplate];

    /// Name pools.
    fn names(&self) -> &NameLists;

    /// Closing texts.
    fn endings(&self) -> &EndingTexts;

    /// Memory fragment bank.
    fn memories(&self) -> &MemoryBank;

    /// Fixed engine texts.
    fn system_texts(&self) -> &SystemTexts;
}

// ---------------------------------------------------------------------------
// Text tables
// ---------------------------------------------------------------------------

/// Closing text per ending.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EndingTexts {
    /// Natural end.
    pub natural_end: Vec<String>,
    /// Collapse, per trait.
    pub collapse: CollapseTexts,
    /// Sudden death.
    pub assassination: Vec<String>,
    /// Overthrow.
    pub rebellion: Vec<String>,
    /// Abdication, by how the ruler is remembered.
    pub abdication: AbdicationTexts,
}

/// One collapse text per trait.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollapseTexts {
    /// Mood collapse.
    pub mood: String,
    /// Intelligence collapse.
    pub intelligence: String,
    /// Charm collapse.
    pub charm: String,
    /// Reputation collapse.
    pub reputation: String,
    /// Popularity collapse.
    pub popularity: String,
    /// Morality collapse.
    pub morality: String,
}

impl CollapseTexts {
    /// Text for one trait.
    pub fn for_trait(&self, kind: AttributeKind) -> &str {
        match kind {
            AttributeKind::Mood => &self.mood,
            AttributeKind::Intelligence => &self.intelligence,
            AttributeKind::Charm => &self.charm,
            AttributeKind::Reputation => &self.reputation,
            AttributeKind::Popularity => &self.popularity,
            AttributeKind::Morality => &self.morality,
        }
    }
}

/// Abdication texts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbdicationTexts {
    /// High morality.
    pub virtuous: Vec<String>,
    /// Low popularity.
    pub unpopular: Vec<String>,
    /// Everyone else.
    pub ordinary: Vec<String>,
}

/// A memory fragment before it gets an identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FragmentText {
    /// Who is remembering.
    pub speaker: String,
    /// What they say.
    pub content: String,
}

/// Memory fragments and the log markers that produce them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryBank {
    /// A log text containing any of these produces a fragment.
    pub keywords: Vec<String>,
    /// Of those, these select the relief bank.
    pub relief_keywords: Vec<String>,
    /// Fragments about relief.
    pub relief: Vec<FragmentText>,
    /// Fragments about anything else.
    pub generic: Vec<FragmentText>,
}

/// Fixed engine texts. Most accept placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemTexts {
    /// First chronicle entry of a new dynasty.
    pub opening_log: String,
    /// First chronicle entry of a succeeding reign.
    pub succession_log: String,
    /// Opening front-court narrative line.
    pub court_narrative: String,
    /// Opening palace narrative line.
    pub palace_narrative: String,
    /// Coronation congratulations: title.
    pub congratulation_title: String,
    /// Coronation congratulations: body.
    pub congratulation_description: String,
    /// Coronation congratulations: the only option.
    pub congratulation_option: String,
    /// Coronation congratulations: feedback.
    pub congratulation_feedback: String,
    /// Consort elevation: title.
    pub elevation_title: String,
    /// Consort elevation: body.
    pub elevation_description: String,
    /// Consort elevation: keep the current empress.
    pub keep_empress_option: String,
    /// Consort elevation: feedback for keeping her.
    pub keep_empress_feedback: String,
    /// Consort elevation: elevate `{{ member }}`.
    pub elevate_option: String,
    /// Consort elevation: feedback for an elevation.
    pub elevate_feedback: String,
    /// Chronicle entry for an elevation.
    pub elevate_log: String,
    /// Pregnancy announcement: title.
    pub pregnancy_title: String,
    /// Pregnancy announcement: body.
    pub pregnancy_description: String,
    /// Pregnancy announcement: the only option.
    pub pregnancy_option: String,
    /// Pregnancy announcement: feedback.
    pub pregnancy_feedback: String,
    /// Chronicle entry for a pregnancy.
    pub pregnancy_log: String,
    /// Chronicle entry for a birth.
    pub birth_log: String,
    /// Naming ceremony: title.
    pub naming_title: String,
    /// Naming ceremony: body.
    pub naming_description: String,
    /// Naming ceremony: accept `{{ name }}`.
    pub naming_option: String,
    /// Naming ceremony: feedback.
    pub naming_feedback: String,
    /// Chronicle entry for a naming.
    pub naming_log: String,
    /// Chronicle entry for a crown-prince designation.
    pub crown_prince_log: String,
    /// Chronicle entry for an event left unresolved at rollover.
    pub ignored_log: String,
    /// Chronicle entry for an abdication.
    pub abdication_log: String,
    /// Body of the generic template used on a catalog miss.
    pub fallback_description: String,
    /// Option of the generic template.
    pub fallback_option: String,
    /// Feedback of the generic template.
    pub fallback_feedback: String,
}

// ---------------------------------------------------------------------------
// Table-backed catalog
// ---------------------------------------------------------------------------

/// Ordinary templates by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryTables {
    /// Front court.
    #[serde(default)]
    pub front_court: Vec<EventTemplate>,
    /// Court personnel.
    #[serde(default)]
    pub court_personnel: Vec<EventTemplate>,
    /// Harem.
    #[serde(default)]
    pub harem: Vec<EventTemplate>,
    /// Public opinion.
    #[serde(default)]
    pub public_opinion: Vec<EventTemplate>,
}

/// YAML-backed [`ContentCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableCatalog {
    /// Ordinary events.
    #[serde(default)]
    pub events: CategoryTables,
    /// Critical events.
    #[serde(default)]
    pub critical: Vec<EventTemplate>,
    /// Name pools.
    pub names: NameLists,
    /// Closing texts.
    pub endings: EndingTexts,
    /// Memory fragments.
    pub memories: MemoryBank,
    /// Engine texts.
    pub system: SystemTexts,
}

impl TableCatalog {
    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the embedded content is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or a parse
    /// or validation error as for [`parse`](Self::parse).
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the string is not a valid catalog,
    /// or [`CatalogError::EmptyOptions`] if any template has no options.
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yml::from_str(yaml)?;
        let all = EventCategory::ALL
            .iter()
            .flat_map(|c| catalog.templates(*c).iter())
            .chain(catalog.critical.iter());
        for template in all {
            if template.options.is_empty() {
                return Err(CatalogError::EmptyOptions {
                    title: template.title.clone(),
                });
            }
        }
        Ok(catalog)
    }
}

impl ContentCatalog for TableCatalog {
    fn templates(&self, category: EventCategory) -> &[EventTemplate] {
        match category {
            EventCategory::FrontCourt => &self.events.front_court,
            EventCategory::CourtPersonnel => &self.events.court_personnel,
            EventCategory::Harem => &self.events.harem,
            EventCategory::PublicOpinion => &self.events.public_opinion,
        }
    }

    fn critical_templates(&self) -> &[EventTemplate] {
        &self.critical
    }

    fn names(&self) -> &NameLists {
        &self.names
    }

    fn endings(&self) -> &EndingTexts {
        &self.endings
    }

    fn memories(&self) -> &MemoryBank {
        &self.memories
    }

    fn system_texts(&self) -> &SystemTexts {
        &self.system
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Draw weight: tagged for this stage 2, untagged 1, tagged for others 0.
fn stage_weight(template: &EventTemplate, stage: ReignStage) -> u32 {
    if template.stages.is_empty() {
        1
    } else if template.stages.contains(&stage) {
        2
    } else {
        0
    }
}

fn pick_weighted(
    templates: &[EventTemplate],
    stage: ReignStage,
    rng: &mut impl Rng,
) -> Option<EventTemplate> {
    templates
        .choose_weighted(rng, |t| stage_weight(t, stage))
        .ok()
        .cloned()
}

/// Draw an ordinary template for `category`, biased towards `stage`.
///
/// Falls back to a generic placeholder when the category has no eligible
/// template.
pub fn pick_template(
    catalog: &dyn ContentCatalog,
    category: EventCategory,
    stage: ReignStage,
    rng: &mut impl Rng,
) -> EventTemplate {
    pick_weighted(catalog.templates(category), stage, rng).unwrap_or_else(|| {
        warn!(?category, ?stage, "no eligible template, using fallback");
        fallback_template(category, catalog.system_texts())
    })
}

/// Draw a critical template, or `None` if the catalog has none eligible.
pub fn pick_critical(
    catalog: &dyn ContentCatalog,
    stage: ReignStage,
    rng: &mut impl Rng,
) -> Option<EventTemplate> {
    pick_weighted(catalog.critical_templates(), stage, rng)
}

/// The generic template used on a catalog miss.
pub fn fallback_template(category: EventCategory, texts: &SystemTexts) -> EventTemplate {
    EventTemplate {
        title: category.kind().label().to_owned(),
        description: texts.fallback_description.clone(),
        options: vec![OptionTemplate {
            text: texts.fallback_option.clone(),
            feedback: texts.fallback_feedback.clone(),
            log_text: None,
            attitude: None,
            delta: AttributeDelta::default(),
            outcome: None,
        }],
        stages: Vec::new(),
    }
}

fn pick_line(lines: &[String], rng: &mut impl Rng) -> String {
    lines.choose(rng).cloned().unwrap_or_default()
}

/// Closing text for an ending.
pub fn ending_text(
    texts: &EndingTexts,
    ending: Ending,
    attrs: &Attributes,
    rng: &mut impl Rng,
) -> String {
    match ending {
        Ending::NaturalEnd => pick_line(&texts.natural_end, rng),
        Ending::Collapse { reason } => texts.collapse.for_trait(reason).to_owned(),
        Ending::Sudden {
            reason: SuddenReason::Assassination,
        } => pick_line(&texts.assassination, rng),
        Ending::Sudden {
            reason: SuddenReason::Rebellion,
        } => pick_line(&texts.rebellion, rng),
        Ending::Abdication => {
            if attrs.morality > Decimal::new(VIRTUOUS_MORALITY_PCT, 2) {
                pick_line(&texts.abdication.virtuous, rng)
            } else if attrs.popularity < Decimal::new(UNPOPULAR_PCT, 2) {
                pick_line(&texts.abdication.unpopular, rng)
            } else {
                pick_line(&texts.abdication.ordinary, rng)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = TableCatalog::builtin().unwrap();
        for category in EventCategory::ALL {
            assert!(!catalog.templates(category).is_empty());
        }
        assert_eq!(catalog.critical_templates().len(), 3);
        assert_eq!(catalog.names().reign_titles.len(), 7);
        assert_eq!(catalog.system_texts().abdication_log, "皇帝决定退位让贤");
    }

    #[test]
    fn builtin_critical_options_carry_outcomes() {
        let catalog = TableCatalog::builtin().unwrap();
        let outcomes = catalog
            .critical_templates()
            .iter()
            .flat_map(|t| t.options.iter())
            .filter(|o| o.outcome.is_some())
            .count();
        assert_eq!(outcomes, 3);
    }

    #[test]
    fn deltas_parse_exactly() {
        let catalog = TableCatalog::builtin().unwrap();
        let first = catalog
            .templates(EventCategory::FrontCourt)
            .first()
            .unwrap()
            .options
            .first()
            .unwrap();
        assert_eq!(first.delta.popularity, Decimal::new(8, 2));
    }

    #[test]
    fn stage_tags_bias_selection() {
        let catalog = TableCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        // Templates tagged only for later stages never appear early.
        for _ in 0..100 {
            let t = pick_template(
                &catalog,
                EventCategory::FrontCourt,
                ReignStage::EarlyReign,
                &mut rng,
            );
            assert!(t.stages.is_empty() || t.stages.contains(&ReignStage::EarlyReign));
        }
    }

    #[test]
    fn empty_category_falls_back() {
        let mut catalog = TableCatalog::builtin().unwrap();
        catalog.events.harem.clear();
        let mut rng = StdRng::seed_from_u64(4);
        let t = pick_template(&catalog, EventCategory::Harem, ReignStage::Stable, &mut rng);
        assert_eq!(t.description, catalog.system.fallback_description);
        assert_eq!(t.options.len(), 1);
    }

    #[test]
    fn templates_without_options_are_rejected() {
        let yaml = BUILTIN_CATALOG.replacen(
            "critical:\n",
            "critical:\n  - title: 空\n    description: 空\n    options: []\n",
            1,
        );
        assert!(matches!(
            TableCatalog::parse(&yaml),
            Err(CatalogError::EmptyOptions { .. })
        ));
    }

    #[test]
    fn ending_texts_by_kind() {
        let catalog = TableCatalog::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let attrs = Attributes::default();
        let mood = ending_text(
            catalog.endings(),
            Ending::Collapse {
                reason: AttributeKind::Mood,
            },
            &attrs,
            &mut rng,
        );
        assert!(mood.starts_with("你不再笑"));

        let virtuous = Attributes {
            morality: Decimal::new(9, 1),
            ..Attributes::default()
        };
        let text = ending_text(catalog.endings(), Ending::Abdication, &virtuous, &mut rng);
        assert!(text.starts_with("脱下龙袍"));
    }
}
