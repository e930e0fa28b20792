//! Reign chronicle: the log, the two narrative lines, and the memory
//! fragments that outlive the reign.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use reign_court::dice::draw_id;
use reign_types::{EventCategory, EventKind, GameLog, MemoryFragment};

use crate::catalog::{FragmentText, MemoryBank};

/// Public-opinion entries mentioning these belong to the court narrative.
const COURT_MARKERS: [&str; 2] = ["朝堂", "政务"];

/// Where a resolution's log text lands in the narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeLine {
    /// The front-court line.
    Court,
    /// The palace line.
    Palace,
}

/// Route a log entry to a narrative line. System events have none.
pub fn narrative_line(
    kind: EventKind,
    category: Option<EventCategory>,
    text: &str,
) -> Option<NarrativeLine> {
    if kind == EventKind::System {
        return None;
    }
    let Some(category) = category else {
        return (kind == EventKind::Critical).then_some(NarrativeLine::Court);
    };
    let line = match category {
        EventCategory::FrontCourt => NarrativeLine::Court,
        EventCategory::CourtPersonnel | EventCategory::Harem => NarrativeLine::Palace,
        EventCategory::PublicOpinion => {
            if COURT_MARKERS.iter().any(|m| text.contains(m)) {
                NarrativeLine::Court
            } else {
                NarrativeLine::Palace
            }
        }
    };
    Some(line)
}

/// Everything written down during a reign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chronicle {
    /// Entries, newest first.
    pub logs: Vec<GameLog>,
    /// Memory fragments in the order they were written.
    pub fragments: Vec<MemoryFragment>,
    /// Latest front-court line.
    pub court_narrative: String,
    /// Latest palace line.
    pub palace_narrative: String,
}

impl Chronicle {
    /// A fresh chronicle opened with `opening` and the two starting
    /// narrative lines.
    pub fn open(
        round: u32,
        opening: &str,
        court: &str,
        palace: &str,
        rng: &mut impl Rng,
    ) -> Self {
        let mut chronicle = Self {
            logs: Vec::new(),
            fragments: Vec::new(),
            court_narrative: court.to_owned(),
            palace_narrative: palace.to_owned(),
        };
        chronicle.record(round, opening, rng);
        chronicle
    }

    /// Prepend an entry. Empty text is ignored.
    pub fn record(&mut self, round: u32, text: &str, rng: &mut impl Rng) {
        if text.is_empty() {
            return;
        }
        self.logs.insert(
            0,
            GameLog {
                id: draw_id(rng),
                round,
                text: text.to_owned(),
            },
        );
    }

    /// Fold a resolved event's log text into the narrative and, when it
    /// touches the lives of the people, into memory.
    pub fn note_resolution(
        &mut self,
        kind: EventKind,
        category: Option<EventCategory>,
        text: &str,
        bank: &MemoryBank,
        rng: &mut impl Rng,
    ) {
        if text.is_empty() {
            return;
        }
        match narrative_line(kind, category, text) {
            Some(NarrativeLine::Court) => text.clone_into(&mut self.court_narrative),
            Some(NarrativeLine::Palace) => text.clone_into(&mut self.palace_narrative),
            None => {}
        }

        if !mentions(text, &bank.keywords) {
            return;
        }
        let source = if mentions(text, &bank.relief_keywords) {
            &bank.relief
        } else {
            &bank.generic
        };
        if let Some(fragment) = pick_fragment(source, rng) {
            debug!(speaker = %fragment.speaker, "memory fragment recorded");
            self.fragments.push(fragment);
        }
    }

    /// Fragments with repeats of the same speaker and words removed,
    /// first occurrence kept.
    pub fn unique_fragments(&self) -> Vec<MemoryFragment> {
        let mut unique: Vec<MemoryFragment> = Vec::new();
        for fragment in &self.fragments {
            let seen = unique
                .iter()
                .any(|f| f.speaker == fragment.speaker && f.content == fragment.content);
            if !seen {
                unique.push(fragment.clone());
            }
        }
        unique
    }
}

fn mentions(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| !k.is_empty() && text.contains(k.as_str()))
}

fn pick_fragment(source: &[FragmentText], rng: &mut impl Rng) -> Option<MemoryFragment> {
    let text = source.choose(rng)?;
    Some(MemoryFragment {
        id: draw_id(rng),
        speaker: text.speaker.clone(),
        content: text.content.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog::{ContentCatalog, TableCatalog};

    fn bank() -> MemoryBank {
        TableCatalog::builtin().unwrap().memories().clone()
    }

    #[test]
    fn logs_are_newest_first() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut chronicle = Chronicle::open(1, "新帝即位", "", "", &mut rng);
        chronicle.record(2, "开科取士", &mut rng);
        chronicle.record(2, "", &mut rng);
        assert_eq!(chronicle.logs.len(), 2);
        assert_eq!(chronicle.logs.first().unwrap().text, "开科取士");
        assert_eq!(chronicle.logs.last().unwrap().round, 1);
    }

    #[test]
    fn narrative_routing() {
        assert_eq!(
            narrative_line(EventKind::FrontCourt, Some(EventCategory::FrontCourt), "x"),
            Some(NarrativeLine::Court)
        );
        assert_eq!(
            narrative_line(EventKind::Palace, Some(EventCategory::CourtPersonnel), "x"),
            Some(NarrativeLine::Palace)
        );
        assert_eq!(
            narrative_line(EventKind::Harem, Some(EventCategory::Harem), "朝堂"),
            Some(NarrativeLine::Palace)
        );
        assert_eq!(
            narrative_line(
                EventKind::Palace,
                Some(EventCategory::PublicOpinion),
                "朝堂议论纷纷"
            ),
            Some(NarrativeLine::Court)
        );
        assert_eq!(
            narrative_line(EventKind::Palace, Some(EventCategory::PublicOpinion), "市井传言"),
            Some(NarrativeLine::Palace)
        );
        assert_eq!(narrative_line(EventKind::System, None, "册立皇后"), None);
    }

    #[test]
    fn relief_text_leaves_a_relief_fragment() {
        let mut rng = StdRng::seed_from_u64(2);
        let bank = bank();
        let mut chronicle = Chronicle::default();
        chronicle.note_resolution(
            EventKind::FrontCourt,
            Some(EventCategory::FrontCourt),
            "开仓放粮，赈济灾民",
            &bank,
            &mut rng,
        );
        assert_eq!(chronicle.court_narrative, "开仓放粮，赈济灾民");
        let fragment = chronicle.fragments.first().unwrap();
        assert!(bank.relief.iter().any(|f| f.speaker == fragment.speaker));
    }

    #[test]
    fn ordinary_text_leaves_no_fragment() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut chronicle = Chronicle::default();
        chronicle.note_resolution(
            EventKind::Harem,
            Some(EventCategory::Harem),
            "设宴赏花",
            &bank(),
            &mut rng,
        );
        assert!(chronicle.fragments.is_empty());
        assert_eq!(chronicle.palace_narrative, "设宴赏花");
    }

    #[test]
    fn duplicate_fragments_collapse() {
        let mut rng = StdRng::seed_from_u64(4);
        let bank = bank();
        let mut chronicle = Chronicle::default();
        for _ in 0..6 {
            chronicle.note_resolution(
                EventKind::FrontCourt,
                Some(EventCategory::FrontCourt),
                "百姓安居",
                &bank,
                &mut rng,
            );
        }
        assert_eq!(chronicle.fragments.len(), 6);
        assert_eq!(chronicle.unique_fragments().len(), 1);
    }
}
