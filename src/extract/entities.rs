//! Heuristic named-entity spotting over capitalized spans.
//!
//! A span is a run of capitalized words, optionally joined by `of` or `&`.
//! Spans are classified by honorifics and speech verbs (person),
//! organization suffixes and acronyms (organization), and locative
//! prepositions or geographic suffixes (place). Every classified entity is
//! also reported as a topic, as are unclassified multi-word spans.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use super::{Candidate, Method};
use crate::text::StopwordSet;

#[allow(clippy::expect_used)]
static PROPER_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][\w'&-]*\.?(?:\s+(?:of\s+|&\s+)?[A-Z][\w'&-]*\.?)*")
        .expect("proper span regex is valid") // Static pattern, safe to panic
});

const HONORIFICS: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "professor", "sir", "dame", "lord", "lady",
    "president", "senator", "ceo",
];

const SPEECH_VERBS: &[&str] = &["said", "says", "wrote", "writes", "argues", "told"];

const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "company", "co", "ltd", "llc", "plc", "gmbh", "group",
    "university", "institute", "foundation", "association", "agency", "bank", "college",
    "council", "society", "ministry", "labs", "technologies", "systems", "partners",
];

const PLACE_SUFFIXES: &[&str] = &[
    "city", "county", "state", "river", "lake", "mountain", "mountains", "island",
    "islands", "street", "avenue", "valley", "bay", "park", "province", "republic",
    "kingdom", "coast", "ocean", "sea",
];

const LOCATIVE_PREPOSITIONS: &[&str] = &["in", "at", "from", "near", "across", "throughout"];

/// Entity class assigned to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Place,
    Organization,
    /// Capitalized multi-word span matching no other class.
    Topic,
}

impl EntityKind {
    fn method(self) -> Method {
        match self {
            Self::Person => Method::EntityPerson,
            Self::Place => Method::EntityPlace,
            Self::Organization => Method::EntityOrg,
            Self::Topic => Method::EntityTopic,
        }
    }
}

/// Finds entity spans in original-case `text`, in order of appearance.
#[must_use]
pub fn extract_entities(text: &str, stopwords: &StopwordSet) -> Vec<(String, EntityKind)> {
    let mut entities = Vec::new();

    for span in PROPER_SPAN.find_iter(text) {
        let mut words: Vec<&str> = span
            .as_str()
            .split_whitespace()
            .map(|w| w.trim_end_matches('.'))
            .collect();

        let honorific_at = words
            .iter()
            .rposition(|w| HONORIFICS.contains(&w.to_lowercase().as_str()));
        let honorific = honorific_at.is_some();
        if let Some(at) = honorific_at {
            words.drain(..=at);
        }
        while words
            .first()
            .is_some_and(|w| stopwords.is_language_stopword(&w.to_lowercase()))
        {
            words.remove(0);
        }
        if words.is_empty() || words.iter().all(|w| w.chars().count() < 2) {
            continue;
        }

        let preceding = previous_word(text, span.start());
        let following = next_word(text, span.end());
        let kind = classify(&words, honorific, preceding.as_deref(), following.as_deref());
        let Some(kind) = kind else {
            continue;
        };
        entities.push((words.join(" "), kind));
    }

    entities
}

fn classify(
    words: &[&str],
    honorific: bool,
    preceding: Option<&str>,
    following: Option<&str>,
) -> Option<EntityKind> {
    let last = words.last().map(|w| w.to_lowercase()).unwrap_or_default();
    let is_acronym = words.len() == 1
        && (2..=6).contains(&words[0].chars().count())
        && words[0].chars().all(|c| c.is_ascii_uppercase());

    if honorific || (words.len() >= 2 && following.is_some_and(|w| SPEECH_VERBS.contains(&w))) {
        Some(EntityKind::Person)
    } else if ORG_SUFFIXES.contains(&last.as_str())
        || words.first().is_some_and(|w| *w == "University" || *w == "Bank")
        || is_acronym
    {
        Some(EntityKind::Organization)
    } else if PLACE_SUFFIXES.contains(&last.as_str())
        || preceding.is_some_and(|w| LOCATIVE_PREPOSITIONS.contains(&w))
    {
        Some(EntityKind::Place)
    } else if words.len() >= 2 {
        Some(EntityKind::Topic)
    } else {
        None
    }
}

fn previous_word(text: &str, start: usize) -> Option<String> {
    text[..start]
        .split_whitespace()
        .last()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
}

fn next_word(text: &str, end: usize) -> Option<String> {
    text[end..]
        .split_whitespace()
        .next()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
}

/// Entity candidates, lowercased: people, places, organizations, then topics.
///
/// Every person, place and organization is repeated as a topic.
#[must_use]
#[instrument(skip_all, fields(text_len = text.len()))]
pub fn entity_keywords(text: &str, stopwords: &StopwordSet) -> Vec<Candidate> {
    let entities = extract_entities(text, stopwords);
    debug!(entities = entities.len(), "spotted entities");

    let mut candidates = Vec::new();
    for kind in [EntityKind::Person, EntityKind::Place, EntityKind::Organization] {
        candidates.extend(
            entities
                .iter()
                .filter(|(_, k)| *k == kind)
                .map(|(name, _)| Candidate::new(name.to_lowercase(), kind.method())),
        );
    }
    candidates.extend(
        entities
            .iter()
            .map(|(name, _)| Candidate::new(name.to_lowercase(), Method::EntityTopic)),
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;

    fn stopwords() -> StopwordSet {
        StopwordSet::new(Language::English, &[])
    }

    fn kind_of(entities: &[(String, EntityKind)], name: &str) -> Option<EntityKind> {
        entities.iter().find(|(n, _)| n == name).map(|(_, k)| *k)
    }

    #[test]
    fn test_honorific_marks_person() {
        let entities = extract_entities("Yesterday Dr. Jane Goodall visited.", &stopwords());
        assert_eq!(kind_of(&entities, "Jane Goodall"), Some(EntityKind::Person));
    }

    #[test]
    fn test_speech_verb_marks_person() {
        let entities = extract_entities("Then Maria Lopez said the test passed.", &stopwords());
        assert_eq!(kind_of(&entities, "Maria Lopez"), Some(EntityKind::Person));
    }

    #[test]
    fn test_org_suffix_and_acronym_mark_organization() {
        let entities = extract_entities(
            "Funding came from Acme Corporation and NASA this year.",
            &stopwords(),
        );
        assert_eq!(kind_of(&entities, "Acme Corporation"), Some(EntityKind::Organization));
        assert_eq!(kind_of(&entities, "NASA"), Some(EntityKind::Organization));
    }

    #[test]
    fn test_locative_preposition_marks_place() {
        let entities = extract_entities("We hiked in Patagonia last spring.", &stopwords());
        assert_eq!(kind_of(&entities, "Patagonia"), Some(EntityKind::Place));
    }

    #[test]
    fn test_span_joined_by_of() {
        let entities =
            extract_entities("She studied at the University of Oxford for years.", &stopwords());
        assert_eq!(
            kind_of(&entities, "University of Oxford"),
            Some(EntityKind::Organization)
        );
    }

    #[test]
    fn test_leading_stopword_stripped_and_lone_capital_ignored() {
        let entities = extract_entities("The river was calm.", &stopwords());
        assert!(entities.is_empty());
    }

    #[test]
    fn test_entity_keywords_emit_kind_then_topic() {
        let candidates = entity_keywords("Funding came from Acme Corporation.", &stopwords());
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].method, Method::EntityOrg);
        assert_eq!(candidates[0].text, "acme corporation");
        assert_eq!(candidates[1].method, Method::EntityTopic);
    }

    #[test]
    fn test_entity_keywords_empty_text() {
        assert!(entity_keywords("", &stopwords()).is_empty());
    }
}
