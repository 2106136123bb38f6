//! Intent matching by stemmed word overlap.

use std::collections::HashSet;

use uuid::Uuid;

use super::catalog::IntentCatalog;
use super::text::{Normalizer, jaccard};
use crate::collaborator::ChatReply;

/// Minimum similarity a match must exceed by default.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Reply to an empty message.
pub const EMPTY_MESSAGE_REPLY: &str = "Por favor, escribe un mensaje.";

/// Reply when no intent matches.
pub const UNKNOWN_REPLY: &str =
    "🤔 Lo siento, no entiendo tu pregunta. ¿Podrías ser más específico sobre turismo en Bogotá?";

/// Best intent found for a message.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentMatch {
    pub tag: String,
    pub score: f64,
}

#[derive(Debug)]
struct CompiledPattern {
    intent: usize,
    tokens: HashSet<String>,
}

/// Matches user messages against an [`IntentCatalog`].
#[derive(Debug)]
pub struct IntentMatcher {
    catalog: IntentCatalog,
    normalizer: Normalizer,
    patterns: Vec<CompiledPattern>,
    threshold: f64,
}

impl IntentMatcher {
    /// Build a matcher; pattern tokens are computed once here.
    pub fn new(catalog: IntentCatalog, threshold: f64) -> Self {
        let normalizer = Normalizer::spanish();
        let patterns = catalog
            .intents
            .iter()
            .enumerate()
            .flat_map(|(index, intent)| {
                intent.patterns.iter().map(move |pattern| (index, pattern))
            })
            .map(|(intent, pattern)| CompiledPattern {
                intent,
                tokens: normalizer.tokens(pattern),
            })
            .collect();

        Self {
            catalog,
            normalizer,
            patterns,
            threshold,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &IntentCatalog {
        &self.catalog
    }

    /// Most similar intent, if its score exceeds the threshold.
    ///
    /// Ties keep the earliest pattern in catalog order.
    pub fn find_intent(&self, message: &str) -> Option<IntentMatch> {
        let tokens = self.normalizer.tokens(message);

        let mut best: Option<(usize, f64)> = None;
        for pattern in &self.patterns {
            let score = jaccard(&tokens, &pattern.tokens);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((pattern.intent, score));
            }
        }

        best.filter(|(_, score)| *score > self.threshold)
            .map(|(intent, score)| IntentMatch {
                tag: self.catalog.intents[intent].tag.clone(),
                score,
            })
    }

    /// Build the `/chat` reply for `message`.
    pub fn reply(&self, message: &str) -> ChatReply {
        if message.is_empty() {
            return ChatReply {
                response: EMPTY_MESSAGE_REPLY.to_string(),
                intent: None,
            };
        }

        let Some(found) = self.find_intent(message) else {
            tracing::debug!(name: "intent.unmatched", "No intent matched");
            return ChatReply {
                response: UNKNOWN_REPLY.to_string(),
                intent: None,
            };
        };

        tracing::debug!(name: "intent.matched", tag = %found.tag, score = found.score, "Intent matched");
        let response = self
            .catalog
            .get(&found.tag)
            .and_then(|intent| pick(&intent.responses))
            .map_or_else(|| UNKNOWN_REPLY.to_string(), Clone::clone);

        ChatReply {
            response,
            intent: Some(found.tag),
        }
    }
}

/// Uniformly random element.
///
/// The randomness comes from the 122 random bits of a v4 [`Uuid`], which
/// are drawn from the OS generator. Reply variety needs nothing stronger,
/// and `uuid` is already a dependency. The low 48 bits are all random, so
/// the modulo bias over a handful of responses is negligible.
#[allow(clippy::cast_possible_truncation)]
fn pick<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let index = (Uuid::new_v4().as_u128() % items.len() as u128) as usize;
    items.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_reaches_every_item() {
        let items = ["a", "b", "c"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(*pick(&items).unwrap());
        }
        assert_eq!(seen.len(), items.len());
        assert!(pick::<&str>(&[]).is_none());
    }

    fn matcher() -> IntentMatcher {
        IntentMatcher::new(IntentCatalog::builtin(), DEFAULT_THRESHOLD)
    }

    #[test]
    fn test_exact_pattern_matches() {
        let found = matcher().find_intent("¿Dónde puedo comer bien?").unwrap();
        assert_eq!(found.tag, "restaurantes");
        assert!((found.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_overlap_matches() {
        let found = matcher().find_intent("horarios del museo").unwrap();
        assert_eq!(found.tag, "horarios_lugares");
    }

    #[test]
    fn test_unrelated_text_does_not_match() {
        assert!(matcher().find_intent("xyz qwerty").is_none());
    }

    #[test]
    fn test_reply_picks_from_intent() {
        let matcher = matcher();
        let reply = matcher.reply("¿Cómo llego al centro?");
        assert_eq!(reply.intent.as_deref(), Some("transporte_ciudad"));
        let responses = &matcher.catalog().get("transporte_ciudad").unwrap().responses;
        assert!(responses.contains(&reply.response));
    }

    #[test]
    fn test_reply_empty_and_unknown() {
        let matcher = matcher();
        assert_eq!(matcher.reply("").response, EMPTY_MESSAGE_REPLY);

        let reply = matcher.reply("xyz qwerty");
        assert_eq!(reply.response, UNKNOWN_REPLY);
        assert!(reply.intent.is_none());
    }

    #[test]
    fn test_pick() {
        assert!(pick::<u8>(&[]).is_none());
        assert_eq!(pick(&[7]), Some(&7));
    }
}
