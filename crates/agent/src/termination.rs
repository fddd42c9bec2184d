//! Conclusion detection.

/// Phrases that mark a response as concluding the discussion.
pub const CONCLUSION_PHRASES: [&str; 5] = [
    "final solution",
    "conclusion",
    "agreed upon",
    "consensus reached",
    "best approach",
];

/// Decides whether an agent's response ends the collaboration.
///
/// Implementations must be pure: the same text always gets the same answer.
pub trait TerminationPolicy: Send + Sync {
    fn is_conclusive(&self, text: &str) -> bool;
}

/// Case-insensitive phrase match against [`CONCLUSION_PHRASES`].
///
/// Negations are not understood: "we have no conclusion yet" is conclusive.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordDetector;

impl TerminationPolicy for KeywordDetector {
    fn is_conclusive(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        CONCLUSION_PHRASES.iter().any(|p| lower.contains(p))
    }
}
