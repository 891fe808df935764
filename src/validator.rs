use crate::corpus::WordCorpus;

/// Outcome of checking a submitted word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Verdict {
    Accepted,
    AlreadyUsed,
    NotInDictionary,
}

/// Decides whether `candidate` answers `prompt`.
///
/// The candidate and prompt are compared uppercased; dictionary membership is
/// case-insensitive. A word that fails the dictionary or substring check is
/// `NotInDictionary` even if it was used before, so `AlreadyUsed` only reports
/// words that would otherwise have been accepted.
pub fn validate(
    candidate: &str,
    prompt: &str,
    used_words: &[String],
    words: &WordCorpus,
) -> Verdict {
    let candidate = candidate.to_uppercase();
    let prompt = prompt.to_uppercase();

    if candidate.is_empty() || !words.contains(&candidate) || !candidate.contains(&prompt) {
        return Verdict::NotInDictionary;
    }
    if used_words.iter().any(|w| w.eq_ignore_ascii_case(&candidate)) {
        return Verdict::AlreadyUsed;
    }
    Verdict::Accepted
}
