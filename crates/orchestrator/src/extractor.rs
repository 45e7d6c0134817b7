//! Argument extraction: pulls the structured payload for an action out of
//! free command text.

use brain_core::ArgumentBundle;
use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::actions::{instruction, phrase_pattern, Action, ArgumentShape};
use crate::error::OrchestratorError;
use crate::syntax::{parse_assignments, Value};

/// Languages recognized in commands even when the toolkit cannot translate
/// into them. Naming one of these is an error rather than a silent fallback
/// to the default.
const KNOWN_LANGUAGES: &[&str] = &[
    "Arabic",
    "Chinese",
    "Dutch",
    "English",
    "French",
    "German",
    "Greek",
    "Hindi",
    "Italian",
    "Japanese",
    "Korean",
    "Polish",
    "Portuguese",
    "Russian",
    "Spanish",
    "Swedish",
    "Turkish",
];

/// Keys accepted for the similarity query, in order of preference.
const RECORD_KEYS: &[&str] = &["record", "query_note", "query"];

/// Extracts argument bundles from command text.
#[derive(Debug)]
pub struct ArgumentExtractor {
    default_language: String,
    supported_languages: Vec<String>,
    /// Any known or supported language name.
    languages: Regex,
    /// `to <word>` / `into <word>`.
    target: Regex,
    candidate_key: Regex,
}

impl ArgumentExtractor {
    /// Create an extractor.
    ///
    /// `default_language` is used when a translation command names no
    /// language; it is always accepted as a target.
    pub fn new(
        default_language: impl Into<String>,
        supported_languages: Vec<String>,
    ) -> Result<Self, OrchestratorError> {
        let default_language = default_language.into();
        let mut supported_languages = supported_languages;
        if !supported_languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(&default_language))
        {
            supported_languages.push(default_language.clone());
        }

        let mut names: Vec<&str> = KNOWN_LANGUAGES.to_vec();
        names.extend(supported_languages.iter().map(String::as_str));
        let languages = phrase_pattern(&names)?;

        Ok(Self {
            default_language,
            supported_languages,
            languages,
            target: Regex::new(r"(?i)\b(?:to|into)\s+([A-Za-z]+)\b")?,
            candidate_key: Regex::new(r"^cand(\d+)$")?,
        })
    }

    /// Languages accepted as translation targets.
    pub fn supported_languages(&self) -> &[String] {
        &self.supported_languages
    }

    /// Extract the argument bundle `action` needs from `command`.
    pub fn extract(&self, command: &str, action: Action) -> Result<ArgumentBundle, OrchestratorError> {
        let bundle = match action.shape() {
            ArgumentShape::SingleText => ArgumentBundle::text(payload(command)),
            ArgumentShape::Translation => ArgumentBundle::Translation {
                text: payload(command),
                target_language: self.target_language(command)?,
            },
            ArgumentShape::Similarity => similarity(&self.candidate_key, command)?,
            ArgumentShape::MultipleChoice => multiple_choice(command)?,
            ArgumentShape::Span => span(command)?,
        };

        if let Some(field) = bundle.first_empty_field() {
            return Err(OrchestratorError::MissingField(field.to_string()));
        }

        debug!(action = %action, args = ?bundle, "Extracted arguments");
        Ok(bundle)
    }

    /// Resolve the translation target from the instruction part of
    /// `command`.
    ///
    /// A language introduced by `to`/`into` wins, then the first language
    /// named anywhere in the instruction, then the default. A recognized but
    /// unsupported language is `UnsupportedLanguage`.
    pub fn target_language(&self, command: &str) -> Result<String, OrchestratorError> {
        let instruction = instruction(command);

        let introduced = self
            .target
            .captures_iter(instruction)
            .filter_map(|caps| caps.get(1))
            .find(|word| self.is_known_language(word.as_str()));

        let Some(named) = introduced.or_else(|| self.languages.find(instruction)) else {
            return Ok(self.default_language.clone());
        };

        self.supported(named.as_str())
            .ok_or_else(|| OrchestratorError::UnsupportedLanguage {
                language: named.as_str().to_string(),
                supported: self.supported_languages.join(", "),
            })
    }

    fn is_known_language(&self, word: &str) -> bool {
        KNOWN_LANGUAGES
            .iter()
            .any(|language| language.eq_ignore_ascii_case(word))
            || self.supported(word).is_some()
    }

    /// Canonical spelling of `word` if it is a supported language.
    fn supported(&self, word: &str) -> Option<String> {
        self.supported_languages
            .iter()
            .find(|language| language.eq_ignore_ascii_case(word))
            .cloned()
    }
}

/// Text after the first colon, or the whole command when there is none.
fn payload(command: &str) -> String {
    let payload = command.split_once(':').map_or(command, |(_, rest)| rest);
    strip_quotes(payload.trim()).to_string()
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

fn required_text<'a>(
    fields: &'a IndexMap<String, Value>,
    key: &str,
) -> Result<&'a str, OrchestratorError> {
    fields
        .get(key)
        .ok_or_else(|| OrchestratorError::MissingField(key.to_string()))?
        .as_text()
        .ok_or_else(|| OrchestratorError::malformed(key, "expected a quoted string, found a list"))
}

fn similarity(candidate_key: &Regex, command: &str) -> Result<ArgumentBundle, OrchestratorError> {
    let fields = parse_assignments(command)?;

    let (record_key, record) = RECORD_KEYS
        .iter()
        .find_map(|key| fields.get(*key).map(|value| (*key, value)))
        .ok_or_else(|| OrchestratorError::MissingField("record".to_string()))?;
    let query = record
        .as_text()
        .ok_or_else(|| OrchestratorError::malformed(record_key, "expected a quoted string"))?
        .to_string();

    let mut numbered: Vec<(u32, &str, &Value)> = Vec::new();
    for (key, value) in &fields {
        let Some(digits) = candidate_key.captures(key).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let index = digits
            .as_str()
            .parse()
            .map_err(|_| OrchestratorError::malformed(key.as_str(), "candidate index out of range"))?;
        numbered.push((index, key.as_str(), value));
    }
    numbered.sort_by_key(|(index, _, _)| *index);

    let candidates = if !numbered.is_empty() {
        numbered
            .into_iter()
            .map(|(_, key, value)| {
                value
                    .as_text()
                    .map(str::to_string)
                    .ok_or_else(|| OrchestratorError::malformed(key, "expected a quoted string"))
            })
            .collect::<Result<Vec<_>, _>>()?
    } else {
        match fields.get("candidates") {
            Some(Value::Text(joined)) => joined
                .split('|')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::List(items)) => items.clone(),
            None => Vec::new(),
        }
    };

    Ok(ArgumentBundle::Similarity { query, candidates })
}

fn multiple_choice(command: &str) -> Result<ArgumentBundle, OrchestratorError> {
    let fields = parse_assignments(command)?;

    for key in ["text", "question", "choices"] {
        if !fields.contains_key(key) {
            return Err(OrchestratorError::MissingField(key.to_string()));
        }
    }

    let passage = required_text(&fields, "text")?.to_string();
    let question = required_text(&fields, "question")?.to_string();
    let choices = fields
        .get("choices")
        .and_then(Value::as_list)
        .ok_or_else(|| {
            OrchestratorError::malformed("choices", r#"expected a list like ["a", "b"]"#)
        })?
        .to_vec();

    Ok(ArgumentBundle::MultipleChoice {
        passage,
        question,
        choices,
    })
}

fn span(command: &str) -> Result<ArgumentBundle, OrchestratorError> {
    let fields = parse_assignments(command)?;

    for key in ["question", "content"] {
        if !fields.contains_key(key) {
            return Err(OrchestratorError::MissingField(key.to_string()));
        }
    }

    Ok(ArgumentBundle::Span {
        question: required_text(&fields, "question")?.to_string(),
        content: required_text(&fields, "content")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn extractor() -> ArgumentExtractor {
        ArgumentExtractor::new(
            "French",
            vec![
                "French".into(),
                "Spanish".into(),
                "German".into(),
                "Italian".into(),
                "Chinese".into(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_payload_after_colon() {
        let bundle = extractor()
            .extract("summarize: The patient has a fever.", Action::Summarize)
            .unwrap();
        assert_eq!(bundle, ArgumentBundle::text("The patient has a fever."));
    }

    #[test]
    fn test_payload_strips_quotes() {
        let bundle = extractor()
            .extract("Please condense this: 'Short note.'", Action::Summarize)
            .unwrap();
        assert_eq!(bundle, ArgumentBundle::text("Short note."));
    }

    #[test]
    fn test_payload_falls_back_to_whole_command() {
        let bundle = extractor()
            .extract("what are the hyponyms of fever", Action::Hyponyms)
            .unwrap();
        assert_eq!(bundle, ArgumentBundle::text("what are the hyponyms of fever"));
    }

    #[test]
    fn test_empty_payload_is_missing_text() {
        let err = extractor().extract("summarize:", Action::Summarize).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_translate_explicit_target() {
        let bundle = extractor()
            .extract("translate to Spanish: Hello doctor", Action::Translate)
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::Translation {
                text: "Hello doctor".into(),
                target_language: "Spanish".into(),
            }
        );
    }

    #[test]
    fn test_translate_default_language() {
        let ex = extractor();
        for command in ["translate: Hello doctor", "please translate the note to the patient"] {
            assert_eq!(ex.target_language(command).unwrap(), "French");
        }
    }

    #[test]
    fn test_translate_mentioned_language_case_insensitive() {
        let ex = extractor();
        assert_eq!(ex.target_language("german translation please: hi").unwrap(), "German");
        assert_eq!(
            ex.target_language("translate into CHINESE: fever").unwrap(),
            "Chinese"
        );
    }

    #[test]
    fn test_translate_target_beats_source_language() {
        let ex = extractor();
        assert_eq!(
            ex.target_language("translate this English note to Italian").unwrap(),
            "Italian"
        );
    }

    #[test]
    fn test_translate_unsupported_language() {
        let err = extractor()
            .extract("translate to Japanese: Hello", Action::Translate)
            .unwrap_err();
        match err {
            OrchestratorError::UnsupportedLanguage { language, supported } => {
                assert_eq!(language, "Japanese");
                assert!(supported.contains("Spanish"));
            }
            other => panic!("Expected UnsupportedLanguage, got {:?}", other),
        }
    }

    #[test]
    fn test_mentioned_unsupported_language_is_an_error() {
        let err = extractor()
            .target_language("Japanese translation please: hello")
            .unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::UnsupportedLanguage { ref language, .. } if language == "Japanese"
        ));
    }

    #[test]
    fn test_languages_in_payload_are_ignored() {
        let bundle = extractor()
            .extract("translate: walk to English class", Action::Translate)
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::Translation {
                text: "walk to English class".into(),
                target_language: "French".into(),
            }
        );

        assert_eq!(
            extractor()
                .target_language("translate to German: notes in Spanish")
                .unwrap(),
            "German"
        );
    }

    #[test]
    fn test_payload_keeps_later_colons() {
        let bundle = extractor()
            .extract("summarize: BP: 120/80, HR: 72", Action::Summarize)
            .unwrap();
        assert_eq!(bundle, ArgumentBundle::text("BP: 120/80, HR: 72"));
    }

    #[test]
    fn test_similarity_ordering_by_index() {
        let bundle = extractor()
            .extract(
                r#"find similar documents: record="X" cand2="Z" cand1="Y" cand10="W""#,
                Action::SimilarDocuments,
            )
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::Similarity {
                query: "X".into(),
                candidates: vec!["Y".into(), "Z".into(), "W".into()],
            }
        );
    }

    #[test]
    fn test_similarity_legacy_syntax() {
        let bundle = extractor()
            .extract(
                "find similar documents: query_note='A' candidates='B|C'",
                Action::SimilarDocuments,
            )
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::Similarity {
                query: "A".into(),
                candidates: vec!["B".into(), "C".into()],
            }
        );
    }

    #[test]
    fn test_similarity_without_candidates() {
        let bundle = extractor()
            .extract(r#"cluster: record="seed""#, Action::Cluster)
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::Similarity {
                query: "seed".into(),
                candidates: vec![],
            }
        );
    }

    #[test]
    fn test_similarity_candidate_index_overflow() {
        let err = extractor()
            .extract(
                r#"find similar documents: record="X" cand99999999999="Y""#,
                Action::SimilarDocuments,
            )
            .unwrap_err();
        match err {
            OrchestratorError::MalformedArgument { field, .. } => {
                assert_eq!(field, "cand99999999999")
            }
            other => panic!("Expected MalformedArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_similarity_missing_record() {
        let err = extractor()
            .extract(r#"similar documents: cand1="Y""#, Action::SimilarDocuments)
            .unwrap_err();
        match err {
            OrchestratorError::MissingField(field) => assert_eq!(field, "record"),
            other => panic!("Expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_multiple_choice() {
        let bundle = extractor()
            .extract(
                r#"multiple choice: text="Fever is a symptom." question="What is fever?" choices=["a symptom", "a drug"]"#,
                Action::MultipleChoice,
            )
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::MultipleChoice {
                passage: "Fever is a symptom.".into(),
                question: "What is fever?".into(),
                choices: vec!["a symptom".into(), "a drug".into()],
            }
        );
    }

    #[test]
    fn test_multiple_choice_missing_names_first_key() {
        let err = extractor()
            .extract(r#"multiple choice: choices=["a"]"#, Action::MultipleChoice)
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field `text`");
    }

    #[test]
    fn test_multiple_choice_choices_not_a_list() {
        let err = extractor()
            .extract(
                r#"multiple choice: text="t" question="q" choices="a, b""#,
                Action::MultipleChoice,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedArgument);
    }

    #[test]
    fn test_multiple_choice_bad_list_item() {
        let err = extractor()
            .extract(
                r#"multiple choice: text="t" question="q" choices=[a, b]"#,
                Action::MultipleChoice,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedArgument);
    }

    #[test]
    fn test_span() {
        let bundle = extractor()
            .extract(
                r#"answer the question: question="Who?" content="Dr. Smith treated her.""#,
                Action::SpanAnswer,
            )
            .unwrap();
        assert_eq!(
            bundle,
            ArgumentBundle::Span {
                question: "Who?".into(),
                content: "Dr. Smith treated her.".into(),
            }
        );

        let err = extractor()
            .extract(r#"span answer: question="Who?""#, Action::SpanAnswer)
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required field `content`");
    }

    #[test]
    fn test_default_language_always_supported() {
        let ex = ArgumentExtractor::new("Spanish", vec!["German".into()]).unwrap();
        assert_eq!(ex.target_language("translate: hola").unwrap(), "Spanish");
        assert_eq!(ex.supported_languages().len(), 2);
    }
}
