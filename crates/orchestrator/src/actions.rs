//! The closed set of actions a command can resolve to.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability of the internal toolkit that a command can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Summarize,
    Translate,
    NamedEntities,
    LinkedEntities,
    PosTagging,
    Abbreviations,
    Hyponyms,
    QuestionGeneration,
    SimilarDocuments,
    MultipleChoice,
    SpanAnswer,
    SentenceSegment,
    Cluster,
}

/// Shape of the argument bundle an action needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// `{ text }`
    SingleText,
    /// `{ text, target_language }`
    Translation,
    /// `{ query, candidates }`
    Similarity,
    /// `{ passage, question, choices }`
    MultipleChoice,
    /// `{ question, content }`
    Span,
}

impl Action {
    /// Every action, in declaration order. This is also the label set
    /// handed to the semantic fallback classifier.
    pub const ALL: [Action; 13] = [
        Action::Summarize,
        Action::Translate,
        Action::NamedEntities,
        Action::LinkedEntities,
        Action::PosTagging,
        Action::Abbreviations,
        Action::Hyponyms,
        Action::QuestionGeneration,
        Action::SimilarDocuments,
        Action::MultipleChoice,
        Action::SpanAnswer,
        Action::SentenceSegment,
        Action::Cluster,
    ];

    /// Tie-break order for synonym groups whose phrases match at the same
    /// position with the same length. Specific multi-word groups come before
    /// the generic single-verb ones.
    pub const PRIORITY: [Action; 13] = [
        Action::SimilarDocuments,
        Action::LinkedEntities,
        Action::MultipleChoice,
        Action::SpanAnswer,
        Action::Abbreviations,
        Action::Hyponyms,
        Action::QuestionGeneration,
        Action::SentenceSegment,
        Action::Cluster,
        Action::Summarize,
        Action::Translate,
        Action::PosTagging,
        Action::NamedEntities,
    ];

    /// Snake-case label, used for classification and logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Translate => "translate",
            Self::NamedEntities => "named_entities",
            Self::LinkedEntities => "linked_entities",
            Self::PosTagging => "pos_tagging",
            Self::Abbreviations => "abbreviations",
            Self::Hyponyms => "hyponyms",
            Self::QuestionGeneration => "question_generation",
            Self::SimilarDocuments => "similar_documents",
            Self::MultipleChoice => "multiple_choice",
            Self::SpanAnswer => "span_answer",
            Self::SentenceSegment => "sentence_segment",
            Self::Cluster => "cluster",
        }
    }

    /// Parse a classifier label. Spaces and hyphens are accepted in place
    /// of underscores.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|action| action.label() == normalized)
    }

    /// Name of the toolkit operation that implements this action.
    pub fn operation(&self) -> &'static str {
        self.label()
    }

    /// Phrases that select this action when found as whole words.
    pub fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::Summarize => &[
                "summarize",
                "simplify",
                "resume",
                "abbreviate",
                "condense",
                "summarise",
            ],
            Self::Translate => &["translate", "convert", "change"],
            Self::NamedEntities => &["extract", "find", "identify", "locate", "detect entities"],
            Self::LinkedEntities => &[
                "linked entities",
                "link entities",
                "find linked entities",
                "identify linked entities",
            ],
            Self::PosTagging => &["tag", "annotate", "label", "perform pos tagging"],
            Self::Abbreviations => &["abbreviations", "extract abbreviations", "shorten", "abbrev"],
            Self::Hyponyms => &["hyponyms", "specific terms", "subordinate"],
            Self::QuestionGeneration => &["generate questions", "question generation", "questions"],
            Self::SimilarDocuments => &[
                "find similar documents",
                "similar documents",
                "related documents",
            ],
            Self::MultipleChoice => &["multiple choice", "choose the answer", "pick the answer"],
            Self::SpanAnswer => &["answer the question", "span answer", "find the answer"],
            Self::SentenceSegment => &[
                "segment sentences",
                "split sentences",
                "sentence segmentation",
                "sentence tokenize",
            ],
            Self::Cluster => &["cluster", "clustering", "group documents"],
        }
    }

    /// Which argument bundle the action takes.
    pub fn shape(&self) -> ArgumentShape {
        match self {
            Self::Translate => ArgumentShape::Translation,
            Self::SimilarDocuments | Self::Cluster => ArgumentShape::Similarity,
            Self::MultipleChoice => ArgumentShape::MultipleChoice,
            Self::SpanAnswer => ArgumentShape::Span,
            Self::Summarize
            | Self::NamedEntities
            | Self::LinkedEntities
            | Self::PosTagging
            | Self::Abbreviations
            | Self::Hyponyms
            | Self::QuestionGeneration
            | Self::SentenceSegment => ArgumentShape::SingleText,
        }
    }

    /// Human-readable title for help output.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Summarize => "Summarize",
            Self::Translate => "Translate",
            Self::NamedEntities => "Extract named entities",
            Self::LinkedEntities => "Extract linked entities",
            Self::PosTagging => "Part-of-speech tagging",
            Self::Abbreviations => "Extract abbreviations",
            Self::Hyponyms => "Extract hyponyms",
            Self::QuestionGeneration => "Generate questions",
            Self::SimilarDocuments => "Find similar documents",
            Self::MultipleChoice => "Multiple-choice QA",
            Self::SpanAnswer => "Span answer",
            Self::SentenceSegment => "Sentence segmentation",
            Self::Cluster => "Cluster documents",
        }
    }

    /// An example command for help output.
    pub fn example(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize: 'Enter the text you want to summarize here.'",
            Self::Translate => "translate to Spanish: 'Enter the text you want to translate.'",
            Self::NamedEntities => "extract: 'Enter the text to extract named entities from.'",
            Self::LinkedEntities => "find linked entities: 'Enter the text here.'",
            Self::PosTagging => "perform pos tagging: 'Enter the text to tag.'",
            Self::Abbreviations => "extract abbreviations: 'Enter the text here.'",
            Self::Hyponyms => "hyponyms: 'Enter the text here.'",
            Self::QuestionGeneration => "generate questions: 'Enter the text here.'",
            Self::SimilarDocuments => {
                "find similar documents: record=\"query note\" cand1=\"first\" cand2=\"second\""
            }
            Self::MultipleChoice => {
                "multiple choice: text=\"passage\" question=\"which?\" choices=[\"a\", \"b\"]"
            }
            Self::SpanAnswer => "answer the question: question=\"what?\" content=\"passage\"",
            Self::SentenceSegment => "split sentences: 'First one. Second one.'",
            Self::Cluster => "cluster: record=\"seed\" cand1=\"doc one\" cand2=\"doc two\"",
        }
    }
}

/// The instruction part of a command: everything before the first colon, or
/// the whole command when it has none. Action and language detection only
/// look here, so words in the payload never change how a command is routed.
pub(crate) fn instruction(command: &str) -> &str {
    command.split_once(':').map_or(command, |(head, _)| head)
}

/// Case-insensitive whole-word alternation over `phrases`. Internal
/// whitespace in a phrase matches any run of whitespace.
pub(crate) fn phrase_pattern(phrases: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = phrases
        .iter()
        .map(|phrase| {
            phrase
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
