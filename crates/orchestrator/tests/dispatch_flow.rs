//! End-to-end tests for `process_command`.
//!
//! Every test drives the full pipeline (meta commands, backend resolution,
//! action classification, argument extraction, dispatch, history) against
//! the in-memory collaborators from `mock-brain`.
//!
//! Run with:
//!   cargo test -p orchestrator --test dispatch_flow

use std::sync::Arc;

use brain_core::ToolkitOutput;
use mock_brain::{EchoBrain, FailingBrain, RecordingToolkit, ScriptedClassifier};
use orchestrator::{
    ArgumentBundle, Backend, ErrorKind, HistoryEntry, Orchestrator, OrchestratorConfig,
    RankedItem, Response, Role, RoutingPolicy, Session, VendorKind, DEFAULT_TOOLKIT_MODEL,
};

struct Harness {
    orchestrator: Orchestrator,
    toolkit: Arc<RecordingToolkit>,
    classifier: Arc<ScriptedClassifier>,
}

impl Harness {
    fn new(config: OrchestratorConfig, toolkit: RecordingToolkit, classifier: ScriptedClassifier) -> Self {
        let toolkit = Arc::new(toolkit);
        let classifier = Arc::new(classifier);
        let orchestrator = Orchestrator::new(config, toolkit.clone(), classifier.clone()).unwrap();
        Self {
            orchestrator,
            toolkit,
            classifier,
        }
    }

    fn with_toolkit(toolkit: RecordingToolkit) -> Self {
        Self::new(OrchestratorConfig::default(), toolkit, ScriptedClassifier::new())
    }

    /// A session with the toolkit selected.
    fn toolkit_session(&self) -> Session {
        let mut session = self.orchestrator.new_session();
        assert!(session.select_backend("toolkit", None));
        session
    }

    async fn last_toolkit_args(&self) -> ArgumentBundle {
        self.toolkit
            .requests()
            .await
            .pop()
            .expect("toolkit was not called")
            .args
    }
}

// ============================================================================
// Toolkit scenarios
// ============================================================================

mod toolkit_tests {
    use super::*;

    #[tokio::test]
    async fn test_summarize_scenario() {
        let harness = Harness::with_toolkit(
            RecordingToolkit::new().with_output("summarize", ToolkitOutput::Text("Fever noted.".into())),
        );
        let mut session = harness.toolkit_session();

        let reply = harness
            .orchestrator
            .process_command(&mut session, "summarize: The patient has a fever.")
            .await;
        assert_eq!(reply, "Fever noted.");

        let requests = harness.toolkit.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].operation, "summarize");
        assert_eq!(requests[0].model, DEFAULT_TOOLKIT_MODEL);
        assert_eq!(requests[0].args, ArgumentBundle::text("The patient has a fever."));
        assert_eq!(harness.classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_translate_scenario() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(&mut session, "translate to Spanish: Hello doctor")
            .await;

        assert_eq!(
            harness.last_toolkit_args().await,
            ArgumentBundle::Translation {
                text: "Hello doctor".into(),
                target_language: "Spanish".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_translate_defaults_to_french() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(&mut session, "translate: The wound is healing well.")
            .await;

        match harness.last_toolkit_args().await {
            ArgumentBundle::Translation { target_language, .. } => {
                assert_eq!(target_language, "French")
            }
            other => panic!("Expected translation bundle, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_payload_words_keep_the_requested_action() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        let cases = [
            (
                "summarize: The patient had questions about the dosing.",
                "summarize",
                ArgumentBundle::text("The patient had questions about the dosing."),
            ),
            (
                "summarize: Headaches occurring in a cluster pattern.",
                "summarize",
                ArgumentBundle::text("Headaches occurring in a cluster pattern."),
            ),
            (
                "translate to Spanish: Take two tablets and call if symptoms shorten.",
                "translate",
                ArgumentBundle::Translation {
                    text: "Take two tablets and call if symptoms shorten.".into(),
                    target_language: "Spanish".into(),
                },
            ),
        ];

        for (command, operation, args) in cases {
            let response = harness.orchestrator.respond(&mut session, command).await;
            assert!(!response.is_error(), "{command}: {}", response.render());

            let request = harness.toolkit.requests().await.pop().unwrap();
            assert_eq!(request.operation, operation, "{command}");
            assert_eq!(request.args, args, "{command}");
        }
        assert_eq!(harness.classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_language_in_payload_is_ignored() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(&mut session, "translate: walk to English class")
            .await;

        assert_eq!(
            harness.last_toolkit_args().await,
            ArgumentBundle::Translation {
                text: "walk to English class".into(),
                target_language: "French".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_similarity_legacy_scenario_returns_ranked_list() {
        let ranked = vec![RankedItem::new("B", 0.9), RankedItem::new("C", 0.4)];
        let harness = Harness::with_toolkit(
            RecordingToolkit::new()
                .with_output("similar_documents", ToolkitOutput::Ranked(ranked.clone())),
        );
        let mut session = harness.toolkit_session();

        let response = harness
            .orchestrator
            .respond(
                &mut session,
                "find similar documents: query_note='A' candidates='B|C'",
            )
            .await;
        assert_eq!(response, Response::RankedList(ranked));

        assert_eq!(
            harness.last_toolkit_args().await,
            ArgumentBundle::Similarity {
                query: "A".into(),
                candidates: vec!["B".into(), "C".into()],
            }
        );

        let history = session.get_history();
        assert_eq!(history[1].message, "1. B (score: 0.9000)\n2. C (score: 0.4000)");
    }

    #[tokio::test]
    async fn test_similarity_record_and_numbered_candidates() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(
                &mut session,
                r#"find similar documents: record="X" cand1="Y" cand2="Z""#,
            )
            .await;

        assert_eq!(
            harness.last_toolkit_args().await,
            ArgumentBundle::Similarity {
                query: "X".into(),
                candidates: vec!["Y".into(), "Z".into()],
            }
        );
    }

    #[tokio::test]
    async fn test_multiple_choice_through_pipeline() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(
                &mut session,
                r#"multiple choice: text="Aspirin thins blood." question="What does aspirin do?" choices=["thins blood", "raises pressure"]"#,
            )
            .await;

        assert_eq!(
            harness.last_toolkit_args().await,
            ArgumentBundle::MultipleChoice {
                passage: "Aspirin thins blood.".into(),
                question: "What does aspirin do?".into(),
                choices: vec!["thins blood".into(), "raises pressure".into()],
            }
        );
    }

    #[tokio::test]
    async fn test_structured_output_rendered_as_json() {
        let harness = Harness::with_toolkit(RecordingToolkit::new().with_output(
            "named_entities",
            ToolkitOutput::Structured(serde_json::json!([{"text": "fever", "label": "SYMPTOM"}])),
        ));
        let mut session = harness.toolkit_session();

        let reply = harness
            .orchestrator
            .process_command(&mut session, "extract: fever since Monday")
            .await;
        assert!(reply.contains("\"label\": \"SYMPTOM\""));
    }
}

// ============================================================================
// Action classification through the pipeline
// ============================================================================

mod classification_tests {
    use super::*;

    #[tokio::test]
    async fn test_synonym_wins_over_semantic_fallback() {
        let harness = Harness::new(
            OrchestratorConfig::default(),
            RecordingToolkit::new(),
            ScriptedClassifier::new().with_fallback("translate"),
        );
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(&mut session, "condense: long discharge summary")
            .await;

        let requests = harness.toolkit.requests().await;
        assert_eq!(requests[0].operation, "summarize");
        assert_eq!(harness.classifier.calls(), 0);
    }

    #[tokio::test]
    async fn test_fallback_used_without_synonym() {
        let harness = Harness::new(
            OrchestratorConfig::default(),
            RecordingToolkit::new(),
            ScriptedClassifier::new().with_fallback("hyponyms"),
        );
        let mut session = harness.toolkit_session();

        harness
            .orchestrator
            .process_command(&mut session, "what kinds of anemia exist")
            .await;

        let requests = harness.toolkit.requests().await;
        assert_eq!(requests[0].operation, "hyponyms");
        assert_eq!(
            requests[0].args,
            ArgumentBundle::text("what kinds of anemia exist")
        );
        assert_eq!(harness.classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_classifier_failure_reported() {
        let harness = Harness::new(
            OrchestratorConfig::default(),
            RecordingToolkit::new(),
            ScriptedClassifier::failing(),
        );
        let mut session = harness.toolkit_session();

        let response = harness
            .orchestrator
            .respond(&mut session, "what kinds of anemia exist")
            .await;
        assert_eq!(response.error_kind(), Some(ErrorKind::CollaboratorFailure));
        assert!(harness.toolkit.requests().await.is_empty());
    }
}

// ============================================================================
// Errors never end the session
// ============================================================================

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_record_is_reported_without_dispatch() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        let response = harness
            .orchestrator
            .respond(&mut session, "find similar documents: cand1='B'")
            .await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingField));
        assert_eq!(response.render(), "Error: missing required field `record`");
        assert!(harness.toolkit.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_no_backend_selected() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.orchestrator.new_session();

        let response = harness.orchestrator.respond(&mut session, "hello").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::NoBackendSelected));
        assert_eq!(session.get_history().len(), 2);
    }

    #[tokio::test]
    async fn test_unsupported_language() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        let reply = harness
            .orchestrator
            .process_command(&mut session, "translate to Japanese: Take two tablets")
            .await;
        assert!(reply.starts_with("Error: unsupported language `Japanese`"));

        let reply = harness
            .orchestrator
            .process_command(&mut session, "translate this Japanese leaflet: Take two tablets")
            .await;
        assert!(reply.starts_with("Error: unsupported language `Japanese`"));
        assert!(harness.toolkit.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_action() {
        let harness = Harness::with_toolkit(RecordingToolkit::new().without("cluster"));
        let mut session = harness.toolkit_session();

        let response = harness
            .orchestrator
            .respond(&mut session, r#"cluster: record="seed" cand1="a""#)
            .await;
        assert_eq!(response.error_kind(), Some(ErrorKind::UnsupportedAction));
    }

    #[tokio::test]
    async fn test_collaborator_failure_then_recovery() {
        let harness = Harness::with_toolkit(RecordingToolkit::new().failing_on("summarize"));
        let mut session = harness.toolkit_session();

        let failed = harness
            .orchestrator
            .respond(&mut session, "summarize: chest pain")
            .await;
        assert_eq!(failed.error_kind(), Some(ErrorKind::CollaboratorFailure));
        assert!(failed.render().contains("summarize crashed"));

        let ok = harness
            .orchestrator
            .respond(&mut session, "hyponyms: chest pain")
            .await;
        assert!(!ok.is_error());
        assert_eq!(session.get_history().len(), 4);
    }

    #[tokio::test]
    async fn test_vendor_failure_is_reported() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let orchestrator = harness
            .orchestrator
            .with_brain(VendorKind::ChatGpt, Arc::new(FailingBrain::new("quota exceeded")));
        let mut session = orchestrator.new_session();

        orchestrator.process_command(&mut session, "switch to 1").await;
        let reply = orchestrator.process_command(&mut session, "hello").await;
        assert_eq!(reply, "Error: collaborator failed: processing failed: quota exceeded");
        assert_eq!(session.get_history().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_command() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        let response = harness.orchestrator.respond(&mut session, "   ").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::MissingField));
        assert_eq!(session.get_history().len(), 2);
    }
}

// ============================================================================
// Meta commands and backend selection
// ============================================================================

mod selection_tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_backend_leaves_selection_unchanged() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        let reply = harness
            .orchestrator
            .process_command(&mut session, "switch to invalid_name")
            .await;
        assert!(reply.starts_with("Error: invalid backend `invalid_name`"));
        assert_eq!(session.active().unwrap().backend, Backend::Toolkit);
    }

    #[tokio::test]
    async fn test_switch_by_number_and_version() {
        let brain = Arc::new(EchoBrain::new());
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let orchestrator = harness.orchestrator.with_brain(VendorKind::Claude, brain.clone());
        let mut session = orchestrator.new_session();

        let reply = orchestrator.process_command(&mut session, "switch model to 2").await;
        assert_eq!(reply, "Switched to Claude (claude-3-5-sonnet-20240620).");

        orchestrator
            .process_command(&mut session, "use model claude claude-3-opus")
            .await;
        orchestrator.process_command(&mut session, "hello").await;

        let requests = brain.requests().await;
        assert_eq!(requests[0].model, "claude-3-opus");
    }

    #[tokio::test]
    async fn test_switch_to_llama() {
        let brain = Arc::new(EchoBrain::with_prefix("llama: "));
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let orchestrator = harness.orchestrator.with_brain(VendorKind::Llama, brain.clone());
        let mut session = orchestrator.new_session();

        let reply = orchestrator.process_command(&mut session, "switch to 4").await;
        assert_eq!(reply, "Switched to LLaMA (meta-llama/Llama-3.2-3B-Instruct).");
        assert_eq!(session.active().unwrap().backend, Backend::Llama);

        let reply = orchestrator.process_command(&mut session, "hello").await;
        assert_eq!(reply, "llama: hello");
        assert_eq!(brain.requests().await[0].model, "meta-llama/Llama-3.2-3B-Instruct");
    }

    #[tokio::test]
    async fn test_unconfigured_vendor() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.orchestrator.new_session();

        harness
            .orchestrator
            .process_command(&mut session, "switch to gemini")
            .await;
        let response = harness.orchestrator.respond(&mut session, "hello").await;
        assert_eq!(response.error_kind(), Some(ErrorKind::CollaboratorFailure));
        assert!(response.render().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_help_and_show_history() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.toolkit_session();

        let help = harness.orchestrator.process_command(&mut session, "help").await;
        assert!(help.contains("find similar documents"));

        let history = harness
            .orchestrator
            .process_command(&mut session, "show history")
            .await;
        assert!(history.starts_with("Conversation History:\nUser: help\nSystem: "));
        assert_eq!(harness.classifier.calls(), 0);
        assert!(harness.toolkit.requests().await.is_empty());
    }
}

// ============================================================================
// Conversation history
// ============================================================================

mod history_tests {
    use super::*;

    #[tokio::test]
    async fn test_history_has_two_entries_per_call_in_order() {
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let mut session = harness.orchestrator.new_session();

        let commands = [
            "hello",
            "switch to toolkit",
            "summarize: The patient has a fever.",
            "find similar documents: cand1='B'",
            "show history",
        ];
        for command in commands {
            harness.orchestrator.process_command(&mut session, command).await;
        }

        let history = session.get_history();
        assert_eq!(history.len(), 2 * commands.len());
        for (i, command) in commands.iter().enumerate() {
            assert_eq!(history[2 * i], HistoryEntry::user(*command));
            assert_eq!(history[2 * i + 1].role, Role::System);
        }
    }

    #[tokio::test]
    async fn test_chat_backend_receives_prior_turns() {
        let brain = Arc::new(EchoBrain::new());
        let harness = Harness::with_toolkit(RecordingToolkit::new());
        let orchestrator = harness.orchestrator.with_brain(VendorKind::ChatGpt, brain.clone());
        let mut session = orchestrator.new_session();

        orchestrator.process_command(&mut session, "switch to chatgpt").await;
        orchestrator.process_command(&mut session, "first question").await;
        orchestrator.process_command(&mut session, "summarize: raw text").await;

        let requests = brain.requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].history.len(), 2);
        assert_eq!(requests[1].prompt, "summarize: raw text");
        assert_eq!(requests[1].history.len(), 4);
        assert_eq!(requests[1].history[2], HistoryEntry::user("first question"));
        assert_eq!(harness.toolkit.requests().await.len(), 0);
    }

    #[tokio::test]
    async fn test_context_window() {
        let brain = Arc::new(EchoBrain::new());
        let config = OrchestratorConfig::builder().max_context_entries(2).build();
        let harness = Harness::new(config, RecordingToolkit::new(), ScriptedClassifier::new());
        let orchestrator = harness.orchestrator.with_brain(VendorKind::Gemini, brain.clone());
        let mut session = orchestrator.new_session();

        orchestrator.process_command(&mut session, "switch to 3").await;
        orchestrator.process_command(&mut session, "one").await;
        orchestrator.process_command(&mut session, "two").await;

        let requests = brain.requests().await;
        let last = requests.last().unwrap();
        assert_eq!(last.history, vec![HistoryEntry::user("one"), HistoryEntry::system("one")]);
        // The stored log is never trimmed
        assert_eq!(session.get_history().len(), 6);
    }
}

// ============================================================================
// Topic-gated routing
// ============================================================================

mod topic_tests {
    use super::*;

    fn gated(classifier: ScriptedClassifier) -> (Harness, Arc<EchoBrain>) {
        let config = OrchestratorConfig::builder()
            .policy(RoutingPolicy::TopicGated)
            .build();
        let brain = Arc::new(EchoBrain::with_prefix("claude: "));
        let mut harness = Harness::new(config, RecordingToolkit::new(), classifier);
        harness.orchestrator = harness.orchestrator.with_brain(VendorKind::Claude, brain.clone());
        (harness, brain)
    }

    #[tokio::test]
    async fn test_medical_keyword_goes_to_toolkit_despite_selection() {
        let (harness, brain) = gated(ScriptedClassifier::new().with_fallback("sports"));
        let mut session = harness.orchestrator.new_session();
        session.select_backend("claude", None);

        harness
            .orchestrator
            .process_command(&mut session, "summarize: new treatment for arthritis")
            .await;

        let requests = harness.toolkit.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, DEFAULT_TOOLKIT_MODEL);
        assert!(brain.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_general_topic_goes_to_selected_backend() {
        let (harness, brain) = gated(ScriptedClassifier::new().with_fallback("finance"));
        let mut session = harness.orchestrator.new_session();
        session.select_backend("claude", None);

        let reply = harness
            .orchestrator
            .process_command(&mut session, "how are markets doing")
            .await;
        assert_eq!(reply, "claude: how are markets doing");
        assert!(harness.toolkit.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_in_domain_without_selection() {
        let (harness, _) = gated(ScriptedClassifier::new().with_fallback("healthcare"));
        let mut session = harness.orchestrator.new_session();

        harness
            .orchestrator
            .process_command(&mut session, "summarize: staffing on the ward")
            .await;
        assert_eq!(harness.toolkit.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_general_without_selection() {
        let (harness, _) = gated(ScriptedClassifier::new().with_fallback("sports"));
        let mut session = harness.orchestrator.new_session();

        let response = harness
            .orchestrator
            .respond(&mut session, "who won the match")
            .await;
        assert_eq!(response.error_kind(), Some(ErrorKind::NoBackendSelected));
    }
}
