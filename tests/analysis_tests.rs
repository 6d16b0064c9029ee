// Integration tests for the one-shot plant analysis requester
//
// These tests verify default-prompt substitution, request part ordering, and
// that failures propagate instead of being swallowed.

mod common;

use anyhow::Result;
use common::ScriptedBackend;
use std::sync::Arc;
use verdant::{ImagePayload, Part, PlantAnalyzer, DEFAULT_PROMPT};

fn sample_image() -> ImagePayload {
    ImagePayload::from_bytes(b"fake jpeg bytes", "image/jpeg").expect("small image encodes")
}

#[tokio::test]
async fn test_analyze_uses_default_prompt_when_no_question() -> Result<()> {
    let backend = Arc::new(ScriptedBackend::with_reply("Ficus elastica"));
    let analyzer = PlantAnalyzer::new(backend.clone(), "test-model");

    let analysis = analyzer.analyze(sample_image(), None).await?;
    assert_eq!(analysis, "Ficus elastica");

    let contents = backend.last_contents().expect("Backend saw a request");
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].role.as_deref(), Some("user"));

    // Image part first, then the instruction text
    assert_eq!(contents[0].parts.len(), 2);
    match &contents[0].parts[0] {
        Part::InlineData { inline_data } => {
            assert_eq!(inline_data.mime_type, "image/jpeg");
            assert!(!inline_data.data.is_empty());
        }
        other => panic!("Expected inline data part first, got {:?}", other),
    }
    match &contents[0].parts[1] {
        Part::Text { text } => assert_eq!(text, DEFAULT_PROMPT),
        other => panic!("Expected text part second, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_blank_question_falls_back_to_default_prompt() -> Result<()> {
    let backend = Arc::new(ScriptedBackend::with_reply("ok"));
    let analyzer = PlantAnalyzer::new(backend.clone(), "test-model");

    analyzer.analyze(sample_image(), Some("   ")).await?;

    let contents = backend.last_contents().unwrap();
    match &contents[0].parts[1] {
        Part::Text { text } => assert_eq!(text, DEFAULT_PROMPT),
        other => panic!("Expected text part, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_custom_question_passes_verbatim() -> Result<()> {
    let backend = Arc::new(ScriptedBackend::with_reply("ok"));
    let analyzer = PlantAnalyzer::new(backend.clone(), "test-model");

    analyzer
        .analyze(sample_image(), Some("Why are the leaves yellow?"))
        .await?;

    let contents = backend.last_contents().unwrap();
    match &contents[0].parts[1] {
        Part::Text { text } => assert_eq!(text, "Why are the leaves yellow?"),
        other => panic!("Expected text part, got {:?}", other),
    }

    Ok(())
}

#[tokio::test]
async fn test_transport_failure_propagates_as_analysis_error() {
    let backend = Arc::new(ScriptedBackend::failing());
    let analyzer = PlantAnalyzer::new(backend, "test-model");

    let result = analyzer.analyze(sample_image(), None).await;

    let err = result.expect_err("Analysis must surface failures");
    assert!(err.to_string().contains("plant analysis failed"));
}

#[tokio::test]
async fn test_each_call_is_independent() -> Result<()> {
    let backend = Arc::new(ScriptedBackend::new(vec![
        Ok("first".to_string()),
        Ok("second".to_string()),
    ]));
    let analyzer = PlantAnalyzer::new(backend.clone(), "test-model");

    analyzer.analyze(sample_image(), None).await?;
    analyzer.analyze(sample_image(), None).await?;

    assert_eq!(backend.calls(), 2, "No state is reused between calls");

    // The second request carries no history, just the one-shot parts
    let contents = backend.last_contents().unwrap();
    assert_eq!(contents.len(), 1);

    Ok(())
}
