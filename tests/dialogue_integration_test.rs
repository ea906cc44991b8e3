//! End-to-end dialogue generation through the Claude speaker adapter.
//!
//! A mock Messages API stands in for the model; each host is told apart by
//! its persona in the request body.

mod common;

use std::sync::Arc;
use std::time::Duration;

use dead_air::adapters::speakers::{ClaudeSpeaker, ScriptedResponse, ScriptedSpeaker};
use dead_air::cli::commands::hooks::{self, HooksArgs};
use dead_air::domain::models::{AnthropicConfig, Config, DialogueConfig, EmotionTag, Speaker};
use dead_air::infrastructure::claude::{ClaudeClient, ClaudeClientConfig};
use dead_air::services::RetryPolicy;
use dead_air::{DialogueGenerationError, SpeakerError, Transcript};
use mockito::{Matcher, Mock, Server, ServerGuard};
use tempfile::TempDir;

use common::{generator_with, instant_retry, sample_case, setup_test_logging};

const HOST_A_PERSONA: &str = "You are Maya Vance";
const HOST_B_PERSONA: &str = "You are Dr. Aris Thorne";

fn message_body(line: &str) -> String {
    serde_json::json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "text", "text": line}],
        "model": "claude-sonnet-4-20250514",
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 300, "output_tokens": 45}
    })
    .to_string()
}

fn claude_host(server: &ServerGuard, speaker: Speaker) -> Arc<ClaudeSpeaker> {
    let client = ClaudeClient::new(ClaudeClientConfig {
        api_key: "sk-ant-test-key".to_string(),
        base_url: server.url(),
        timeout_secs: 5,
    })
    .unwrap();
    Arc::new(ClaudeSpeaker::for_host(
        client,
        &AnthropicConfig::default(),
        &DialogueConfig::default(),
        speaker,
    ))
}

async fn host_mock(server: &mut ServerGuard, persona: &str, status: usize, line: &str, hits: usize) -> Mock {
    server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "sk-ant-test-key")
        .match_body(Matcher::Regex(persona.to_string()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(message_body(line))
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn test_full_episode_against_messages_api() {
    setup_test_logging();
    let mut server = Server::new_async().await;
    let maya = host_mock(
        &mut server,
        HOST_A_PERSONA,
        200,
        r#"{"text": "Wait, the keys were still in the ignition when they found the car.", "emotion_tag": "gasps"}"#,
        3,
    )
    .await;
    let thorne = host_mock(
        &mut server,
        HOST_B_PERSONA,
        200,
        r#"{"text": "Which tells us she expected to come back.", "emotion_tag": "[dramatic pause]"}"#,
        3,
    )
    .await;

    let (retry, sleeper) = instant_retry(RetryPolicy::default());
    let generator = generator_with(
        claude_host(&server, Speaker::HostA),
        claude_host(&server, Speaker::HostB),
        retry,
    );

    let transcript = generator.generate_dialogue(&sample_case(), 3).await.unwrap();

    assert_eq!(transcript.len(), 6);
    assert_eq!(transcript.case_id(), "case-1994-lr");
    assert_eq!(
        transcript.episode_title(),
        "The Asheville, NC Mystery: The Lantern Road Disappearance"
    );
    for (i, turn) in transcript.turns().iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(turn.speaker(), Speaker::HostA);
            assert_eq!(turn.emotion_tag(), EmotionTag::Gasps);
        } else {
            assert_eq!(turn.speaker(), Speaker::HostB);
            assert_eq!(turn.emotion_tag(), EmotionTag::DramaticPause);
        }
    }
    assert_eq!(transcript.highlights().len(), 3);
    assert!(transcript.highlights().iter().all(|h| h.starts_with("Wait,")));
    assert!(sleeper.delays().is_empty());

    maya.assert_async().await;
    thorne.assert_async().await;
}

#[tokio::test]
async fn test_overloaded_host_exhausts_retries() {
    let mut server = Server::new_async().await;
    let _maya = host_mock(
        &mut server,
        HOST_A_PERSONA,
        200,
        r#"{"text": "Tonight we go back to Lantern Road."}"#,
        1,
    )
    .await;
    let thorne = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::Regex(HOST_B_PERSONA.to_string()))
        .with_status(529)
        .with_body(r#"{"type": "error", "error": {"type": "overloaded_error"}}"#)
        .expect(3)
        .create_async()
        .await;

    let (retry, sleeper) = instant_retry(RetryPolicy::new(3, Duration::from_millis(500)));
    let generator = generator_with(
        claude_host(&server, Speaker::HostA),
        claude_host(&server, Speaker::HostB),
        retry,
    );

    let err = generator
        .generate_dialogue(&sample_case(), 5)
        .await
        .unwrap_err();

    assert_eq!(err.speaker(), Some(Speaker::HostB));
    assert_eq!(err.exchange(), Some(0));
    assert!(matches!(
        err,
        DialogueGenerationError::SpeakerFailed {
            source: SpeakerError::Upstream(_),
            ..
        }
    ));
    assert_eq!(
        sleeper.delays(),
        vec![Duration::from_millis(500), Duration::from_millis(1000)]
    );
    thorne.assert_async().await;
}

#[tokio::test]
async fn test_rejected_request_fails_fast() {
    let mut server = Server::new_async().await;
    let maya = server
        .mock("POST", "/v1/messages")
        .with_status(401)
        .with_body(r#"{"type": "error", "error": {"type": "authentication_error"}}"#)
        .expect(1)
        .create_async()
        .await;

    let (retry, sleeper) = instant_retry(RetryPolicy::default());
    let generator = generator_with(
        claude_host(&server, Speaker::HostA),
        claude_host(&server, Speaker::HostB),
        retry,
    );

    let err = generator
        .generate_dialogue(&sample_case(), 2)
        .await
        .unwrap_err();

    assert_eq!(err.speaker(), Some(Speaker::HostA));
    assert_eq!(err.exchange(), Some(0));
    assert!(sleeper.delays().is_empty());
    maya.assert_async().await;
}

#[tokio::test]
async fn test_saved_transcript_feeds_hooks() {
    let host_a = ScriptedSpeaker::with_responses(
        "Maya",
        [
            ScriptedResponse::line("Welcome back to Dead Air."),
            ScriptedResponse::line("But here's the thing: nobody saw her leave the trail."),
        ],
    );
    let host_b = ScriptedSpeaker::with_responses(
        "Thorne",
        [
            ScriptedResponse::line("What if the second car belonged to someone she knew?"),
            ScriptedResponse::line("The timeline only works if the ranger is wrong."),
        ],
    );
    let (retry, _) = instant_retry(RetryPolicy::default());
    let generator = generator_with(Arc::new(host_a), Arc::new(host_b), retry);
    let transcript = generator.generate_dialogue(&sample_case(), 2).await.unwrap();
    assert_eq!(transcript.highlights().len(), 3);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("episode.json");
    std::fs::write(&path, serde_json::to_string_pretty(&transcript).unwrap()).unwrap();

    let reloaded: Transcript =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded.script_id(), transcript.script_id());
    assert_eq!(reloaded.turns(), transcript.turns());
    assert_eq!(reloaded.highlights(), transcript.highlights());

    let hooks = hooks::extract(
        &HooksArgs {
            transcript: path,
            max: Some(2),
        },
        &Config::default(),
    )
    .unwrap();
    assert_eq!(hooks.script_id, transcript.script_id());
    assert_eq!(
        hooks.highlights,
        vec![
            "What if the second car belonged to someone she knew?".to_string(),
            "But here's the thing: nobody saw her leave the trail.".to_string(),
        ]
    );
}
