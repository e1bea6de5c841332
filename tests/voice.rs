//! Voice pipeline integration tests
//!
//! Exercises the orchestrator end to end without audio hardware or network
//! access: engines are in-memory fakes and the capture/playback commands
//! are stub shell scripts.

use std::sync::Arc;

use aria_gateway::Error;
use aria_gateway::voice::{ConverseOptions, ListenOptions, SpeakOptions, VoiceOrchestrator};

mod common;
use common::{
    FailingTts, FakeStt, FakeTts, play_cmd_discarding, play_cmd_failing, play_cmd_writing_to,
    record_cmd_echoing_args, record_cmd_emitting, record_cmd_failing, scratch_path,
};

fn listen_opts(seconds: u32) -> ListenOptions {
    ListenOptions {
        max_duration_seconds: seconds,
        language: None,
    }
}

#[tokio::test]
async fn listen_passes_duration_flag_to_record_command() {
    let stt = Arc::new(FakeStt::replying("hi", None));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        Arc::new(FakeTts::replying(b"unused")),
        record_cmd_echoing_args(),
        play_cmd_discarding(),
    );

    orchestrator.listen_for_speech(listen_opts(5)).await.unwrap();

    // The stub "records" the flags the adapter appended.
    let calls = stt.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, b"-d 5 ");
}

#[tokio::test]
async fn listen_hands_captured_bytes_to_transcription_unmodified() {
    let stt = Arc::new(FakeStt::replying("hello world", Some("en")));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        Arc::new(FakeTts::replying(b"unused")),
        record_cmd_emitting("RIFF1234WAVEdata"),
        play_cmd_discarding(),
    );

    let result = orchestrator
        .listen_for_speech(ListenOptions {
            max_duration_seconds: 5,
            language: Some("en".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(result.text, "hello world");
    assert_eq!(result.language.as_deref(), Some("en"));

    let calls = stt.calls.lock().unwrap();
    assert_eq!(calls[0].0, b"RIFF1234WAVEdata");
    assert_eq!(calls[0].1.as_deref(), Some("en"));
}

#[tokio::test]
async fn listen_fails_without_transcribing_when_capture_fails() {
    let stt = Arc::new(FakeStt::replying("hi", None));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        Arc::new(FakeTts::replying(b"unused")),
        record_cmd_failing(),
        play_cmd_discarding(),
    );

    let err = orchestrator
        .listen_for_speech(listen_opts(5))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Process(_)));
    assert_eq!(stt.call_count(), 0);
}

#[tokio::test]
async fn speak_streams_synthesized_audio_to_the_play_command() {
    let tts = Arc::new(FakeTts::replying(b"RIFFfakeWAVEbytes"));
    let played = scratch_path("speak");
    let orchestrator = VoiceOrchestrator::new(
        Arc::new(FakeStt::replying("", None)),
        tts.clone(),
        record_cmd_emitting("unused"),
        play_cmd_writing_to(&played),
    );

    orchestrator
        .speak_text(SpeakOptions {
            text: "Hello".to_string(),
            voice_id: Some("nova".to_string()),
            language: None,
        })
        .await
        .unwrap();

    let calls = tts.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Hello");
    assert_eq!(calls[0].1.voice_id.as_deref(), Some("nova"));

    let bytes = std::fs::read(&played).unwrap();
    assert_eq!(bytes, b"RIFFfakeWAVEbytes");
    std::fs::remove_file(&played).ok();
}

#[tokio::test]
async fn speak_fails_when_playback_fails() {
    let orchestrator = VoiceOrchestrator::new(
        Arc::new(FakeStt::replying("", None)),
        Arc::new(FakeTts::replying(b"audio")),
        record_cmd_emitting("unused"),
        play_cmd_failing(),
    );

    let err = orchestrator
        .speak_text(SpeakOptions {
            text: "Hello".to_string(),
            voice_id: None,
            language: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Process(_)));
}

#[tokio::test]
async fn converse_speaks_then_hears_the_reply() {
    let stt = Arc::new(FakeStt::replying("yes please", Some("en")));
    let tts = Arc::new(FakeTts::replying(b"spoken"));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        tts.clone(),
        record_cmd_emitting("reply-audio"),
        play_cmd_discarding(),
    );

    let outcome = orchestrator
        .converse(ConverseOptions::new("Shall we?"))
        .await
        .unwrap();

    assert_eq!(outcome.spoken_message, "Shall we?");
    assert_eq!(outcome.heard_text.as_deref(), Some("yes please"));
    assert_eq!(outcome.heard_language.as_deref(), Some("en"));
    assert_eq!(tts.call_count(), 1);
    assert_eq!(stt.call_count(), 1);
}

#[tokio::test]
async fn converse_reply_window_uses_listen_duration() {
    let stt = Arc::new(FakeStt::replying("ok", None));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        Arc::new(FakeTts::replying(b"spoken")),
        record_cmd_echoing_args(),
        play_cmd_discarding(),
    );

    let mut opts = ConverseOptions::new("hi");
    opts.listen_duration_seconds = 42;
    orchestrator.converse(opts).await.unwrap();

    let calls = stt.calls.lock().unwrap();
    assert_eq!(calls[0].0, b"-d 42 ");
}

#[tokio::test]
async fn converse_without_wait_never_captures() {
    let stt = Arc::new(FakeStt::replying("ignored", None));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        Arc::new(FakeTts::replying(b"spoken")),
        // Capture would fail loudly if it were ever attempted.
        record_cmd_failing(),
        play_cmd_discarding(),
    );

    let mut opts = ConverseOptions::new("Goodbye");
    opts.wait_for_response = false;
    let outcome = orchestrator.converse(opts).await.unwrap();

    assert_eq!(outcome.spoken_message, "Goodbye");
    assert_eq!(outcome.heard_text, None);
    assert_eq!(outcome.heard_language, None);
    assert_eq!(stt.call_count(), 0);
}

#[tokio::test]
async fn converse_speak_failure_aborts_before_listening() {
    let stt = Arc::new(FakeStt::replying("never heard", None));
    let orchestrator = VoiceOrchestrator::new(
        stt.clone(),
        Arc::new(FailingTts),
        record_cmd_emitting("reply-audio"),
        play_cmd_discarding(),
    );

    let err = orchestrator
        .converse(ConverseOptions::new("Shall we?"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::RemoteService { service: "TTS", .. }
    ));
    assert_eq!(stt.call_count(), 0);
}
