//! Encode/decode round-trips for every payload type, plus wire-shape checks.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use deskmate_core::protocol::{
    decode_envelope, encode_envelope, CharacterSettings, ChatMessagePayload, ConfigMessagePayload,
    ConfigSettings, ConfigUpdatePayload, ControlMessagePayload, MessageType,
};
use serde_json::json;

#[test]
fn chat_payload_wire_shape() {
    let payload = ChatMessagePayload {
        user_id: "user01".into(),
        session_id: "session_ab12cd34".into(),
        message: "hello".into(),
    };
    let text = encode_envelope(MessageType::Chat, &payload).unwrap();
    let env = decode_envelope(&text).unwrap();
    assert_eq!(env.tag, "chat");
    assert_eq!(
        env.payload,
        json!({
            "userId": "user01",
            "sessionId": "session_ab12cd34",
            "message": "hello"
        })
    );
    let back: ChatMessagePayload = env.payload_as().unwrap();
    assert_eq!(back, payload);
}

#[test]
fn timestamp_is_iso8601() {
    let text = encode_envelope(
        MessageType::Control,
        &ControlMessagePayload {
            command: "shutdown".into(),
            reason: "user request".into(),
        },
    )
    .unwrap();
    let env = decode_envelope(&text).unwrap();
    let ts = env.timestamp.unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok(), "bad timestamp: {ts}");
}

#[test]
fn config_update_round_trip() {
    let settings = ConfigSettings {
        is_topmost: true,
        is_escape_cursor: true,
        is_auto_move: false,
        window_size: 0.8,
        current_character_index: 0,
        character_list: vec![CharacterSettings {
            model_name: "mascot-a".into(),
            vrm_file_path: "models/mascot-a.vrm".into(),
            is_use_llm: true,
            llm_model: "gpt-4o-mini".into(),
            ..CharacterSettings::default()
        }],
    };
    let text = encode_envelope(MessageType::Config, &ConfigUpdatePayload::update(settings.clone()))
        .unwrap();

    // Acronym fields keep their peer spelling on the wire.
    assert!(text.contains("\"isUseLLM\":true"));
    assert!(text.contains("\"llmModel\":\"gpt-4o-mini\""));
    assert!(text.contains("\"action\":\"update\""));

    let env = decode_envelope(&text).unwrap();
    let back: ConfigUpdatePayload = env.payload_as().unwrap();
    assert_eq!(back.settings, settings);
}

#[test]
fn legacy_config_key_value_wire_shape() {
    let text = encode_envelope(
        MessageType::Config,
        &ConfigMessagePayload {
            setting_key: "isTopmost".into(),
            value: "true".into(),
        },
    )
    .unwrap();
    let env = decode_envelope(&text).unwrap();
    assert_eq!(
        env.payload,
        json!({ "settingKey": "isTopmost", "value": "true" })
    );
}

#[test]
fn encode_does_not_escape_unicode() {
    let payload = ChatMessagePayload {
        user_id: "user01".into(),
        session_id: "session_ab12cd34".into(),
        message: "こんにちは ☀".into(),
    };
    let text = encode_envelope(MessageType::Chat, &payload).unwrap();
    assert!(text.contains("こんにちは ☀"), "gratuitous escaping in: {text}");
}

#[test]
fn tag_parse_round_trips() {
    for tag in [
        MessageType::Chat,
        MessageType::Config,
        MessageType::Control,
        MessageType::Status,
        MessageType::System,
    ] {
        assert_eq!(MessageType::parse(tag.as_str()), Some(tag));
        assert_eq!(MessageType::parse(&tag.as_str().to_uppercase()), Some(tag));
    }
    assert_eq!(MessageType::parse("telemetry"), None);
}
