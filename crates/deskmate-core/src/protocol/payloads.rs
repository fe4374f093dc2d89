//! Typed payloads, one shape per envelope tag.
//!
//! Wire field names are camelCase. Acronym fields that the peer spells
//! differently (`isUseLLM`, `llmModel`) carry explicit renames.

use serde::{Deserialize, Serialize};

/// Outbound `chat` payload: one user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessagePayload {
    pub user_id: String,
    pub session_id: String,
    pub message: String,
}

/// Inbound `chat` payload: the runtime's reply text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponsePayload {
    pub response: String,
}

/// Outbound `config` payload requesting the full settings snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRequestPayload {
    pub action: String,
}

impl ConfigRequestPayload {
    pub fn get() -> Self {
        Self {
            action: "get".into(),
        }
    }
}

/// Outbound `config` payload pushing a full settings snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdatePayload {
    pub action: String,
    pub settings: ConfigSettings,
}

impl ConfigUpdatePayload {
    pub fn update(settings: ConfigSettings) -> Self {
        Self {
            action: "update".into(),
            settings,
        }
    }
}

/// Legacy outbound `config` payload: single key/value change. Retained for
/// older protocol consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMessagePayload {
    pub setting_key: String,
    pub value: String,
}

/// Inbound `config` payload. `settings` is present only when the peer
/// answers a successful get/push with a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponsePayload {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ConfigSettings>,
}

impl ConfigResponsePayload {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Full application settings snapshot, carried through unmodified.
///
/// `current_character_index` is expected to index into `character_list`
/// whenever the list is non-empty; the peer and the settings store uphold
/// that, not this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSettings {
    pub is_topmost: bool,
    pub is_escape_cursor: bool,
    pub is_auto_move: bool,
    pub window_size: f64,
    pub current_character_index: i64,
    #[serde(default)]
    pub character_list: Vec<CharacterSettings>,
}

/// Per-character settings. Opaque to the link layer: carried, never
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSettings {
    pub is_read_only: bool,
    pub model_name: String,
    pub vrm_file_path: String,
    #[serde(rename = "isUseLLM")]
    pub is_use_llm: bool,
    pub api_key: String,
    #[serde(rename = "llmModel")]
    pub llm_model: String,
    pub system_prompt: String,
    pub is_use_nijivoice: bool,
    pub nijivoice_api_key: String,
    pub nijivoice_actor_id: String,
}

/// Outbound `control` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlMessagePayload {
    pub command: String,
    pub reason: String,
}

/// Inbound `status` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessagePayload {
    pub current_cpu: i64,
    pub status: String,
}

/// Inbound `system` payload. Reserved in the current protocol surface; the
/// dispatcher only logs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMessagePayload {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
}
