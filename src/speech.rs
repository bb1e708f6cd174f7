//! Speech bridge: narration out, recognized commands in.
//!
//! Both directions are optional platform capabilities. A missing speaker
//! makes `speak` a silent no-op; a missing recognizer leaves the voice
//! status on "not supported" and nothing else changes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::config::{SPEECH_LANG, SPEECH_RATE};

pub const STATUS_LISTENING: &str = "Listening…";
pub const STATUS_STOPPED: &str = "Stopped";
pub const STATUS_UNSUPPORTED: &str = "Voice recognition not supported in this browser.";

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Recognition session could not start: {0}")]
    StartFailed(String),
}

/// A single narration request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub lang: &'static str,
}

/// Text-to-speech capability.
pub trait Speaker: Send {
    fn speak(&mut self, utterance: Utterance);
}

/// Speech-to-text capability: a continuous recognition session.
pub trait Recognizer: Send {
    fn start(&mut self) -> Result<(), SpeechError>;
    fn stop(&mut self);
}

/// Speaker that queues utterances for a client to voice.
///
/// Cloned handles share the same queue.
#[derive(Debug, Clone, Default)]
pub struct NarrationQueue {
    queue: Arc<Mutex<VecDeque<Utterance>>>,
}

impl NarrationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued utterance, oldest first.
    pub fn drain(&self) -> Vec<Utterance> {
        match self.queue.lock() {
            Ok(mut q) => q.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Speaker for NarrationQueue {
    fn speak(&mut self, utterance: Utterance) {
        if let Ok(mut q) = self.queue.lock() {
            q.push_back(utterance);
        }
    }
}

/// Recognizer whose engine runs in the page; the session only mirrors
/// start and stop.
#[derive(Debug, Default)]
pub struct ClientRecognizer;

impl Recognizer for ClientRecognizer {
    fn start(&mut self) -> Result<(), SpeechError> {
        tracing::debug!(lang = SPEECH_LANG, "Client recognition requested");
        Ok(())
    }

    fn stop(&mut self) {
        tracing::debug!("Client recognition stop requested");
    }
}

// ═══════════════════════════════════════════
// Narration
// ═══════════════════════════════════════════

/// Outbound half: fire-and-forget narration at a fixed rate.
pub struct SpeechBridge {
    speaker: Option<Box<dyn Speaker>>,
}

impl SpeechBridge {
    pub fn new(speaker: Option<Box<dyn Speaker>>) -> Self {
        Self { speaker }
    }

    pub fn silent() -> Self {
        Self { speaker: None }
    }

    pub fn is_available(&self) -> bool {
        self.speaker.is_some()
    }

    pub fn speak(&mut self, text: &str) {
        let Some(speaker) = self.speaker.as_mut() else {
            return;
        };
        speaker.speak(Utterance {
            text: text.to_string(),
            rate: SPEECH_RATE,
            lang: SPEECH_LANG,
        });
    }
}

// ═══════════════════════════════════════════
// Recognition session
// ═══════════════════════════════════════════

/// Voice indicator states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VoiceStatus {
    Idle,
    Listening,
    Heard { text: String },
    Stopped,
    Unsupported,
}

impl VoiceStatus {
    /// Indicator text. Idle shows nothing.
    pub fn label(&self) -> String {
        match self {
            VoiceStatus::Idle => String::new(),
            VoiceStatus::Listening => STATUS_LISTENING.to_string(),
            VoiceStatus::Heard { text } => format!("Heard: {text}"),
            VoiceStatus::Stopped => STATUS_STOPPED.to_string(),
            VoiceStatus::Unsupported => STATUS_UNSUPPORTED.to_string(),
        }
    }
}

/// Inbound half: a continuous session and its indicator.
pub struct VoiceSession {
    recognizer: Option<Box<dyn Recognizer>>,
    active: bool,
    status: VoiceStatus,
}

impl VoiceSession {
    pub fn new(recognizer: Option<Box<dyn Recognizer>>) -> Self {
        let status = if recognizer.is_some() {
            VoiceStatus::Idle
        } else {
            VoiceStatus::Unsupported
        };
        Self {
            recognizer,
            active: false,
            status,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn status(&self) -> &VoiceStatus {
        &self.status
    }

    /// Start listening. Without a recognizer nothing happens.
    pub fn start_listening(&mut self) {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return;
        };
        if self.active {
            return;
        }
        match recognizer.start() {
            Ok(()) => {
                self.active = true;
                self.status = VoiceStatus::Listening;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Voice session did not start");
                self.status = VoiceStatus::Stopped;
            }
        }
    }

    /// Stop listening. Idempotent when no session is running.
    pub fn stop_listening(&mut self) {
        if !self.active {
            return;
        }
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        self.active = false;
        self.status = VoiceStatus::Stopped;
    }

    /// Accept one finalized result batch.
    ///
    /// Only the most recent transcript counts. It is lower-cased, shown as
    /// heard, and returned for routing. Results outside an active session
    /// or with no transcript are dropped.
    pub fn accept_results(&mut self, transcripts: &[String]) -> Option<String> {
        if !self.active {
            tracing::debug!("Recognition result outside an active session");
            return None;
        }
        let text = transcripts.last()?.to_lowercase();
        self.status = VoiceStatus::Heard { text: text.clone() };
        Some(text)
    }
}
