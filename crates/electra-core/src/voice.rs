//! Voice-mode session state machine for the speech UI.
//!
//! ```text
//! Idle --Start--> Speaking(greeting) or Listening
//! Listening --SilenceTimeout(non-empty)--> Processing --AnswerReady--> Speaking
//! Speaking --PlaybackEnded--> Listening (voice mode on) | Idle (off)
//! any --Stop--> Idle
//! ```
//!
//! The machine only decides; the UI performs the returned [`VoiceEffect`]s (start/stop the
//! recognizer, post the question to `/voice`, play synthesized speech). Capture is never
//! started while speech is playing, and is restarted exactly once after playback ends.

/// Spoken once per voice-mode activation, before the first capture.
pub const STARTUP_GREETING: &str = "Welcome to Electra Bot. Systems online.";

/// Quiet period after the last recognition result before the question is submitted.
pub const SILENCE_TIMEOUT_MS: u64 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
    Processing,
    Speaking,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// User turned voice mode on.
    Start,
    /// Recognizer produced a (partial or final) transcript segment.
    Transcript { text: String, is_final: bool },
    /// No new recognition result for [`SILENCE_TIMEOUT_MS`].
    SilenceTimeout,
    /// The backend answered the submitted question.
    AnswerReady(String),
    /// Synthesized speech finished playing.
    PlaybackEnded,
    /// Recognizer reported an error.
    RecognitionError,
    /// User turned voice mode off.
    Stop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEffect {
    StartCapture,
    StopCapture,
    /// Text to display as "You said: ...".
    ShowTranscript(String),
    /// Post this question to the voice endpoint.
    Submit(String),
    Speak(String),
    CancelSpeech,
}

#[derive(Debug, Clone)]
pub struct VoiceSession {
    state: VoiceState,
    voice_mode: bool,
    greeted: bool,
    final_transcript: String,
}

impl Default for VoiceSession {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceSession {
    pub fn new() -> Self {
        Self {
            state: VoiceState::Idle,
            voice_mode: false,
            greeted: false,
            final_transcript: String::new(),
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.voice_mode
    }

    /// Applies `event` and returns the effects the UI must perform, in order.
    /// Events that do not apply to the current state are ignored.
    pub fn handle(&mut self, event: VoiceEvent) -> Vec<VoiceEffect> {
        use VoiceEffect::*;
        use VoiceState::*;

        let before = self.state;
        let effects = match (self.state, event) {
            (_, VoiceEvent::Stop) => {
                self.voice_mode = false;
                self.greeted = false;
                self.final_transcript.clear();
                self.state = Idle;
                vec![CancelSpeech, StopCapture]
            }
            (Idle, VoiceEvent::Start) => {
                self.voice_mode = true;
                if self.greeted {
                    self.state = Listening;
                    vec![StartCapture]
                } else {
                    self.greeted = true;
                    self.state = Speaking;
                    vec![Speak(STARTUP_GREETING.to_string())]
                }
            }
            (Listening, VoiceEvent::Transcript { text, is_final }) => {
                let shown = if is_final {
                    self.final_transcript.push_str(&text);
                    self.final_transcript.push(' ');
                    self.final_transcript.trim().to_string()
                } else {
                    format!("{}{}", self.final_transcript, text).trim().to_string()
                };
                vec![ShowTranscript(shown)]
            }
            (Listening, VoiceEvent::SilenceTimeout) => {
                let question = std::mem::take(&mut self.final_transcript).trim().to_string();
                if question.is_empty() {
                    Vec::new()
                } else {
                    self.state = Processing;
                    vec![StopCapture, Submit(question)]
                }
            }
            (Listening, VoiceEvent::RecognitionError) => {
                self.voice_mode = false;
                self.final_transcript.clear();
                self.state = Idle;
                vec![StopCapture]
            }
            (Processing, VoiceEvent::AnswerReady(answer)) => {
                self.state = Speaking;
                vec![Speak(answer)]
            }
            (Speaking, VoiceEvent::PlaybackEnded) => {
                if self.voice_mode {
                    self.state = Listening;
                    vec![StartCapture]
                } else {
                    self.state = Idle;
                    Vec::new()
                }
            }
            (state, event) => {
                tracing::trace!(target: "electra::voice", ?state, ?event, "Ignored voice event");
                Vec::new()
            }
        };
        if before != self.state {
            tracing::debug!(target: "electra::voice", from = ?before, to = ?self.state, "Voice state changed");
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(text: &str, is_final: bool) -> VoiceEvent {
        VoiceEvent::Transcript { text: text.to_string(), is_final }
    }

    #[test]
    fn first_start_greets_before_listening() {
        let mut s = VoiceSession::new();
        assert_eq!(
            s.handle(VoiceEvent::Start),
            vec![VoiceEffect::Speak(STARTUP_GREETING.to_string())]
        );
        assert_eq!(s.state(), VoiceState::Speaking);
        assert_eq!(s.handle(VoiceEvent::PlaybackEnded), vec![VoiceEffect::StartCapture]);
        assert_eq!(s.state(), VoiceState::Listening);
    }

    #[test]
    fn full_question_cycle_restarts_capture_once() {
        let mut s = VoiceSession::new();
        s.handle(VoiceEvent::Start);
        s.handle(VoiceEvent::PlaybackEnded);

        assert_eq!(
            s.handle(transcript("who is the", false)),
            vec![VoiceEffect::ShowTranscript("who is the".to_string())]
        );
        s.handle(transcript("who is the president", true));
        assert_eq!(
            s.handle(VoiceEvent::SilenceTimeout),
            vec![
                VoiceEffect::StopCapture,
                VoiceEffect::Submit("who is the president".to_string())
            ]
        );
        assert_eq!(s.state(), VoiceState::Processing);

        let answer = "The President of G-electra Club is Asha.".to_string();
        assert_eq!(
            s.handle(VoiceEvent::AnswerReady(answer.clone())),
            vec![VoiceEffect::Speak(answer)]
        );
        assert_eq!(s.handle(VoiceEvent::PlaybackEnded), vec![VoiceEffect::StartCapture]);
        // A duplicate end-of-playback notification must not start capture again.
        assert!(s.handle(VoiceEvent::PlaybackEnded).is_empty());
        assert_eq!(s.state(), VoiceState::Listening);
    }

    #[test]
    fn no_capture_or_transcript_while_speaking() {
        let mut s = VoiceSession::new();
        s.handle(VoiceEvent::Start);
        assert!(s.handle(transcript("echo of the greeting", true)).is_empty());
        assert!(s.handle(VoiceEvent::SilenceTimeout).is_empty());
        assert!(s.handle(VoiceEvent::Start).is_empty());
        assert_eq!(s.state(), VoiceState::Speaking);
    }

    #[test]
    fn silence_without_words_submits_nothing() {
        let mut s = VoiceSession::new();
        s.handle(VoiceEvent::Start);
        s.handle(VoiceEvent::PlaybackEnded);
        s.handle(transcript("   ", true));
        assert!(s.handle(VoiceEvent::SilenceTimeout).is_empty());
        assert_eq!(s.state(), VoiceState::Listening);
    }

    #[test]
    fn stop_returns_to_idle_from_any_state_and_resets_greeting() {
        let mut s = VoiceSession::new();
        s.handle(VoiceEvent::Start);
        s.handle(VoiceEvent::PlaybackEnded);
        s.handle(transcript("who", true));
        s.handle(VoiceEvent::SilenceTimeout);
        assert_eq!(s.state(), VoiceState::Processing);

        assert_eq!(
            s.handle(VoiceEvent::Stop),
            vec![VoiceEffect::CancelSpeech, VoiceEffect::StopCapture]
        );
        assert_eq!(s.state(), VoiceState::Idle);
        assert!(!s.is_active());
        // Late answer after stop is dropped.
        assert!(s.handle(VoiceEvent::AnswerReady("late".to_string())).is_empty());
        // Next activation greets again.
        assert_eq!(
            s.handle(VoiceEvent::Start),
            vec![VoiceEffect::Speak(STARTUP_GREETING.to_string())]
        );
    }

    #[test]
    fn playback_after_stop_does_not_restart_capture() {
        let mut s = VoiceSession::new();
        s.handle(VoiceEvent::Start);
        s.handle(VoiceEvent::Stop);
        assert!(s.handle(VoiceEvent::PlaybackEnded).is_empty());
        assert_eq!(s.state(), VoiceState::Idle);
    }

    #[test]
    fn recognition_error_leaves_voice_mode() {
        let mut s = VoiceSession::new();
        s.handle(VoiceEvent::Start);
        s.handle(VoiceEvent::PlaybackEnded);
        assert_eq!(s.handle(VoiceEvent::RecognitionError), vec![VoiceEffect::StopCapture]);
        assert_eq!(s.state(), VoiceState::Idle);
        // Greeting already played this activation was not reset by the error.
        assert_eq!(s.handle(VoiceEvent::Start), vec![VoiceEffect::StartCapture]);
    }
}
