//! Prompt → generation request → scene replacement
//!
//! At most one request is in flight. A prompt submitted while one is pending
//! is rejected outright, it is neither queued nor logged.

use shared::{GenerateRequest, GenerateResponse};
use tokio::sync::oneshot;

use super::chat::GenerationPhase;
use super::scene::new_object_id;
use super::AppState;
use crate::generator::GenerationError;

/// Reply shown when the request failed for any reason
pub const GENERATION_FAILED_TEXT: &str =
    "Something went wrong while generating the model. Please try again.";
/// Reply shown when the service proposed nothing and said nothing
pub const NO_OBJECTS_TEXT: &str =
    "The AI could not produce a valid 3D structure from that description. Try a more specific prompt.";

/// Why a prompt was not sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a generation request is already in progress")]
    Busy,
    #[error("no generation service configured")]
    NoGenerator,
}

/// How a request resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The scene was replaced by this many objects
    Applied { object_count: usize },
    /// The service answered without proposing objects
    ReplyOnly,
    Failed,
    /// A result with no request pending; nothing was changed
    Discarded,
}

impl AppState {
    /// Log the prompt and enter the awaiting state.
    /// Returns the request to hand to the generator.
    pub fn begin_generation(&mut self, prompt: &str) -> Result<GenerateRequest, SubmitError> {
        if self.chat.is_loading() {
            tracing::warn!("Ignoring prompt while a generation is in progress");
            return Err(SubmitError::Busy);
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(SubmitError::EmptyPrompt);
        }

        self.chat.push_user(prompt);
        let scene_snapshot = self.scene.snapshot();
        let request = GenerateRequest {
            prompt: prompt.to_string(),
            objects: scene_snapshot.clone(),
        };
        self.chat.phase = GenerationPhase::Awaiting {
            prompt: prompt.to_string(),
            scene_snapshot,
        };
        Ok(request)
    }

    /// Apply the generator's result and return to idle
    pub fn complete_generation(
        &mut self,
        result: Result<GenerateResponse, GenerationError>,
    ) -> GenerationOutcome {
        let (prompt, pre_request_scene) = match std::mem::take(&mut self.chat.phase) {
            GenerationPhase::Awaiting {
                prompt,
                scene_snapshot,
            } => (prompt, scene_snapshot),
            GenerationPhase::Idle => {
                tracing::warn!("Dropping generation result that arrived with no request pending");
                return GenerationOutcome::Discarded;
            }
        };
        self.chat.pending = None;

        match result {
            Ok(response) if !response.added_objects.is_empty() => {
                let objects: Vec<_> = response
                    .added_objects
                    .into_iter()
                    .map(|proposed| proposed.into_scene_object(new_object_id()))
                    .collect();
                let object_count = objects.len();

                self.backup_before_replace(&pre_request_scene);
                self.scene.replace_all(objects);
                self.selection.clear();
                self.chat.push_model(reply_text(response.response_message, "Model generated."));
                self.chat.last_failed_input = None;

                tracing::info!("Generated {object_count} objects");
                GenerationOutcome::Applied { object_count }
            }
            Ok(response) => {
                self.chat.push_model(reply_text(response.response_message, NO_OBJECTS_TEXT));
                self.chat.last_failed_input = None;
                tracing::info!("Generation produced no objects");
                GenerationOutcome::ReplyOnly
            }
            Err(e) => {
                tracing::error!("Generation failed: {e}");
                self.chat.push_model(GENERATION_FAILED_TEXT);
                self.chat.last_failed_input = Some(prompt);
                GenerationOutcome::Failed
            }
        }
    }

    /// Send `prompt` to the configured generator in the background
    pub fn submit_prompt(&mut self, prompt: &str) -> Result<(), SubmitError> {
        let driver = self.generation.clone().ok_or(SubmitError::NoGenerator)?;
        let request = self.begin_generation(prompt)?;

        let (tx, rx) = oneshot::channel();
        let generator = driver.generator.clone();
        driver.runtime.spawn(async move {
            let result = generator.generate(request).await;
            // Receiver gone means the editor moved on; nothing to report
            let _ = tx.send(result);
        });
        self.chat.pending = Some(rx);
        Ok(())
    }

    /// Submit the chat draft, clearing it on success
    pub fn submit_input(&mut self) -> Result<(), SubmitError> {
        let prompt = self.chat.input.clone();
        self.submit_prompt(&prompt)?;
        self.chat.input.clear();
        Ok(())
    }

    /// Resubmit the prompt of the last failed request
    pub fn retry_last_failed(&mut self) -> Result<(), SubmitError> {
        let prompt = self
            .chat
            .last_failed_input
            .clone()
            .ok_or(SubmitError::EmptyPrompt)?;
        self.submit_prompt(&prompt)
    }

    /// Non-blocking check for a finished request; call once per frame
    pub fn poll_generation(&mut self) -> Option<GenerationOutcome> {
        let rx = self.chat.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(GenerationError::Cancelled),
        };
        Some(self.complete_generation(result))
    }

    /// Block until the pending request resolves. Must not be called from
    /// inside the runtime.
    pub fn wait_for_generation(&mut self) -> Option<GenerationOutcome> {
        let rx = self.chat.pending.take()?;
        let Some(driver) = self.generation.as_ref() else {
            return Some(self.complete_generation(Err(GenerationError::Cancelled)));
        };
        let result = driver
            .runtime
            .block_on(rx)
            .unwrap_or(Err(GenerationError::Cancelled));
        Some(self.complete_generation(result))
    }
}

fn reply_text(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::chat::ChatRole;
    use crate::state::{initial_objects, AppSettings};
    use shared::{PrimitiveKind, ProposedObject};

    fn proposal(name: &str, kind: PrimitiveKind) -> ProposedObject {
        ProposedObject {
            name: name.into(),
            kind,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            color: "#ff0000".into(),
        }
    }

    #[test]
    fn test_begin_logs_prompt_and_awaits() {
        let mut state = AppState::default();
        let request = state.begin_generation("  a red tower ").unwrap();
        assert_eq!(request.prompt, "a red tower");
        assert_eq!(request.objects, initial_objects());
        assert!(state.chat.is_loading());
        assert_eq!(state.chat.messages().len(), 1);
        assert_eq!(state.chat.messages()[0].role, ChatRole::User);
    }

    #[test]
    fn test_second_submission_rejected_without_log() {
        let mut state = AppState::default();
        state.begin_generation("first").unwrap();
        assert_eq!(state.begin_generation("second"), Err(SubmitError::Busy));
        assert_eq!(state.chat.messages().len(), 1);
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let mut state = AppState::default();
        assert_eq!(state.begin_generation("   "), Err(SubmitError::EmptyPrompt));
        assert!(state.chat.messages().is_empty());
        assert!(!state.chat.is_loading());
    }

    #[test]
    fn test_success_replaces_scene_after_backup() {
        let mut state = AppState::default();
        state.begin_generation("a snowman").unwrap();
        let outcome = state.complete_generation(Ok(GenerateResponse {
            response_message: "Here is a snowman.".into(),
            added_objects: vec![
                proposal("Body", PrimitiveKind::Sphere),
                proposal("Hat", PrimitiveKind::Cylinder),
            ],
        }));

        assert_eq!(outcome, GenerationOutcome::Applied { object_count: 2 });
        assert!(!state.chat.is_loading());
        let names: Vec<_> = state.scene.objects().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Body", "Hat"]);
        assert_eq!(state.versions.len(), 2);
        assert_eq!(state.versions.last().unwrap().objects(), initial_objects().as_slice());

        // user prompt, backup notice, model reply
        let log = state.chat.messages();
        assert_eq!(log.len(), 3);
        assert!(log[1].is_system);
        assert_eq!(log[2].role, ChatRole::Model);
        assert_eq!(log[2].text, "Here is a snowman.");
    }

    #[test]
    fn test_backup_uses_pre_request_scene() {
        let mut state = AppState::default();
        state.begin_generation("a car").unwrap();
        state.add_default_cube();
        state.complete_generation(Ok(GenerateResponse {
            response_message: "Car".into(),
            added_objects: vec![proposal("Wheel", PrimitiveKind::Cylinder)],
        }));
        assert_eq!(state.versions.last().unwrap().objects(), initial_objects().as_slice());
    }

    #[test]
    fn test_success_clears_selection() {
        let mut state = AppState::default();
        state.select(Some("1"));
        state.begin_generation("x").unwrap();
        state.complete_generation(Ok(GenerateResponse {
            response_message: String::new(),
            added_objects: vec![proposal("A", PrimitiveKind::Cube)],
        }));
        assert!(state.selection.is_empty());
        assert_eq!(state.chat.messages().last().unwrap().text, "Model generated.");
    }

    #[test]
    fn test_empty_proposal_keeps_scene() {
        let mut state = AppState::default();
        state.begin_generation("???").unwrap();
        let outcome = state.complete_generation(Ok(GenerateResponse::default()));
        assert_eq!(outcome, GenerationOutcome::ReplyOnly);
        assert_eq!(state.scene.objects(), initial_objects().as_slice());
        assert_eq!(state.versions.len(), 1);
        assert_eq!(state.chat.messages().last().unwrap().text, NO_OBJECTS_TEXT);
    }

    #[test]
    fn test_failure_keeps_scene_and_logs_fallback() {
        let mut state = AppState::default();
        state.begin_generation("a bridge").unwrap();
        let outcome = state.complete_generation(Err(GenerationError::Status(500)));

        assert_eq!(outcome, GenerationOutcome::Failed);
        assert!(!state.chat.is_loading());
        assert_eq!(state.scene.objects(), initial_objects().as_slice());
        assert_eq!(state.chat.messages().last().unwrap().text, GENERATION_FAILED_TEXT);
        assert_eq!(state.chat.last_failed_input.as_deref(), Some("a bridge"));
        // back to idle: a new prompt is accepted
        assert!(state.begin_generation("again").is_ok());
    }

    #[test]
    fn test_empty_scene_generation_takes_no_backup() {
        let mut state = AppState::with_objects(AppSettings::default(), vec![]);
        state.begin_generation("x").unwrap();
        state.complete_generation(Ok(GenerateResponse {
            response_message: "ok".into(),
            added_objects: vec![proposal("A", PrimitiveKind::Cone)],
        }));
        assert_eq!(state.versions.len(), 1);
        assert_eq!(state.chat.messages().len(), 2);
    }

    #[test]
    fn test_result_without_pending_request_is_dropped() {
        let mut state = AppState::default();
        let outcome = state.complete_generation(Ok(GenerateResponse {
            response_message: "late".into(),
            added_objects: vec![proposal("Stray", PrimitiveKind::Cube)],
        }));
        assert_eq!(outcome, GenerationOutcome::Discarded);
        assert_eq!(state.scene.objects(), initial_objects().as_slice());
        assert_eq!(state.versions.len(), 1);
        assert!(state.chat.messages().is_empty());
    }

    #[test]
    fn test_submit_without_generator() {
        let mut state = AppState::default();
        assert_eq!(state.submit_prompt("x"), Err(SubmitError::NoGenerator));
        assert!(state.chat.messages().is_empty());
        assert!(state.poll_generation().is_none());
    }
}
