//! Scene controller: the composition root a host drives.
//!
//! The host feeds raw text frames into [`Scene::ingest`], ticks the clock
//! with [`Scene::advance`], and drains draw commands and outbound requests
//! once per frame. Everything inside runs on the caller's thread.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use serde_json::Value;
use wire::Message;

use crate::bus::{DispatchReport, EventBus, Outbox, SubscriptionId};
use crate::clock::TimerId;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::render::DrawCommand;
use crate::state::{SceneState, SceneSummary};
use crate::{flexmatch, placement};

/// Handle for a running poller; pass it to [`Scene::stop_polling`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollHandle(TimerId);

pub struct Scene {
    state: SceneState,
    bus: EventBus<SceneState, Message>,
}

impl Scene {
    /// Build a scene with the snapshot, matchmaking, placement and multipart
    /// subscribers installed.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        let mut bus: EventBus<SceneState, Message> = EventBus::new();

        bus.on(wire::GET_STATE, |state: &mut SceneState, message: &Message, _: &mut Outbox<Message>| {
            if let Message::GetState(get) = message {
                state.apply_snapshot(get.state.clone());
            }
            Ok(())
        });
        bus.on(wire::FLEXMATCH_EVENT, |state: &mut SceneState, message: &Message, _: &mut Outbox<Message>| {
            if let Message::FlexMatchEvent(event) = message {
                flexmatch::handle(state, event);
            }
            Ok(())
        });
        bus.on(wire::QUEUE_PLACEMENT_EVENT, |state: &mut SceneState, message: &Message, _: &mut Outbox<Message>| {
            if let Message::QueuePlacementEvent(event) = message {
                placement::handle(state, event);
            }
            Ok(())
        });
        bus.on(wire::MULTIPART_MESSAGE, |state: &mut SceneState, message: &Message, out: &mut Outbox<Message>| {
            let Message::MultipartMessage(part) = message else {
                return Ok(());
            };
            let now = state.clock.now_ms();
            if let Some(value) = state.reassembler.add_part(part.clone(), now)? {
                let whole = wire::decode_value(value)?;
                tracing::debug!(message_id = %part.message_id, kind = whole.kind(), "multipart message reassembled");
                out.emit(whole);
            }
            Ok(())
        });

        Self { state: SceneState::new(config), bus }
    }

    /// Decode one text frame and dispatch it.
    ///
    /// # Errors
    ///
    /// [`SceneError::Wire`] if the frame is not a valid message; the scene is
    /// left untouched.
    pub fn ingest(&mut self, text: &str) -> Result<DispatchReport, SceneError> {
        let message = wire::decode_message(text)?;
        Ok(self.publish(message))
    }

    /// Dispatch an already decoded message, plus anything its handlers emit.
    pub fn publish(&mut self, message: Message) -> DispatchReport {
        self.bus.emit(message);
        self.bus.dispatch(&mut self.state)
    }

    /// Subscribe a host observer to a message type (or `"*"`).
    pub fn on<F>(&mut self, topic: impl Into<String>, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut SceneState, &Message, &mut Outbox<Message>) -> Result<(), SceneError> + 'static,
    {
        self.bus.on(topic, handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool {
        self.bus.off(id)
    }

    /// Run the scene clock forward by `dt_ms`.
    pub fn advance(&mut self, dt_ms: u64) -> usize {
        self.state.advance(dt_ms)
    }

    /// Start sending `{"Type": request_type}` every `interval_ms`.
    pub fn start_polling(&mut self, request_type: &str, interval_ms: u64) -> PollHandle {
        tracing::debug!(%request_type, interval_ms, "polling started");
        PollHandle(self.state.clock.start_timer(request_type, interval_ms))
    }

    /// Stop a poller. Returns false if it was already stopped.
    pub fn stop_polling(&mut self, handle: PollHandle) -> bool {
        let stopped = self.state.clock.stop_timer(handle.0);
        if stopped {
            tracing::debug!("polling stopped");
        }
        stopped
    }

    /// Add `count` idle players with random ids to the spawn column.
    pub fn spawn_demo_players(&mut self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| {
                let id = uuid::Uuid::new_v4().to_string();
                self.state.ensure_player(&id);
                id
            })
            .collect()
    }

    /// Take the draw commands issued since the last drain.
    pub fn drain_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.state.commands)
    }

    /// Take the outbound requests queued since the last drain.
    pub fn drain_outbound(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.state.outbound)
    }

    #[must_use]
    pub fn summary(&self) -> SceneSummary {
        self.state.summary()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
