//! A reasoning service that replays canned replies and records every call.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use causeway_core::{CausewayError, CausewayResult, GenerationOptions, IReasoningService};

/// One canned response.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedReply {
    Text(String),
    /// Fails the call with `ServiceUnavailable`.
    Fail(String),
}

/// A prompt the service received, with the options it was sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub options: GenerationOptions,
}

type Responder = Box<dyn Fn(&str, &GenerationOptions) -> CausewayResult<String> + Send + Sync>;

enum Script {
    Queue(Mutex<VecDeque<ScriptedReply>>),
    Responder(Responder),
}

/// Replays replies in order, or answers through a closure.
///
/// A queue that runs dry fails the call, so a test that triggers an
/// unexpected extra stage notices.
pub struct ScriptedReasoner {
    model_id: String,
    script: Script,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedReasoner {
    pub const NAME: &'static str = "scripted";

    /// Empty queue; add replies with [`Self::reply`] / [`Self::fail`].
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            script: Script::Queue(Mutex::new(VecDeque::new())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue pre-filled with text replies.
    pub fn with_replies<I, S>(model_id: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = replies
            .into_iter()
            .map(|r| ScriptedReply::Text(r.into()))
            .collect();
        Self {
            model_id: model_id.into(),
            script: Script::Queue(Mutex::new(queue)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every prompt through `responder`; useful when call order is
    /// not deterministic.
    pub fn from_fn<F>(model_id: impl Into<String>, responder: F) -> Self
    where
        F: Fn(&str, &GenerationOptions) -> CausewayResult<String> + Send + Sync + 'static,
    {
        Self {
            model_id: model_id.into(),
            script: Script::Responder(Box::new(responder)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Append a text reply.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.push(ScriptedReply::Text(text.into()));
        self
    }

    /// Append a failing reply.
    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(ScriptedReply::Fail(reason.into()));
        self
    }

    pub fn push(&self, reply: ScriptedReply) {
        if let Script::Queue(queue) = &self.script {
            lock(queue).push_back(reply);
        }
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|c| c.prompt.clone()).collect()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        match &self.script {
            Script::Queue(queue) => lock(queue).len(),
            Script::Responder(_) => 0,
        }
    }
}

impl IReasoningService for ScriptedReasoner {
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> CausewayResult<String> {
        lock(&self.calls).push(RecordedCall {
            prompt: prompt.to_string(),
            options: options.clone(),
        });

        match &self.script {
            Script::Responder(responder) => responder(prompt, options),
            Script::Queue(queue) => match lock(queue).pop_front() {
                Some(ScriptedReply::Text(text)) => Ok(text),
                Some(ScriptedReply::Fail(reason)) => Err(CausewayError::ServiceUnavailable {
                    service: Self::NAME.to_string(),
                    reason,
                }),
                None => Err(CausewayError::ServiceUnavailable {
                    service: Self::NAME.to_string(),
                    reason: "script exhausted".to_string(),
                }),
            },
        }
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_fails() {
        let service = ScriptedReasoner::new("m").reply("one").fail("down");
        let opts = GenerationOptions::default();
        assert_eq!(service.generate("a", &opts).unwrap(), "one");
        assert!(service.generate("b", &opts).unwrap_err().is_service_unavailable());
        assert!(service.generate("c", &opts).is_err());
        assert_eq!(service.prompts(), ["a", "b", "c"]);
    }

    #[test]
    fn responder_sees_prompt() {
        let service = ScriptedReasoner::from_fn("m", |prompt, _| Ok(prompt.to_uppercase()));
        let reply = service.generate("hi", &GenerationOptions::default()).unwrap();
        assert_eq!(reply, "HI");
        assert_eq!(service.call_count(), 1);
    }
}
