//! A scripted [`PlanGenerator`] for tests and offline demos.
//!
//! Outcomes are queued up front and handed out in order. A *held* generator
//! additionally parks every call until [`ScriptedGenerator::release`] is
//! called, which lets tests observe the controller while a request is in
//! flight and deliver responses out of order.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use super::{GenerateRequest, GenerateResponse, GeneratorFailure, PlanGenerator};
use crate::models::Plan;

type Outcome = Result<GenerateResponse, GeneratorFailure>;

#[derive(Default)]
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Outcome>>,
    requests: Mutex<Vec<GenerateRequest>>,
    gate: Option<Semaphore>,
    received: Notify,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedGenerator {
    /// Generator that answers immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose calls wait for [`release`](Self::release).
    pub fn held() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    /// Queue a plan answer.
    pub fn push_plan(&self, plan: Plan) -> &Self {
        self.push(Ok(GenerateResponse::Plan(plan)))
    }

    /// Queue a chat answer.
    pub fn push_chat(&self, message: impl Into<String>, plan: Option<Plan>) -> &Self {
        self.push(Ok(GenerateResponse::Chat {
            message: message.into(),
            plan,
        }))
    }

    /// Queue a failure.
    pub fn push_failure(&self, reason: impl Into<String>) -> &Self {
        self.push(Err(GeneratorFailure::new(reason)))
    }

    pub fn push(&self, outcome: Outcome) -> &Self {
        lock(&self.script).push_back(outcome);
        self
    }

    /// Let one parked call proceed. No effect on an unheld generator.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Number of calls received so far.
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        lock(&self.requests).clone()
    }

    /// Wait until at least `count` calls have been received.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.calls() < count {
            self.received.notified().await;
        }
    }
}

#[async_trait]
impl PlanGenerator for ScriptedGenerator {
    async fn generate(&self, request: GenerateRequest) -> Outcome {
        // Claim the outcome on arrival so concurrent calls keep queue order
        let outcome = lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Err(GeneratorFailure::new("no scripted outcome left")));
        lock(&self.requests).push(request);
        self.received.notify_one();

        if let Some(gate) = &self.gate {
            match gate.acquire().await {
                Ok(permit) => permit.forget(),
                Err(_) => return Err(GeneratorFailure::new("generator gate closed")),
            }
        }
        outcome
    }
}
