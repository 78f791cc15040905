//! Experience records.
use serde::{Deserialize, Serialize};

/// One observed transition: the state, the action taken in it, the state
/// reached and the reward received.
///
/// `S` and `A` are owned by the caller and left opaque here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transition<S, A> {
    state: S,
    action: A,
    next_state: S,
    reward: f32,
}

impl<S, A> Transition<S, A> {
    /// Creates a transition.
    pub fn new(state: S, action: A, next_state: S, reward: f32) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }

    /// State in which the action was taken.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Replaces the state.
    pub fn set_state(&mut self, state: S) {
        self.state = state;
    }

    /// Action taken.
    pub fn action(&self) -> &A {
        &self.action
    }

    /// Replaces the action.
    pub fn set_action(&mut self, action: A) {
        self.action = action;
    }

    /// State reached after the action.
    pub fn next_state(&self) -> &S {
        &self.next_state
    }

    /// Replaces the next state.
    pub fn set_next_state(&mut self, next_state: S) {
        self.next_state = next_state;
    }

    /// Reward received.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// Replaces the reward.
    pub fn set_reward(&mut self, reward: f32) {
        self.reward = reward;
    }

    /// Returns `(state, action, next_state, reward)`.
    pub fn into_parts(self) -> (S, A, S, f32) {
        (self.state, self.action, self.next_state, self.reward)
    }
}
