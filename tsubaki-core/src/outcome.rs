//! Addon and dispatch outcomes

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// An addon's self-reported result of handling a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    /// Handled successfully
    Handled,
    /// Handled, but the work failed
    Failed,
    /// The addon chose not to act (e.g. it is disabled)
    Declined,
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::Handled,
            Some(false) => TriState::Failed,
            None => TriState::Declined,
        }
    }
}

/// Opaque side-channel value an addon hands back to the host
pub struct Callback(Box<dyn Any + Send + Sync>);

impl Callback {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Take the value out, handing the callback back on a type mismatch
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        self.0.downcast::<T>().map(|b| *b).map_err(Callback)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// What an addon returns from `execute`
#[derive(Debug)]
pub struct AddonOutput {
    pub state: TriState,
    pub callback: Option<Callback>,
}

impl AddonOutput {
    pub fn new(state: TriState) -> Self {
        Self { state, callback: None }
    }

    pub fn handled() -> Self {
        Self::new(TriState::Handled)
    }

    pub fn failed() -> Self {
        Self::new(TriState::Failed)
    }

    pub fn declined() -> Self {
        Self::new(TriState::Declined)
    }

    /// Builder: attach a side-channel value
    pub fn with_callback<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.callback = Some(Callback::new(value));
        self
    }
}

/// Dispatcher verdict for a single `execute` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutedResult {
    /// The registry holds no addons
    NoAddon,
    /// No addon scored above zero for the requested domains
    NoMatched,
    Success,
    Failure,
    /// The selected addon declined to act
    Disabled,
}

impl ExecutedResult {
    /// True when an addon was actually invoked
    pub fn ran(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Disabled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAddon => "no_addon",
            Self::NoMatched => "no_matched",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Disabled => "disabled",
        }
    }
}

impl From<TriState> for ExecutedResult {
    fn from(state: TriState) -> Self {
        match state {
            TriState::Handled => ExecutedResult::Success,
            TriState::Failed => ExecutedResult::Failure,
            TriState::Declined => ExecutedResult::Disabled,
        }
    }
}

impl fmt::Display for ExecutedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of dispatching a request: the verdict plus the winner's callback
#[derive(Debug)]
pub struct Execution {
    pub result: ExecutedResult,
    /// Always `None` when no addon ran
    pub callback: Option<Callback>,
}

impl Execution {
    /// Outcome where no addon was invoked
    pub fn skipped(result: ExecutedResult) -> Self {
        Self { result, callback: None }
    }

    pub fn from_output(output: AddonOutput) -> Self {
        Self {
            result: output.state.into(),
            callback: output.callback,
        }
    }
}
