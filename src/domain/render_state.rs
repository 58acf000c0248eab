// Per-invocation render lifecycle
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum RenderState {
    Idle,
    Loading,
    Rendered,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid render transition {from:?} -> {to:?}")]
pub struct TransitionError {
    pub from: RenderState,
    pub to: RenderState,
}

impl RenderState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderState::Rendered | RenderState::Failed(_))
    }

    /// Idle -> Loading -> {Rendered | Failed}
    pub fn transition(self, to: RenderState) -> Result<RenderState, TransitionError> {
        let allowed = matches!(
            (&self, &to),
            (RenderState::Idle, RenderState::Loading)
                | (RenderState::Loading, RenderState::Rendered)
                | (RenderState::Loading, RenderState::Failed(_))
        );
        if allowed {
            Ok(to)
        } else {
            Err(TransitionError { from: self, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = RenderState::Idle
            .transition(RenderState::Loading)
            .and_then(|s| s.transition(RenderState::Rendered))
            .unwrap();
        assert!(state.is_terminal());
    }

    #[test]
    fn test_terminal_states_do_not_retry() {
        let failed = RenderState::Failed("boom".to_string());
        assert!(failed.clone().transition(RenderState::Loading).is_err());
        assert!(RenderState::Rendered.transition(RenderState::Loading).is_err());
        assert!(RenderState::Idle.transition(RenderState::Rendered).is_err());
    }

    #[test]
    fn test_serializes_with_reason() {
        let json = serde_json::to_value(RenderState::Failed("timeout".to_string())).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["reason"], "timeout");
    }
}
