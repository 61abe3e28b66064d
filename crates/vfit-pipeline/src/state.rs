//! Pipeline run state machine.
//!
//! `Failed` is reachable only while there is still no visual signal
//! (probe or frame sampling). Once frames exist, every later stage
//! degrades instead of failing, so the only exit from `Scoring` onward
//! is forward.

/// States of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Sampling,
    Scoring,
    Fusing,
    Suggesting,
    Done,
    Failed,
}

impl PipelineState {
    /// Whether a transition from `self` to `next` is legal.
    pub fn can_transition(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Init, Sampling)
                | (Sampling, Scoring)
                | (Scoring, Fusing)
                | (Fusing, Suggesting)
                | (Suggesting, Done)
                | (Init, Failed)
                | (Sampling, Failed)
        )
    }

    /// True for `Done` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Sampling => "sampling",
            PipelineState::Scoring => "scoring",
            PipelineState::Fusing => "fusing",
            PipelineState::Suggesting => "suggesting",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineState::*;

    #[test]
    fn happy_path_transitions_are_legal() {
        assert!(Init.can_transition(Sampling));
        assert!(Sampling.can_transition(Scoring));
        assert!(Scoring.can_transition(Fusing));
        assert!(Fusing.can_transition(Suggesting));
        assert!(Suggesting.can_transition(Done));
    }

    #[test]
    fn failed_only_reachable_early() {
        assert!(Init.can_transition(Failed));
        assert!(Sampling.can_transition(Failed));
        assert!(!Scoring.can_transition(Failed));
        assert!(!Fusing.can_transition(Failed));
        assert!(!Suggesting.can_transition(Failed));
        assert!(!Done.can_transition(Failed));
    }

    #[test]
    fn no_skipping_or_backtracking() {
        assert!(!Init.can_transition(Scoring));
        assert!(!Sampling.can_transition(Done));
        assert!(!Scoring.can_transition(Sampling));
        assert!(!Done.can_transition(Init));
    }

    #[test]
    fn terminal_states() {
        assert!(Done.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!Suggesting.is_terminal());
    }
}
