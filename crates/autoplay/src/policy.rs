use crate::AiConfig;
use sk8_core::{ChoiceKind, ChoiceRequest, Decider, GameState};

/// Fixed yes/no heuristics for an automated player.
#[derive(Debug, Clone, Default)]
pub struct AiDecider {
    pub config: AiConfig,
}

impl AiDecider {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    pub fn choose(&self, request: &ChoiceRequest) -> bool {
        match request.kind {
            ChoiceKind::Bail => true,
            ChoiceKind::ProModelDeck => false,
            ChoiceKind::Advantage => request.difficulty > self.config.advantage_threshold,
            ChoiceKind::Refocus => request.difficulty > self.config.refocus_threshold,
        }
    }
}

impl Decider for AiDecider {
    fn decide(&mut self, _state: &GameState, request: &ChoiceRequest) -> bool {
        self.choose(request)
    }
}
