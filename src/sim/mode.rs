//! Game modes as data
//!
//! Every mode maps to one [`ModeDescriptor`]: which seats exist, who drives
//! them, their paddle roles, and how points are scored. The session builds
//! itself from the descriptor, and the round engine reads scoring from it.

use serde::{Deserialize, Serialize};

use super::ai::AiTuning;
use super::paddle::PaddleRole;

/// Side of the arena a seat occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// Who drives a seat's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Ai(AiTuning),
}

impl Controller {
    pub fn is_human(&self) -> bool {
        matches!(self, Controller::Human)
    }
}

/// One paddle slot in a mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeatSpec {
    pub label: &'static str,
    pub role: PaddleRole,
    pub controller: Controller,
}

/// How hits and misses change the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringRule {
    /// Single paddle: every hit is a point, a miss zeroes the count
    SoloRally,
    /// The hitting side scores a point, any miss zeroes both sides
    SideRally,
}

/// Everything the engine needs to know about a mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeDescriptor {
    pub name: &'static str,
    pub left: Option<SeatSpec>,
    pub right: Option<SeatSpec>,
    pub scoring: ScoringRule,
}

impl ModeDescriptor {
    pub fn seat(&self, side: Side) -> Option<&SeatSpec> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Number of live paddles
    pub fn seat_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }
}

const DUEL_AI: AiTuning = AiTuning::new(0.1, 0.9);
const SOLO_AI: AiTuning = AiTuning::new(0.12, 0.95);

/// Selectable game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    HumanVsAi,
    TwoHuman,
    TwoAi,
    AiSolo,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::HumanVsAi,
        GameMode::TwoHuman,
        GameMode::TwoAi,
        GameMode::AiSolo,
    ];

    /// Mode for a 1-based menu id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }

    pub fn id(self) -> u8 {
        match self {
            GameMode::HumanVsAi => 1,
            GameMode::TwoHuman => 2,
            GameMode::TwoAi => 3,
            GameMode::AiSolo => 4,
        }
    }

    pub fn descriptor(self) -> ModeDescriptor {
        let left = |label, controller| SeatSpec {
            label,
            role: PaddleRole::Left,
            controller,
        };
        let right = |label, controller| SeatSpec {
            label,
            role: PaddleRole::Right,
            controller,
        };

        match self {
            GameMode::HumanVsAi => ModeDescriptor {
                name: "Human vs AI",
                left: Some(left("Human", Controller::Human)),
                right: Some(right("AI", Controller::Ai(DUEL_AI))),
                scoring: ScoringRule::SideRally,
            },
            GameMode::TwoHuman => ModeDescriptor {
                name: "Two Human",
                left: Some(left("Player 1", Controller::Human)),
                right: Some(right("Player 2", Controller::Human)),
                scoring: ScoringRule::SideRally,
            },
            GameMode::TwoAi => ModeDescriptor {
                name: "Two AI",
                left: Some(left("AI 1", Controller::Ai(DUEL_AI))),
                right: Some(right("AI 2", Controller::Ai(DUEL_AI))),
                scoring: ScoringRule::SideRally,
            },
            GameMode::AiSolo => ModeDescriptor {
                name: "AI Solo",
                left: None,
                right: Some(SeatSpec {
                    label: "AI",
                    role: PaddleRole::Solo,
                    controller: Controller::Ai(SOLO_AI),
                }),
                scoring: ScoringRule::SoloRally,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_ids_roundtrip() {
        for mode in GameMode::ALL {
            assert_eq!(GameMode::from_id(mode.id()), Some(mode));
        }
        assert_eq!(GameMode::from_id(0), None);
        assert_eq!(GameMode::from_id(5), None);
    }

    #[test]
    fn test_solo_has_one_unconstrained_seat() {
        let d = GameMode::AiSolo.descriptor();
        assert_eq!(d.seat_count(), 1);
        assert!(d.seat(Side::Left).is_none());
        assert_eq!(d.seat(Side::Right).unwrap().role, PaddleRole::Solo);
        assert_eq!(d.scoring, ScoringRule::SoloRally);
    }

    #[test]
    fn test_duel_modes_split_the_ring() {
        for mode in [GameMode::HumanVsAi, GameMode::TwoHuman, GameMode::TwoAi] {
            let d = mode.descriptor();
            assert_eq!(d.seat_count(), 2);
            assert_eq!(d.left.unwrap().role, PaddleRole::Left);
            assert_eq!(d.right.unwrap().role, PaddleRole::Right);
            assert_eq!(d.scoring, ScoringRule::SideRally);
        }
        assert!(GameMode::TwoHuman.descriptor().right.unwrap().controller.is_human());
        assert!(!GameMode::TwoAi.descriptor().left.unwrap().controller.is_human());
    }
}
