//! Level progression
//!
//! A campaign plays the configured levels in order, carrying the running score
//! from one round into the next. Each finished level is valued on its own as
//! points earned in that level plus a bonus for the seconds left on the clock.

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, LevelError};
use crate::consts::{POINTS_WEIGHT, TIME_WEIGHT};
use crate::sim::{Round, TickInput, TickOutcome};

/// Weighted value of one finished level
pub fn level_total(points: u32, seconds_left: u32) -> u32 {
    (points as f64 * POINTS_WEIGHT + seconds_left as f64 * TIME_WEIGHT) as u32
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignResult {
    pub won: bool,
    /// Sum of the level totals on a win, zero on a loss
    pub final_score: u32,
    /// Weighted total of every level played, in order
    pub level_scores: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Playing,
    /// The previous level was won; `next_level` (0-based) has just started
    LevelCleared { next_level: usize },
    Finished(CampaignResult),
}

#[derive(Debug, Clone)]
pub struct Campaign {
    config: GameConfig,
    level: usize,
    round: Round,
    /// Running score when the current level started
    carried_score: u32,
    level_scores: Vec<u32>,
    result: Option<CampaignResult>,
}

impl Campaign {
    pub fn new(config: GameConfig) -> Result<Self, LevelError> {
        Self::starting_at(config, 0)
    }

    /// Start from level `level` (0-based) with a zero score
    pub fn starting_at(config: GameConfig, level: usize) -> Result<Self, LevelError> {
        let round = Round::new(&config, level, 0)?;
        Ok(Self {
            config,
            level,
            round,
            carried_score: 0,
            level_scores: Vec::new(),
            result: None,
        })
    }

    /// 0-based index of the level being played
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn result(&self) -> Option<&CampaignResult> {
        self.result.as_ref()
    }

    pub fn advance(&mut self, input: &TickInput) -> CampaignStatus {
        if let Some(result) = &self.result {
            return CampaignStatus::Finished(result.clone());
        }

        let outcome = self.round.advance(input);
        if !outcome.is_over() {
            return CampaignStatus::Playing;
        }

        let points = self.round.score().saturating_sub(self.carried_score);
        let total = level_total(points, self.round.seconds_left());
        self.level_scores.push(total);
        log::info!(
            "Level {} ended ({:?}): {} points, {} seconds left, worth {}",
            self.level + 1,
            outcome,
            points,
            self.round.seconds_left(),
            total
        );

        let won = outcome == TickOutcome::Won;
        let next_level = self.level + 1;
        if won && next_level < self.config.levels.len() {
            let carried = self.round.score();
            match Round::new(&self.config, next_level, carried) {
                Ok(round) => {
                    self.round = round;
                    self.level = next_level;
                    self.carried_score = carried;
                    return CampaignStatus::LevelCleared { next_level };
                }
                Err(e) => {
                    log::error!("Could not start level {}: {}", next_level + 1, e);
                    return self.finish(false);
                }
            }
        }

        self.finish(won)
    }

    fn finish(&mut self, won: bool) -> CampaignStatus {
        let final_score: u32 = if won { self.level_scores.iter().sum() } else { 0 };
        let result = CampaignResult {
            won,
            final_score,
            level_scores: self.level_scores.clone(),
        };
        log::info!("Campaign finished: won={}, final score {}", won, final_score);
        self.result = Some(result.clone());
        CampaignStatus::Finished(result)
    }
}
