//! Round status, score and lives
//!
//! `GameSession` only knows the bookkeeping rules. Side effects on bodies
//! (spawning balls, regenerating bricks) are driven by [`super::Game`].

use serde::{Deserialize, Serialize};

/// Current status of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Nothing launched yet, waiting for start
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// Every brick destroyed
    Won,
}

impl GameStatus {
    /// States `start()` may be called from
    pub fn can_start(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    Lost,
}

impl RoundOutcome {
    /// Title shown on the end-of-round panel
    pub fn title(&self) -> &'static str {
        match self {
            RoundOutcome::Won => "You Win!",
            RoundOutcome::Lost => "Game Over",
        }
    }
}

/// Notifications for the presentation layer, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score or lives changed
    HudChanged { score: u32, lives: u32 },
    /// A round started; hide start/game-over panels
    PanelsHidden,
    /// A round ended; show the end panel
    RoundEnded {
        outcome: RoundOutcome,
        title: String,
        score: u32,
    },
    BallLaunched,
    BrickDestroyed { row: usize, col: usize, points: u32 },
    LifeLost { lives: u32 },
}

/// Result of losing a life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeOutcome {
    /// Lives remain, a new ball should follow
    Respawn { lives: u32 },
    /// That was the last one
    GameOver,
}

/// Points awarded for a brick in `row` (row 0 is the top of the grid)
#[inline]
pub fn brick_points(points_per_row: u32, total_rows: usize, row: usize) -> u32 {
    points_per_row * total_rows.saturating_sub(row) as u32
}

/// Score, lives and status of the current round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSession {
    pub status: GameStatus,
    pub score: u32,
    pub lives: u32,
    /// Incremented on every `begin`, lets deferred work detect a stale round
    pub round: u64,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Start a new round. Returns false (and changes nothing) while already playing.
    pub fn begin(&mut self, initial_lives: u32) -> bool {
        if !self.status.can_start() {
            return false;
        }
        self.score = 0;
        self.lives = initial_lives;
        self.status = GameStatus::Playing;
        self.round += 1;
        true
    }

    /// Drop back to `Idle` with a zeroed score, keeping the round counter
    pub fn reset(&mut self, initial_lives: u32) {
        self.status = GameStatus::Idle;
        self.score = 0;
        self.lives = initial_lives;
    }

    /// Add points while playing
    pub fn award(&mut self, points: u32) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.score = self.score.saturating_add(points);
        true
    }

    /// Take a life while playing; `None` when the call is not accepted
    pub fn lose_life(&mut self) -> Option<LifeOutcome> {
        if !self.is_playing() || self.lives == 0 {
            return None;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.status = GameStatus::GameOver;
            Some(LifeOutcome::GameOver)
        } else {
            Some(LifeOutcome::Respawn { lives: self.lives })
        }
    }

    /// Playing → Won. Safe to call repeatedly: only the first call returns true.
    pub fn win(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.status = GameStatus::Won;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_brick_points_reward_top_rows() {
        assert_eq!(brick_points(10, 6, 0), 60);
        assert_eq!(brick_points(10, 6, 5), 10);
    }

    #[test]
    fn test_begin_only_when_not_playing() {
        let mut session = GameSession::new();
        assert!(session.begin(5));
        assert_eq!(session.round, 1);
        assert!(!session.begin(5));
        assert_eq!(session.round, 1);
    }

    #[test]
    fn test_five_lives_then_game_over() {
        let mut session = GameSession::new();
        session.begin(5);
        for expected in (1..5).rev() {
            assert_eq!(
                session.lose_life(),
                Some(LifeOutcome::Respawn { lives: expected })
            );
        }
        assert_eq!(session.lives, 1);
        assert_eq!(session.status, GameStatus::Playing);
        assert_eq!(session.lose_life(), Some(LifeOutcome::GameOver));
        assert_eq!(session.lives, 0);
        assert_eq!(session.status, GameStatus::GameOver);
        // Not accepted after game over
        assert_eq!(session.lose_life(), None);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_win_is_idempotent() {
        let mut session = GameSession::new();
        session.begin(3);
        assert!(session.win());
        assert!(!session.win());
        assert_eq!(session.status, GameStatus::Won);
    }

    #[test]
    fn test_award_ignored_when_not_playing() {
        let mut session = GameSession::new();
        assert!(!session.award(10));
        session.begin(3);
        assert!(session.award(10));
        session.win();
        assert!(!session.award(10));
        assert_eq!(session.score, 10);
    }

    #[test]
    fn test_restart_from_terminal_states() {
        let mut session = GameSession::new();
        session.begin(1);
        session.award(40);
        session.lose_life();
        assert!(session.begin(5));
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 5);
        assert_eq!(session.status, GameStatus::Playing);
    }

    proptest! {
        #[test]
        fn prop_score_is_sum_of_row_points(rows in proptest::collection::vec(0usize..6, 0..48)) {
            let mut session = GameSession::new();
            session.begin(5);
            let mut expected = 0u32;
            let mut last = 0u32;
            for row in rows {
                let points = brick_points(10, 6, row);
                expected += points;
                session.award(points);
                prop_assert!(session.score >= last);
                last = session.score;
            }
            prop_assert_eq!(session.score, expected);
        }

        #[test]
        fn prop_lives_drop_one_per_accepted_loss(initial in 1u32..10, losses in 0usize..20) {
            let mut session = GameSession::new();
            session.begin(initial);
            let mut game_overs = 0;
            for _ in 0..losses {
                let before = session.lives;
                match session.lose_life() {
                    Some(LifeOutcome::GameOver) => {
                        game_overs += 1;
                        prop_assert_eq!(session.lives, before - 1);
                    }
                    Some(LifeOutcome::Respawn { lives }) => prop_assert_eq!(lives, before - 1),
                    None => prop_assert_eq!(session.lives, 0),
                }
            }
            prop_assert!(game_overs <= 1);
            prop_assert_eq!(game_overs == 1, losses >= initial as usize);
            prop_assert_eq!(session.lives, initial.saturating_sub(losses as u32));
        }
    }
}
