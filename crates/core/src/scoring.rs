//! Scoring module - merge count, player moves and score
//!
//! Every merge is worth a flat reward. The game ends once the merge count
//! reaches the configured limit.

/// Running totals for one board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    merges: u32,
    moves: u32,
    score: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one merge and add its reward.
    pub fn record_merge(&mut self, reward: u32) {
        self.merges += 1;
        self.score = self.score.saturating_add(reward);
    }

    pub fn record_player_move(&mut self) -> u32 {
        self.moves += 1;
        self.moves
    }

    pub fn limit_reached(&self, limit: u32) -> bool {
        self.merges >= limit
    }

    pub fn merges(&self) -> u32 {
        self.merges
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_adds_flat_reward() {
        let mut board = Scoreboard::new();
        board.record_merge(100);
        board.record_merge(100);
        assert_eq!(board.merges(), 2);
        assert_eq!(board.score(), 200);
    }

    #[test]
    fn test_limit_reached_at_exact_count() {
        let mut board = Scoreboard::new();
        for _ in 0..2 {
            board.record_merge(100);
        }
        assert!(!board.limit_reached(3));
        board.record_merge(100);
        assert!(board.limit_reached(3));
    }

    #[test]
    fn test_player_moves_do_not_score() {
        let mut board = Scoreboard::new();
        assert_eq!(board.record_player_move(), 1);
        assert_eq!(board.record_player_move(), 2);
        assert_eq!(board.score(), 0);
    }
}
