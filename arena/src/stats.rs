//! Batch statistics tracking and persistence.
//!
//! Counts who started and who won each game of a batch, plus search timing.
//! The final summary is printed to stdout and can be written to a JSON file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

use mcts::SearchStats;

/// Running totals for one batch.
#[derive(Debug)]
pub struct BatchStats {
    game_type: String,
    seed: Option<u64>,
    games_completed: u32,
    first_player_starts: u32,
    second_player_starts: u32,
    starting_player_wins: u32,
    first_player_wins: u32,
    second_player_wins: u32,
    total_moves: u64,
    searches: u64,
    simulations: u64,
    search_us: u64,
    start_time: Instant,
}

/// Serializable summary for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub game_type: String,
    pub seed: Option<u64>,
    pub games: u32,
    pub first_player_starts: u32,
    pub second_player_starts: u32,
    pub starting_player_wins: u32,
    pub first_player_wins: u32,
    pub second_player_wins: u32,
    pub first_player_start_pct: f64,
    pub second_player_start_pct: f64,
    pub starting_player_win_pct: f64,
    pub first_player_win_pct: f64,
    pub second_player_win_pct: f64,
    pub total_moves: u64,
    pub avg_game_length: f64,
    pub simulations: u64,
    pub avg_search_us: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

fn percent(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

impl BatchStats {
    pub fn new(game_type: &str, seed: Option<u64>) -> Self {
        Self {
            game_type: game_type.to_string(),
            seed,
            games_completed: 0,
            first_player_starts: 0,
            second_player_starts: 0,
            starting_player_wins: 0,
            first_player_wins: 0,
            second_player_wins: 0,
            total_moves: 0,
            searches: 0,
            simulations: 0,
            search_us: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a finished game.
    pub fn record_game(&mut self, first_player_started: bool, first_player_won: bool, moves: u32) {
        self.games_completed += 1;
        self.total_moves += moves as u64;

        if first_player_started {
            self.first_player_starts += 1;
        } else {
            self.second_player_starts += 1;
        }

        if first_player_won {
            self.first_player_wins += 1;
        } else {
            self.second_player_wins += 1;
        }

        if first_player_started == first_player_won {
            self.starting_player_wins += 1;
        }
    }

    /// Record the cost of one search.
    pub fn record_search(&mut self, stats: &SearchStats) {
        self.searches += 1;
        self.simulations += stats.simulations as u64;
        self.search_us += stats.elapsed_us;
    }

    pub fn snapshot(&self) -> BatchSummary {
        let games = self.games_completed;

        let avg_game_length = if games > 0 {
            self.total_moves as f64 / games as f64
        } else {
            0.0
        };

        let avg_search_us = if self.searches > 0 {
            self.search_us as f64 / self.searches as f64
        } else {
            0.0
        };

        BatchSummary {
            game_type: self.game_type.clone(),
            seed: self.seed,
            games,
            first_player_starts: self.first_player_starts,
            second_player_starts: self.second_player_starts,
            starting_player_wins: self.starting_player_wins,
            first_player_wins: self.first_player_wins,
            second_player_wins: self.second_player_wins,
            first_player_start_pct: percent(self.first_player_starts, games),
            second_player_start_pct: percent(self.second_player_starts, games),
            starting_player_win_pct: percent(self.starting_player_wins, games),
            first_player_win_pct: percent(self.first_player_wins, games),
            second_player_win_pct: percent(self.second_player_wins, games),
            total_moves: self.total_moves,
            avg_game_length,
            simulations: self.simulations,
            avg_search_us,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

impl BatchSummary {
    /// Write the summary as JSON (atomic write-then-rename).
    ///
    /// Missing parent directories are created.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut temp_path = PathBuf::from(path);
        temp_path.as_mut_os_string().push(".tmp");

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        debug!("Wrote batch summary to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let games = self.games;
        writeln!(
            f,
            "Player 1 started {} out of {} games - {:.1}%",
            self.first_player_starts, games, self.first_player_start_pct
        )?;
        writeln!(
            f,
            "Player 2 started {} out of {} games - {:.1}%",
            self.second_player_starts, games, self.second_player_start_pct
        )?;
        writeln!(
            f,
            "Starting player won {} out of {} games - {:.1}%",
            self.starting_player_wins, games, self.starting_player_win_pct
        )?;
        writeln!(
            f,
            "Player 1 won {} out of {} games - {:.1}%",
            self.first_player_wins, games, self.first_player_win_pct
        )?;
        write!(
            f,
            "Player 2 won {} out of {} games - {:.1}%",
            self.second_player_wins, games, self.second_player_win_pct
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_record_game_outcomes() {
        let mut stats = BatchStats::new("nim", Some(1));

        stats.record_game(true, true, 3); // P1 starts and wins
        stats.record_game(true, false, 4); // P1 starts, P2 wins
        stats.record_game(false, false, 5); // P2 starts and wins
        stats.record_game(false, true, 2); // P2 starts, P1 wins

        let summary = stats.snapshot();
        assert_eq!(summary.games, 4);
        assert_eq!(summary.first_player_starts, 2);
        assert_eq!(summary.second_player_starts, 2);
        assert_eq!(summary.starting_player_wins, 2);
        assert_eq!(summary.first_player_wins, 2);
        assert_eq!(summary.second_player_wins, 2);
        assert_eq!(summary.total_moves, 14);
        assert!((summary.avg_game_length - 3.5).abs() < 1e-9);
        assert!((summary.starting_player_win_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch_has_no_nan() {
        let stats = BatchStats::new("nim", None);
        let summary = stats.snapshot();

        assert_eq!(summary.games, 0);
        assert_eq!(summary.avg_game_length, 0.0);
        assert_eq!(summary.avg_search_us, 0.0);
        assert_eq!(summary.first_player_win_pct, 0.0);
        assert!(!summary.starting_player_win_pct.is_nan());
    }

    #[test]
    fn test_search_stats_accumulate() {
        let mut stats = BatchStats::new("ledge", None);
        stats.record_search(&SearchStats {
            simulations: 100,
            elapsed_us: 1000,
            ..SearchStats::default()
        });
        stats.record_search(&SearchStats {
            simulations: 50,
            elapsed_us: 3000,
            ..SearchStats::default()
        });

        let summary = stats.snapshot();
        assert_eq!(summary.simulations, 150);
        assert!((summary.avg_search_us - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_text() {
        let mut stats = BatchStats::new("nim", None);
        stats.record_game(true, true, 3);
        stats.record_game(true, true, 3);
        stats.record_game(false, true, 4);
        stats.record_game(true, false, 5);

        let text = stats.snapshot().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Player 1 started 3 out of 4 games - 75.0%",
                "Player 2 started 1 out of 4 games - 25.0%",
                "Starting player won 2 out of 4 games - 50.0%",
                "Player 1 won 3 out of 4 games - 75.0%",
                "Player 2 won 1 out of 4 games - 25.0%",
            ]
        );
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("summary.json");

        let mut stats = BatchStats::new("nim", Some(42));
        stats.record_game(true, true, 3);
        stats.snapshot().write_json(&path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("nested").join("summary.json.tmp").exists());

        let content = fs::read_to_string(&path).unwrap();
        let parsed: BatchSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.games, 1);
        assert_eq!(parsed.game_type, "nim");
        assert_eq!(parsed.seed, Some(42));
    }

    #[test]
    fn test_write_json_overwrites_previous_summary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.json");

        let mut stats = BatchStats::new("nim", None);
        stats.record_game(true, true, 3);
        stats.snapshot().write_json(&path).unwrap();
        stats.record_game(false, false, 3);
        stats.snapshot().write_json(&path).unwrap();

        let parsed: BatchSummary =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.games, 2);
    }
}
