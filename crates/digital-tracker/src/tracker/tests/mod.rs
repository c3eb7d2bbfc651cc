mod common;
mod comparison;
mod leaderboard;
mod metric_ranking;
