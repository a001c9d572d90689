//! Composite scoring and location ranking.

pub mod ranker;
pub mod scorer;

pub use ranker::RankingEngine;
pub use scorer::score;
