//! Matching, ranking, skill gap and alert logic

pub mod types;
pub mod salary;
pub mod match_scorer;
pub mod recommender;
pub mod skill_gap;
pub mod alerts;
