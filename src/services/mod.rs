pub mod ranking_service;
pub mod scoring_service;
