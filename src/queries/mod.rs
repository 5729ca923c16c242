pub mod camp_queries;
pub mod stats_queries;
