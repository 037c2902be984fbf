pub mod changelog;
pub mod summarize;
