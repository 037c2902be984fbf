pub mod git;
pub mod github;
pub mod openai;
