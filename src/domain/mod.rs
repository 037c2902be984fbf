pub mod changelog;
pub mod comment;
pub mod commit;
