// Reusable library API — the CLI binary is a thin wrapper over these
pub mod cache;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod index;
pub mod letters;
pub mod log;
pub mod search;
pub mod word_list;
