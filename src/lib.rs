pub mod annotate;
pub mod classify;
pub mod config;
pub mod console;
pub mod directory;
pub mod engine;
pub mod history;
pub mod launcher;
pub mod paths;
pub mod record;
pub mod select;
pub mod session;
