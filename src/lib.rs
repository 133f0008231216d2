pub mod cli;
pub mod cnv;
pub mod commands;
pub mod input;
pub mod render;
pub mod utils;
