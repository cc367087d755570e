pub mod commands;
pub mod enhance;
pub mod trace_init;
