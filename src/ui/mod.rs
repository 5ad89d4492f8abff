//! UI module - command line front-end and shared colors

pub mod cli;
pub mod theme;
