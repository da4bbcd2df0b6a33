//! Firefighter: fly a helicopter across the screen and drop water on the
//! fires growing below before any of them gets out of hand.
//!
//! `entities` and `compute` hold the game itself and do no I/O.  `display`
//! and `config` belong to the terminal host driven by `main.rs`.

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
