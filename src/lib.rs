#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub use app::App;

pub mod ball;
pub mod breakout;
pub mod brick;
pub mod collision;
pub mod control;
pub mod drawable;
pub mod launcher;
pub mod memory;
pub mod paddle;
pub mod reaction;
pub mod scores;
pub mod ticker;
