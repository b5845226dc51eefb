//! Story playback and navigation engine.
//!
//! The engine owns one [`app::PlaybackPosition`] and is the only code that
//! mutates it. Everything else (clock ticks, media callbacks, user input,
//! highlight and gallery selections) reaches it as a message.

#![no_std]

extern crate alloc;

pub mod app;
pub mod bridge;
pub mod clock;
pub mod content;
pub mod driver;
pub mod input;
pub mod media;
pub mod progress;
pub mod render;
pub mod story;
pub mod text_policy;
