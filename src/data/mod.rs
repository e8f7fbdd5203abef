pub mod bubble;
pub mod geometry;
pub mod latin_square;
pub mod layout_gen;
pub mod session;
pub mod setup;
pub mod target;
pub mod technique;
pub mod trial_log;
