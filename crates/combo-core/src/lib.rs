pub mod classify;
pub mod gate;
pub mod platform;
pub mod settings;
pub mod status;
pub mod timer;
