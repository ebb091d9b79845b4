pub mod replay_ops;
pub mod settings_ops;
