//! Input events. Keyboard only: the engine has no mouse, timer or resize
//! handling, so a key is the only thing a widget will ever be handed.

pub mod key;
