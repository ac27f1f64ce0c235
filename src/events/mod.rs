pub mod controls;
pub mod keyboard;
pub mod pointer;

pub use controls::{wire_controls, wire_pagehide};
pub use keyboard::wire_global_keydown;
pub use pointer::wire_pad_pointer;
