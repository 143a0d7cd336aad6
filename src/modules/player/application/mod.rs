pub mod trailer_player;

pub use trailer_player::{TrailerHandle, TrailerPlayer};
