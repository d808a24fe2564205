mod directory;
mod room_directory;

pub use directory::*;
pub use room_directory::*;
