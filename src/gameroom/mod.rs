pub mod notices;
pub use notices::*;

pub mod projector;
pub use projector::*;

pub mod protocol;
pub use protocol::*;

pub mod room;
pub use room::*;

pub mod supervisor;
pub use supervisor::*;

pub mod table;
pub use table::*;

pub mod timer;
pub use timer::*;
