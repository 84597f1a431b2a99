pub mod compose;
pub mod serve;
pub mod stdio_host;
pub mod topipe;

pub use compose::*;
pub use serve::*;
pub use stdio_host::*;
pub use topipe::*;
