pub mod invitation;
pub mod response;

pub use invitation::*;
pub use response::*;
