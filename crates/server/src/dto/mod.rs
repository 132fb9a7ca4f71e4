mod boundary;
mod zone;

pub use boundary::*;
pub use zone::*;
