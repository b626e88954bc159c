mod functions;

pub use functions::*;
pub use mock::*;
