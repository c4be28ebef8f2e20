pub mod summary;
pub mod word;

pub use summary::*;
pub use word::*;
