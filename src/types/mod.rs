mod coordinate;

pub use coordinate::*;
