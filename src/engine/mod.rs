pub mod bounds;
pub mod console;
pub mod random;
