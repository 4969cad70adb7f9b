pub mod container;
pub mod serialize;
pub mod variable;
