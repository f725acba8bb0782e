pub mod avltree;
pub mod error;
pub mod harness;
pub mod lock;
pub mod set;
