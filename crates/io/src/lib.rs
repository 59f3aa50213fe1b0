#![forbid(unsafe_code)]

pub mod error;
pub mod ply;

pub use error::PlyError;
pub use ply::{read_ply, try_write_ply, write_ply, write_ply_to};
