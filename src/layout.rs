pub mod compound;
pub mod wrap;
