pub mod canvas;
pub mod compose;
pub mod cpu;
pub mod raster;
