pub mod load;
pub mod camera;
pub mod input;
pub mod window;

#[cfg(feature="trace")]
pub mod log;
