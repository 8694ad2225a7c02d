mod engine;
mod ffi;

pub use engine::AppleVisionBackend;
