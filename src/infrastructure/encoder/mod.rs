//! Screen encoder implementations

pub mod ffmpeg;

pub use ffmpeg::FfmpegScreenEncoder;
