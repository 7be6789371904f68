//! FFmpeg-based screen encoder adapter

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::fs;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::application::ports::{EncoderError, ScreenEncoder};
use crate::domain::capture::{CaptureToken, VideoProfile, VIDEO_BIT_RATE, VIDEO_FRAME_RATE};

/// Screen encoder backed by an ffmpeg subprocess.
///
/// The granted display is grabbed as the video source and the default
/// audio input is mixed in, matching the fixed session parameters:
/// H.264 video at 5 Mbps / 30 fps with AMR-NB audio.
pub struct FfmpegScreenEncoder {
    /// Current ffmpeg process
    process: Arc<Mutex<Option<Child>>>,
    /// Output path of the in-flight session
    output: Arc<Mutex<Option<PathBuf>>>,
    /// Encoding state
    encoding: Arc<AtomicBool>,
}

impl FfmpegScreenEncoder {
    /// Create a new ffmpeg encoder
    pub fn new() -> Self {
        Self {
            process: Arc::new(Mutex::new(None)),
            output: Arc::new(Mutex::new(None)),
            encoding: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build ffmpeg args for one recording session
    fn build_args(display: &str, profile: VideoProfile, output: &Path) -> Vec<String> {
        vec![
            // Mirror the display into the encoder
            "-f".to_string(),
            "x11grab".to_string(),
            "-video_size".to_string(),
            profile.dimensions(),
            "-framerate".to_string(),
            VIDEO_FRAME_RATE.to_string(),
            "-i".to_string(),
            display.to_string(),
            // Microphone track
            "-f".to_string(),
            "pulse".to_string(),
            "-i".to_string(),
            "default".to_string(),
            // Video encoding settings
            "-c:v".to_string(),
            "libx264".to_string(),
            "-preset".to_string(),
            "ultrafast".to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-b:v".to_string(),
            VIDEO_BIT_RATE.to_string(),
            // Audio encoding settings
            "-c:a".to_string(),
            "libopencore_amrnb".to_string(),
            "-ar".to_string(),
            "8000".to_string(),
            "-ac".to_string(),
            "1".to_string(),
            // The AMR track needs the 3GPP muxer; the file keeps its
            // .mp4 name.
            "-f".to_string(),
            "3gp".to_string(),
            "-y".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Spawn ffmpeg process
    async fn spawn_ffmpeg(args: Vec<String>) -> Result<Child, EncoderError> {
        Command::new("ffmpeg")
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EncoderError::EncoderNotFound("ffmpeg".to_string())
                } else {
                    EncoderError::StartFailed(e.to_string())
                }
            })
    }

    /// Send signal to ffmpeg process
    fn send_signal(child: &Child, sig: Signal) -> Result<(), EncoderError> {
        if let Some(id) = child.id() {
            signal::kill(Pid::from_raw(id as i32), sig)
                .map_err(|e| EncoderError::EncodeFailed(format!("Signal failed: {}", e)))?;
        }
        Ok(())
    }

    /// Verify the finalized container is present and non-empty
    async fn verify_output(path: &Path) -> Result<(), EncoderError> {
        match fs::metadata(path).await {
            Ok(meta) if meta.len() > 0 => Ok(()),
            Ok(_) => Err(EncoderError::EncodeFailed(
                "Recording file is empty".to_string(),
            )),
            Err(e) => Err(EncoderError::EncodeFailed(format!(
                "Recording file missing: {}",
                e
            ))),
        }
    }
}

impl Default for FfmpegScreenEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenEncoder for FfmpegScreenEncoder {
    async fn start(
        &self,
        token: &CaptureToken,
        profile: VideoProfile,
        output: &Path,
    ) -> Result<(), EncoderError> {
        let mut process_guard = self.process.lock().await;
        if process_guard.is_some() {
            return Err(EncoderError::AlreadyEncoding);
        }

        let args = Self::build_args(token.display(), profile, output);
        let child = Self::spawn_ffmpeg(args).await?;

        *process_guard = Some(child);
        *self.output.lock().await = Some(output.to_path_buf());
        self.encoding.store(true, Ordering::SeqCst);

        Ok(())
    }

    async fn stop(&self) -> Result<(), EncoderError> {
        let mut process_guard = self.process.lock().await;
        let child = process_guard.take().ok_or(EncoderError::NotEncoding)?;

        self.encoding.store(false, Ordering::SeqCst);

        // SIGINT makes ffmpeg finalize the container before exiting.
        Self::send_signal(&child, Signal::SIGINT)?;
        let _ = child.wait_with_output().await;

        let mut output_guard = self.output.lock().await;
        match output_guard.take() {
            Some(path) => match Self::verify_output(&path).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    // Keep the path so a follow-up abort can discard
                    // the partial file.
                    *output_guard = Some(path);
                    Err(e)
                }
            },
            None => Err(EncoderError::EncodeFailed(
                "Output path not set".to_string(),
            )),
        }
    }

    async fn abort(&self) -> Result<(), EncoderError> {
        let mut process_guard = self.process.lock().await;
        if let Some(child) = process_guard.take() {
            self.encoding.store(false, Ordering::SeqCst);
            Self::send_signal(&child, Signal::SIGKILL)?;
            let _ = child.wait_with_output().await;
        }

        // Discard the partial file.
        if let Some(path) = self.output.lock().await.take() {
            let _ = fs::remove_file(&path).await;
        }

        Ok(())
    }

    fn is_encoding(&self) -> bool {
        self.encoding.load(Ordering::SeqCst)
    }
}
