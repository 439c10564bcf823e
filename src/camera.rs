//! Selfie capture. The device sits behind trait seams so the wizard can run
//! against real hardware, a still image, or a scripted fake.

use std::io::Cursor;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, RgbImage};
use thiserror::Error;

use crate::upload::FileBlob;

pub const SELFIE_FILE_NAME: &str = "selfie.png";
pub const SELFIE_MIME_TYPE: &str = "image/png";

/// Cadence and bound for waiting on the first live frame.
pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const MAX_READY_POLLS: u32 = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera access was denied")]
    PermissionDenied,
    #[error("no capture device is available")]
    NoDevice,
    #[error("the camera feed never produced a frame")]
    FrameTimeout,
    #[error("frame encoding failed: {0}")]
    Encode(String),
    #[error("camera stream failure: {0}")]
    Stream(String),
}

/// Which lens the surface should prefer when several are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraFacing {
    User,
    Environment,
}

/// One raw frame, tightly packed RGB8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Entry point to a capture device.
pub trait CameraSurface {
    fn open(&mut self, facing: CameraFacing) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// A live feed. `dimensions` stays `None` until the feed actually delivers;
/// `shutdown` releases the device and must be idempotent.
pub trait CameraStream {
    fn dimensions(&mut self) -> Option<(u32, u32)>;
    fn capture_frame(&mut self) -> Result<CameraFrame, CameraError>;
    fn shutdown(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfieState {
    Idle,
    Starting,
    Ready,
    Failed(CameraError),
}

/// Drives one selfie capture: open the preferred lens, wait for the feed to
/// go live within a bounded number of polls, grab a frame, encode it to
/// PNG. Every exit path releases the device.
pub struct SelfieSession {
    state: SelfieState,
    stream: Option<Box<dyn CameraStream>>,
    poll_interval: Duration,
    max_polls: u32,
}

impl SelfieSession {
    pub fn new() -> Self {
        Self::with_polling(READY_POLL_INTERVAL, MAX_READY_POLLS)
    }

    pub fn with_polling(poll_interval: Duration, max_polls: u32) -> Self {
        Self {
            state: SelfieState::Idle,
            stream: None,
            poll_interval,
            max_polls,
        }
    }

    pub fn state(&self) -> &SelfieState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SelfieState::Ready
    }

    /// Opens the user-facing lens and waits for a live frame. A failed
    /// session may be started again with the same or another surface.
    pub fn start(&mut self, surface: &mut dyn CameraSurface) -> Result<(), CameraError> {
        self.release_stream();
        self.state = SelfieState::Starting;

        let mut stream = match surface.open(CameraFacing::User) {
            Ok(stream) => stream,
            Err(err) => {
                self.state = SelfieState::Failed(err.clone());
                return Err(err);
            }
        };

        for attempt in 0..self.max_polls {
            if let Some((width, height)) = stream.dimensions() {
                if width > 0 && height > 0 {
                    self.stream = Some(stream);
                    self.state = SelfieState::Ready;
                    return Ok(());
                }
            }
            if attempt + 1 < self.max_polls {
                thread::sleep(self.poll_interval);
            }
        }

        stream.shutdown();
        self.state = SelfieState::Failed(CameraError::FrameTimeout);
        Err(CameraError::FrameTimeout)
    }

    /// Grabs one frame, encodes it, and releases the device.
    pub fn capture(&mut self) -> Result<FileBlob, CameraError> {
        if !self.is_ready() {
            return Err(CameraError::Stream("capture without a live feed".into()));
        }
        let Some(mut stream) = self.stream.take() else {
            return Err(CameraError::Stream("capture without a live feed".into()));
        };

        let frame = match stream.capture_frame() {
            Ok(frame) => frame,
            Err(err) => {
                stream.shutdown();
                self.state = SelfieState::Failed(err.clone());
                return Err(err);
            }
        };
        stream.shutdown();

        let encoded = encode_png(frame)?;
        self.state = SelfieState::Idle;
        Ok(FileBlob::with_bytes(SELFIE_FILE_NAME, SELFIE_MIME_TYPE, encoded))
    }

    /// Releases the device from any state.
    pub fn cancel(&mut self) {
        self.release_stream();
        self.state = SelfieState::Idle;
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.shutdown();
        }
    }
}

impl Default for SelfieSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SelfieSession {
    fn drop(&mut self) {
        self.release_stream();
    }
}

fn encode_png(frame: CameraFrame) -> Result<Vec<u8>, CameraError> {
    let image = RgbImage::from_raw(frame.width, frame.height, frame.pixels)
        .ok_or_else(|| CameraError::Encode("frame buffer does not match its dimensions".into()))?;
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| CameraError::Encode(err.to_string()))?;
    Ok(bytes)
}

/// Camera surface backed by a still image on disk. The terminal wizard uses
/// this so a selfie can be supplied as a file path.
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CameraSurface for FileCamera {
    fn open(&mut self, _facing: CameraFacing) -> Result<Box<dyn CameraStream>, CameraError> {
        let image = image::open(&self.path).map_err(|err| match err {
            image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                CameraError::NoDevice
            }
            other => CameraError::Stream(other.to_string()),
        })?;
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Box::new(StillFrameStream {
            width,
            height,
            pixels: Some(rgb.into_raw()),
        }))
    }
}

struct StillFrameStream {
    width: u32,
    height: u32,
    pixels: Option<Vec<u8>>,
}

impl CameraStream for StillFrameStream {
    fn dimensions(&mut self) -> Option<(u32, u32)> {
        self.pixels.as_ref().map(|_| (self.width, self.height))
    }

    fn capture_frame(&mut self) -> Result<CameraFrame, CameraError> {
        let pixels = self
            .pixels
            .take()
            .ok_or_else(|| CameraError::Stream("stream already released".into()))?;
        Ok(CameraFrame {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    fn shutdown(&mut self) {
        self.pixels = None;
    }
}
