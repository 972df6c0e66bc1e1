//! Main application module for the virtual mouse.

use crate::{
    config::Config,
    constants::{
        BBOX_PADDING, DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, HAND_CONNECTIONS,
    },
    cursor_control::{CursorController, NullSink, PointerSink},
    error::{Error, Result},
    gesture::{mapping::ScreenSize, FrameOutcome, GestureInterpreter, GestureState, Mode},
    hand_landmarks::HandLandmarkDetector,
    landmarks::{LandmarkExtractor, LandmarkSet},
    utils::{padded_box, safe_cast::f64_to_i32},
};
use log::{debug, error, info, warn};
use opencv::{
    core::{Mat, Point, Scalar},
    highgui::{self, WINDOW_AUTOSIZE},
    imgproc::{self, FILLED, FONT_HERSHEY_PLAIN, LINE_8},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

const WINDOW_NAME: &str = "Virtual Mouse";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Camera index or video file path
    pub video_source: VideoSource,
    /// Tunables loaded from file and command line
    pub settings: Config,
}

/// Video source type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Video file path
    File(String),
}

/// What reached the pointer sink for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// The pointer was moved
    pub moved: bool,
    /// A click was delivered
    pub clicked: bool,
}

/// Forward a frame outcome to the pointer sink.
///
/// Sink failures are logged and swallowed; a rejected move or click never
/// stops the frame loop.
pub fn dispatch_outcome(sink: &mut dyn PointerSink, outcome: &FrameOutcome) -> DispatchReport {
    let mut report = DispatchReport::default();

    if let Some(target) = outcome.target {
        match sink.move_to(target.x, target.y) {
            Ok(()) => report.moved = true,
            Err(e) => warn!("Pointer move ignored: {e}"),
        }
    }

    if outcome.clicked {
        match sink.click() {
            Ok(()) => report.clicked = true,
            Err(e) => warn!("Pointer click ignored: {e}"),
        }
    }

    report
}

/// Shared request to leave the frame loop, set from a signal handler
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop after the current frame
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run the extractor on one frame.
///
/// An inference or output failure is logged and the frame treated as having
/// no hand, so only frame acquisition can end the loop.
pub fn extract_landmarks(extractor: &mut dyn LandmarkExtractor, frame: &Mat) -> Option<LandmarkSet> {
    match extractor.extract(frame) {
        Ok(landmarks) => landmarks,
        Err(e) => {
            warn!("Landmark extraction failed, frame treated as idle: {e}");
            None
        }
    }
}

/// Main application struct
pub struct VirtualMouseApp {
    config: AppConfig,
    extractor: Box<dyn LandmarkExtractor>,
    sink: Box<dyn PointerSink>,
    interpreter: GestureInterpreter,
    state: GestureState,
    video_capture: VideoCapture,
    stop: StopFlag,
}

impl VirtualMouseApp {
    /// Create a new virtual mouse application
    ///
    /// # Errors
    ///
    /// Returns an error if the video source, the landmark model or the
    /// configuration cannot be used
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing Virtual Mouse application");
        config.settings.validate()?;

        let video_capture = open_video_source(&config)?;
        let frame_width = video_capture.get(CAP_PROP_FRAME_WIDTH)?;
        let frame_height = video_capture.get(CAP_PROP_FRAME_HEIGHT)?;
        let (frame_width, frame_height) = if frame_width > 0.0 && frame_height > 0.0 {
            (f64_to_i32(frame_width)?, f64_to_i32(frame_height)?)
        } else {
            warn!("Source did not report its frame size, assuming configured resolution");
            (config.settings.camera.width, config.settings.camera.height)
        };
        info!("Frame size: {}x{}", frame_width, frame_height);

        config.settings.validate_model_path()?;
        let model = &config.settings.model;
        let extractor = HandLandmarkDetector::new(
            &model.hand_landmarks,
            model.detection_confidence,
            model.tracking_confidence,
        )?;

        let sink = create_sink(&config.settings);
        let gesture_config = config
            .settings
            .gesture_config(frame_width, frame_height, sink.screen_size())?;
        let interpreter = GestureInterpreter::new(gesture_config)?;

        if config.settings.display.show_window {
            highgui::named_window(WINDOW_NAME, WINDOW_AUTOSIZE)?;
        }

        Ok(Self {
            config,
            extractor: Box::new(extractor),
            sink,
            interpreter,
            state: GestureState::default(),
            video_capture,
            stop: StopFlag::new(),
        })
    }

    /// Handle that makes [`run`](Self::run) return after the current frame
    #[must_use]
    pub fn stop_flag(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Run the main application loop until the source ends or fails, the
    /// user presses `q`/Esc in the window, or the stop flag is raised
    ///
    /// # Errors
    ///
    /// Returns `Error::FrameAcquisition` if the camera stops delivering frames
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main application loop");

        let mut last_frame = Instant::now();

        loop {
            if self.stop.is_requested() {
                info!("Stop requested");
                break;
            }

            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                if matches!(self.config.video_source, VideoSource::File(_)) {
                    info!("End of video file reached");
                    break;
                }
                error!("Failed to grab frame, stopping");
                return Err(Error::FrameAcquisition("Camera returned no frame".to_string()));
            }

            if self.config.settings.display.mirror {
                let temp = frame.clone();
                opencv::core::flip(&temp, &mut frame, 1)?;
            }

            let landmarks = extract_landmarks(self.extractor.as_mut(), &frame);
            let now = Instant::now();
            let outcome = self.interpreter.process(landmarks.as_ref(), &mut self.state, now);
            let report = dispatch_outcome(self.sink.as_mut(), &outcome);
            if report.clicked {
                info!("Click");
            }
            debug!("Mode {:?}, fingers {:?}", outcome.mode(), outcome.fingers.map(|f| f.to_bits()));

            let elapsed = now.duration_since(last_frame).as_secs_f64();
            let fps = if elapsed > 0.0 { 1.0 / elapsed } else { 0.0 };
            last_frame = now;

            if self.config.settings.display.show_window {
                self.draw_overlay(&mut frame, landmarks.as_ref(), &outcome, fps)?;
                highgui::imshow(WINDOW_NAME, &frame)?;

                let key = highgui::wait_key(1)?;
                if key == 27 || key & 0xFF == i32::from(b'q') {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        info!("Application shutting down");
        Ok(())
    }

    /// Draw landmarks, the active region, mode feedback and FPS
    fn draw_overlay(
        &self,
        frame: &mut Mat,
        landmarks: Option<&LandmarkSet>,
        outcome: &FrameOutcome,
        fps: f64,
    ) -> Result<()> {
        let magenta = Scalar::new(255.0, 0.0, 255.0, 0.0);
        let green = Scalar::new(0.0, 255.0, 0.0, 0.0);

        if let Some(landmarks) = landmarks {
            for &(a, b) in &HAND_CONNECTIONS {
                if let (Some(pa), Some(pb)) = (landmarks.get(a), landmarks.get(b)) {
                    imgproc::line(
                        frame,
                        Point::new(pa.x, pa.y),
                        Point::new(pb.x, pb.y),
                        Scalar::new(255.0, 255.0, 255.0, 0.0),
                        2,
                        LINE_8,
                        0,
                    )?;
                }
            }
            for lm in landmarks.iter() {
                imgproc::circle(frame, Point::new(lm.x, lm.y), 5, magenta, FILLED, LINE_8, 0)?;
            }
            if let Some(bbox) = landmarks.bounding_box() {
                let rect = padded_box(bbox, BBOX_PADDING, frame.cols(), frame.rows());
                imgproc::rectangle(frame, rect, green, 2, LINE_8, 0)?;
            }

            let region = self.interpreter.config().region;
            let (left, right) = region.x_span();
            let (top, bottom) = region.y_span();
            imgproc::rectangle_points(
                frame,
                Point::new(left, top),
                Point::new(right, bottom),
                magenta,
                2,
                LINE_8,
                0,
            )?;
        }

        match outcome.mode() {
            Mode::Move => {
                if let Some((x, y)) = outcome.index_tip {
                    imgproc::circle(frame, Point::new(x, y), 15, magenta, FILLED, LINE_8, 0)?;
                }
            }
            Mode::Click => {
                if let Some(span) = outcome.span {
                    let start = Point::new(span.start.0, span.start.1);
                    let end = Point::new(span.end.0, span.end.1);
                    let mid = Point::new(span.midpoint.0, span.midpoint.1);
                    imgproc::line(frame, start, end, magenta, 3, LINE_8, 0)?;
                    imgproc::circle(frame, start, 15, magenta, FILLED, LINE_8, 0)?;
                    imgproc::circle(frame, end, 15, magenta, FILLED, LINE_8, 0)?;
                    let mid_color = if outcome.pinched {
                        green
                    } else {
                        Scalar::new(0.0, 0.0, 255.0, 0.0)
                    };
                    imgproc::circle(frame, mid, 15, mid_color, FILLED, LINE_8, 0)?;
                }
            }
            Mode::Idle => {}
        }

        imgproc::put_text(
            frame,
            &format!("FPS: {}", f64_to_i32(fps.round()).unwrap_or(0)),
            Point::new(20, 50),
            FONT_HERSHEY_PLAIN,
            3.0,
            Scalar::new(255.0, 0.0, 0.0, 0.0),
            3,
            LINE_8,
            false,
        )?;

        Ok(())
    }
}

/// Open the camera or video file, requesting the configured resolution
fn open_video_source(config: &AppConfig) -> Result<VideoCapture> {
    match &config.video_source {
        VideoSource::Camera(index) => {
            info!("Opening camera {}", index);
            let mut cap = VideoCapture::new(*index, videoio::CAP_ANY)?;
            if !cap.is_opened()? {
                return Err(Error::FrameAcquisition(format!("Cannot open camera {index}")));
            }
            cap.set(CAP_PROP_FRAME_WIDTH, f64::from(config.settings.camera.width))?;
            cap.set(CAP_PROP_FRAME_HEIGHT, f64::from(config.settings.camera.height))?;

            // Reduce buffer size for lower latency (webcam only)
            cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;
            Ok(cap)
        }
        VideoSource::File(path) => {
            info!("Opening video file: {}", path);
            let cap = VideoCapture::from_file(path, videoio::CAP_ANY)?;
            if !cap.is_opened()? {
                return Err(Error::FrameAcquisition(format!("Cannot open video file {path}")));
            }
            Ok(cap)
        }
    }
}

/// Pick the X11 controller, falling back to a logging sink
fn create_sink(settings: &Config) -> Box<dyn PointerSink> {
    let fallback = ScreenSize::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT);
    if !settings.cursor.enabled {
        info!("Cursor control disabled");
        return Box::new(NullSink::new(fallback));
    }

    match CursorController::new() {
        Ok(controller) => {
            info!("X11 cursor control initialized");
            Box::new(controller.with_fail_safe(settings.cursor.fail_safe))
        }
        Err(e) => {
            warn!("Failed to initialize cursor control: {}", e);
            Box::new(NullSink::new(fallback))
        }
    }
}
