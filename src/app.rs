//! Main application module: the frame-driven capture loop.

use crate::{
    config::Config,
    constants::FINAL_WINDOW,
    error::Result,
    interfaces::{CaptureDevice, ImageSink, Renderer},
    session::{Effect, Mode},
    workflow::{CaptureWorkflow, FrameInput},
};
use log::{debug, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames processed
    pub frames: u64,
    /// Mode when the loop stopped
    pub final_mode: Mode,
    /// Where the final photo was written, if it was
    pub saved: Option<PathBuf>,
}

/// Capture application wiring a device, a renderer and a sink to the workflow
pub struct CaptureApp<D, R, S> {
    device: D,
    renderer: R,
    sink: S,
    workflow: CaptureWorkflow,
}

impl<D: CaptureDevice, R: Renderer, S: ImageSink> CaptureApp<D, R, S> {
    /// Create a new capture application
    pub fn new(config: &Config, device: D, renderer: R, sink: S) -> Self {
        info!("Initializing gesture capture application");
        Self {
            device,
            renderer,
            sink,
            workflow: CaptureWorkflow::new(config),
        }
    }

    /// Current workflow
    pub fn workflow(&self) -> &CaptureWorkflow {
        &self.workflow
    }

    /// Renderer, e.g. to inspect a headless run
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Run the main loop until the stream ends, cancel is requested, or the
    /// final photo has been shown
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Starting main capture loop");

        let mut frames = 0_u64;
        let mut saved = None;
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();

        loop {
            let Some(captured) = self.device.next_frame()? else {
                info!("End of frame stream reached");
                break;
            };
            let controls = self.device.poll();
            let hands = self.device.detect_hands(&captured.image)?;
            let face = self.device.detect_face(&captured.image)?;
            debug!(
                "Frame {}: {} hand(s), face {}",
                frames,
                hands.len(),
                if face.is_some() { "present" } else { "absent" }
            );

            let step = self.workflow.process(FrameInput {
                frame: captured.image,
                hands,
                face,
                controls,
                at: captured.at,
                wall_time: captured.wall_time,
            });
            self.renderer.render(&step.render)?;

            frames += 1;
            if last_fps_update.elapsed() >= Duration::from_secs(5) {
                #[allow(clippy::cast_precision_loss)]
                let fps = frames as f64 / start_time.elapsed().as_secs_f64();
                debug!("Processing at {:.1} FPS", fps);
                last_fps_update = Instant::now();
            }

            let mut finished = false;
            for effect in step.effects {
                match effect {
                    Effect::Persist { image, taken_at } => {
                        saved = Some(self.sink.save(&image, taken_at)?);
                    }
                    Effect::Finish => finished = true,
                    Effect::Terminate => {
                        info!("Exit requested by user");
                        return Ok(self.summary(frames, saved));
                    }
                }
            }

            if finished {
                self.hold_final_view()?;
                break;
            }
        }

        info!("Application shutting down");
        Ok(self.summary(frames, saved))
    }

    /// Keep showing the final photo until its window closes or cancel is polled
    fn hold_final_view(&mut self) -> Result<()> {
        let Some(view) = self.workflow.final_view() else {
            return Ok(());
        };

        while self.renderer.is_open(FINAL_WINDOW) {
            if self.device.poll().cancel {
                info!("Final view closed by cancel");
                break;
            }
            self.renderer.render(&view)?;
        }
        Ok(())
    }

    fn summary(&self, frames: u64, saved: Option<PathBuf>) -> RunSummary {
        RunSummary {
            frames,
            final_mode: self.workflow.session().mode(),
            saved,
        }
    }
}
