//! eframe host for the wyrm: one window, one creature, redrawn every frame.

mod input;
mod painter;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use wyrm_core::{CreatureConfig, Simulation, SurfaceMode};
use wyrm_platform::{FrameDriver, Result, SurfaceSize};

pub use input::{translate, EguiInput};
pub use painter::PainterCanvas;

const WINDOW_TITLE: &str = "Wyrm";
const DEFAULT_VIEWPORT: [f32; 2] = [1024.0, 720.0];

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("could not open a drawing surface: {0}")]
    Startup(String),
}

/// Opens the window and runs until it is closed.
pub fn run_app(config: CreatureConfig, seed: Option<u64>) -> Result<()> {
    let (size, resizable) = match config.surface {
        SurfaceMode::Fixed { width, height } => ([width, height], false),
        SurfaceMode::Viewport => (DEFAULT_VIEWPORT, true),
    };
    info!(
        name = %config.name,
        width = size[0],
        height = size[1],
        resizable,
        seed = ?seed,
        "opening window"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_resizable(resizable),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(
            move |_creation_context: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>> {
                let app = WyrmApp::new(config, size.into(), seed)?;
                Ok(Box::new(app))
            },
        ),
    )
    .map_err(|e| HostError::Startup(e.to_string()))?;

    info!("window closed");
    Ok(())
}

pub struct WyrmApp {
    driver: FrameDriver<StdRng>,
    surface: Option<egui::Vec2>,
}

impl WyrmApp {
    pub fn new(config: CreatureConfig, size: glam::Vec2, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let simulation = Simulation::new(config, size)?;
        Ok(Self {
            driver: FrameDriver::new(simulation, rng),
            surface: None,
        })
    }
}

impl eframe::App for WyrmApp {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(context, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                if self.surface != Some(rect.size()) {
                    info!(width = rect.width(), height = rect.height(), "surface size");
                    self.surface = Some(rect.size());
                }
                let (events, now) = context.input(|i| (i.events.clone(), i.time));
                let size = SurfaceSize::new(rect.width(), rect.height());

                let mut input = EguiInput::new(&events, rect);
                let mut canvas = PainterCanvas::new(&painter, rect.min, size);
                if let Err(e) = self.driver.tick(now, &mut input, &mut canvas) {
                    warn!("frame dropped: {e}");
                }
            });
        context.request_repaint();
    }
}
