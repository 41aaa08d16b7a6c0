/// Boundary with the host that puts frames on a real screen
use crate::raster::Framebuffer;
use crate::state::Mode;

pub const TITLE: &str = "Smol Teapot 3D";

/// HUD data the host renders next to the bitmap. The core never draws text.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub mode: Mode,
    pub fps: f32,
    pub polygons_drawn: usize,
}

impl Overlay {
    pub fn is_title_screen(&self) -> bool {
        self.mode == Mode::TitleScreen
    }

    pub fn mode_label(&self) -> String {
        self.mode.label()
    }

    /// Text lines in display order
    pub fn lines(&self) -> Vec<String> {
        match self.mode {
            Mode::TitleScreen => vec![TITLE.to_string(), "Press any button".to_string()],
            Mode::Interactive => vec![
                self.status_line(),
                "Arrows: rotate  OK: reset  Hold OK: auto".to_string(),
            ],
            Mode::AutoRotating { .. } => vec![
                self.status_line(),
                "OK: next axis  Hold OK: manual".to_string(),
            ],
        }
    }

    fn status_line(&self) -> String {
        format!(
            "{} | FPS: {:.0} | Polys: {}",
            self.mode_label(),
            self.fps,
            self.polygons_drawn
        )
    }
}

/// Host display surface.
///
/// Called once per produced frame, after the render pass has finished.
/// The framebuffer must only be read for the duration of the call.
pub trait Display {
    type Error;

    fn present(&mut self, frame: &Framebuffer, overlay: &Overlay) -> Result<(), Self::Error>;
}
