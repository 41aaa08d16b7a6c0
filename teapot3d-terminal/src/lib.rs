/// Terminal host for the 1-bit wireframe renderer
use log::info;
use std::io::{self, stdout};
use std::sync::mpsc::SyncSender;
use std::time::Instant;
use teapot3d_core::{FrameDriver, InputEvent, Model, RendererConfig};

pub mod input;
pub mod renderer;
pub mod session;

pub use input::InputThread;
pub use renderer::TerminalDisplay;
pub use session::{CrosstermModes, TerminalGuard};

/// Main application struct for terminal rendering
pub struct TerminalApp {
    driver: FrameDriver,
    sender: SyncSender<InputEvent>,
}

impl TerminalApp {
    pub fn new(config: RendererConfig, model: Model) -> teapot3d_core::Result<Self> {
        let (driver, sender) = FrameDriver::new(config, model, Instant::now())?;
        Ok(Self { driver, sender })
    }

    pub fn run(self) -> io::Result<()> {
        let Self { mut driver, sender } = self;

        let mut terminal = TerminalGuard::enter(CrosstermModes)?;

        let mut input = InputThread::spawn(sender);
        let mut display = TerminalDisplay::new(stdout());
        let result = driver.run(&mut display);

        // Drop the receiver first so a reader blocked on a full queue wakes up
        drop(driver);
        input.stop();

        let restored = terminal.restore();
        info!("Terminal restored");

        result.and(restored)
    }
}
