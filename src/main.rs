use std::io;
use std::rc::Rc;

use anyhow::Context;
use vcpkit::{init_logging, App, FileChooser, HostLoop, SettingsManager, BUILD_DATE, VERSION};

/// Native open dialog for program files
struct DialogChooser;

impl FileChooser for DialogChooser {
    fn choose_program(&self) -> Option<String> {
        rfd::FileDialog::new()
            .set_title("Open Program")
            .add_filter("G-code", &["ngc", "nc", "gcode", "tap"])
            .add_filter("All Files", &["*"])
            .pick_file()
            .map(|path| path.to_string_lossy().into_owned())
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("VCPKit {} (built {})", VERSION, BUILD_DATE);

    let mut settings = SettingsManager::load_default().context("Failed to load settings")?;
    let mut app = App::new(settings.config(), Some(Rc::new(DialogChooser)))?;

    let stdin = io::stdin();
    let mut host = HostLoop::new(stdin.lock(), io::stdout());
    host.run(app.window_mut())?;

    settings.config_mut().files.recent_files = app.recent_files();
    if let Err(e) = settings.save() {
        tracing::warn!("Failed to save settings: {}", e);
    }

    Ok(())
}
