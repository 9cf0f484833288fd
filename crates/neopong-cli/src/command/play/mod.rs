use std::path::PathBuf;

use crate::{command::play::app::PlayApp, model::champion::Champion, tui::Runtime};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to a trained champion file (JSON)
    champion_path: PathBuf,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { champion_path } = arg;

    let champion = Champion::open(champion_path)?;
    let mut app = PlayApp::new(&champion);
    Runtime::new().run(&mut app)?;

    Ok(())
}
