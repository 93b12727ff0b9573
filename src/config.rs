use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::notice::DEFAULT_HOLD;

#[derive(Parser, Debug)]
#[command(name = "booth-plan-editor", about = "Place and resize exhibition booths on a floor plan")]
pub struct Cli {
    /// JSON file holding the booth list
    #[arg(long)]
    pub booths: PathBuf,

    /// Floor plan image (PNG or JPEG)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// How long notices stay fully visible, in milliseconds
    #[arg(long, default_value_t = DEFAULT_HOLD.as_millis() as u64)]
    pub notice_ms: u64,

    #[arg(long)]
    pub dark: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub booths_path: PathBuf,
    pub image_path: Option<PathBuf>,
    pub notice_hold: Duration,
    pub dark_mode: bool,
}

impl From<Cli> for EditorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            booths_path: cli.booths,
            image_path: cli.image,
            notice_hold: Duration::from_millis(cli.notice_ms),
            dark_mode: cli.dark,
        }
    }
}
