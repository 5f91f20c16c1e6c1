use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "schemadoc")]
#[command(version, about = "Generate a browsable data dictionary and ER diagram from a database catalog")]
pub struct Cli {
    /// SQLite database file to document
    pub database: PathBuf,

    /// Output directory for the generated site
    #[arg(short, long, default_value = "./output")]
    pub output: PathBuf,

    /// Write only the ER diagram SVG to this file and skip the site
    #[arg(long)]
    pub diagram: Option<PathBuf>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
