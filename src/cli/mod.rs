use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arrays")]
#[command(version, about = "Drive a growable string array from a command script", long_about = None)]
pub struct Cli {
    /// Script of array commands to run; the reference scenario runs when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Initial capacity of the array
    #[arg(short, long, default_value_t = 1)]
    pub capacity: usize,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
