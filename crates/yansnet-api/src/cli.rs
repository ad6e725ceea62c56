use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "yansnet-api")]
#[command(author, version, about = "YANSNET depression detection API", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "YANSNET_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Listen address (overrides configuration)
    #[arg(short = 'l', long)]
    pub host: Option<String>,

    /// Listen port (overrides configuration)
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
