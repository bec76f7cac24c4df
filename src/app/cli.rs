use crate::gallery::ViewMode;
use clap::Parser;
use std::path::PathBuf;

/// gatefold - a token-gated photo gallery for your terminal 📷
#[derive(Parser, Debug)]
#[command(name = "gatefold", version, about)]
pub struct Args {
    /// Wallet address to connect with on startup
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Config file (default: ~/.config/gatefold/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Initial gallery layout
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Where downloaded photos are saved
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Log verbosity (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_flags() {
        let args = Args::try_parse_from([
            "gatefold",
            "--address",
            "0x1111111111111111111111111111111111111111",
            "--view",
            "list",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.view, Some(ViewMode::List));
        assert_eq!(args.log_level, tracing::Level::DEBUG);
        assert!(!args.generate_config);
    }
}
