use std::path::PathBuf;

use clap::Parser;

/// Harbor, a multi-profile web browser.
#[derive(Parser, Debug)]
#[command(name = "harbor", version, about)]
pub struct Args {
    /// URLs to open, one tab each. Defaults to the profile's startup pages.
    pub urls: Vec<String>,

    /// Profile id to open. Defaults to the last used profile.
    #[arg(short = 'p', long)]
    pub profile: Option<String>,

    /// Open an incognito window based on the chosen profile.
    #[arg(long)]
    pub incognito: bool,

    /// Data directory override.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory holding the bundled `harbor://` pages.
    #[arg(long)]
    pub assets_dir: Option<PathBuf>,

    /// Run without a GUI and print the resulting window state as JSON.
    #[arg(long)]
    pub headless: bool,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_urls_and_flags() {
        let args = Args::parse_from([
            "harbor",
            "--profile",
            "abc",
            "--incognito",
            "https://a.example",
            "https://b.example",
        ]);
        assert_eq!(args.profile.as_deref(), Some("abc"));
        assert!(args.incognito);
        assert!(!args.headless);
        assert_eq!(args.urls, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["harbor"]);
        assert!(args.urls.is_empty());
        assert!(args.profile.is_none());
        assert!(args.data_dir.is_none());
        assert!(args.log_level.is_none());
    }
}
