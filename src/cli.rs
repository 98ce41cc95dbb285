use crate::config::DEFAULT_INSTALLER;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pkgsync",
    about = "Reinstall package.json dependencies and keep their versions in sync across groups",
    version,
    author
)]
pub struct Cli {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Print installer output and plain step logs instead of a spinner
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reinstall ranged dependencies group by group, then sync versions across groups
    Update {
        /// Package manager executable
        #[arg(long, default_value = DEFAULT_INSTALLER)]
        installer: String,

        /// Keep the lock file and node_modules instead of deleting them first
        #[arg(long)]
        no_clean: bool,

        /// Only reinstall packages whose name matches this glob (e.g. "@babel/*")
        #[arg(long, value_name = "GLOB")]
        filter: Option<String>,
    },

    /// Sync versions across dependency groups without reinstalling
    Sync {
        /// Report diverging versions without writing; fails if any are found
        #[arg(long)]
        check: bool,
    },

    /// Show which packages each group would reinstall
    List {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_defaults() {
        let cli = Cli::try_parse_from(["pkgsync", "update"]).unwrap();
        assert_eq!(cli.path, ".");
        assert!(!cli.verbose);
        match cli.command {
            Commands::Update {
                installer,
                no_clean,
                filter,
            } => {
                assert_eq!(installer, "yarn");
                assert!(!no_clean);
                assert!(filter.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["pkgsync", "-p", "app", "sync", "--check", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.path, "app");
        assert!(matches!(cli.command, Commands::Sync { check: true }));
    }
}
