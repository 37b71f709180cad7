use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emberdeck")]
#[command(author, version, about)]
#[command(long_about = "A small password-gated slide presenter.\n\n\
    Present a markdown deck, or the built-in demo when no file is given.\n\n\
    Examples:\n  \
    emberdeck                      Present the demo deck\n  \
    emberdeck talk.md --windowed   Present a deck in a window\n  \
    emberdeck password set         Protect the deck with a password\n  \
    emberdeck reset                Forget slide position and dismissed prompts")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage the presentation password
    Password {
        #[command(subcommand)]
        command: PasswordCommands,
    },

    /// Forget the remembered slide, the unlock and dismissed prompts
    Reset,

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, prompts.fullscreen_delay_ms, gate.hint)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Subcommand)]
pub enum PasswordCommands {
    /// Set the password; prompts for it when no value is given
    Set {
        /// New password
        value: Option<String>,
    },

    /// Remove the password
    Clear,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    /// Log level implied by -q / -v flags.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Password { command }) => crate::commands::password::run(command),
            Some(Commands::Reset) => crate::commands::reset::run(),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("emberdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                if let Some(file) = &self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                }
                crate::app::run(self.file, self.windowed, self.slide)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::parse_from(["emberdeck"]);
        assert_eq!(cli.log_level(), "warn");

        let cli = Cli::parse_from(["emberdeck", "-vv"]);
        assert_eq!(cli.log_level(), "trace");

        let cli = Cli::parse_from(["emberdeck", "-v", "-q"]);
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_parse_password_set_without_value() {
        let cli = Cli::parse_from(["emberdeck", "password", "set"]);
        match cli.command {
            Some(Commands::Password {
                command: PasswordCommands::Set { value },
            }) => assert!(value.is_none()),
            _ => panic!("expected password set"),
        }
    }

    #[test]
    fn test_parse_file_and_slide() {
        let cli = Cli::parse_from(["emberdeck", "talk.md", "--slide", "3", "--windowed"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("talk.md")));
        assert_eq!(cli.slide, Some(3));
        assert!(cli.windowed);
    }
}
