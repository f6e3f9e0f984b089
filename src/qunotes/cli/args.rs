use clap::{Parser, Subcommand};
use qunotes::selector::Selector;
use std::path::PathBuf;

const SELECTOR_HELP: &str = "\
Notebooks and notes are picked by their position in the last listing (1, 2, ...)
or by a prefix of their id. A value made only of digits is always a position;
include a letter of the id to select it by prefix.";

#[derive(Parser, Debug)]
#[command(name = "qunotes", bin_name = "qunotes", version)]
#[command(about = "Notebooks of tagged notes, from the command line", long_about = None)]
#[command(after_help = SELECTOR_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Where notebooks are stored (defaults to $QUNOTES_HOME, then the
    /// platform data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Log what qunotes does to stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notebooks
    #[command(alias = "ls")]
    Notebooks,

    /// Manage a notebook
    #[command(alias = "nb")]
    Notebook {
        #[command(subcommand)]
        action: NotebookAction,
    },

    /// Manage a note
    #[command(alias = "n")]
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },

    /// Get or set configuration
    Config {
        /// Setting to show (all when omitted), e.g. language, theme.accent
        key: Option<String>,

        /// New value for the setting
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotebookAction {
    /// Create a notebook
    Add { name: String },

    /// Delete a notebook and all its notes
    #[command(alias = "delete")]
    Rm {
        /// Position in `qunotes notebooks` (digits only), or id prefix
        notebook: Selector,
    },

    /// Rename a notebook
    Rename { notebook: Selector, name: String },

    /// List the notes in a notebook
    #[command(alias = "ls")]
    Show {
        notebook: Selector,

        /// Only notes whose title contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NoteAction {
    /// Create a note
    Add {
        notebook: Selector,
        title: String,
        #[arg(default_value = "")]
        content: String,
    },

    /// Delete a note
    #[command(alias = "delete")]
    Rm { notebook: Selector, note: Selector },

    /// Change a note's title
    Title {
        notebook: Selector,
        note: Selector,
        title: String,
    },

    /// Replace a note's content
    Edit {
        notebook: Selector,
        note: Selector,
        content: String,
    },

    /// Add a tag to a note
    Tag {
        notebook: Selector,
        note: Selector,
        tag: String,
    },

    /// Remove a tag from a note
    Untag {
        notebook: Selector,
        note: Selector,
        tag: String,
    },

    /// Show a note
    #[command(alias = "view")]
    Show { notebook: Selector, note: Selector },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_note_tag() {
        let cli = Cli::try_parse_from(["qunotes", "note", "tag", "1", "ab12", "urgent"]).unwrap();
        match cli.command {
            Commands::Note {
                action: NoteAction::Tag { notebook, note, tag },
            } => {
                assert_eq!(notebook, Selector::Position(1));
                assert_eq!(note, Selector::Id("ab12".into()));
                assert_eq!(tag, "urgent");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn help_explains_digit_selectors() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("only of digits is always a position"));

        let cli = Cli::try_parse_from(["qunotes", "notebook", "rm", "1234"]).unwrap();
        match cli.command {
            Commands::Notebook {
                action: NotebookAction::Rm { notebook },
            } => assert_eq!(notebook, Selector::Position(1234)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_position_is_rejected() {
        assert!(Cli::try_parse_from(["qunotes", "notebook", "rm", "0"]).is_err());
    }

    #[test]
    fn global_options_anywhere() {
        let cli =
            Cli::try_parse_from(["qunotes", "notebooks", "-v", "--data-dir", "/tmp/q"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/q")));
    }
}
