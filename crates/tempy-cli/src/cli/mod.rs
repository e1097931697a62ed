//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tempy",
    bin_name = "tempy",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold files and directories from personal templates",
    long_about = "Tempy applies templates stored under your template \
                  directory (default ~/.tempy), substituting arguments \
                  into file contents and file names.",
    after_help = "EXAMPLES:\n\
        \x20 tempy list\n\
        \x20 tempy list --machine\n\
        \x20 tempy apply greet --who alice -o /tmp/out\n\
        \x20 tempy completions bash > /usr/share/bash-completion/completions/tempy",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List discovered templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 tempy list\n\
            \x20 tempy list --machine   # name:description lines for scripting"
    )]
    List(ListArgs),

    /// Apply a template.
    #[command(
        visible_alias = "a",
        about = "Apply a template",
        after_help = "EXAMPLES:\n\
            \x20 tempy apply greet --who alice\n\
            \x20 tempy apply c-project --name demo -o ./demo\n\n\
        Everything after the template name is passed to the template's own \
        argument parser, except --output/-o which selects the output directory."
    )]
    Apply(ApplyArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tempy completions bash > ~/.local/share/bash-completion/completions/tempy\n\
            \x20 tempy completions zsh  > ~/.zfunc/_tempy\n\
            \x20 tempy completions fish > ~/.config/fish/completions/tempy.fish"
    )]
    Completions(CompletionsArgs),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `tempy list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Machine-readable `name:description` lines.
    #[arg(
        short = 'm',
        long = "machine",
        help = "Machine-readable output (name:description)"
    )]
    pub machine: bool,
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `tempy apply`.
///
/// Template arguments are parsed by the template's own schema, not by clap,
/// so everything after `NAME` is captured verbatim (including tokens that
/// look like flags).  The output-directory flag is fished out of that list
/// afterwards so it may appear anywhere among the template arguments.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Template to apply.
    #[arg(value_name = "NAME", help = "Template name")]
    pub name: String,

    /// Arguments for the template's parser, plus an optional
    /// `--output`/`-o DIR`.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Template arguments and --output/-o DIR"
    )]
    pub args: Vec<String>,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tempy completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
