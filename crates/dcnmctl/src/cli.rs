//! Clap derive structures for the `dcnmctl` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dcnmctl -- manage DCNM 11 / NDFC 12 LAN fabrics from the command line
#[derive(Debug, Parser)]
#[command(
    name = "dcnmctl",
    version,
    about = "Manage Cisco DCNM / NDFC LAN fabrics from the command line",
    long_about = "Register switches awaiting POAP, assign switch roles, and inspect\n\
        inventory and configuration templates on a DCNM 11.5 or NDFC 12.x\n\
        controller. The API dialect is picked from the controller version.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Connection file (JSON with DCNM_HOST, DCNM_USER, DCNM_PASS);
    /// the DCNM_* environment variables are used when it does not exist
    #[arg(long, default_value = "server.json", global = true)]
    pub conn: PathBuf,

    /// Controller host (overrides the connection file)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Controller username (overrides the connection file)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Controller password (overrides the connection file)
    #[arg(long, global = true)]
    pub pass: Option<String>,

    /// Validate the controller's TLS certificate
    #[arg(long, global = true)]
    pub secure: bool,

    /// Controller version; an NDFC 12 version skips version discovery
    #[arg(long, global = true)]
    pub dcnm_version: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register, assign roles to, and list switches
    #[command(alias = "sw")]
    Switch(SwitchArgs),

    /// List fabrics
    Fabric(FabricArgs),

    /// Inspect configuration templates (NDFC 12 only)
    #[command(alias = "tmpl")]
    Template(TemplateArgs),

    /// Show the controller version and API dialect
    Server,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Switch ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SwitchArgs {
    #[command(subcommand)]
    pub command: SwitchCommand,
}

/// Switch data selection shared by `poap` and `role`.
#[derive(Debug, Args)]
pub struct SwitchDataArgs {
    /// Switch data file (JSON object of fabric name -> switch list)
    #[arg(long, default_value = "switches.json")]
    pub swdata: PathBuf,

    /// Fabric the switches belong to
    #[arg(long)]
    pub fabric: String,

    /// Only process the switch with this hostname
    #[arg(long)]
    pub switch: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SwitchCommand {
    /// Register switches awaiting POAP with their desired identity
    Poap(SwitchDataArgs),

    /// Assign roles to switches
    Role {
        #[command(flatten)]
        data: SwitchDataArgs,

        /// Role for every selected switch (default: each switch's own role)
        #[arg(long)]
        role: Option<String>,
    },

    /// List switches in the controller inventory
    #[command(alias = "ls")]
    List {
        /// Only switches in this fabric
        #[arg(long)]
        fabric: Option<String>,
    },
}

// ── Fabric ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FabricArgs {
    #[command(subcommand)]
    pub command: FabricCommand,
}

#[derive(Debug, Subcommand)]
pub enum FabricCommand {
    /// List fabrics, or show one by name
    #[command(alias = "ls")]
    List {
        /// Fabric name
        name: Option<String>,
    },
}

// ── Template ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommand,
}

#[derive(Debug, Subcommand)]
pub enum TemplateCommand {
    /// List templates
    #[command(alias = "ls")]
    List {
        /// Only templates whose name matches
        #[arg(long)]
        filter: Option<String>,

        /// Show `name: description` instead of the bare name
        #[arg(long)]
        detail: bool,
    },

    /// Show one template and its parameters
    Get {
        /// Template name
        name: String,

        /// Do not ask the controller to populate parameter metadata
        #[arg(long)]
        no_populate: bool,

        /// Print the controller's raw JSON
        #[arg(long)]
        raw: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
