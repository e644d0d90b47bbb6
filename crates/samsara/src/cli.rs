//! Clap derive structures for the `samsara` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// samsara -- fleet back office from the command line
#[derive(Debug, Parser)]
#[command(
    name = "samsara",
    version,
    about = "Manage the Samsara fleet record store from the command line",
    long_about = "Back-office tool for construction-site fleets: sites, operators,\n\
        equipment, maintenance, daily work logs and traffic fines.\n\n\
        Every write keeps the denormalized display fields and the equipment\n\
        revision schedule in step with the records they derive from.",
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
    /// Store profile to use
    #[arg(long, short = 'p', env = "SAMSARA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Record store API URL (overrides profile)
    #[arg(long, short = 'u', env = "SAMSARA_URL", global = true)]
    pub url: Option<String>,

    /// Username or e-mail to log in with
    #[arg(long, short = 'i', env = "SAMSARA_IDENTITY", global = true)]
    pub identity: Option<String>,

    /// Password for --identity
    #[arg(long, env = "SAMSARA_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Pre-issued bearer token
    #[arg(long, env = "SAMSARA_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SAMSARA_OUTPUT",
        default_value = "table",
        global = true
    )]
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SAMSARA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "SAMSARA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Comma-separated values with a header row (spreadsheet export)
    Csv,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Manage construction sites
    #[command(alias = "ob")]
    Obras(ObrasArgs),

    /// Manage back-office users
    #[command(alias = "users")]
    Usuarios(UsuariosArgs),

    /// Manage equipment operators
    #[command(alias = "op")]
    Operadores(OperadoresArgs),

    /// Manage equipment and its revision schedule
    #[command(alias = "eq")]
    Equipamentos(EquipamentosArgs),

    /// Manage equipment types
    Tipos(TiposArgs),

    /// Manage equipment groups
    Grupos(GruposArgs),

    /// Record maintenance events
    #[command(alias = "mnt")]
    Manutencoes(ManutencoesArgs),

    /// Manage daily work logs
    #[command(alias = "bol")]
    Boletins(BoletinsArgs),

    /// Manage traffic fines
    Multas(MultasArgs),

    /// Manage the operation code table
    Operacoes(CatalogoArgs),

    /// Manage the work order code table
    #[command(name = "ordens", alias = "ordens-servico")]
    OrdensServico(CatalogoArgs),

    /// Log in and store the password in the system keyring
    Login {
        /// Username or e-mail (defaults to --identity or the profile's)
        user: Option<String>,

        /// Do not store the password in the keyring
        #[arg(long)]
        no_save: bool,
    },

    /// Show the user behind the current credentials
    Whoami,

    /// Send a password reset link
    ResetPassword {
        /// E-mail address of the account
        email: String,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Shared pagination, sorting and filtering arguments for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page to fetch (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Records per page (1-500)
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: u32,

    /// Fetch all pages automatically
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Filter expression (store syntax)
    /// Examples: "inativo=false", "obraX~'Norte' && inativo=false"
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Sort fields, comma-separated, '-' for descending (e.g. "-data,+codigo")
    #[arg(long, short = 'S')]
    pub sort: Option<String>,
}

/// Write body, read from a JSON file or given inline.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct BodyArgs {
    /// Read the JSON body from a file ('-' for stdin)
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,

    /// Inline JSON body
    #[arg(long, short = 'd')]
    pub data: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Record ID
    pub id: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Debug, Args)]
pub struct DeactivateArgs {
    /// Record ID
    pub id: String,

    /// Reason for deactivating (required for operators, types and fines)
    #[arg(long, short = 'r')]
    pub reason: Option<String>,
}

/// Soft-delete commands, shared by every collection with an `inativo` flag.
#[derive(Debug, Subcommand)]
pub enum StateCommand {
    /// Mark a record inactive
    Deactivate(DeactivateArgs),

    /// Mark a record active again
    Reactivate {
        /// Record ID
        id: String,
    },

    /// Flip a record between active and inactive
    Toggle(DeactivateArgs),
}

/// File attachment commands.
#[derive(Debug, Args)]
pub struct FilesArgs {
    #[command(subcommand)]
    pub command: FilesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List files attached to a record
    #[command(alias = "ls")]
    List {
        /// Record ID
        id: String,
    },

    /// Attach a file to a record
    Upload {
        /// Record ID
        id: String,

        /// File to upload
        path: PathBuf,
    },

    /// Remove an attachment
    Delete {
        /// Attachment ID (from `files list`)
        file_id: String,
    },

    /// Print download URLs for a record's attachments
    Url {
        /// Record ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OBRAS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ObrasArgs {
    #[command(subcommand)]
    pub command: ObrasCommand,
}

#[derive(Debug, Subcommand)]
pub enum ObrasCommand {
    /// List sites
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get site details
    Get {
        /// Site ID
        id: String,
    },

    /// Create a site
    Create(BodyArgs),

    /// Update a site
    Update(UpdateArgs),

    #[command(flatten)]
    State(StateCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USUARIOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsuariosArgs {
    #[command(subcommand)]
    pub command: UsuariosCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsuariosCommand {
    /// List users
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get user details
    Get {
        /// User ID
        id: String,
    },

    /// Create a user
    Create(BodyArgs),

    /// Update a user
    Update(UpdateArgs),

    /// Refresh the user's site name from the site record
    Reconcile {
        /// User ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OPERADORES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OperadoresArgs {
    #[command(subcommand)]
    pub command: OperadoresCommand,
}

#[derive(Debug, Subcommand)]
pub enum OperadoresCommand {
    /// List operators
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get operator details
    Get {
        /// Operator ID
        id: String,
    },

    /// Create an operator
    Create(BodyArgs),

    /// Update an operator
    Update(UpdateArgs),

    /// Refresh the operator's site and foreman names
    Reconcile {
        /// Operator ID
        id: String,
    },

    #[command(flatten)]
    State(StateCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EQUIPAMENTOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EquipamentosArgs {
    #[command(subcommand)]
    pub command: EquipamentosCommand,
}

#[derive(Debug, Subcommand)]
pub enum EquipamentosCommand {
    /// List equipment with its revision status
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get equipment details
    Get {
        /// Equipment ID
        id: String,
    },

    /// Create equipment (the code must be unique among active equipment)
    Create(BodyArgs),

    /// Update equipment and recompute its next revision
    Update(UpdateArgs),

    /// Recompute display names and revision fields from the stored record
    Reconcile {
        /// Equipment ID
        id: String,
    },

    #[command(flatten)]
    State(StateCommand),

    /// Manage attached documents
    Files(FilesArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TIPOS & GRUPOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TiposArgs {
    #[command(subcommand)]
    pub command: TiposCommand,
}

#[derive(Debug, Subcommand)]
pub enum TiposCommand {
    /// List equipment types
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get equipment type details
    Get {
        /// Type ID
        id: String,
    },

    /// Create an equipment type
    Create(BodyArgs),

    /// Update an equipment type
    Update(UpdateArgs),

    /// Refresh the type's group name
    Reconcile {
        /// Type ID
        id: String,
    },

    #[command(flatten)]
    State(StateCommand),
}

#[derive(Debug, Args)]
pub struct GruposArgs {
    #[command(subcommand)]
    pub command: GruposCommand,
}

#[derive(Debug, Subcommand)]
pub enum GruposCommand {
    /// List equipment groups
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get equipment group details
    Get {
        /// Group ID
        id: String,
    },

    /// Create an equipment group
    Create(BodyArgs),

    /// Update an equipment group
    Update(UpdateArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MANUTENCOES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ManutencoesArgs {
    #[command(subcommand)]
    pub command: ManutencoesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ManutencoesCommand {
    /// List maintenance events
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get maintenance event details
    Get {
        /// Maintenance ID
        id: String,
    },

    /// Record a maintenance event and apply its reading to the equipment
    Create(BodyArgs),

    /// Update a maintenance event (date, description, responsible)
    Update(UpdateArgs),

    /// Refresh the event's equipment and operator names
    Reconcile {
        /// Maintenance ID
        id: String,
    },

    /// Re-apply the event's reading to its equipment and work log
    Reapply {
        /// Maintenance ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOLETINS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BoletinsArgs {
    #[command(subcommand)]
    pub command: BoletinsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BoletinsCommand {
    /// List daily work logs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get work log details
    Get {
        /// Work log ID
        id: String,
    },

    /// Create a work log
    Create(BodyArgs),

    /// Update a work log
    Update(UpdateArgs),

    /// Refresh the work log's equipment, operator, site and foreman names
    Reconcile {
        /// Work log ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MULTAS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MultasArgs {
    #[command(subcommand)]
    pub command: MultasCommand,
}

#[derive(Debug, Subcommand)]
pub enum MultasCommand {
    /// List traffic fines
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get fine details
    Get {
        /// Fine ID
        id: String,
    },

    /// Record a fine
    Create(BodyArgs),

    /// Update a fine
    Update(UpdateArgs),

    /// Refresh the fine's driver and equipment names
    Reconcile {
        /// Fine ID
        id: String,
    },

    #[command(flatten)]
    State(StateCommand),

    /// Manage attached documents
    Files(FilesArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATALOGO (operacoes, ordens)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CatalogoArgs {
    #[command(subcommand)]
    pub command: CatalogoCommand,
}

#[derive(Debug, Subcommand)]
pub enum CatalogoCommand {
    /// List codes
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get code details
    Get {
        /// Record ID
        id: String,
    },

    /// Add a code (must be unique)
    Create {
        /// Code (1-20 characters)
        #[arg(long, short = 'c')]
        codigo: String,

        /// Description
        #[arg(long, short = 'D')]
        descricao: String,
    },

    /// Change a code's description
    Update {
        /// Record ID
        id: String,

        /// New description
        #[arg(long, short = 'D')]
        descricao: String,
    },

    /// Delete a code (refused while records still use it)
    #[command(alias = "rm")]
    Delete {
        /// Record ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (url, auth_mode, identity, password_env, ca_cert,
        /// insecure, timeout, session_hours)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password or token in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
