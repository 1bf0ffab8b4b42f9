// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use crate::core::config::ConnectionOverrides;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 出力フォーマット
#[derive(Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

/// TrackDB - SQL Migration Script Parser
///
/// Turns migration script files into uniquely-identified executable SQL units.
#[derive(Parser, Debug)]
#[command(name = "trackdb")]
#[command(author = "TrackDB Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SQL migration script parser and versioning validator")]
#[command(long_about = "TrackDB - SQL Migration Script Parser

Turns a migration script file into one or more executable SQL units.

A file without track headers is a single unit named by convention:
  V01__create_table.sql   (versioned, id 01)
  R02__refresh_view.sql   (repeatable, id 02)

A file with track headers carries one unit per header:
  --track:01 failOnError:true (v)
  CREATE TABLE users (id INT);
  --track:02 multiThread:true (r)
  CREATE VIEW active_users AS SELECT * FROM users;")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Output format (text or json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and validate a migration file
    ///
    /// Prints every executable unit found in the file, or the reason
    /// the file was rejected.
    ///
    /// EXAMPLES:
    ///   # Check a versioned migration
    ///   trackdb check --filename V01__create_table.sql
    ///
    ///   # Check a Latin-1 encoded file
    ///   trackdb check --filename tracks.sql --fencoding ISO8859-1
    Check {
        /// Migration file
        #[arg(short, long, value_name = "FILE")]
        filename: Option<String>,

        /// File encoding: UTF-8, ISO8859-1
        #[arg(long, value_name = "ENCODING")]
        fencoding: Option<String>,
    },

    /// Validate connection parameters and plan the execution of a migration file
    ///
    /// Every unit is handed, in order, to the executor for the target database.
    /// The plan executor records the units without connecting to the database.
    ///
    /// EXAMPLES:
    ///   trackdb plan --host localhost --port 3306 --dbname app --dbtype mysql \
    ///     -u root -p secret --filename V01__create_table.sql
    Plan(ConnectionArgs),
}

/// 接続パラメータ
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Hostname of database server or ip address
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port of database connection
    #[arg(long, value_name = "PORT")]
    pub port: Option<String>,

    /// Database name
    #[arg(long, value_name = "NAME")]
    pub dbname: Option<String>,

    /// Database type: mysql, postgres, db2, sqlserver, oracle
    #[arg(long, value_name = "TYPE")]
    pub dbtype: Option<String>,

    /// Username of database connection
    #[arg(short = 'u', long = "user", value_name = "USER")]
    pub user: Option<String>,

    /// Password of database connection
    #[arg(short = 'p', long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Migration file
    #[arg(short, long, value_name = "FILE")]
    pub filename: Option<String>,

    /// File encoding: UTF-8, ISO8859-1
    #[arg(long, value_name = "ENCODING")]
    pub fencoding: Option<String>,

    /// Use windows user to connect to SQL Server
    #[arg(long)]
    pub domain: bool,
}

impl From<ConnectionArgs> for ConnectionOverrides {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            dbname: args.dbname,
            dbtype: args.dbtype,
            user: args.user,
            password: args.password,
            filename: args.filename,
            fencoding: args.fencoding,
            domain: args.domain,
        }
    }
}
