use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "odoo")]
#[command(about = "Odoo session CLI - connect, verify modules, query models")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Server base URL
    #[arg(long, global = true, default_value = "http://localhost:8069")]
    pub url: String,

    /// Database name
    #[arg(short, long, global = true, default_value = "odoo_db")]
    pub database: String,

    /// Login user
    #[arg(short, long, global = true, default_value = "admin")]
    pub username: String,

    /// Password (or set ODOO_PASSWORD)
    #[arg(short, long, global = true, env = "ODOO_PASSWORD", default_value = "")]
    pub password: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Authenticate and print the session summary
    Status,
    /// Connect and verify all required modules
    Load,
    /// Check the installation state of one module
    Check {
        /// Technical module name (e.g. `sale`)
        module: String,
    },
}
