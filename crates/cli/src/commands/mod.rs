use clap::Subcommand;
use thingsctl_config::Config;

pub mod call;
pub mod check;
pub mod mcp;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the Things tools over MCP on stdin/stdout
    Mcp,

    /// Check whether Things is running and reachable
    Check,

    /// Invoke a single tool and print its result
    Call {
        /// Tool name, e.g. things_add_todo
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, value_name = "JSON")]
        args: Option<String>,
    },

    /// List the available tools
    Tools,
}

impl Commands {
    pub async fn execute(self, config: Config) -> eyre::Result<()> {
        match self {
            Commands::Mcp => mcp::execute(&config).await,
            Commands::Check => check::execute(&config).await,
            Commands::Call { tool, args } => call::execute(&config, &tool, args.as_deref()).await,
            Commands::Tools => call::list_tools(),
        }
    }
}
