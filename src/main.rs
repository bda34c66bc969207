//! gemini-chat binary entry point

use color_eyre::{eyre::WrapErr, Result};
use gemini_chat::{
    cli::{Cli, Commands},
    config::Settings,
    messages, repl, ConversationAdapter,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();

    let default_filter = if cli.verbose {
        "gemini_chat=debug"
    } else {
        "gemini_chat=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Settings files are only read by commands that need them
    let overrides = cli.overrides;
    let load_settings =
        move || -> Result<Settings> { Ok(Settings::load()?.merge(overrides.into_settings())) };

    match cli.command {
        Some(Commands::Version) => {
            println!("gemini-chat version {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Config) => {
            let settings = load_settings()?;
            let masked = Settings {
                api_key: settings.masked_api_key(),
                ..settings
            };
            println!("{}", serde_json::to_string_pretty(&masked)?);
        }
        Some(Commands::Ask { prompt, history }) => {
            let history = match history {
                Some(path) => {
                    let json = std::fs::read_to_string(&path)
                        .wrap_err_with(|| format!("reading history file {}", path.display()))?;
                    messages::parse_history(&json)
                        .wrap_err_with(|| format!("parsing history file {}", path.display()))?
                }
                None => Vec::new(),
            };

            let adapter = ConversationAdapter::new(load_settings()?.into_adapter_config()?)?;
            let reply = adapter.chat(&prompt, &history).await?;
            println!("{reply}");
        }
        Some(Commands::Repl) | None => {
            let adapter = ConversationAdapter::new(load_settings()?.into_adapter_config()?)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            repl::run(&adapter, stdin, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}
