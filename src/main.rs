#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use morris_client::{
    init_logging, render, run, HttpGateway, Player, Session, TerminalOptions, DEFAULT_AI_DEPTH,
    DEFAULT_ENGINE_URL,
};

#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(author, version, about = "Play three men's morris against a local engine", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Base URL of the rule/AI engine.
    #[arg(long, env = "MORRIS_ENGINE_URL", default_value = DEFAULT_ENGINE_URL)]
    engine_url: String,
    /// Search depth for AI moves (1-6).
    #[arg(long, default_value_t = DEFAULT_AI_DEPTH)]
    depth: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum Side {
    White,
    Black,
}

#[cfg(feature = "std")]
impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Player::White,
            Side::Black => Player::Black,
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Start a new game and play it from the terminal.
    Play {
        #[arg(long, value_enum, help = "Let the engine play this side automatically")]
        ai: Option<Side>,
    },
    /// Print the engine's current board and exit.
    Status,
}

#[cfg(feature = "std")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let gateway = HttpGateway::new(&cli.engine_url)?;
    let session = Session::new(gateway);

    match cli.command.unwrap_or(Commands::Play { ai: None }) {
        Commands::Status => {
            session
                .refresh()
                .await
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            print!("{}", render(&session));
        }
        Commands::Play { ai } => {
            println!("Welcome to Three Men's Morris! Type help for commands.");
            if let Err(e) = session.start_session().await {
                eprintln!(
                    "Could not reach the engine at {}: {}",
                    session.engine().base_url(),
                    e
                );
            }
            let opts = TerminalOptions {
                depth: cli.depth,
                ai_side: ai.map(Player::from),
            };
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            run(&session, stdin, &mut stdout, opts).await?;
            println!("Goodbye!");
        }
    }
    Ok(())
}
