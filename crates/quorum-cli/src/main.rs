use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quorum")]
#[command(about = "Quorum - Deliberation Orchestration System", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new deliberation session
    Start {
        /// Debate topic
        topic: String,
        /// Roster entry as NAME=TRANSPORT (direct|clipboard|manual); order
        /// defines the turn rotation
        #[arg(long = "speaker", value_name = "NAME=TRANSPORT", required = true)]
        speakers: Vec<String>,
        /// Bound the debate to this many rounds
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// List sessions, newest first (active only unless --all)
    List {
        #[arg(long)]
        all: bool,
    },
    /// Show the full state of one session
    Status { session_id: String },
    /// Show how the speaker currently due must be engaged
    Route { session_id: String },
    /// Stage the pending turn's prompt for clipboard/manual delivery
    Prepare {
        session_id: String,
        turn_id: String,
    },
    /// Submit the response for the pending turn
    Submit {
        session_id: String,
        turn_id: String,
        /// Transport the response came back through
        #[arg(long, default_value = "direct")]
        transport: String,
        /// Turn content as JSON; read from stdin when omitted
        #[arg(long)]
        content: Option<String>,
    },
    /// Print the ordered turn log
    History { session_id: String },
    /// Compute the consensus report (snapshot unless --finish)
    Synthesize {
        session_id: String,
        /// Close the session and archive the report
        #[arg(long)]
        finish: bool,
    },
    /// List reachable speaker candidates
    Speakers,
    /// List archived deliberation reports
    Archive,
    /// Discard one session, or every session with --all
    Reset {
        session_id: Option<String>,
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context::default_location().await?;

    match cli.command {
        Commands::Start {
            topic,
            speakers,
            rounds,
        } => commands::session::start(&ctx, &topic, &speakers, rounds).await,
        Commands::List { all } => commands::session::list(&ctx, all).await,
        Commands::Status { session_id } => commands::session::status(&ctx, &session_id).await,
        Commands::Route { session_id } => commands::turn::route(&ctx, &session_id).await,
        Commands::Prepare {
            session_id,
            turn_id,
        } => commands::turn::prepare(&ctx, &session_id, &turn_id).await,
        Commands::Submit {
            session_id,
            turn_id,
            transport,
            content,
        } => commands::turn::submit(&ctx, &session_id, &turn_id, &transport, content).await,
        Commands::History { session_id } => commands::session::history(&ctx, &session_id).await,
        Commands::Synthesize { session_id, finish } => {
            commands::synthesis::synthesize(&ctx, &session_id, finish).await
        }
        Commands::Speakers => commands::admin::speakers(&ctx).await,
        Commands::Archive => commands::synthesis::archive(&ctx).await,
        Commands::Reset { session_id, all } => {
            commands::admin::reset(&ctx, session_id.as_deref(), all).await
        }
    }
}
