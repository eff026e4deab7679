use anyhow::Result;
use avatar_chat::host::{ConsoleSpeechOutput, ConsoleVideo, ScriptedSpeechInput};
use avatar_chat::provider::CannedResponseProvider;
use avatar_chat::{
    Capabilities, IntegrationConfig, MessageStorage, Orchestrator, OrchestratorEvent, Role,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "Type a message and press enter. Lines starting with ~ are heard as speech.
Commands: test audio, test hindi, test video, video, novideo, listen, stop listening
Console: /state, /history, /quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar_chat=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = IntegrationConfig::load_or_default(config_path.as_deref())?;

    info!("Starting avatar chat console");

    let (speech_input, speech_feed) = ScriptedSpeechInput::new(Some(Duration::from_secs(8)));
    let capabilities = Capabilities {
        input: Arc::new(speech_input),
        output: Arc::new(ConsoleSpeechOutput::default()),
        video: Arc::new(ConsoleVideo::default()),
    };
    let store = Arc::new(MessageStorage::new());

    let (orchestrator, handle) = Orchestrator::builder(config)
        .capabilities(capabilities)
        .provider(Arc::new(CannedResponseProvider::default()))
        .store(store.clone())
        .build()?;
    let orchestrator_task = orchestrator.start();

    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(50));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                match line {
                    "/quit" => break,
                    "/state" => println!("{:#?}", handle.snapshot()),
                    "/history" => println!("{}", store.to_json()?),
                    _ => {
                        if let Some(speech) = line.strip_prefix('~') {
                            if !handle.is_listening() {
                                println!("(not listening; type \"listen\" first)");
                            }
                            speech_feed.send(speech.trim().to_string())?;
                        } else {
                            handle.submit(line)?;
                        }
                    }
                }
            }
            _ = ticker.tick() => {
                while let Some(event) = handle.try_recv_event() {
                    if let OrchestratorEvent::TurnAppended(turn) = event {
                        let label = match turn.role {
                            Role::User => "you",
                            Role::Assistant => "assistant",
                            Role::System => "system",
                        };
                        println!("{:>9} │ {}", label, turn.text);
                    }
                }
            }
        }
    }

    handle.shutdown()?;
    orchestrator_task.await?;
    info!("Goodbye");

    Ok(())
}
