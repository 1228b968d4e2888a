//! voice-arm: speak a command, move the arm
//!
//! `voice-arm run` parks the arm, then records one command per Enter until
//! the operator types `q`. `voice-arm interpret` runs the same pipeline up
//! to the parsed command without touching the arm.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use arm_gateway::ArmGateway;
use command_oracle::{create_oracle, CommandOracle, OracleConfig, OracleKind};
use voice_local::plugin::{
    new_capture_backend, new_transcriber_backend, CaptureBackendKind, TranscriberBackendKind,
};
use voice_local::{CaptureSource, Transcriber};
use voice_session::{
    interpret_recording, interpret_text, Interpretation, LineConsole, Session, VoiceArmConfig,
};

#[derive(Parser, Debug)]
#[command(name = "voice-arm", version, about = "Voice-controlled 6-axis arm")]
struct Cli {
    /// YAML configuration file; built-in defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run offline: synthetic audio, canned transcripts, keyword oracle, simulated arm
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    mock: bool,

    /// Arm socket address (host:port)
    #[arg(long, global = true)]
    robot: Option<String>,

    /// Chat-completions endpoint for the command oracle
    #[arg(long, global = true)]
    oracle_url: Option<String>,

    /// Transcription endpoint
    #[arg(long, global = true)]
    transcriber_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take voice commands until 'q', then park the arm (default)
    Run,
    /// Interpret one command without moving the arm
    Interpret {
        /// Use this text instead of recording and transcribing
        #[arg(long)]
        text: Option<String>,
        /// Print the result as JSON
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
}

/// Everything upstream of the arm.
struct Pipeline {
    capture: Box<dyn CaptureSource>,
    transcriber: Box<dyn Transcriber>,
    oracle: Box<dyn CommandOracle>,
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&cfg, cli.mock),
        Commands::Interpret { text, json } => interpret(&cfg, cli.mock, text.as_deref(), json),
    }
}

fn load_config(cli: &Cli) -> Result<VoiceArmConfig> {
    let mut cfg = match &cli.config {
        Some(path) => VoiceArmConfig::load(path)?,
        None => VoiceArmConfig::default(),
    };
    if let Some(addr) = &cli.robot {
        cfg.robot.address = addr.clone();
    }
    if let Some(url) = &cli.oracle_url {
        cfg.oracle.endpoint = url.clone();
    }
    if let Some(url) = &cli.transcriber_url {
        cfg.transcriber.endpoint = url.clone();
    }
    Ok(cfg)
}

fn build_pipeline(cfg: &VoiceArmConfig, mock: bool) -> Result<Pipeline> {
    let (capture_kind, transcriber_kind) = if mock {
        (CaptureBackendKind::Mock, TranscriberBackendKind::Mock)
    } else {
        (
            CaptureBackendKind::Microphone,
            TranscriberBackendKind::WhisperHttp,
        )
    };
    let oracle_cfg = if mock {
        OracleConfig {
            kind: OracleKind::Keyword,
            ..cfg.oracle.clone()
        }
    } else {
        cfg.oracle.clone()
    };

    let capture = new_capture_backend(capture_kind).context("opening audio input")?;
    let transcriber = new_transcriber_backend(transcriber_kind, &cfg.transcriber)
        .context("creating transcriber")?;
    let oracle = create_oracle(&oracle_cfg).context("creating command oracle")?;
    info!(
        transcriber = transcriber.name(),
        oracle = oracle.name(),
        "pipeline ready"
    );
    Ok(Pipeline {
        capture,
        transcriber,
        oracle,
    })
}

fn connect_arm(cfg: &VoiceArmConfig, mock: bool) -> Result<Box<dyn ArmGateway>> {
    if mock {
        info!("using simulated arm");
        return Ok(Box::new(arm_gateway::MockArm::new(cfg.session.start_pose)));
    }
    #[cfg(feature = "mycobot")]
    {
        let timeout = std::time::Duration::from_millis(cfg.robot.io_timeout_ms);
        let arm = arm_gateway::MyCobotSocket::connect(&cfg.robot.address, timeout)
            .with_context(|| format!("connecting to arm at {}", cfg.robot.address))?;
        info!(addr = %arm.addr(), "arm connected");
        Ok(Box::new(arm))
    }
    #[cfg(not(feature = "mycobot"))]
    {
        bail!("built without the `mycobot` feature; rebuild with `--features mycobot` or pass --mock")
    }
}

fn run(cfg: &VoiceArmConfig, mock: bool) -> Result<()> {
    let mut pipeline = build_pipeline(cfg, mock)?;
    let mut arm = connect_arm(cfg, mock)?;
    let mut console = LineConsole::stdio();

    let mut session = Session::new(
        &cfg.session,
        pipeline.capture.as_mut(),
        pipeline.transcriber.as_mut(),
        pipeline.oracle.as_mut(),
        arm.as_mut(),
    );
    session.startup().context("arm startup")?;
    let summary = session.run(&mut console)?;
    println!(
        "Session over: {} commands, {} executed, {} failed.",
        summary.cycles, summary.actuated, summary.failed
    );
    Ok(())
}

fn interpret(cfg: &VoiceArmConfig, mock: bool, text: Option<&str>, json: bool) -> Result<()> {
    let mut pipeline = build_pipeline(cfg, mock)?;
    let result = match text {
        Some(text) => interpret_text(&cfg.session, pipeline.oracle.as_mut(), text),
        None => {
            println!("Listening...");
            interpret_recording(
                &cfg.session,
                pipeline.capture.as_mut(),
                pipeline.transcriber.as_mut(),
                pipeline.oracle.as_mut(),
            )
        }
    };
    let interpretation = match result {
        Ok(i) => i,
        Err(failure) => {
            error!(error = %failure, "interpretation failed");
            bail!("{failure}");
        }
    };
    print_interpretation(&interpretation, json)
}

fn print_interpretation(i: &Interpretation, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "transcript": i.transcript,
            "reply": i.reply,
            "command": i.command,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("transcript: {}", i.transcript);
        println!("reply:      {}", i.reply);
        println!("command:    {}", i.command);
    }
    Ok(())
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
