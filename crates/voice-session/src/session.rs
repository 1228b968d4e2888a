use crate::apply::{apply_delta, apply_gripper};
use crate::console::{Console, OperatorInput};
use crate::{CycleFailure, Result, SessionConfig, SessionError};
use arm_gateway::{ArmGateway, InterpolationMode, Pose};
use command_grammar::RobotCommand;
use command_oracle::CommandOracle;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use tracing::{debug, info, info_span, warn};
use voice_local::{CaptureSource, Transcriber};

/// Where the session is in its command cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    Capturing,
    Transcribing,
    Interpreting,
    Applying,
    Actuated,
    Failed,
    Quitting,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Capturing => "capturing",
            SessionState::Transcribing => "transcribing",
            SessionState::Interpreting => "interpreting",
            SessionState::Applying => "applying",
            SessionState::Actuated => "actuated",
            SessionState::Failed => "failed",
            SessionState::Quitting => "quitting",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// The command was accepted by the arm. `target` is set for moves.
    Actuated {
        command: RobotCommand,
        target: Option<Pose>,
    },
    Failed(CycleFailure),
}

impl CycleOutcome {
    pub fn is_actuated(&self) -> bool {
        matches!(self, CycleOutcome::Actuated { .. })
    }
}

/// Record of one capture-to-actuation cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub cycle: u64,
    pub started_at: OffsetDateTime,
    pub elapsed: Duration,
    /// Set once audio was captured.
    pub captured_at: Option<OffsetDateTime>,
    pub transcript: Option<String>,
    pub reply: Option<String>,
    pub outcome: CycleOutcome,
}

impl CycleReport {
    /// One line for the operator.
    pub fn summary(&self) -> String {
        match &self.outcome {
            CycleOutcome::Actuated {
                target: Some(target),
                command,
            } => format!("Done: {command}, now at {target}"),
            CycleOutcome::Actuated { command, .. } => format!("Done: {command}"),
            CycleOutcome::Failed(failure) => format!("{failure}. Please try again."),
        }
    }
}

/// Totals for a finished session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SessionSummary {
    pub cycles: u64,
    pub actuated: u64,
    pub failed: u64,
}

/// Result of interpreting one utterance without touching the arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub transcript: String,
    pub reply: String,
    pub command: RobotCommand,
}

#[derive(Default)]
struct CycleTrace {
    captured_at: Option<OffsetDateTime>,
    transcript: Option<String>,
    reply: Option<String>,
}

/// The voice command session.
///
/// Owns no hardware: every collaborator is borrowed for the session's
/// lifetime, and exactly one cycle runs at a time.
pub struct Session<'a> {
    config: &'a SessionConfig,
    capture: &'a mut dyn CaptureSource,
    transcriber: &'a mut dyn Transcriber,
    oracle: &'a mut dyn CommandOracle,
    arm: &'a mut dyn ArmGateway,
    state: SessionState,
    summary: SessionSummary,
}

impl<'a> Session<'a> {
    pub fn new(
        config: &'a SessionConfig,
        capture: &'a mut dyn CaptureSource,
        transcriber: &'a mut dyn Transcriber,
        oracle: &'a mut dyn CommandOracle,
        arm: &'a mut dyn ArmGateway,
    ) -> Self {
        Self {
            config,
            capture,
            transcriber,
            oracle,
            arm,
            state: SessionState::Idle,
            summary: SessionSummary::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    fn enter(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "state change");
        self.state = next;
    }

    /// Bring the arm to a known configuration: servos on, gripper in
    /// pass-through mode, all joints at zero, then the start pose.
    pub fn startup(&mut self) -> Result<()> {
        let cfg = self.config;
        info!("enabling servos");
        self.arm.enable_servos().map_err(SessionError::Startup)?;
        self.arm
            .set_gripper_pass_through()
            .map_err(SessionError::Startup)?;

        info!("moving to zero joint angles");
        self.arm
            .move_to_joints(&cfg.zero_angles, cfg.move_speed)
            .map_err(SessionError::Startup)?;
        settle(cfg.settle());

        info!(pose = %cfg.start_pose, "moving to start pose");
        self.arm
            .move_to_pose(&cfg.start_pose, cfg.move_speed, InterpolationMode::Linear)
            .map_err(SessionError::Startup)?;
        settle(cfg.settle());
        self.enter(SessionState::Idle);
        Ok(())
    }

    /// Prompt until the operator quits, running one cycle per Enter.
    ///
    /// Always finishes with [`Session::shutdown`], including when reading the
    /// console fails.
    pub fn run(&mut self, console: &mut dyn Console) -> Result<SessionSummary> {
        let result = loop {
            match console.prompt() {
                Ok(OperatorInput::Record) => {
                    console.report("Listening...");
                    let report = self.run_cycle();
                    console.report(&report.summary());
                    if report.outcome.is_actuated() {
                        settle(self.config.command_settle());
                    }
                }
                Ok(OperatorInput::Quit) => break Ok(()),
                Ok(OperatorInput::Other(text)) => {
                    debug!(input = %text, "ignoring operator input");
                    console.report("Press Enter to record, or type 'q' to quit.");
                }
                Err(e) => {
                    warn!(error = %e, "console read failed, shutting down");
                    break Err(SessionError::Console(e));
                }
            }
        };

        self.enter(SessionState::Quitting);
        console.report("Returning the arm to zero and exiting.");
        self.shutdown();
        result.map(|()| self.summary)
    }

    /// Run one capture-to-actuation cycle and return to idle.
    ///
    /// A failure at any stage ends the cycle without touching the arm any
    /// further; it is reported, never propagated.
    pub fn run_cycle(&mut self) -> CycleReport {
        self.summary.cycles += 1;
        let cycle = self.summary.cycles;
        let span = info_span!("cycle", n = cycle);
        let _enter = span.enter();

        let started_at = OffsetDateTime::now_utc();
        let start = Instant::now();
        let mut trace = CycleTrace::default();

        let outcome = match self.drive(&mut trace) {
            Ok((command, target)) => {
                self.enter(SessionState::Actuated);
                self.summary.actuated += 1;
                info!(%command, "command actuated");
                CycleOutcome::Actuated { command, target }
            }
            Err(failure) => {
                self.enter(SessionState::Failed);
                self.summary.failed += 1;
                warn!(error = %failure, "cycle failed");
                CycleOutcome::Failed(failure)
            }
        };
        self.enter(SessionState::Idle);

        CycleReport {
            cycle,
            started_at,
            elapsed: start.elapsed(),
            captured_at: trace.captured_at,
            transcript: trace.transcript,
            reply: trace.reply,
            outcome,
        }
    }

    fn drive(
        &mut self,
        trace: &mut CycleTrace,
    ) -> core::result::Result<(RobotCommand, Option<Pose>), CycleFailure> {
        let cfg = self.config;

        self.enter(SessionState::Capturing);
        let audio = self
            .capture
            .capture(cfg.record_duration(), cfg.sample_rate_hz)
            .map_err(CycleFailure::Capture)?;
        trace.captured_at = Some(audio.captured_at);
        debug!(
            samples = audio.samples.len(),
            peak = audio.peak(),
            captured_at = %audio.captured_at,
            "audio captured"
        );

        self.enter(SessionState::Transcribing);
        let raw = self
            .transcriber
            .transcribe(&audio)
            .map_err(CycleFailure::Transcription)?;
        let transcript = raw.trim().to_string();
        info!(transcriber = self.transcriber.name(), %transcript, "transcribed");
        trace.transcript = Some(transcript.clone());
        check_transcript(&transcript, cfg.min_transcript_chars)?;

        self.enter(SessionState::Interpreting);
        let reply = command_oracle::interpret(&mut *self.oracle, &transcript, cfg.oracle_timeout())
            .map_err(CycleFailure::Oracle)?;
        trace.reply = Some(reply.clone());

        self.enter(SessionState::Applying);
        let command = command_grammar::parse_command(&reply).map_err(CycleFailure::Parse)?;
        info!(%command, "reply parsed");
        let target = match command {
            RobotCommand::Move(delta) => Some(
                apply_delta(&mut *self.arm, &delta, cfg).map_err(CycleFailure::Actuation)?,
            ),
            RobotCommand::Gripper(gripper) => {
                apply_gripper(&mut *self.arm, gripper, cfg).map_err(CycleFailure::Actuation)?;
                None
            }
        };
        Ok((command, target))
    }

    /// Return the arm to zero joint angles.
    ///
    /// Errors are logged and swallowed; the session exits either way.
    pub fn shutdown(&mut self) {
        let cfg = self.config;
        info!("moving to zero joint angles before exit");
        match self.arm.move_to_joints(&cfg.zero_angles, cfg.move_speed) {
            Ok(()) => settle(cfg.settle()),
            Err(e) => warn!(error = %e, "shutdown move failed"),
        }
        info!(
            cycles = self.summary.cycles,
            actuated = self.summary.actuated,
            failed = self.summary.failed,
            "session finished"
        );
    }
}

/// Interpret typed text without capturing audio or moving the arm.
pub fn interpret_text(
    config: &SessionConfig,
    oracle: &mut dyn CommandOracle,
    text: &str,
) -> core::result::Result<Interpretation, CycleFailure> {
    let transcript = text.trim().to_string();
    check_transcript(&transcript, config.min_transcript_chars)?;
    let reply = command_oracle::interpret(oracle, &transcript, config.oracle_timeout())
        .map_err(CycleFailure::Oracle)?;
    let command = command_grammar::parse_command(&reply).map_err(CycleFailure::Parse)?;
    Ok(Interpretation {
        transcript,
        reply,
        command,
    })
}

/// Record and transcribe one utterance, then interpret it, without moving
/// the arm.
pub fn interpret_recording(
    config: &SessionConfig,
    capture: &mut dyn CaptureSource,
    transcriber: &mut dyn Transcriber,
    oracle: &mut dyn CommandOracle,
) -> core::result::Result<Interpretation, CycleFailure> {
    let audio = capture
        .capture(config.record_duration(), config.sample_rate_hz)
        .map_err(CycleFailure::Capture)?;
    let text = transcriber
        .transcribe(&audio)
        .map_err(CycleFailure::Transcription)?;
    interpret_text(config, oracle, &text)
}

fn check_transcript(text: &str, min: usize) -> core::result::Result<(), CycleFailure> {
    let len = text.chars().count();
    if len < min {
        return Err(CycleFailure::TranscriptTooShort {
            text: text.to_string(),
            len,
            min,
        });
    }
    Ok(())
}

fn settle(pause: Duration) {
    if !pause.is_zero() {
        thread::sleep(pause);
    }
}
