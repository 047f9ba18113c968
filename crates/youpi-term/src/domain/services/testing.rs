//! In-memory terminal and arm doubles for the domain tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Action;
use crate::domain::models::ArmError;
use crate::domain::models::ArmName;
use crate::domain::models::ArmService;
use crate::domain::models::ConsoleError;
use crate::domain::models::Joint;
use crate::domain::models::Key;
use crate::domain::models::Session;
use crate::domain::models::SessionState;
use crate::domain::models::TerminalError;
use crate::domain::models::TerminalService;

#[derive(Debug, Clone, PartialEq)]
pub enum TerminalCall {
    ClearAll,
    ClearScreen,
    ClearLine(u16),
    Text { text: String, x: u16, y: u16 },
    Status(String),
    Graphics(bool),
    Raw(Vec<u8>),
    Beep,
    WaitForKey(Option<Duration>),
    Shutdown,
}

/// What the operator does when the terminal is waiting for a key.
#[derive(Debug, Clone)]
pub enum Step {
    Press(Key),
    Timeout,
    /// External termination request arriving during the read.
    Interrupt,
    /// The line to the terminal drops.
    Disconnect,
}

#[derive(Clone, Default)]
pub struct Transcript(Arc<Mutex<Vec<TerminalCall>>>);

impl Transcript {
    fn push(&self, call: TerminalCall) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<TerminalCall> {
        return self.0.lock().unwrap().clone();
    }

    pub fn texts(&self) -> Vec<String> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                TerminalCall::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();
    }

    pub fn statuses(&self) -> Vec<String> {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                TerminalCall::Status(text) => Some(text),
                _ => None,
            })
            .collect();
    }

    pub fn shows(&self, needle: &str) -> bool {
        return self.texts().iter().any(|t| t.contains(needle));
    }

    pub fn count(&self, call: &TerminalCall) -> usize {
        return self.calls().iter().filter(|c| *c == call).count();
    }

    /// Renders text calls as `row:column text` lines.
    pub fn screen(&self) -> String {
        return self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                TerminalCall::Text { text, x, y } => Some(format!("{y:02}:{x:02} {text}")),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join("\n");
    }
}

pub struct ScriptedTerminal {
    steps: VecDeque<Step>,
    transcript: Transcript,
    interrupt: CancellationToken,
}

impl ScriptedTerminal {
    /// Once the script is exhausted the terminal behaves as if the process
    /// had been asked to stop. Reads and the session share one token, as
    /// the shutdown watcher raises both together.
    pub fn new(steps: Vec<Step>, state: &SessionState) -> (ScriptedTerminal, Transcript) {
        let transcript = Transcript::default();
        let terminal = ScriptedTerminal {
            steps: steps.into(),
            transcript: transcript.clone(),
            interrupt: state.termination_token(),
        };

        return (terminal, transcript);
    }
}

#[async_trait]
impl TerminalService for ScriptedTerminal {
    fn screen_width(&self) -> u16 {
        return 40;
    }

    async fn clear_all(&mut self) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::ClearAll);
        return Ok(());
    }

    async fn clear_screen(&mut self) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::ClearScreen);
        return Ok(());
    }

    async fn clear_line(&mut self, y: u16) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::ClearLine(y));
        return Ok(());
    }

    async fn display_text(&mut self, text: &str, x: u16, y: u16) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::Text {
            text: text.to_string(),
            x,
            y,
        });
        return Ok(());
    }

    async fn display_status(&mut self, text: &str) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::Status(text.to_string()));
        return Ok(());
    }

    async fn set_graphics_mode(&mut self, enabled: bool) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::Graphics(enabled));
        return Ok(());
    }

    async fn send(&mut self, bytes: &[u8]) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::Raw(bytes.to_vec()));
        return Ok(());
    }

    async fn beep(&mut self) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::Beep);
        return Ok(());
    }

    async fn wait_for_key(
        &mut self,
        allowed: Option<&[Key]>,
        max_wait: Option<Duration>,
    ) -> Result<Option<Key>, TerminalError> {
        self.transcript.push(TerminalCall::WaitForKey(max_wait));

        loop {
            if self.interrupt.is_cancelled() {
                return Err(TerminalError::Interrupted);
            }

            match self.steps.pop_front() {
                Some(Step::Press(key)) => {
                    if allowed.map_or(true, |keys| keys.contains(&key)) {
                        return Ok(Some(key));
                    }
                }
                Some(Step::Timeout) => return Ok(None),
                Some(Step::Disconnect) => return Err(TerminalError::Disconnected),
                Some(Step::Interrupt) | None => {
                    self.interrupt.cancel();
                    return Err(TerminalError::Interrupted);
                }
            }
        }
    }

    fn interrupter(&self) -> CancellationToken {
        return self.interrupt.clone();
    }

    async fn shutdown(&mut self) -> Result<(), TerminalError> {
        self.transcript.push(TerminalCall::Shutdown);
        return Ok(());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArmCall {
    Move {
        joint: Joint,
        angle: f32,
        blocking: bool,
    },
    OpenGripper(bool),
    CloseGripper(bool),
    GoHome(Vec<Joint>, bool),
}

#[derive(Clone, Default)]
pub struct ArmLog(Arc<Mutex<Vec<ArmCall>>>);

impl ArmLog {
    pub fn calls(&self) -> Vec<ArmCall> {
        return self.0.lock().unwrap().clone();
    }
}

/// Arm double recording every command. Calls matching `limit_on` fail with a
/// mechanical limit fault, and every call fails with a communication fault
/// when `offline` is set.
#[derive(Default)]
pub struct RecordingArm {
    log: ArmLog,
    limit_on: Vec<ArmCall>,
    offline: bool,
}

impl RecordingArm {
    pub fn new() -> (RecordingArm, ArmLog) {
        let arm = RecordingArm::default();
        let log = arm.log.clone();
        return (arm, log);
    }

    pub fn with_limit_on(mut self, call: ArmCall) -> RecordingArm {
        self.limit_on.push(call);
        return self;
    }

    pub fn offline(mut self) -> RecordingArm {
        self.offline = true;
        return self;
    }

    fn record(&self, call: ArmCall) -> Result<(), ArmError> {
        self.log.0.lock().unwrap().push(call.clone());
        if self.offline {
            return Err(ArmError::Communication("arm controller unreachable".to_string()));
        }
        if self.limit_on.contains(&call) {
            let joint = match call {
                ArmCall::Move { joint, .. } => joint,
                _ => Joint::Gripper,
            };
            return Err(ArmError::MechanicalLimit {
                joint,
                target: 0.0,
                min: 0.0,
                max: 0.0,
            });
        }
        return Ok(());
    }
}

#[async_trait]
impl ArmService for RecordingArm {
    fn name(&self) -> ArmName {
        return ArmName::Simulated;
    }

    async fn move_joint(
        &mut self,
        joint: Joint,
        angle: f32,
        blocking: bool,
    ) -> Result<(), ArmError> {
        return self.record(ArmCall::Move {
            joint,
            angle,
            blocking,
        });
    }

    async fn open_gripper(&mut self, blocking: bool) -> Result<(), ArmError> {
        return self.record(ArmCall::OpenGripper(blocking));
    }

    async fn close_gripper(&mut self, blocking: bool) -> Result<(), ArmError> {
        return self.record(ArmCall::CloseGripper(blocking));
    }

    async fn go_home(&mut self, joints: &[Joint], blocking: bool) -> Result<(), ArmError> {
        return self.record(ArmCall::GoHome(joints.to_vec(), blocking));
    }
}

/// Shared log of the actions that ran, in order.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    pub fn runs(&self) -> Vec<String> {
        return self.0.lock().unwrap().clone();
    }
}

#[derive(Clone, Copy)]
enum Outcome {
    Succeed,
    Terminate,
    Interrupted,
    ArmFault,
}

pub struct RecordingAction {
    label: String,
    recorder: Recorder,
    outcome: Outcome,
}

impl RecordingAction {
    pub fn new(label: &str, recorder: &Recorder) -> RecordingAction {
        return RecordingAction {
            label: label.to_string(),
            recorder: recorder.clone(),
            outcome: Outcome::Succeed,
        };
    }

    /// Raises the termination flag while running, like a signal arriving
    /// during a motion.
    pub fn terminating(mut self) -> RecordingAction {
        self.outcome = Outcome::Terminate;
        return self;
    }

    pub fn interrupted(mut self) -> RecordingAction {
        self.outcome = Outcome::Interrupted;
        return self;
    }

    pub fn arm_fault(mut self) -> RecordingAction {
        self.outcome = Outcome::ArmFault;
        return self;
    }
}

#[async_trait]
impl Action for RecordingAction {
    fn description(&self) -> String {
        return self.label.clone();
    }

    async fn run(&self, session: &mut Session) -> Result<(), ConsoleError> {
        self.recorder.0.lock().unwrap().push(self.label.clone());

        match self.outcome {
            Outcome::Succeed => return Ok(()),
            Outcome::Terminate => {
                session.state.terminate();
                return Ok(());
            }
            Outcome::Interrupted => return Err(TerminalError::Interrupted.into()),
            Outcome::ArmFault => {
                return Err(ArmError::Communication("bus error".to_string()).into())
            }
        }
    }
}

pub struct Fixture {
    pub session: Session,
    pub transcript: Transcript,
    pub arm_log: ArmLog,
}

pub fn fixture(steps: Vec<Step>, exit_allowed: bool) -> Fixture {
    let (arm, _) = RecordingArm::new();
    return fixture_with_arm(steps, exit_allowed, arm);
}

pub fn fixture_with_arm(steps: Vec<Step>, exit_allowed: bool, arm: RecordingArm) -> Fixture {
    let state = SessionState::new(exit_allowed);
    let (terminal, transcript) = ScriptedTerminal::new(steps, &state);
    let arm_log = arm.log.clone();
    let session = Session::new(Box::new(terminal), Box::new(arm), state);

    return Fixture {
        session,
        transcript,
        arm_log,
    };
}

pub fn press(keys: &str) -> Vec<Step> {
    return keys.chars().map(|c| Step::Press(Key::Char(c))).collect();
}
