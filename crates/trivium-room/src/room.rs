//! Room actor: an isolated Tokio task that owns one trivia session.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. All round state (history, answers, scores,
//! the countdown) lives inside the task, so the two evaluation triggers
//! (everyone answered vs. timer expiry) are settled by ordinary sequential
//! ordering: whichever event the actor processes first evaluates the round
//! and cancels the other trigger.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use trivium_protocol::{
    PlayerId, Question, QuestionPayload, RoomId, ServerEvent,
};
use trivium_source::QuestionSource;
use trivium_timer::{Countdown, Pause};

use crate::{rotation, scoring, RoomError, RoomSettings, RoundPhase};

/// Channel sender for delivering room broadcasts to one connection.
pub type RoomSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
pub(crate) enum RoomCommand {
    /// Add a player (idempotent) and register their outbound channel.
    Join {
        player_id: PlayerId,
        sender: RoomSender,
        reply: oneshot::Sender<()>,
    },

    /// Reset the room and begin round 1.
    Start,

    /// Record a player's answer for the current round.
    Answer { player_id: PlayerId, answer: String },

    /// Request a state snapshot.
    Info { reply: oneshot::Sender<RoomInfo> },
}

/// A snapshot of a room's state, for inspection and tests.
#[derive(Debug, Clone)]
pub struct RoomInfo {
    /// The room's unique id.
    pub room_id: RoomId,
    /// Current round lifecycle phase.
    pub phase: RoundPhase,
    /// Number of joined players.
    pub player_count: usize,
    /// Rounds issued so far in the current game.
    pub current_question_index: u32,
    /// Rounds the game runs for.
    pub total_questions: u32,
    /// Questions issued so far (equals `current_question_index` while a
    /// game is in progress).
    pub history_len: usize,
    /// Current score table.
    pub scores: BTreeMap<PlayerId, u32>,
}

/// Handle to a running room actor. Cheap to clone, it is just an
/// `mpsc::Sender` wrapper. The `RoomStore` holds one per room.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's unique id.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Joins a player, registering `sender` as their broadcast channel.
    ///
    /// Idempotent: re-joining replaces the channel (latest connection
    /// wins) without duplicating the player or resetting their score.
    /// Resolves once the room has processed the join.
    pub async fn join(
        &self,
        player_id: PlayerId,
        sender: RoomSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player_id,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests a game start (fire-and-forget).
    pub async fn start(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Start)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Submits an answer for the current round (fire-and-forget).
    pub async fn answer(
        &self,
        player_id: PlayerId,
        answer: String,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Answer { player_id, answer })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }

    /// Requests a state snapshot.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor<S: QuestionSource> {
    room_id: RoomId,
    topic: String,
    total_questions: u32,
    current_question_index: u32,
    /// Joined players in join order (deterministic iteration).
    players: Vec<PlayerId>,
    /// Per-player outbound channels. Broadcasts go to every entry.
    senders: HashMap<PlayerId, RoomSender>,
    /// Questions issued this game, oldest first. De-duplication and
    /// evaluation both read from here.
    history: Vec<Question>,
    /// This round's answers, keyed by player so resubmission overwrites.
    answers: HashMap<PlayerId, String>,
    scores: HashMap<PlayerId, u32>,
    phase: RoundPhase,
    countdown: Countdown,
    pause: Pause,
    settings: RoomSettings,
    source: Arc<S>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl<S: QuestionSource> RoomActor<S> {
    /// Runs the actor loop until the store drops the last handle.
    async fn run(mut self) {
        tracing::info!(
            room_id = %self.room_id,
            topic = %self.topic,
            total_questions = self.total_questions,
            "room actor started"
        );

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                remaining = self.countdown.tick() => {
                    self.handle_tick(remaining);
                }
                _ = self.pause.elapsed() => {
                    self.begin_round().await;
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room actor stopped");
    }

    async fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Join {
                player_id,
                sender,
                reply,
            } => {
                self.handle_join(player_id, sender);
                let _ = reply.send(());
            }
            RoomCommand::Start => self.handle_start().await,
            RoomCommand::Answer { player_id, answer } => {
                self.handle_answer(player_id, answer);
            }
            RoomCommand::Info { reply } => {
                let _ = reply.send(self.info());
            }
        }
    }

    fn handle_join(&mut self, player_id: PlayerId, sender: RoomSender) {
        if self.players.contains(&player_id) {
            // Re-join: keep the score, swap in the new connection.
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                "player re-joined, replacing outbound channel"
            );
        } else {
            self.players.push(player_id.clone());
            self.scores.insert(player_id.clone(), 0);
            tracing::info!(
                room_id = %self.room_id,
                %player_id,
                players = self.players.len(),
                "player joined"
            );
        }
        self.senders.insert(player_id, sender);

        self.broadcast(ServerEvent::Players {
            count: self.players.len(),
        });
    }

    async fn handle_start(&mut self) {
        if !self.phase.can_start() {
            tracing::debug!(
                room_id = %self.room_id,
                phase = %self.phase,
                "start ignored while game in progress"
            );
            return;
        }

        // No timer may survive into the new game.
        self.countdown.cancel();
        self.pause.cancel();

        self.current_question_index = 0;
        self.history.clear();
        self.answers.clear();
        for player in &self.players {
            self.scores.insert(player.clone(), 0);
        }

        tracing::info!(
            room_id = %self.room_id,
            players = self.players.len(),
            "game starting"
        );
        self.begin_round().await;
    }

    /// Enters `QuestionActive`: fetch a fresh question, broadcast it, and
    /// arm the countdown. The fetch suspends only this room's actor;
    /// commands queue on the channel until it resolves.
    async fn begin_round(&mut self) {
        let result = rotation::next_unique(
            self.source.as_ref(),
            &self.topic,
            &self.history,
            self.settings.rotation_attempts,
        )
        .await;

        match result {
            Ok(question) => {
                let payload = QuestionPayload::from(&question);
                self.history.push(question);
                self.current_question_index += 1;
                self.answers.clear();
                self.phase = RoundPhase::QuestionActive;

                tracing::info!(
                    room_id = %self.room_id,
                    round = self.current_question_index,
                    "round started"
                );
                self.broadcast(ServerEvent::Question { question: payload });
                self.countdown.start(self.settings.round_ticks);
            }
            Err(e) => {
                // Rather than leave clients watching a stalled room,
                // close the game out with the scores earned so far.
                tracing::warn!(
                    room_id = %self.room_id,
                    error = %e,
                    "could not obtain a unique question, ending game"
                );
                self.end_game();
            }
        }
    }

    /// One countdown tick: broadcast the remaining seconds; the zero tick
    /// settles the round.
    fn handle_tick(&mut self, remaining: u32) {
        if !self.phase.accepts_answers() {
            // The countdown is cancelled on every exit from
            // QuestionActive, so a stale tick indicates a bug upstream.
            tracing::warn!(
                room_id = %self.room_id,
                phase = %self.phase,
                "countdown tick outside active round, ignoring"
            );
            return;
        }

        self.broadcast(ServerEvent::Timer { remaining });

        if remaining == 0 {
            self.evaluate();
        }
    }

    fn handle_answer(&mut self, player_id: PlayerId, answer: String) {
        if !self.phase.accepts_answers() {
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                phase = %self.phase,
                "answer ignored outside active round"
            );
            return;
        }
        if !self.players.contains(&player_id) {
            tracing::debug!(
                room_id = %self.room_id,
                %player_id,
                "answer from non-member, ignoring"
            );
            return;
        }

        self.answers.insert(player_id, answer);

        if self.answers.len() == self.players.len() {
            // Everyone answered: this trigger wins the race, so the
            // countdown must not evaluate this round a second time.
            self.countdown.cancel();
            self.evaluate();
        }
    }

    /// Scores the just-completed round and decides continue-vs-end.
    /// Reachable only from `QuestionActive`, via exactly one of the two
    /// triggers; the other has been cancelled or has disarmed itself.
    fn evaluate(&mut self) {
        self.countdown.cancel();
        self.phase = RoundPhase::Evaluating;

        let Some(question) = self.history.last() else {
            // QuestionActive implies a question was pushed.
            tracing::error!(room_id = %self.room_id, "evaluating with empty history");
            return;
        };
        let correct_answer = question.correct_answer.clone();

        for player in &self.players {
            let correct = self
                .answers
                .get(player)
                .is_some_and(|answer| *answer == correct_answer);
            if correct {
                *self.scores.entry(player.clone()).or_insert(0) += 1;
            }
        }

        tracing::debug!(
            room_id = %self.room_id,
            round = self.current_question_index,
            answered = self.answers.len(),
            "round evaluated"
        );

        if self.current_question_index >= self.total_questions {
            self.end_game();
        } else {
            self.pause.start(self.settings.round_pause);
        }
    }

    /// Enters the terminal `Ended` phase and broadcasts final results.
    fn end_game(&mut self) {
        self.countdown.cancel();
        self.pause.cancel();
        self.phase = RoundPhase::Ended;

        let results = scoring::final_results(
            &self.players,
            &self.scores,
            self.total_questions,
        );
        let (winner, draw) = scoring::decide_winner(&self.players, &self.scores);

        tracing::info!(
            room_id = %self.room_id,
            winner = winner.as_ref().map(|w| w.0.as_str()),
            draw,
            "game ended"
        );
        self.broadcast(ServerEvent::EndGame {
            results,
            winner,
            draw,
        });
    }

    /// Sends an event to every registered connection. Closed connections
    /// are silently skipped; disconnects surface elsewhere.
    fn broadcast(&self, event: ServerEvent) {
        for sender in self.senders.values() {
            let _ = sender.send(event.clone());
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room_id.clone(),
            phase: self.phase,
            player_count: self.players.len(),
            current_question_index: self.current_question_index,
            total_questions: self.total_questions,
            history_len: self.history.len(),
            scores: self
                .players
                .iter()
                .map(|p| {
                    (p.clone(), self.scores.get(p).copied().unwrap_or(0))
                })
                .collect(),
        }
    }
}

/// Spawns a new room actor task and returns a handle to communicate
/// with it.
pub(crate) fn spawn_room<S: QuestionSource>(
    room_id: RoomId,
    topic: String,
    total_questions: u32,
    settings: RoomSettings,
    source: Arc<S>,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let countdown = Countdown::with_jitter(settings.tick_jitter_us);
    let actor = RoomActor {
        room_id: room_id.clone(),
        topic,
        total_questions,
        current_question_index: 0,
        players: Vec::new(),
        senders: HashMap::new(),
        history: Vec::new(),
        answers: HashMap::new(),
        scores: HashMap::new(),
        phase: RoundPhase::Idle,
        countdown,
        pause: Pause::new(),
        settings,
        source,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
