//! The widget application: owns both bounded contexts and routes every
//! runtime event to them.

use std::io::Write;
use std::ops::ControlFlow;
use std::sync::Arc;

use adzan_competition::application::command_handlers::{
    CompetitionCommandResult, CompetitionController, ScheduledTask,
};
use adzan_competition::application::notifications::publish_events;
use adzan_competition::domain::aggregates::Competition;
use adzan_competition::domain::commands::{
    AdvanceTimer, CompleteSettleDelay, ResetCompetition, StartCompetition, SubmitAnswer,
};
use adzan_competition::domain::player::PlayerId;
use adzan_competition::domain::question_bank::QuestionBanks;
use adzan_core::clock::Clock;
use adzan_core::error::DomainError;
use adzan_core::preferences::PreferenceStore;
use adzan_core::rng::DeterministicRng;
use adzan_core::scheduler::Scheduler;
use adzan_media::application::command_handlers::{MediaCommandResult, MediaController};
use adzan_media::application::output::AudioOutput;
use adzan_media::application::query_handlers::get_deck_view;
use adzan_media::domain::aggregates::AudioDeck;
use adzan_media::domain::audio::{Cue, Recitation};
use adzan_media::domain::commands::{
    FinishRecitation, PlayRecitation, ResumeBacksound, ToggleBacksound,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::WidgetConfig;
use crate::error::AppError;
use crate::feedback::AudioFeedback;
use crate::navigation::Page;
use crate::runtime::{RuntimeEvent, TokioScheduler, WidgetInput};
use crate::terminal::TerminalPresenter;

/// The running widget.
///
/// Every mutation happens inside [`App::handle`], which the event loop calls
/// once per event.
pub struct App<W: Write> {
    config: WidgetConfig,
    page: Page,
    clock: Box<dyn Clock>,
    rng: Box<dyn DeterministicRng>,
    scheduler: TokioScheduler<RuntimeEvent>,
    output: Arc<dyn AudioOutput>,
    competition: CompetitionController,
    media: MediaController,
    feedback: AudioFeedback,
    presenter: TerminalPresenter<W>,
}

impl<W: Write> App<W> {
    /// Builds the widget. Scheduled work is posted to `sender`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Domain` if the configured question count does not
    /// fit the built-in banks.
    pub fn new(
        config: WidgetConfig,
        clock: Box<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
        output: Arc<dyn AudioOutput>,
        preferences: Arc<dyn PreferenceStore>,
        sender: UnboundedSender<RuntimeEvent>,
        writer: W,
    ) -> Result<Self, AppError> {
        let competition = Competition::new(QuestionBanks::default(), config.competition)?;
        let media = MediaController::load(Arc::clone(&output), preferences);
        let presenter = TerminalPresenter::new(writer, config.labels.clone());

        Ok(Self {
            page: Page::Home,
            clock,
            rng,
            scheduler: TokioScheduler::new(sender),
            feedback: AudioFeedback::new(Arc::clone(&output)),
            output,
            competition: CompetitionController::new(competition),
            media,
            presenter,
            config,
        })
    }

    /// The page on screen.
    #[must_use]
    pub fn page(&self) -> Page {
        self.page
    }

    /// The competition aggregate.
    #[must_use]
    pub fn competition(&self) -> &Competition {
        self.competition.competition()
    }

    /// The audio deck.
    #[must_use]
    pub fn deck(&self) -> &AudioDeck {
        self.media.deck()
    }

    /// The presenter's writer.
    #[must_use]
    pub fn writer(&self) -> &W {
        self.presenter.get_ref()
    }

    /// Shows the home page and tries to resume the backsound.
    pub fn startup(&mut self) {
        info!(title = %self.config.theme.app_title, "widget starting");
        self.presenter.render_page(Page::Home, &self.config.theme);
        let result = self.media.handle_resume_backsound(
            &ResumeBacksound {
                correlation_id: Uuid::new_v4(),
            },
            self.clock.as_ref(),
        );
        self.show_media_result(&result);
    }

    /// Handles one event. Returns `Break` when the loop should stop.
    pub fn handle(&mut self, event: RuntimeEvent) -> ControlFlow<()> {
        match event {
            RuntimeEvent::Input(input) => return self.handle_input(input),
            RuntimeEvent::Invalid(message) => {
                self.presenter.render_notice(&message);
                self.presenter.render_help();
            }
            RuntimeEvent::Scheduled(task) => self.handle_scheduled(task),
            RuntimeEvent::RecitationEnded(recitation) => self.finish_recitation(recitation),
            RuntimeEvent::Shutdown => {
                info!("shutdown requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn handle_input(&mut self, input: WidgetInput) -> ControlFlow<()> {
        if input == WidgetInput::Quit {
            info!("quit requested");
            return ControlFlow::Break(());
        }

        self.output.notify_interaction();
        // A missing click is not worth a notice.
        if let Some(e) = self.media.play_cue(Cue::Click) {
            debug!(error = %e, "click cue not played");
        }

        match input {
            WidgetInput::Start => self.start(),
            WidgetInput::Reset => self.reset(),
            WidgetInput::Answer { player, choice } => self.answer(player, choice),
            WidgetInput::ShowPage(page) => self.show_page(page),
            WidgetInput::PlayRecitation(recitation) => self.play_recitation(recitation),
            WidgetInput::ToggleBacksound => self.toggle_backsound(),
            WidgetInput::Help => self.presenter.render_help(),
            WidgetInput::Quit => {}
        }
        ControlFlow::Continue(())
    }

    fn require_competition_page(&mut self) -> bool {
        if self.page == Page::Kompetisi {
            return true;
        }
        self.presenter
            .render_notice("open the competition page first: `page kompetisi`");
        false
    }

    fn start(&mut self) {
        if !self.require_competition_page() {
            return;
        }
        let command = StartCompetition {
            correlation_id: Uuid::new_v4(),
        };
        let result = self.competition.handle_start(
            &command,
            self.clock.as_ref(),
            self.rng.as_mut(),
            &mut self.scheduler,
        );
        self.publish(result);
    }

    fn reset(&mut self) {
        let command = ResetCompetition {
            correlation_id: Uuid::new_v4(),
        };
        let result =
            self.competition
                .handle_reset(&command, self.clock.as_ref(), &mut self.scheduler);
        self.publish(Ok(result));
    }

    fn answer(&mut self, player: u8, choice: usize) {
        if !self.require_competition_page() {
            return;
        }
        let player = match PlayerId::try_from(player) {
            Ok(player) => player,
            Err(e) => {
                log_rejected(&e);
                return;
            }
        };
        let command = SubmitAnswer {
            correlation_id: Uuid::new_v4(),
            player,
            choice,
        };
        let result = self.competition.handle_submit_answer(
            &command,
            self.clock.as_ref(),
            &mut self.scheduler,
        );
        self.publish(result);
    }

    fn handle_scheduled(&mut self, task: ScheduledTask) {
        let correlation_id = Uuid::new_v4();
        let result = match task {
            ScheduledTask::SettleElapsed { player, generation } => {
                self.competition.handle_settle_elapsed(
                    &CompleteSettleDelay {
                        correlation_id,
                        player,
                        generation,
                    },
                    self.clock.as_ref(),
                    &mut self.scheduler,
                )
            }
            ScheduledTask::TimerTick { generation } => self.competition.handle_timer_tick(
                &AdvanceTimer {
                    correlation_id,
                    generation,
                },
                self.clock.as_ref(),
            ),
        };
        self.publish(result);
    }

    fn publish(&mut self, result: Result<CompetitionCommandResult, DomainError>) {
        match result {
            Ok(result) => publish_events(
                &result.events,
                self.competition.competition(),
                &self.feedback,
                &mut self.presenter,
            ),
            Err(e) => log_rejected(&e),
        }
    }

    fn show_page(&mut self, page: Page) {
        info!(page = page.slug(), "page shown");
        self.page = page;
        self.presenter.render_page(page, &self.config.theme);
        match page {
            Page::Kompetisi => self.reset(),
            Page::Lafal | Page::Doa => self.render_deck(),
            Page::Home | Page::Materi => {}
        }
    }

    fn play_recitation(&mut self, recitation: Recitation) {
        let command = PlayRecitation {
            correlation_id: Uuid::new_v4(),
            recitation,
        };
        match self
            .media
            .handle_play_recitation(&command, self.clock.as_ref())
        {
            Ok(result) => {
                let length = match recitation {
                    Recitation::Adzan => self.config.audio.adzan,
                    Recitation::Doa => self.config.audio.doa,
                };
                self.scheduler.schedule_once(length, recitation);
                self.show_media_result(&result);
                self.render_deck();
            }
            Err(e) => log_rejected(&e),
        }
    }

    fn finish_recitation(&mut self, recitation: Recitation) {
        let command = FinishRecitation {
            correlation_id: Uuid::new_v4(),
            recitation,
        };
        match self
            .media
            .handle_finish_recitation(&command, self.clock.as_ref())
        {
            Ok(result) => {
                self.show_media_result(&result);
                if matches!(self.page, Page::Lafal | Page::Doa) {
                    self.render_deck();
                }
            }
            Err(e) => log_rejected(&e),
        }
    }

    fn toggle_backsound(&mut self) {
        let command = ToggleBacksound {
            correlation_id: Uuid::new_v4(),
        };
        let result = self
            .media
            .handle_toggle_backsound(&command, self.clock.as_ref());
        self.show_media_result(&result);
        if !result.persisted {
            self.presenter
                .render_notice("backsound preference could not be saved");
        }
        self.render_deck();
    }

    fn show_media_result(&mut self, result: &MediaCommandResult) {
        for notice in &result.notices {
            self.presenter.render_notice(&notice.to_string());
        }
    }

    fn render_deck(&mut self) {
        let view = get_deck_view(self.media.deck());
        self.presenter.render_deck(&view);
    }
}

fn log_rejected(error: &DomainError) {
    if error.is_ignored() {
        debug!(reason = %error, "input ignored");
    } else {
        warn!(error = %error, "command rejected");
    }
}
