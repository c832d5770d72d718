use crate::audio::{Sound, SoundBoard};
use crate::scores::HighScoresView;
use crate::settings;
use crate::utils::*;
use chrono::prelude::*;
use clap::Args;
use game::DeckGenerator;
use gloo::timers::callback::{Interval, Timeout};
use pairs_core as game;
use web_sys::HtmlInputElement;
use yew::prelude::*;

fn utc_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCardState {
    Hidden,
    Revealed,
    Matched,
    /// Unmatched card shown after the time ran out.
    Missed,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewGameState {
    Dealing,
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Debug, PartialEq)]
enum NamePrompt {
    Closed,
    Open(String),
    Saved(usize),
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Screen {
    Menu,
    Game,
    HighScores(game::Level),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: game::PlayEngine,
    prompt: NamePrompt,
}

impl GameSession {
    fn new(engine: game::PlayEngine) -> Self {
        Self {
            engine,
            prompt: NamePrompt::Closed,
        }
    }

    fn view_state(&self) -> ViewGameState {
        use game::EngineState::*;
        match self.engine.state() {
            Dealing => ViewGameState::Dealing,
            Playing => ViewGameState::Playing,
            Won => ViewGameState::Won,
            Lost => ViewGameState::Lost,
        }
    }

    fn card_state_at(&self, index: game::CardIndex) -> ViewCardState {
        use game::CardFace;
        match (self.engine.face_at(index), self.engine.state()) {
            (CardFace::Matched, _) => ViewCardState::Matched,
            (CardFace::Revealed, _) => ViewCardState::Revealed,
            (CardFace::Hidden, game::EngineState::Lost) => ViewCardState::Missed,
            (CardFace::Hidden, _) => ViewCardState::Hidden,
        }
    }

    /// Seconds shown on the status bar: remaining time when timed, elapsed otherwise.
    fn clock_secs(&self) -> u32 {
        self.engine
            .time_left()
            .unwrap_or_else(|| self.engine.elapsed())
            .into()
    }

    /// The countdown interval runs only while cards can be flipped.
    fn wants_clock(&self) -> bool {
        self.engine.state().is_playing()
    }

    /// A mismatched pair is face up and waits to be turned back.
    fn awaiting_reveal(&self) -> bool {
        !self.engine.is_finished() && self.engine.flipped().len() == 2
    }

    fn on_finished(&mut self, scores: &game::HighScoreTable) {
        if scores.qualifies_game(&self.engine) {
            log::debug!(
                "new best for {}: {} moves",
                self.engine.level(),
                self.engine.moves()
            );
            self.prompt = NamePrompt::Open(String::new());
        }
    }

    fn update_name(&mut self, name: String) -> bool {
        if let NamePrompt::Open(current) = &mut self.prompt {
            *current = name;
        }
        false
    }

    fn submit_high_score(
        &mut self,
        scores: &mut game::HighScoreTable,
        now: DateTime<Utc>,
    ) -> Option<usize> {
        let NamePrompt::Open(name) = &self.prompt else {
            return None;
        };

        let rank = scores.record(self.engine.level(), name, self.engine.moves(), now);
        self.prompt = rank.map_or(NamePrompt::Closed, NamePrompt::Saved);
        rank
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectLevel(game::Level),
    SelectMode(game::Mode),
    StartGame,
    DealFinished,
    FlipCard(game::CardIndex),
    ResolveMismatch,
    Tick,
    Retry,
    ShowMenu,
    ShowHighScores(game::Level),
    ClearHighScores(game::Level),
    UpdateName(String),
    SubmitHighScore,
    ToggleSettings,
    UpdateSettings(settings::Settings),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    state: ViewCardState,
    glyph: &'static str,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use ViewCardState::*;

    let CardProps {
        index,
        state,
        glyph,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match state {
            Hidden => classes!(),
            Revealed => classes!("open"),
            Matched => classes!("open", "matched"),
            Missed => classes!("open", "missed"),
        }
    );
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });
    let label = format!("card {}", usize::from(index) + 1);

    html! {
        <button {class} {onclick} disabled={locked} aria-label={label}>
            <span>{ if state == Hidden { "" } else { glyph } }</span>
        </button>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level selected when the menu opens
    #[arg(short, long)]
    level: Option<game::Level>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: settings::Settings,
    scores: game::HighScoreTable,
    screen: Screen,
    level: game::Level,
    mode: game::Mode,
    game: Option<GameSession>,
    last_rank: Option<(game::Level, usize)>,
    settings_open: bool,
    sounds: SoundBoard,
    timer: Option<Interval>,
    deal_timeout: Option<Timeout>,
    mismatch_timeout: Option<Timeout>,
    init_props: GameProps,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.init_props.seed.unwrap_or_else(js_random_seed)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(game::TICK_MS, move || link.send_message(Msg::Tick))
    }

    fn schedule(ctx: &Context<Self>, delay_ms: u32, msg: Msg) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(delay_ms, move || link.send_message(msg))
    }

    /// Dropping the gloo handles cancels them.
    fn stop_timers(&mut self) {
        self.timer = None;
        self.deal_timeout = None;
        self.mismatch_timeout = None;
    }

    /// Starts or drops the interval and the mismatch timeout to follow the session.
    fn sync_timers(&mut self, ctx: &Context<Self>) {
        let (clock, reveal) = self
            .game
            .as_ref()
            .map_or((false, false), |session| {
                (session.wants_clock(), session.awaiting_reveal())
            });

        match (clock, self.timer.is_some()) {
            (true, false) => self.timer = Some(Self::create_timer(ctx)),
            (false, true) => self.timer = None,
            _ => {}
        }
        match (reveal, self.mismatch_timeout.is_some()) {
            (true, false) => {
                self.mismatch_timeout = Some(Self::schedule(
                    ctx,
                    game::MISMATCH_DELAY_MS,
                    Msg::ResolveMismatch,
                ))
            }
            (false, true) => self.mismatch_timeout = None,
            _ => {}
        }
    }

    fn play(&mut self, sound: Sound) {
        if self.settings.sound {
            self.sounds.play(sound);
        }
    }

    fn start_game(&mut self, ctx: &Context<Self>) -> bool {
        self.stop_timers();

        let seed = self.next_seed();
        log::debug!("new {} game ({:?}), seed: {}", self.level, self.mode, seed);
        let deck = game::RandomDeckGenerator::new(seed).generate(self.level);

        match game::PlayEngine::new(self.level, self.mode, deck) {
            Ok(engine) => {
                self.game = Some(GameSession::new(engine));
                self.screen = Screen::Game;
                self.deal_timeout = Some(Self::schedule(
                    ctx,
                    game::DEAL_ANIMATION_MS,
                    Msg::DealFinished,
                ));
                true
            }
            Err(err) => {
                log::error!("could not start game: {}", err);
                false
            }
        }
    }

    fn finish_game(&mut self) {
        if let Some(session) = self.game.as_mut() {
            log::info!(
                "game over: {:?} after {} moves",
                session.engine.state(),
                session.engine.moves()
            );
            session.on_finished(&self.scores);
        }
    }

    fn flip_card(&mut self, index: game::CardIndex) -> bool {
        use game::FlipOutcome::*;

        let Some(session) = self.game.as_mut() else {
            return false;
        };
        let outcome = match session.engine.flip(index) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("flip {} rejected: {}", index, err);
                return false;
            }
        };
        log::debug!("flip {}: {:?}", index, outcome);
        if outcome.is_resolution() {
            log::trace!("move {}", session.engine.moves());
        }

        match outcome {
            NoChange => {}
            Flipped => self.play(Sound::Flip),
            Matched => self.play(Sound::Match),
            Mismatched => self.play(Sound::Mismatch),
            Won => {
                self.play(Sound::Win);
                self.finish_game();
            }
        }
        outcome.has_update()
    }

    fn tick(&mut self) -> bool {
        use game::TickOutcome::TimedOut;

        let Some(session) = self.game.as_mut() else {
            return false;
        };

        let outcome = session.engine.tick();
        if outcome == TimedOut {
            self.play(Sound::Lose);
            self.finish_game();
        }
        outcome.has_update()
    }

    fn leave_game(&mut self, screen: Screen) -> bool {
        self.stop_timers();
        self.game = None;
        let changed = self.screen != screen;
        self.screen = screen;
        changed
    }

    fn view_menu(&self, ctx: &Context<Self>) -> Html {
        let levels = game::Level::ALL.into_iter().map(|level| {
            let config = level.config();
            let onclick = ctx.link().callback(move |_: MouseEvent| Msg::SelectLevel(level));
            html! {
                <button class={classes!("level", (level == self.level).then_some("current"))} {onclick}>
                    <strong>{config.name}</strong>
                    <small>
                        {format!("{} pairs · {}", config.pairs, format_clock(config.time_limit.into()))}
                    </small>
                </button>
            }
        });

        let modes = [(game::Mode::Timed, "Timed"), (game::Mode::Relaxed, "Relaxed")]
            .into_iter()
            .map(|(mode, label)| {
                let onclick = ctx.link().callback(move |_: MouseEvent| Msg::SelectMode(mode));
                html! {
                    <button class={classes!("mode", (mode == self.mode).then_some("current"))} {onclick}>
                        {label}
                    </button>
                }
            });

        let level = self.level;
        let on_start = ctx.link().callback(|_: MouseEvent| Msg::StartGame);
        let on_scores = ctx
            .link()
            .callback(move |_: MouseEvent| Msg::ShowHighScores(level));

        html! {
            <section class="menu">
                <h1>{"Pairs"}</h1>
                <nav class="levels">{ for levels }</nav>
                <nav class="modes">{ for modes }</nav>
                <footer>
                    <button onclick={on_start}>{"Start"}</button>
                    <button class="secondary" onclick={on_scores}>{"High scores"}</button>
                </footer>
            </section>
        }
    }

    fn view_game(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let engine = &session.engine;
        let config = engine.level().config();
        let symbol_set = self.settings.symbol_set;

        let state_class = match session.view_state() {
            ViewGameState::Dealing => "dealing",
            ViewGameState::Playing => "playing",
            ViewGameState::Won => "won",
            ViewGameState::Lost => "lost",
        };
        let low_time = engine.time_left().is_some_and(|left| left <= 10);
        let clock = format_clock(session.clock_secs());

        let callback = ctx.link().callback(Msg::FlipCard);
        let cards = engine.deck().cards().iter().map(|card| {
            let state = session.card_state_at(card.id);
            let locked = !engine.can_flip_at(card.id);
            let glyph = symbol_set.glyph(card.symbol);
            html! {
                <CardView index={card.id} {state} {glyph} {locked} callback={callback.clone()}/>
            }
        });

        html! {
            <section class={classes!("game", state_class)}>
                <nav>
                    <aside>{config.name}</aside>
                    <aside>{format!("Moves {}", engine.moves())}</aside>
                    <aside>{format!("{}/{}", engine.matched_pairs(), config.pairs)}</aside>
                    <aside class={low_time.then_some("low")}>{clock}</aside>
                </nav>
                <div class="board" style={format!("--columns: {}", config.columns)}>
                    { for cards }
                </div>
                { self.view_outcome(ctx, session) }
            </section>
        }
    }

    fn view_outcome(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let engine = &session.engine;
        let pairs = engine.level().pairs();

        let (title, summary) = match session.view_state() {
            ViewGameState::Dealing | ViewGameState::Playing => return html! {},
            ViewGameState::Won => (
                "You win!",
                format!("All {} pairs in {} moves", pairs, engine.moves()),
            ),
            ViewGameState::Lost => (
                "Time's up",
                format!("{} of {} pairs matched", engine.matched_pairs(), pairs),
            ),
        };

        let prompt = match &session.prompt {
            NamePrompt::Closed => html! {},
            NamePrompt::Open(name) => {
                let oninput = ctx.link().callback(|e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::UpdateName(input.value())
                });
                let onsubmit = ctx.link().callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::SubmitHighScore
                });
                html! {
                    <form {onsubmit}>
                        <label>
                            {"New best! Your name"}
                            <input
                                type="text"
                                maxlength={game::MAX_NAME_CHARS.to_string()}
                                value={name.clone()}
                                {oninput}
                            />
                        </label>
                        <button type="submit">{"Save"}</button>
                    </form>
                }
            }
            NamePrompt::Saved(rank) => html! {
                <p>{format!("Saved as #{}", rank + 1)}</p>
            },
        };

        let level = engine.level();
        let on_retry = ctx.link().callback(|_: MouseEvent| Msg::Retry);
        let on_menu = ctx.link().callback(|_: MouseEvent| Msg::ShowMenu);
        let on_scores = ctx
            .link()
            .callback(move |_: MouseEvent| Msg::ShowHighScores(level));

        html! {
            <Modal>
                <dialog class="outcome" open={true}>
                    <article>
                        <h2>{title}</h2>
                        <p>{summary}</p>
                        {prompt}
                        <footer>
                            <button onclick={on_retry}>{"Retry"}</button>
                            <button class="secondary" onclick={on_menu}>{"Menu"}</button>
                            <button class="secondary" onclick={on_scores}>{"High scores"}</button>
                        </footer>
                    </article>
                </dialog>
            </Modal>
        }
    }

    fn view_high_scores(&self, ctx: &Context<Self>, level: game::Level) -> Html {
        let highlight = self
            .last_rank
            .and_then(|(ranked_level, rank)| (ranked_level == level).then_some(rank));
        let on_select = ctx.link().callback(Msg::ShowHighScores);
        let on_clear = ctx.link().callback(Msg::ClearHighScores);
        let on_back = ctx.link().callback(|_: ()| Msg::ShowMenu);

        html! {
            <HighScoresView
                {level}
                scores={self.scores.clone()}
                {highlight}
                {on_select}
                {on_clear}
                {on_back}
            />
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let init_props = ctx.props().clone();
        Self {
            settings: LocalOrDefault::local_or_default(),
            scores: LocalOrDefault::local_or_default(),
            screen: Screen::Menu,
            level: init_props.level.unwrap_or_default(),
            mode: Default::default(),
            game: None,
            last_rank: None,
            settings_open: false,
            sounds: Default::default(),
            timer: None,
            deal_timeout: None,
            mismatch_timeout: None,
            init_props,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            SelectLevel(level) => {
                let changed = self.level != level;
                self.level = level;
                changed
            }
            SelectMode(mode) => {
                let changed = self.mode != mode;
                self.mode = mode;
                changed
            }
            StartGame | Retry => self.start_game(ctx),
            DealFinished => {
                self.deal_timeout = None;
                self.game
                    .as_mut()
                    .is_some_and(|session| session.engine.finish_dealing())
            }
            FlipCard(index) => self.flip_card(index),
            ResolveMismatch => {
                self.mismatch_timeout = None;
                self.game
                    .as_mut()
                    .is_some_and(|session| session.engine.resolve_mismatch())
            }
            Tick => self.tick(),
            ShowMenu => self.leave_game(Screen::Menu),
            ShowHighScores(level) => self.leave_game(Screen::HighScores(level)),
            ClearHighScores(level) => {
                let cleared = self.scores.clear(level);
                if cleared {
                    log::debug!("cleared high scores for {}", level);
                    self.scores.local_save();
                    self.last_rank = None;
                }
                cleared
            }
            UpdateName(name) => self
                .game
                .as_mut()
                .is_some_and(|session| session.update_name(name)),
            SubmitHighScore => match self.game.as_mut() {
                Some(session) => {
                    let level = session.engine.level();
                    if let Some(rank) = session.submit_high_score(&mut self.scores, utc_now()) {
                        self.scores.local_save();
                        self.last_rank = Some((level, rank));
                    }
                    true
                }
                None => false,
            },
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    settings.local_save();
                    self.settings = settings;
                    true
                } else {
                    false
                }
            }
        };

        self.sync_timers(ctx);
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use settings::SettingsView;

        let content = match (self.screen, self.game.as_ref()) {
            (Screen::Game, Some(session)) => self.view_game(ctx, session),
            (Screen::HighScores(level), _) => self.view_high_scores(ctx, level),
            (Screen::Menu | Screen::Game, _) => self.view_menu(ctx),
        };

        let cb_show_settings = ctx.link().callback(|_: MouseEvent| Msg::ToggleSettings);
        let on_settings_change = ctx.link().callback(Msg::UpdateSettings);
        let on_settings_close = ctx.link().callback(|_: ()| Msg::ToggleSettings);

        html! {
            <div class="pairs">
                <small onclick={cb_show_settings}>{"···"}</small>
                {content}
                <SettingsView
                    open={self.settings_open}
                    settings={self.settings.clone()}
                    on_change={on_settings_change}
                    on_close={on_settings_close}
                />
            </div>
        }
    }
}
