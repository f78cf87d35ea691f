mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use idle_mmorpg::core::constants::POTION_BUNDLE_SIZE;
use idle_mmorpg::core::{GameSession, SharedSession, TickResult, TickScheduler};
use idle_mmorpg::items::catalog::{next_armor_upgrade, next_weapon_upgrade};
use idle_mmorpg::items::types::PotionKind;
use idle_mmorpg::persistence::{KeyValueStore, SaveManager};
use idle_mmorpg::utils::build_info;
use idle_mmorpg::utils::GameConfig;
use idle_mmorpg::zones::Location;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use ui::combat_log::{CombatLog, LogKind};

type Session = SharedSession<SaveManager>;

/// What the main loop must do with the battle timer after a key press.
enum Action {
    None,
    BattleStarted,
    BattleStopped,
    Quit,
}

fn main() -> io::Result<()> {
    // Handle CLI arguments
    let mut reset = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Idle MMORPG - Terminal Auto-Battle RPG\n");
                println!("Usage: idle-mmorpg [options]\n");
                println!("Options:");
                println!("  --reset    Delete the save file and start over");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            "--reset" => reset = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'idle-mmorpg --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let config = GameConfig::load();
    init_logging(&config);

    let mut store = SaveManager::new(config.save_path()?)?;
    if reset {
        store
            .clear()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        info!("save file reset");
    }

    let mut session = GameSession::load(store);
    let mut log = CombatLog::new();
    log.info("Welcome back! Press 1-5 to travel, B to battle.");
    if let Some(report) = session.take_offline_report() {
        log.record_offline(&report);
    }
    if let Some(message) = session.last_persistence_error() {
        log.record_save_failure(message);
    }
    let session: Session = Arc::new(Mutex::new(session));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &session, &config, &mut log);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = lock(&session).persist() {
        eprintln!("Warning: could not save progress: {}", e);
    }
    info!("exiting");

    result
}

/// Sends log output to the log file so it never draws over the UI.
fn init_logging(config: &GameConfig) {
    let file = match config
        .log_path()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled ({})", e);
            return;
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .init();
}

fn lock(session: &Session) -> std::sync::MutexGuard<'_, GameSession<SaveManager>> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &Session,
    config: &GameConfig,
    log: &mut CombatLog,
) -> io::Result<()> {
    let (tick_tx, tick_rx): (Sender<TickResult>, Receiver<TickResult>) = mpsc::channel();
    let mut scheduler: Option<TickScheduler> = None;
    let refresh = config.ui_refresh_interval();
    let mut last_refresh: Option<Instant> = None;

    loop {
        while let Ok(result) = tick_rx.try_recv() {
            log.record_tick(&result);
        }

        if last_refresh.map_or(true, |at| at.elapsed() >= refresh) {
            // Snapshot under the lock, draw without it
            let snapshot = lock(session).state().clone();
            terminal.draw(|frame| ui::draw_ui(frame, &snapshot, log))?;
            last_refresh = Some(Instant::now());
        }

        if scheduler.as_ref().is_some_and(TickScheduler::is_finished) {
            scheduler = None;
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(key_event.code, session, log) {
            Action::None => {}
            Action::BattleStarted => {
                if let Some(old) = scheduler.take() {
                    old.stop();
                }
                scheduler = Some(TickScheduler::spawn(
                    Arc::clone(session),
                    config.tick_interval(),
                    tick_tx.clone(),
                ));
            }
            Action::BattleStopped => {
                if let Some(old) = scheduler.take() {
                    old.stop();
                }
            }
            Action::Quit => break,
        }
        last_refresh = None;
    }

    if let Some(scheduler) = scheduler.take() {
        scheduler.stop();
    }
    Ok(())
}

fn travel(session: &Session, log: &mut CombatLog, location: Location) -> Action {
    let mut session = lock(session);
    let was_fighting = session.is_fighting();
    let name = location.display_name();
    match session.change_location(location) {
        Ok(()) => log.info(format!("Traveled to {}", name)),
        Err(e) => log.record_error(&e),
    }
    if was_fighting {
        Action::BattleStopped
    } else {
        Action::None
    }
}

fn toggle_battle(session: &Session, log: &mut CombatLog) -> Action {
    let mut session = lock(session);
    if session.is_fighting() {
        if let Err(e) = session.stop_auto_battle() {
            log.record_error(&e);
        }
        log.info("Auto-battle stopped");
        return Action::BattleStopped;
    }

    match session.start_auto_battle() {
        Ok(true) => {
            log.info("Auto-battle started");
            Action::BattleStarted
        }
        Ok(false) => {
            log.push(LogKind::Warning, "Nothing to fight here");
            Action::None
        }
        Err(e) => {
            // Battle is running in memory even though the save failed
            log.record_error(&e);
            if session.is_fighting() {
                Action::BattleStarted
            } else {
                Action::None
            }
        }
    }
}

fn handle_key(code: KeyCode, session: &Session, log: &mut CombatLog) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char(c @ '1'..='5') => {
            let tier = c.to_digit(10).unwrap_or(1);
            return travel(session, log, Location::training_ground(tier));
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            return travel(session, log, Location::main_city());
        }
        KeyCode::Char('b') | KeyCode::Char('B') => return toggle_battle(session, log),
        _ => {}
    }

    let mut session = lock(session);
    let outcome = match code {
        KeyCode::Char('w') | KeyCode::Char('W') => {
            match next_weapon_upgrade(session.player()) {
                Some(weapon) => session
                    .buy_weapon(&weapon)
                    .map(|()| format!("Bought {} for {} gold", weapon.name, weapon.price)),
                None => Ok("You already own the best weapon".to_string()),
            }
        }
        KeyCode::Char('a') | KeyCode::Char('A') => match next_armor_upgrade(session.player()) {
            Some(armor) => session
                .buy_armor(&armor)
                .map(|()| format!("Bought {} for {} gold", armor.name, armor.price)),
            None => Ok("You already own the best armor".to_string()),
        },
        KeyCode::Char('p') | KeyCode::Char('P') => session
            .buy_potion(PotionKind::Small, POTION_BUNDLE_SIZE)
            .map(|()| format!("Bought {} {}s", POTION_BUNDLE_SIZE, PotionKind::Small)),
        KeyCode::Char('e') | KeyCode::Char('E') => {
            match session.player().best_inventory_weapon().cloned() {
                Some(weapon) => session
                    .equip_weapon(&weapon)
                    .map(|()| format!("Equipped {}", weapon.name)),
                None => Ok("No weapon in your bag".to_string()),
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            match session.player().best_inventory_armor().cloned() {
                Some(armor) => session
                    .equip_armor(&armor)
                    .map(|()| format!("Equipped {}", armor.name)),
                None => Ok("No armor in your bag".to_string()),
            }
        }
        KeyCode::Char('u') | KeyCode::Char('U') => session
            .unequip_weapon()
            .map(|weapon| format!("Unequipped {}", weapon.name)),
        KeyCode::Char('i') | KeyCode::Char('I') => session
            .unequip_armor()
            .map(|armor| format!("Unequipped {}", armor.name)),
        KeyCode::Char('h') | KeyCode::Char('H') => session
            .quick_heal()
            .map(|(kind, healed)| format!("Drank {} (+{} HP)", kind, healed)),
        _ => return Action::None,
    };

    match outcome {
        Ok(message) => log.info(message),
        Err(e) => log.record_error(&e),
    }
    Action::None
}
