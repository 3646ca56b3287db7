use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;

use worktray::action::{Action, Effect};
use worktray::app::{App, Overlay};
use worktray::client::{HttpWorktrayClient, WorktrayClient};
use worktray::config::{Cli, ConfigFile};
use worktray::domain::PatchAssignment;
use worktray::event::{key_to_action, AppEvent, EventHandler};
use worktray::filters::{DimensionSpec, FilterOption};
use worktray::nav::{
    hydrate, initial_query, FileSessionStore, InMemoryNavigator, InMemorySessionStore, Navigator,
    SessionStore,
};
use worktray::query::FilterDimension;
use worktray::widgets;
use worktray::worker::{SearchRequest, SearchWorker};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    if let Some(file) = ConfigFile::load() {
        cli.merge_config_file(file);
    }

    // The TUI owns stdout, so logs go to a file when requested.
    if let Some(ref log_file) = cli.log_file {
        let file = std::fs::File::create(log_file)?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
    }

    run_tui(cli).await
}

async fn run_tui(cli: Cli) -> Result<()> {
    let client = match HttpWorktrayClient::new(
        cli.search_api_url.clone(),
        cli.patches_api_url.clone(),
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Failed to build worktray client: {}", e);
            std::process::exit(1);
        }
    };

    // Patch resolution is the upstream identity step: no email or no
    // matching patch means the worktray shows its empty state and never
    // searches.
    let assignment: Option<PatchAssignment> = match &cli.email {
        Some(email) => match client.resolve_patch(email).await {
            Ok(assignment) => assignment,
            Err(e) => {
                eprintln!("Unable to fetch your patch assignment: {}", e);
                eprintln!("  WORKTRAY_PATCHES_API_URL={}", cli.patches_api_url);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let mut session: Box<dyn SessionStore> = match FileSessionStore::for_user() {
        Some(store) => Box::new(store),
        None => Box::new(InMemorySessionStore::default()),
    };

    // Hydration order: explicit --query, then the session slot, then
    // defaults. The assigned patch fills in when the string carries none.
    let startup_query = initial_query(cli.query.clone(), session.as_ref(), &cli.session_key);
    let query = hydrate(
        &startup_query,
        assignment.as_ref().map(|a| a.patch_id.as_str()),
    );

    let mut navigator = InMemoryNavigator::new(startup_query);
    let dimensions = worktray_dimensions(assignment.as_ref());
    let mut app = App::new(query, assignment, dimensions);

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (worker, search_handle) = SearchWorker::new(client, action_tx.clone());
    tokio::spawn(worker.run());

    let initial = app.initial_effects();
    handle_effects(
        initial,
        &search_handle,
        &mut navigator,
        session.as_mut(),
        &cli.session_key,
    );

    let mut terminal = worktray::tui::init()?;
    let mut events = EventHandler::new(Duration::from_secs(1));

    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => key_to_action(key, &app),
                    AppEvent::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(
                        effects,
                        &search_handle,
                        &mut navigator,
                        session.as_mut(),
                        &cli.session_key,
                    );
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(
                    effects,
                    &search_handle,
                    &mut navigator,
                    session.as_mut(),
                    &cli.session_key,
                );
            }
        }

        if app.should_quit {
            break;
        }
    }

    worktray::tui::restore()?;

    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(worktray::theme::BG_DARK)),
        area,
    );

    let layout = Layout::vertical([
        Constraint::Length(1), // controls line
        Constraint::Fill(1),   // process table
        Constraint::Length(1), // pagination bar
        Constraint::Length(1), // footer
    ])
    .split(area);

    widgets::controls::render(app, frame, layout[0]);
    widgets::process_list::render(app, frame, layout[1]);
    widgets::pagination_bar::render(app, frame, layout[2]);
    widgets::footer::render(app, frame, layout[3]);

    match app.overlay {
        Overlay::Filters => widgets::filter_panel::render(app, frame, area),
        Overlay::Help => widgets::help_overlay::render(frame, area),
        Overlay::None => {}
    }

    widgets::error_toast::render(app, frame, area);
}

fn handle_effects(
    effects: Vec<Effect>,
    search_handle: &worktray::worker::SearchHandle,
    navigator: &mut dyn Navigator,
    session: &mut dyn SessionStore,
    session_key: &str,
) {
    for effect in effects {
        match effect {
            Effect::Search { ticket, params } => {
                search_handle.send(SearchRequest { ticket, params });
            }
            Effect::PersistQuery(query) => {
                navigator.push_query(&query);
                session.save(session_key, &query);
            }
            Effect::Quit => {}
        }
    }
}

/// The fixed worktray filter dimensions. The patch dimension is
/// single-select and resets to fully-selected on clear: an unfiltered
/// worktray means "every patch in scope", not "no patches".
fn worktray_dimensions(assignment: Option<&PatchAssignment>) -> Vec<DimensionSpec> {
    let mut patch_options = Vec::new();
    if let Some(assignment) = assignment {
        patch_options.push(FilterOption::new(assignment.patch_id.clone(), "My patch"));
        if let Some(area_id) = &assignment.area_id {
            patch_options.push(FilterOption::new(area_id.clone(), "My area"));
        }
    }

    vec![
        DimensionSpec {
            dimension: FilterDimension::Patch,
            title: "Patches".to_string(),
            options: patch_options,
            single_select: true,
            default_full: true,
        },
        DimensionSpec {
            dimension: FilterDimension::ProcessNames,
            title: "Processes".to_string(),
            options: vec![
                FilterOption::new("soletojoint", "Sole to joint tenure"),
                FilterOption::new("changeofname", "Change of name"),
                FilterOption::new("tenurerecord", "Tenure record"),
                FilterOption::new("personrecord", "Person record"),
            ],
            single_select: false,
            default_full: false,
        },
        DimensionSpec {
            dimension: FilterDimension::Status,
            title: "Status".to_string(),
            options: vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("overdue", "Overdue"),
                FilterOption::new("completed", "Completed"),
                FilterOption::new("closed", "Closed"),
            ],
            single_select: false,
            default_full: false,
        },
    ]
}
