//! `browse`: the interactive list screen.
//!
//! One cooperative loop selects over stdin lines, debounced search emissions
//! and fetch completions. Each line is a short command (`/text` types into
//! the search box, `n` goes to the next page, `q` quits; see [`HELP`]).
//!
//! When stdin is not a terminal, each line is read only after the previous
//! one has settled (search emitted, fetch applied), so scripted input sees
//! the same pages a person would.

use std::io::IsTerminal;
use std::sync::Arc;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{AppContext, color_enabled};
use crate::api::ResourceEndpoint;
use crate::error::{HotelDeskError, Result};
use crate::list::filter::split_assignment;
use crate::list::{
    DebouncedInput, ListController, ListEndpoint, ListEvent, ListScreen, PageAction, PageSize,
    SortState, Toast,
};
use crate::screens::Resource;
use crate::session::SessionState;
use crate::with_screen;

const HELP: &str = "\
/<text>          type into the search box (debounced)
x                clear the search
n | p            next / previous page
first | last     first / last page
g <n>            go to page n
size <n>         page size (5, 10, 20, 50, 100)
f <key>=<value>  set a filter (empty value unsets it)
clear            clear search and filters
sort <column>    toggle sort on a column
sort <col>:<ord> sort by column, asc or desc
sort off         clear the sort
r                refresh
h                this help
q                quit";

/// One line of input on the browse screen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Type(String),
    ClearSearch,
    Page(PageAction),
    Size(PageSize),
    Filter { name: String, value: String },
    ClearAll,
    Sort(String),
    SetSort(Option<SortState>),
    Refresh,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line. Blank lines yield `None`.
    fn parse(line: &str) -> Result<Option<BrowseCommand>> {
        if let Some(text) = line.strip_prefix('/') {
            return Ok(Some(BrowseCommand::Type(text.to_string())));
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };
        let command = match (word, arg) {
            ("x", "") => BrowseCommand::ClearSearch,
            ("n" | "next", "") => BrowseCommand::Page(PageAction::Next),
            ("p" | "prev", "") => BrowseCommand::Page(PageAction::Previous),
            ("first", "") => BrowseCommand::Page(PageAction::First),
            ("last", "") => BrowseCommand::Page(PageAction::Last),
            ("g", n) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => BrowseCommand::Page(PageAction::GoTo(n - 1)),
                _ => return Err(invalid(line)),
            },
            ("size", n) => BrowseCommand::Size(n.parse()?),
            ("f", assignment) => {
                let (name, value) = split_assignment(assignment)?;
                BrowseCommand::Filter {
                    name: name.to_string(),
                    value: value.to_string(),
                }
            }
            ("clear", "") => BrowseCommand::ClearAll,
            ("sort", "off") => BrowseCommand::SetSort(None),
            ("sort", spec) if spec.contains(':') => {
                BrowseCommand::SetSort(Some(SortState::parse(spec)?))
            }
            ("sort", column) if !column.is_empty() => BrowseCommand::Sort(column.to_string()),
            ("r", "") => BrowseCommand::Refresh,
            ("h" | "help" | "?", "") => BrowseCommand::Help,
            ("q" | "quit", "") => BrowseCommand::Quit,
            _ => return Err(invalid(line)),
        };
        Ok(Some(command))
    }
}

fn invalid(line: &str) -> HotelDeskError {
    HotelDeskError::InvalidInput(format!("unrecognized command '{line}' (h for help)"))
}

pub async fn cmd_browse(resource: Resource) -> Result<()> {
    let ctx = AppContext::load()?;
    with_screen!(resource, S => run_browse::<S>(&ctx).await)
}

async fn run_browse<S: ListScreen>(ctx: &AppContext) -> Result<()> {
    let color = color_enabled();
    let endpoint = Arc::new(ResourceEndpoint::<S::Row>::new(ctx.client()?, S::RESOURCE));
    let window = ctx
        .config
        .debounce_override()
        .unwrap_or_else(S::search_debounce);

    let mut controller = ListController::<S, _>::mount(endpoint, ctx.config.list.page_size);
    let mut search = DebouncedInput::mount("", window);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let interactive = std::io::stdin().is_terminal();
    let mut session = ctx.session.subscribe();

    let title = S::RESOURCE.title();
    println!("{}", if color { title.bold().to_string() } else { title.to_string() });
    println!("Type h for help, q to quit.");
    print!("{}", controller.render(color));

    let outcome = loop {
        tokio::select! {
            line = lines.next_line(),
                if interactive || (search.is_settled() && !controller.is_fetching()) =>
            {
                let Some(line) = line? else { break Ok(()) };
                match BrowseCommand::parse(&line) {
                    Ok(Some(BrowseCommand::Quit)) => break Ok(()),
                    Ok(Some(command)) => apply(command, &mut controller, &mut search, color),
                    Ok(None) => {}
                    Err(e) => eprintln!("{}", Toast::error(e.to_string()).render(color)),
                }
            }
            Some(term) = search.next_search() => {
                tracing::debug!(term = %term, "search emitted");
                controller.set_search(term);
                announce_loading(&controller);
            }
            Some(event) = controller.next_event() => match event {
                ListEvent::Updated => print!("{}", controller.render(color)),
                ListEvent::Failed { toast, .. } => eprintln!("{}", toast.render(color)),
                ListEvent::SessionExpired(toast) => {
                    eprintln!("{}", toast.render(color));
                    break Err(HotelDeskError::SessionExpired);
                }
                ListEvent::Discarded => {}
            },
            Ok(()) = session.changed() => {
                if *session.borrow() == SessionState::Expired {
                    let hint = Toast::error(HotelDeskError::SessionExpired.to_string());
                    eprintln!("{}", hint.render(color));
                    break Err(HotelDeskError::SessionExpired);
                }
            }
        }
    };

    controller.unmount();
    search.unmount();
    outcome
}

fn announce_loading<S: ListScreen, E: ListEndpoint<S::Row>>(controller: &ListController<S, E>) {
    if controller.is_fetching() && !controller.records().is_empty() {
        println!("Loading...");
    }
}

fn apply<S: ListScreen, E: ListEndpoint<S::Row>>(
    command: BrowseCommand,
    controller: &mut ListController<S, E>,
    search: &mut DebouncedInput,
    color: bool,
) {
    let was_fetching = controller.is_fetching();
    let result = match command {
        BrowseCommand::Type(text) => {
            search.input(text);
            Ok(())
        }
        BrowseCommand::ClearSearch => {
            search.clear();
            Ok(())
        }
        BrowseCommand::Page(action) => {
            if !controller.navigate(action) {
                println!("{}", Toast::info("No such page").render(color));
            }
            Ok(())
        }
        BrowseCommand::Size(size) => {
            controller.set_page_size(size);
            Ok(())
        }
        BrowseCommand::Filter { name, value } => controller.set_filter(&name, &value),
        BrowseCommand::ClearAll => {
            search.clear();
            controller.clear_all();
            Ok(())
        }
        BrowseCommand::Sort(column) => controller.toggle_sort(&column),
        BrowseCommand::SetSort(sort) => controller.set_sort(sort),
        BrowseCommand::Refresh => {
            controller.refresh();
            Ok(())
        }
        BrowseCommand::Help => {
            print_help::<S>();
            Ok(())
        }
        BrowseCommand::Quit => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("{}", Toast::error(e.to_string()).render(color));
    } else if !was_fetching {
        announce_loading(controller);
    }
}

fn print_help<S: ListScreen>() {
    println!("{HELP}");
    let filters = S::filters();
    if !filters.is_empty() {
        println!("\nFilters:");
        for filter in filters {
            println!("  {:<14} {} ({})", filter.name, filter.label, filter.describe());
        }
    }
    let sortable: Vec<&str> = S::columns()
        .iter()
        .filter(|c| c.sortable)
        .map(|c| c.id)
        .collect();
    println!("\nSortable columns: {}", sortable.join(", "));
}
