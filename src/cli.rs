use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::list::PageSize;
use crate::screens::Resource;

#[derive(Parser)]
#[command(name = "hoteldesk")]
#[command(about = "Admin client for hotel and restaurant management APIs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one page of a resource
    #[command(visible_alias = "ls")]
    List {
        /// Resource to list (see `hoteldesk resources`)
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Page size: 5, 10, 20, 50 or 100 (default: list.page_size)
        #[arg(short, long, value_parser = parse_page_size)]
        limit: Option<PageSize>,

        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Filter as key=value (repeatable)
        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Sort as column or column:asc|desc
        #[arg(long, value_name = "COLUMN[:ORDER]")]
        sort: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive list screen with debounced search and paging
    #[command(visible_alias = "b")]
    Browse {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
    },

    /// Show the available resources, their filters and sortable columns
    Resources {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Store an API token (read from stdin when omitted)
    Login {
        token: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the stored API token
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get one configuration value
    Get {
        /// Key, e.g. api.base_url
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set one configuration value
    Set {
        /// Key, e.g. list.page_size
        key: String,
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_resource(s: &str) -> Result<Resource, String> {
    s.parse().map_err(|_| {
        let valid: Vec<&str> = Resource::ALL.iter().map(|r| r.as_str()).collect();
        format!("unknown resource '{s}'. Must be one of: {}", valid.join(", "))
    })
}

fn parse_page_size(s: &str) -> Result<PageSize, String> {
    s.parse().map_err(|e: crate::error::HotelDeskError| e.to_string())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "hoteldesk", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_flags() {
        let cli = Cli::try_parse_from([
            "hoteldesk", "list", "bookings", "--page", "2", "--limit", "20", "-f",
            "status=confirmed", "-f", "startDate=2024-01-01", "--sort", "checkIn:desc",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                resource,
                page,
                limit,
                filters,
                sort,
                ..
            } => {
                assert_eq!(resource, Resource::Bookings);
                assert_eq!(page, 2);
                assert_eq!(limit, Some(PageSize::Twenty));
                assert_eq!(filters.len(), 2);
                assert_eq!(sort.as_deref(), Some("checkIn:desc"));
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_rejects_unknown_resource_and_page_size() {
        assert!(Cli::try_parse_from(["hoteldesk", "list", "suites"]).is_err());
        assert!(Cli::try_parse_from(["hoteldesk", "list", "rooms", "--limit", "15"]).is_err());
    }
}
