use clap::{Parser, Subcommand};
use crate::models::ResourceKind;

#[derive(Parser)]
#[command(name = "uniadmin")]
#[command(about = "Terminal admin console for a university records REST API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List records with client-side search and pagination
    List {
        /// Resource collection (students, departments, courses, addresses, enrollments, fees)
        resource: String,

        /// Search term matched against the resource's text fields
        #[arg(short, long)]
        search: Option<String>,

        /// Page number (1-based, 8 records per page)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print every matching record instead of a single page
        #[arg(long)]
        all: bool,
    },

    /// Fetch a single record by id and print it as JSON
    Get {
        /// Resource collection
        resource: String,

        /// Record id
        id: i64,
    },

    /// Create a record from a JSON body
    Create {
        /// Resource collection
        resource: String,

        /// JSON request body; prefix with '@' to read from a file
        #[arg(short, long)]
        data: String,
    },

    /// Replace a record by id from a JSON body
    Update {
        /// Resource collection
        resource: String,

        /// Record id
        id: i64,

        /// JSON request body; prefix with '@' to read from a file
        #[arg(short, long)]
        data: String,
    },

    /// Delete a record by id
    Delete {
        /// Resource collection
        resource: String,

        /// Record id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Launch the interactive terminal UI
    Tui,
}

impl Commands {
    pub fn parse_resource(resource: &str) -> Result<ResourceKind, anyhow::Error> {
        match resource.to_lowercase().as_str() {
            "students" | "student" => Ok(ResourceKind::Students),
            "departments" | "department" => Ok(ResourceKind::Departments),
            "courses" | "course" => Ok(ResourceKind::Courses),
            "addresses" | "address" => Ok(ResourceKind::Addresses),
            "enrollments" | "enrollment" => Ok(ResourceKind::Enrollments),
            "fees" | "fee" => Ok(ResourceKind::Fees),
            other => Err(anyhow::anyhow!(
                "Unknown resource: {}. Supported resources: students, departments, courses, addresses, enrollments, fees",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource() {
        assert_eq!(
            Commands::parse_resource("students").unwrap(),
            ResourceKind::Students
        );
        assert_eq!(
            Commands::parse_resource("Fee").unwrap(),
            ResourceKind::Fees
        );
        assert!(Commands::parse_resource("invoices").is_err());
    }
}
