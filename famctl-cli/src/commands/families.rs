//! Family queries from the command line
//!
//! `famctl families list [--search TERM]` and `famctl families show USER_ID`.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use famctl_core::{Family, FamilyDetail, FamilyService};
use famctl_server::UserRepo;

#[derive(Parser, Debug)]
pub struct FamiliesArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: FamiliesCommand,
}

#[derive(Subcommand, Debug)]
pub enum FamiliesCommand {
    /// List non-admin families with their children
    List {
        /// Case-insensitive match on parent name/email or child name
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Show one family with each child's tutors
    Show {
        /// User id of the parent account
        user_id: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub async fn run_families(args: FamiliesArgs) -> Result<()> {
    let pool = super::connect(args.database_url).await?;
    let service = FamilyService::new(UserRepo::new(&pool));

    let output = match args.command {
        FamiliesCommand::List { search } => {
            let families = service
                .list_families(search.as_deref())
                .await
                .context("Failed to list families")?;
            match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&families)?,
                OutputFormat::Text => render_families(&families),
            }
        }
        FamiliesCommand::Show { user_id } => {
            let detail = service
                .get_family_detail(user_id)
                .await
                .context("Failed to load family")?
                .with_context(|| format!("No user with id {user_id}"))?;
            match args.format {
                OutputFormat::Json => serde_json::to_string_pretty(&detail)?,
                OutputFormat::Text => render_detail(&detail),
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn render_families(families: &[Family]) -> String {
    if families.is_empty() {
        return "No families found".to_string();
    }

    let mut out = String::new();
    for family in families {
        let user = &family.user;
        let _ = writeln!(
            out,
            "#{} {} {} <{}>",
            user.id, user.firstname, user.lastname, user.email
        );
        for child in &family.children {
            let _ = writeln!(out, "  - #{} {} {}", child.id, child.firstname, child.lastname);
        }
    }
    out
}

fn render_detail(detail: &FamilyDetail) -> String {
    let user = &detail.user;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} {} {} <{}>",
        user.id, user.firstname, user.lastname, user.email
    );
    if let Some(phone) = &user.phone_number {
        let _ = writeln!(out, "  phone: {phone}");
    }
    if let Some(address) = &user.address {
        let _ = writeln!(out, "  address: {address}");
    }

    if detail.children.is_empty() {
        out.push_str("  (no children)\n");
    }
    for entry in &detail.children {
        let child = &entry.child;
        let _ = write!(out, "  - #{} {} {}", child.id, child.firstname, child.lastname);
        if let Some(birthdate) = child.birthdate {
            let _ = write!(out, " (born {birthdate})");
        }
        out.push('\n');
        if let Some(allergy) = &child.allergy {
            let _ = writeln!(out, "      allergy: {allergy}");
        }
        for tutor in &entry.tutors {
            let _ = writeln!(
                out,
                "      tutor #{} {} {}",
                tutor.id, tutor.firstname, tutor.lastname
            );
        }
    }
    out
}
