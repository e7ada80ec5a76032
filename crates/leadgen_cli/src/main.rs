//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal terminal adapter over `leadgen_core`.
//! - Walk one scripted session (filter, select, move, notes, views) so core
//!   wiring can be checked without a UI.
//!
//! Usage: `leadgen_cli [--config config.yaml] [--user <username>] [--leads leads.json]`

use clap::Parser;
use leadgen_core::{
    init_logging_from_config, AppConfig, ConfigAuthProvider, FilterQuery, JsonFileLeadSource,
    LeadField, LeadId, LeadSession, LeadSource, SampleLeadSource, SessionError, Table,
    NO_LEADS_MESSAGE,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "leadgen_cli", version, about = "Scripted lead workbench session")]
struct Args {
    /// YAML file with credentials, roles and the optional logging section.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
    /// Logged-in user id; omitted means no login was attempted.
    #[arg(long)]
    user: Option<String>,
    /// JSON array of lead rows; the built-in sample table is used otherwise.
    #[arg(long)]
    leads: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Config is the auth collaborator; without it no lead data is shown.
    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging_from_config(config.logging.as_ref()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let auth = ConfigAuthProvider::new(&config, args.user.clone());
    let json_source = args.leads.as_ref().map(JsonFileLeadSource::new);
    let source: &dyn LeadSource = match &json_source {
        Some(source) => source,
        None => &SampleLeadSource,
    };

    let mut session = match LeadSession::open(&auth, source, config.clone()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run_demo(&mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo(session: &mut LeadSession<AppConfig>) -> Result<(), SessionError> {
    println!("{}", session.identity().welcome_message());
    println!("leadgen_core version={}", leadgen_core::core_version());

    println!("\n# Lead Generation");
    let filters: Vec<&str> = session
        .filterable_fields()
        .into_iter()
        .map(LeadField::as_str)
        .collect();
    println!("filters: {}", filters.join(", "));

    let all = session.visible_leads(&FilterQuery::new())?.ids();
    print_leads(&all, session);

    let query = FilterQuery::new().with_search(LeadField::City, "berlin");
    let visible = session.visible_leads(&query)?.ids();
    println!("\nsearch ort~\"berlin\": {}", visible.join(", "));

    if let Some(first) = visible.first() {
        let neighbors = session.open_notes(&visible, first)?;
        session.save_note(first, "Erstkontakt per E-Mail")?;
        println!(
            "note {first}: {:?} (next={:?})",
            session.note(first),
            neighbors.next
        );
        session.close_notes();
    }

    session.select_all_visible(&visible, true);
    let assignee = if session.identity().role.is_manager() {
        match session.assignee_candidates() {
            Ok(candidates) => candidates.first().map(|rep| rep.user_id.clone()),
            Err(err) if err.is_warning() => {
                println!("warning: {err}");
                None
            }
            Err(err) => return Err(err),
        }
    } else {
        None
    };
    match session.move_selected_today(assignee.as_deref()) {
        Ok(count) => println!("{count} leads moved successfully!"),
        Err(err) if err.is_warning() => println!("warning: {err}"),
        Err(err) => return Err(err),
    }

    println!("\n# Moved Leads");
    print_table(&session.selected_view(), "No leads have been moved yet.");

    println!("\n# My Assigned Leads");
    let view = session.assigned_view();
    println!("## {}", view.heading());
    print_table(&view.table(), "You do not have any assigned leads.");
    Ok(())
}

fn print_leads(ids: &[LeadId], session: &LeadSession<AppConfig>) {
    if ids.is_empty() {
        println!("{NO_LEADS_MESSAGE}");
        return;
    }
    for id in ids {
        if let Some(lead) = session.store().get(id) {
            let mark = if session.selection().contains(id) { "x" } else { " " };
            println!("[{mark}] {:<20} {:<12} {}", lead.name, lead.city, lead.industry);
        }
    }
}

fn print_table(table: &Table, empty_message: &str) {
    if table.is_empty() {
        println!("{empty_message}");
        return;
    }
    println!("{}", table.columns.join(" | "));
    for row in &table.rows {
        println!("{}", row.join(" | "));
    }
}
