use anyhow::{Result, bail};
use std::env;
use std::sync::Arc;
use syllabus_radar::cli::{self, Command};
use syllabus_radar::config::Config;
use syllabus_radar::context::{AppContext, StandardContext};
use syllabus_radar::controller::{UploadController, UploadRequest};
use syllabus_radar::model::display::{
    EMPTY_VIEW_MESSAGE, EventDisplay, format_window_header,
};
use syllabus_radar::model::{DateRange, FilterOptions, filter_and_sort};
use syllabus_radar::session;
use syllabus_radar::storage::LocalStorage;
use syllabus_radar::store::EventStore;
use syllabus_radar::text::DocumentExtractor;
use syllabus_radar::{logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let binary_name = args
        .first()
        .map(|a| {
            std::path::Path::new(a)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| a.clone())
        })
        .unwrap_or_else(|| "syllabus-radar".to_string());

    let parsed = match cli::parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run '{} --help' for usage.", binary_name);
            std::process::exit(2);
        }
    };

    if parsed.command == Command::Help {
        cli::print_help(&binary_name);
        return Ok(());
    }

    let ctx = StandardContext::new(parsed.root);
    let cfg = match Config::load_or_default(&ctx) {
        Ok(c) => c,
        Err(e) => {
            // A broken file is reported rather than silently replaced with defaults.
            eprintln!("Error loading configuration:\n{}", e);
            std::process::exit(1);
        }
    };

    let interactive = parsed.command == Command::Dashboard;
    if let Err(e) = logging::init(&ctx, cfg.log_filter(), !interactive) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let store: Arc<dyn EventStore> = Arc::new(LocalStorage::new(&ctx)?);

    match parsed.command {
        Command::Help => Ok(()),
        Command::Login(email) => {
            let identity = session::login(&ctx, store.as_ref(), &email)?;
            println!("Signed in as {}.", identity.email);
            Ok(())
        }
        Command::Logout => {
            if session::logout(&ctx)? {
                println!("Signed out.");
            } else {
                println!("Nobody was signed in.");
            }
            Ok(())
        }
        Command::WhoAmI => {
            match session::current(&ctx)? {
                Some(identity) => println!("{} ({})", identity.email, identity.user_id),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Command::Upload(path) => upload(&ctx, &cfg, store, &path).await,
        Command::List {
            view,
            type_filter,
            query,
        } => {
            let identity = require_identity(&ctx)?;
            let view = view.unwrap_or(cfg.default_view);
            let events = store.fetch_events(&identity.user_id, cfg.fetch_limit)?;
            let range = DateRange::for_view(view, chrono::Local::now().naive_local());
            let shown = filter_and_sort(&events, &FilterOptions::new(range, type_filter, &query));

            println!("{}", format_window_header(view, &range));
            if shown.is_empty() {
                println!("{}", EMPTY_VIEW_MESSAGE);
            }
            for event in &shown {
                println!("  {}", event.to_display_line());
            }
            Ok(())
        }
        Command::Documents => {
            let identity = require_identity(&ctx)?;
            let docs = store.list_documents(&identity.user_id)?;
            if docs.is_empty() {
                println!("No documents uploaded yet.");
            }
            for doc in docs {
                println!(
                    "{}  {}  {}",
                    doc.id,
                    doc.created_at.format("%Y-%m-%d %H:%M"),
                    doc.filename
                );
            }
            Ok(())
        }
        Command::Forget(document_id) => {
            let identity = require_identity(&ctx)?;
            let removed = store.delete_document(&identity.user_id, &document_id)?;
            println!("Deleted document {} and {} deadline(s).", document_id, removed);
            Ok(())
        }
        Command::Dashboard => {
            let Some(identity) = session::current(&ctx)? else {
                eprintln!(
                    "Not signed in. Run '{} login <email>' first.",
                    binary_name
                );
                std::process::exit(1);
            };
            tui::run(&cfg, store, identity).await
        }
    }
}

fn require_identity(ctx: &dyn AppContext) -> Result<session::Identity> {
    match session::current(ctx)? {
        Some(identity) => Ok(identity),
        None => bail!("Not signed in. Run 'syllabus-radar login <email>' first."),
    }
}

async fn upload(
    ctx: &dyn AppContext,
    cfg: &Config,
    store: Arc<dyn EventStore>,
    path: &std::path::Path,
) -> Result<()> {
    let identity = session::current(ctx)?;
    let controller = UploadController::new(
        store,
        Arc::new(DocumentExtractor::new(cfg.max_pages)),
        cfg.clone(),
    );

    let outcome = match UploadRequest::from_path(identity, path).await {
        Ok(request) => controller.handle(request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(response) => {
            println!("{}", response.message);
            for event in &response.events {
                println!("  {}", event.to_display_line());
            }
            if !response.preview.is_empty() {
                println!();
                println!("--- Text preview ---");
                println!("{}", response.preview);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Error ({}): {}", e.status_code(), e);
            std::process::exit(1);
        }
    }
}
