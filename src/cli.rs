// File: ./src/cli.rs
//! Command-line parsing and help text.
use crate::model::{TypeFilter, View};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard,
    Login(String),
    Logout,
    WhoAmI,
    Upload(PathBuf),
    List {
        view: Option<View>,
        type_filter: TypeFilter,
        query: String,
    },
    Documents,
    Forget(String),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub command: Command,
}

/// Parses everything after the binary name.
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut root = None;
    let mut rest: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-r" | "--root" => {
                let path = iter.next().ok_or("--root needs a path")?;
                root = Some(PathBuf::from(path));
            }
            "-h" | "--help" | "help" => {
                return Ok(CliArgs {
                    root,
                    command: Command::Help,
                });
            }
            other => rest.push(other),
        }
    }

    let command = match rest.as_slice() {
        [] | ["dashboard"] => Command::Dashboard,
        ["login", email] => Command::Login(email.to_string()),
        ["login"] => return Err("login needs an email address".to_string()),
        ["logout"] => Command::Logout,
        ["whoami"] => Command::WhoAmI,
        ["upload", file] => Command::Upload(PathBuf::from(*file)),
        ["upload"] => return Err("upload needs a file".to_string()),
        ["list", flags @ ..] => parse_list(flags)?,
        ["documents"] => Command::Documents,
        ["forget", id] => Command::Forget(id.to_string()),
        ["forget"] => return Err("forget needs a document id".to_string()),
        [other, ..] => return Err(format!("Unknown command: '{}'", other)),
    };

    Ok(CliArgs { root, command })
}

fn parse_list(flags: &[&str]) -> Result<Command, String> {
    let mut view = None;
    let mut type_filter = TypeFilter::All;
    let mut query = String::new();

    let mut iter = flags.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("{} needs a value", flag))?;
        match *flag {
            "--view" | "-v" => {
                view = Some(
                    View::from_str(value).map_err(|_| format!("Unknown view: '{}'", value))?,
                );
            }
            "--type" | "-t" => type_filter = TypeFilter::from_str(value)?,
            "--query" | "-q" => query = value.to_string(),
            other => return Err(format!("Unknown option for list: '{}'", other)),
        }
    }

    Ok(Command::List {
        view,
        type_filter,
        query,
    })
}

pub fn print_help(binary_name: &str) {
    println!(
        "Syllabus Radar v{} - Find the deadlines in your syllabus",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [command]", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    dashboard                 Interactive dashboard (default)");
    println!("    login <email>             Sign in (creates the account on first use)");
    println!("    logout                    Sign out");
    println!("    whoami                    Show who is signed in");
    println!("    upload <file>             Read a syllabus (.pdf, .txt, .md) and save its deadlines");
    println!("    list [options]            Print deadlines for a view");
    println!("    documents                 List uploaded documents");
    println!("    forget <document-id>      Delete a document and its deadlines");
    println!();
    println!("LIST OPTIONS:");
    println!("    -v, --view <view>         tomorrow | week | month | all");
    println!("    -t, --type <type>         all | exam | quiz | assignment | project | reading | other");
    println!("    -q, --query <text>        Match title, due text or type");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>         Use a different directory for config and data.");
    println!("    -h, --help                Show this help message.");
    println!();
    println!("EXAMPLES:");
    println!("    {} login me@school.edu", binary_name);
    println!("    {} upload ~/Downloads/CS101-syllabus.pdf", binary_name);
    println!("    {} list --view month --type exam", binary_name);
    println!("    {} list -v all -q essay", binary_name);
    println!();
    println!("DASHBOARD KEYS:");
    println!("    t/w/m/a  Tomorrow / This Week / This Month / All Upcoming");
    println!("    /        Search    f/F  Cycle type filter    r  Reload    q  Quit");
}
