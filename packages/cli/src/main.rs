use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

/// prefstore - load a preferences XML file and inspect it
#[derive(Parser, Debug)]
#[command(name = "prefstore")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Preferences XML file to load (defaults to $PREF2GO_XML_FILE)
    #[arg(long, global = true)]
    xml_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every loaded preference
    Dump {
        /// Emit a JSON snapshot instead of the text listing
        #[arg(long)]
        json: bool,
    },
    /// Print one value
    Get {
        /// Node path, e.g. /com/example/app
        path: String,
        key: String,
        /// Look in the system tree instead of the user tree
        #[arg(long)]
        system: bool,
    },
    /// List the keys of a node
    Keys {
        path: String,
        #[arg(long)]
        system: bool,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let request = match args.command {
        Command::Dump { json } => commands::Request::Dump { json },
        Command::Get { path, key, system } => commands::Request::Get { path, key, system },
        Command::Keys { path, system } => commands::Request::Keys { path, system },
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match commands::run(args.xml_file, request, &mut out) {
        Ok(commands::Outcome::Found) => {}
        Ok(commands::Outcome::Missing) => {
            let _ = out.flush();
            std::process::exit(1);
        }
        Err(e) => {
            let _ = out.flush();
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
