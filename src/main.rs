use clap::{Arg, ArgAction, Command, value_parser};
use sgftree::SgfParser;
use sgftree::model::Property;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("sgftree")
        .about("Decodes SGF game records and prints a summary per game")
        .arg(
            Arg::new("file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("SGF file to decode"),
        )
        .arg(
            Arg::new("lax")
                .long("lax")
                .action(ArgAction::SetTrue)
                .help("Skip bytes that violate the grammar instead of failing"),
        )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let lax = matches.get_flag("lax");
    let Some(path) = matches.get_one::<PathBuf>("file") else {
        return ExitCode::FAILURE;
    };
    let file = path.display();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{file}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let games = match SgfParser::new().with_lax_reading(lax).load(&bytes) {
        Ok(games) => games,
        Err(err) => {
            eprintln!("{file}: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{file}: {} game(s)", games.len());
    for (i, tree) in games.iter().enumerate() {
        let root = tree.root();
        let (width, height) = tree.board_size();
        println!(
            "  #{}: {} vs {}, {}x{}, komi {}, {} nodes, main line {} moves",
            i + 1,
            root.get(Property::PlayerBlack).unwrap_or("?"),
            root.get(Property::PlayerWhite).unwrap_or("?"),
            width,
            height,
            tree.komi(),
            tree.num_nodes(),
            tree.main_line().filter(|&n| tree[n].move_color().is_some()).count(),
        );
    }

    ExitCode::SUCCESS
}
