use std::env;
use std::process;

use clap::{App, Arg};

use weighted_sokoban::taboo::taboo_cells;
use weighted_sokoban::{LoadWarehouse, Solve};

fn main() {
    env_logger::init();

    let matches = App::new("weighted-sokoban")
        .arg(
            Arg::with_name("taboo")
                .short("-t")
                .long("--taboo")
                .help("print taboo cells instead of solving"),
        )
        .arg(
            Arg::with_name("status")
                .short("-s")
                .long("--status")
                .help("print progress and statistics while solving"),
        )
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = matches.value_of("file").unwrap();

    let warehouse = path.load_warehouse().unwrap_or_else(|err| {
        let current_dir = env::current_dir().unwrap();
        println!("Can't load level {} in {}: {}", path, current_dir.display(), err);
        process::exit(1);
    });

    if matches.is_present("taboo") {
        println!("{}", taboo_cells(&warehouse));
        return;
    }

    println!("Solving {}...", path);
    let print_status = matches.is_present("status");
    let solver_ok = warehouse.solve(print_status).unwrap_or_else(|err| {
        println!("Can't solve: {}", err);
        process::exit(1);
    });

    if print_status {
        println!("{}", solver_ok.stats);
    }
    match solver_ok.solution {
        Some(solution) => {
            println!("Found solution:");
            let actions: Vec<_> = solution.actions.iter().map(|a| a.to_string()).collect();
            println!("{}", actions.join(" "));
            println!("Moves: {}", solution.actions.len());
            println!("Total cost: {}", solution.total_cost);
        }
        None => println!("No solution"),
    }
}
