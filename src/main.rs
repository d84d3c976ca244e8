use std::env;
use std::io::Read;
use std::process;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use coq2latex::diag::LogSink;
use coq2latex::error::Error;
use coq2latex::extract::Extractor;
use coq2latex::render::render_definition;
use coq2latex::rewrite::parse_rules;

fn main() {
    let mut relations = vec![];
    let mut verbose = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_usage();
                return;
            }
            _ => relations.push(arg),
        }
    }
    if relations.is_empty() {
        print_usage();
        process::exit(2);
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        log::error!("could not read stdin: {}", err);
        process::exit(1);
    }

    let mut diag = LogSink;
    let rules = match parse_rules(&input, &mut diag) {
        Ok(rules) => rules,
        Err(err) => {
            log::error!("could not parse rewrite rules: {}", err);
            process::exit(1);
        }
    };
    let extractor = match Extractor::new(&input) {
        Ok(extractor) => extractor,
        Err(err) => {
            log::error!("could not segment input: {}", err);
            process::exit(1);
        }
    };

    let mut failed = false;
    for relation in &relations {
        println!("% Inductive {}", relation);
        match extractor.extract(relation, &mut diag) {
            Ok(defs) => {
                for def in &defs {
                    println!("{}", render_definition(def, &rules, &mut diag));
                }
            }
            Err(Error::DeclarationNotFound(name)) => {
                log::warn!("no inductive declaration found for {}, skipping", name);
            }
            Err(err) => {
                log::error!("{}: {}", relation, err);
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "Usage: coq2latex [-v] <relation>...

Reads Coq source from stdin and writes one mathpartir inference-rule
block per constructor of each named inductive relation to stdout.

  -v, --verbose    trace rule parsing, renames and rule application"
    );
}
