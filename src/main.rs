//! # bspemit
//!
//! Runs the BSP emission stage over a solved map document and writes a
//! Quake III `IBSP` file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{error, info};

use bsp_emit::bsp::{compile, BspSink, IbspWriter};
use bsp_emit::config::EmitConfig;
use bsp_emit::document::Document;
use bsp_emit::error::Result;

fn build_cli() -> Command {
    Command::new("bspemit")
        .about("Emits IBSP arrays from a solved map document")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Solved map document (JSON)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Output file (defaults to INPUT with a .bsp extension)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Emit configuration (JSON)"),
        )
        .arg(
            Arg::new("keep_lights")
                .long("keep-lights")
                .action(ArgAction::SetTrue)
                .help("Keep light entities that have no targetname"),
        )
        .arg(
            Arg::new("no_write")
                .long("no-write")
                .action(ArgAction::SetTrue)
                .help("Run the pass without writing a file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Verbose output"),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    let Some(input) = matches.get_one::<PathBuf>("input") else {
        return Ok(());
    };

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EmitConfig::load(path)?,
        None => EmitConfig::default(),
    };
    if matches.get_flag("keep_lights") {
        config.keep_lights = true;
    }

    let mut doc = Document::load(input)?;

    let ctx = if matches.get_flag("no_write") {
        compile(&mut doc, config, None)?
    } else {
        let output = matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_else(|| input.with_extension("bsp"));
        let mut writer = IbspWriter::create(&output)?;
        compile(&mut doc, config, Some(&mut writer as &mut dyn BspSink))?
    };

    info!("{:9} light entities stripped", ctx.num_stripped_lights);
    info!("{:9} BSP planes", ctx.planes.len());
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let default_filter = if matches.get_flag("verbose") { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    info!("bspemit starting...");

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
