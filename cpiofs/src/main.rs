use std::io::{self, Write};

use clap::{crate_description, crate_name, crate_version, App, AppSettings, Arg, SubCommand};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let arg_archive = Arg::with_name("archive")
        .help("Archive file")
        .short("a")
        .long("archive")
        .required(true)
        .takes_value(true)
        .value_name("FILE");

    let arg_path = Arg::with_name("path")
        .help("Path inside the archive")
        .required(true)
        .value_name("PATH");

    let matches = App::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .help("Log lookups and handle activity")
                .short("v")
                .long("verbose")
                .global(true),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("List a directory")
                .arg(&arg_archive)
                .arg(
                    Arg::with_name("dir")
                        .help("Directory inside the archive (defaults to './')")
                        .value_name("DIR")
                        .default_value("./"),
                )
                .arg(
                    Arg::with_name("recursive")
                        .help("List subdirectories too")
                        .short("r")
                        .long("recursive"),
                ),
        )
        .subcommand(
            SubCommand::with_name("stat")
                .about("Show type, permissions and size of an entry")
                .arg(&arg_archive)
                .arg(&arg_path),
        )
        .subcommand(
            SubCommand::with_name("cat")
                .about("Write a file's contents to stdout")
                .arg(&arg_archive)
                .arg(&arg_path),
        )
        .subcommand(
            SubCommand::with_name("dump")
                .about("Print every record of the archive")
                .arg(&arg_archive),
        )
        .get_matches();

    let mut logger = env_logger::Builder::from_default_env();
    if matches.is_present("verbose") {
        logger
            .filter_module("cpiofs", LevelFilter::Debug)
            .filter_module("cpiofs_core", LevelFilter::Debug);
    }
    logger.init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (name, sub) = matches.subcommand();
    let sub = match sub {
        Some(sub) => sub,
        None => return Ok(()),
    };
    let archive = sub.value_of("archive").unwrap_or_default();

    match name {
        "list" => cpiofs::list(
            archive,
            sub.value_of("dir").unwrap_or("./"),
            sub.is_present("recursive"),
            &mut out,
        ),
        "stat" => cpiofs::stat(archive, sub.value_of("path").unwrap_or_default(), &mut out),
        "cat" => cpiofs::cat(archive, sub.value_of("path").unwrap_or_default(), &mut out),
        "dump" => cpiofs::dump(archive, &mut out),
        _ => Ok(()),
    }?;

    out.flush()?;
    Ok(())
}
