//! The `taxo` binary: argument parsing and pipeline invocation.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use taxo_cli::{pipeline, RunConfig};
use taxo_core::ComponentCheck;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("taxo")
        .version(taxo_cli::VERSION)
        .about("Curriculum content compiler")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compile")
                .about("Compile the content tree and generate both reports")
                .arg(
                    Arg::new("source")
                        .long("source")
                        .default_value("content")
                        .value_parser(value_parser!(PathBuf))
                        .help("Content source root"),
                )
                .arg(
                    Arg::new("build")
                        .long("build")
                        .default_value("build")
                        .value_parser(value_parser!(PathBuf))
                        .help("Build output root, recreated on every run"),
                )
                .arg(
                    Arg::new("dataset")
                        .long("dataset")
                        .default_value("dataset.csv")
                        .value_parser(value_parser!(PathBuf))
                        .help("Semicolon-delimited curriculum dataset export"),
                )
                .arg(
                    Arg::new("coverage-report")
                        .long("coverage-report")
                        .default_value("coverage_report.md")
                        .value_parser(value_parser!(PathBuf))
                        .help("Destination of the coverage report"),
                )
                .arg(
                    Arg::new("content-report")
                        .long("content-report")
                        .default_value("content_report.md")
                        .value_parser(value_parser!(PathBuf))
                        .help("Destination of the per-file content report"),
                )
                .arg(
                    Arg::new("skip-link-check")
                        .long("skip-link-check")
                        .action(ArgAction::SetTrue)
                        .help("Rewrite dynamic links without checking their targets"),
                )
                .arg(
                    Arg::new("check-component-folders")
                        .long("check-component-folders")
                        .action(ArgAction::SetTrue)
                        .help("Require files to live under their component's folder"),
                )
                .arg(
                    Arg::new("ignore-folder")
                        .long("ignore-folder")
                        .action(ArgAction::Append)
                        .help("Folder name excluded from the corpus (repeatable)"),
                ),
        )
}

fn config_from(args: &ArgMatches) -> RunConfig {
    let defaults = RunConfig::default();
    let path = |name: &str| args.get_one::<PathBuf>(name).cloned();
    let ignore_folders = match args.get_many::<String>("ignore-folder") {
        Some(values) => values.cloned().collect(),
        None => defaults.ignore_folders.clone(),
    };

    RunConfig {
        source_dir: path("source").unwrap_or(defaults.source_dir),
        build_dir: path("build").unwrap_or(defaults.build_dir),
        dataset_path: path("dataset").unwrap_or(defaults.dataset_path),
        coverage_report_path: path("coverage-report").unwrap_or(defaults.coverage_report_path),
        content_report_path: path("content-report").unwrap_or(defaults.content_report_path),
        skip_link_check: args.get_flag("skip-link-check"),
        component_check: args
            .get_flag("check-component-folders")
            .then(ComponentCheck::standard),
        ignore_folders,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("compile", args)) => {
            let config = config_from(args);
            let summary = pipeline::run(&config).context("compile pass failed")?;
            println!("Files processed: {}", summary.files_processed);
            println!("Drafts: {}", summary.drafts);
            println!("Unused images: {}", summary.unused_images);
            Ok(())
        }
        _ => Ok(()),
    }
}
