use chrono::Local;
use clap::Parser;
use fyq::application::{
    parse_vars, QuarterReportService, RunOptions, RunReportsService, TagOptions, TagRecordsService,
};
use fyq::cli::{output, Cli, Commands};
use fyq::domain::colors;
use fyq::error::FyqError;
use fyq::infrastructure::latest_file;
use regex::Regex;

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn run(cli: Cli) -> Result<(), FyqError> {
    match cli.command {
        Commands::Quarter { reference } => {
            let reference = reference.unwrap_or_else(today);
            let summary = QuarterReportService::summary(&reference)?;
            print!("{}", output::format_summary(&summary));
            Ok(())
        }
        Commands::History { reference, count } => {
            let reference = reference.unwrap_or_else(today);
            let ranges = QuarterReportService::history(&reference, count)?;
            print!("{}", output::format_history(&ranges));
            Ok(())
        }
        Commands::Tag {
            input,
            rules,
            output: out_path,
            drop,
        } => {
            let options = TagOptions {
                input,
                rules,
                output: out_path,
                drop,
            };
            let report = TagRecordsService::execute(&options)?;

            eprint!("{}", output::format_dropped(&report.dropped));
            print!("{}", output::format_tallies(&report.tallies));
            match &report.written {
                Some(path) => println!("Wrote {} records to {}", report.tagged, path.display()),
                None => println!("Classified {} records (no output written)", report.tagged),
            }
            Ok(())
        }
        Commands::Latest { dir, pattern } => {
            let pattern = Regex::new(&pattern)?;
            let path = latest_file(&dir, &pattern)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Colors {
            names,
            find,
            exclude,
        } => {
            if !names.is_empty() {
                print!("{}", output::format_exact(&colors::exact(&names)));
            } else if !find.is_empty() {
                print!("{}", output::format_swatches(&colors::matching(&find)));
            } else if !exclude.is_empty() {
                print!("{}", output::format_swatches(&colors::excluding(&exclude)));
            } else {
                print!("{}", output::format_swatches(colors::PALETTE));
            }
            Ok(())
        }
        Commands::Run {
            config,
            scripts,
            vars,
            out,
            only,
        } => {
            let options = RunOptions {
                config,
                scripts,
                vars: parse_vars(&vars)?,
                out_dir: out,
                only,
            };
            let written = RunReportsService::execute(&options)?;
            for path in &written {
                println!("{}", path.display());
            }
            if written.is_empty() {
                eprintln!("No tables matched the export pattern");
            }
            Ok(())
        }
    }
}
