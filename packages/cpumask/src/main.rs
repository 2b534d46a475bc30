#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the cpumask tool.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! is impractical - it is covered by the integration tests that spawn the binary instead.

use std::io;
use std::process::ExitCode;

use argh::FromArgs;
use cpumask::{InputSource, RunInput, run};

/// CPU mask calculator - convert between core lists and hex masks.
#[derive(FromArgs)]
#[argh(
    example = "{command_name} -c '0,2,4-7'     # convert a core list to a mask",
    example = "{command_name} -m 0xff          # convert a mask to a core list",
    example = "{command_name} -c '0-3' -v      # verbose output",
    note = "Output: the hex mask (for a --cpumask parameter), the core list (for taskset -c) \
            and the core count.",
    note = "Use -h or --help to show this help. If an option is given more than once, the last \
            value is used."
)]
struct Args {
    /// cores as a comma-separated list of cores or ranges, e.g. '0,2,4-7' or '0-3,8,10-15'
    #[argh(option, short = 'c')]
    cores: Vec<String>,

    /// cpumask as a hexadecimal value, e.g. '0xff', 'ff' or '0x123abc'
    #[argh(option, short = 'm')]
    mask: Vec<String>,

    /// show detailed information
    #[argh(switch, short = 'v')]
    verbose: bool,
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let env_args = expand_short_help(std::env::args());

    let str_args: Vec<&str> = env_args.iter().map(String::as_str).collect();

    let program_name = str_args.first().copied().unwrap_or("cpumask");

    let args = match Args::from_args(&[program_name], str_args.get(1..).unwrap_or(&[])) {
        Ok(args) => args,
        Err(early_exit) => {
            return if early_exit.status.is_ok() {
                println!("{}", early_exit.output);
                ExitCode::SUCCESS
            } else {
                eprintln!("Error: {}", early_exit.output.trim_end());
                println!("{}", usage(program_name));
                ExitCode::FAILURE
            };
        }
    };

    let (mut cores, mut mask) = (args.cores, args.mask);

    let source = match (cores.pop(), mask.pop()) {
        (Some(cores), None) => InputSource::Cores(cores),
        (None, Some(mask)) => InputSource::Mask(mask),
        (Some(_), Some(_)) => {
            eprintln!("Error: cannot specify both --cores and --mask");
            return ExitCode::FAILURE;
        }
        (None, None) => {
            println!("{}", usage(program_name));
            return ExitCode::SUCCESS;
        }
    };

    let input = RunInput {
        source,
        verbose: args.verbose,
    };

    match run(&input, &mut io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Options that consume the argument after them as their value.
const OPTIONS_WITH_VALUE: &[&str] = &["-c", "--cores", "-m", "--mask"];

/// argh only knows the long form of the help flag, so we translate `-h` to `--help`.
///
/// The first argument is the program name and an argument following an option is that
/// option's value, so neither is translated.
fn expand_short_help(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut args = args.into_iter();
    let mut expanded: Vec<String> = args.next().into_iter().collect();

    let mut is_option_value = false;

    for arg in args {
        if is_option_value {
            is_option_value = false;
            expanded.push(arg);
        } else if arg == "-h" {
            expanded.push("--help".to_string());
        } else {
            is_option_value = OPTIONS_WITH_VALUE.contains(&arg.as_str());
            expanded.push(arg);
        }
    }

    expanded
}

/// The help text argh generates for `--help`.
fn usage(program_name: &str) -> String {
    Args::from_args(&[program_name], &["--help"])
        .map_or_else(|early_exit| early_exit.output, |_| String::new())
}
