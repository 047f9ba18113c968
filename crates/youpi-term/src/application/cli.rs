use std::io;

use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Shell;
use strum::VariantNames;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ArmName;
use crate::infrastructure::terminals::SUPPORTED_BAUDS;

pub const BIN_NAME: &str = "youpi2-minitel";

fn arg_log_level() -> Arg {
    return Arg::new("log-level")
        .long("log-level")
        .short('l')
        .env("YOUPI_LOG_LEVEL")
        .num_args(1)
        .default_value("info")
        .help("Log level (error, warn, info, debug, trace)");
}

fn arg_log_file() -> Arg {
    return Arg::new("log-file")
        .long("log-file")
        .num_args(1)
        .default_value("youpi2-minitel.log")
        .help("File receiving the logs. An empty value logs to stderr");
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions")
        .arg(
            Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options")
        .subcommand_required(true)
        .subcommand(Command::new("default").about("Prints the default configuration"));
}

pub fn build() -> Command {
    return Command::new(BIN_NAME)
        .about("Minitel operator console for the Youpi teaching arm")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(
            Arg::new(ConfigKey::MinitelDevice.to_string())
                .long(ConfigKey::MinitelDevice.to_string())
                .env("YOUPI_MINITEL_DEVICE")
                .num_args(1)
                .help(format!(
                    "Serial device the Minitel is plugged into [default: {}]",
                    Config::default(ConfigKey::MinitelDevice)
                )),
        )
        .arg(
            Arg::new(ConfigKey::MinitelBaud.to_string())
                .long(ConfigKey::MinitelBaud.to_string())
                .env("YOUPI_MINITEL_BAUD")
                .num_args(1)
                .help(format!(
                    "Line speed of the Minitel serial socket [default: {}]",
                    Config::default(ConfigKey::MinitelBaud)
                ))
                .value_parser(SUPPORTED_BAUDS.map(|baud| return baud.to_string())),
        )
        .arg(
            Arg::new(ConfigKey::ExitAllowed.to_string())
                .long(ConfigKey::ExitAllowed.to_string())
                .action(ArgAction::SetTrue)
                .help("Lets the operator leave the main menu with SOMMAIRE"),
        )
        .arg(
            Arg::new(ConfigKey::IdleTimeout.to_string())
                .long(ConfigKey::IdleTimeout.to_string())
                .num_args(1)
                .help(format!(
                    "Seconds without input before manual control homes the arm [default: {}]",
                    Config::default(ConfigKey::IdleTimeout)
                )),
        )
        .arg(
            Arg::new(ConfigKey::InfoTimeout.to_string())
                .long(ConfigKey::InfoTimeout.to_string())
                .num_args(1)
                .help(format!(
                    "Seconds the information page stays displayed [default: {}]",
                    Config::default(ConfigKey::InfoTimeout)
                )),
        )
        .arg(
            Arg::new(ConfigKey::Arm.to_string())
                .long(ConfigKey::Arm.to_string())
                .num_args(1)
                .help(format!(
                    "Arm backend [default: {}]",
                    Config::default(ConfigKey::Arm)
                ))
                .value_parser(ArmName::VARIANTS.to_vec()),
        )
        .arg(
            Arg::new(ConfigKey::MotionDelayMs.to_string())
                .long(ConfigKey::MotionDelayMs.to_string())
                .num_args(1)
                .help(format!(
                    "Duration of a simulated motion, in milliseconds [default: {}]",
                    Config::default(ConfigKey::MotionDelayMs)
                )),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("YOUPI_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                )),
        )
        .arg(arg_log_level())
        .arg(arg_log_file());
}

/// What the binary should do after parsing the command line.
pub enum Invocation {
    Run(ArgMatches),
    Done,
}

/// Handles the informational subcommands, leaving the console run to the
/// caller.
pub fn dispatch(matches: ArgMatches) -> Invocation {
    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(shell) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                generate(shell, &mut app, BIN_NAME, &mut io::stdout());
            }
            return Invocation::Done;
        }
        Some(("config", subcmd_matches)) => {
            if let Some(("default", _)) = subcmd_matches.subcommand() {
                println!("{}", Config::serialize_default(build()));
            }
            return Invocation::Done;
        }
        _ => return Invocation::Run(matches),
    }
}
