use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Element;
use crate::domain::models::ProductRecord;
use crate::domain::services::initial_turn;
use crate::domain::services::render_conversation;
use crate::domain::services::title;
use crate::domain::services::BubbleList;
use crate::domain::services::ConversationLog;
use crate::domain::services::DisplaySettings;

const HOTKEYS_TEXT: &str = "HOTKEYS:
- Up / Down, k / j: Scroll one line.
- PageUp / PageDown, CTRL+U / CTRL+D: Scroll one page.
- Home / End, g / G: Jump to the first or last recommendation.
- q, Esc, CTRL+C: Quit.";

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn debug_log_dir() -> path::PathBuf {
    if let Ok(log_dir) = env::var("CURATOR_LOG_DIR") {
        return path::PathBuf::from(log_dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("curator");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_conversation(width: usize) -> Result<()> {
    let settings = DisplaySettings::from_config();
    let conversation = Config::get(ConfigKey::Conversation);
    let span = tracing::info_span!("print", conversation = conversation.as_str());

    let mut turns = vec![initial_turn()];
    if !conversation.is_empty() {
        let messages = ConversationLog::load(path::Path::new(&conversation)).await?;
        turns.extend(render_conversation(&messages, &settings, &span)?);
    }

    let mut bubble_list = BubbleList::default();
    bubble_list.set_turns(&turns, width);

    if let Element::Heading(heading) = title(&settings) {
        println!("{}\n", Paint::new(heading).bold().underline());
    }
    println!("{}", bubble_list.as_plain_text());

    return Ok(());
}

async fn print_product(file: Option<&String>) -> Result<()> {
    let file_path = file.map(|file| return path::Path::new(file));
    let payload = ConversationLog::read_payload(file_path).await?;
    let span = tracing::info_span!("parse");

    let record = ProductRecord::from_payload(&payload, &span)?;
    print!("{}", serde_yaml::to_string(&record)?);

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for Curator")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Curator with environment variable RUST_LOG=curator")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

fn subcommand_parse() -> Command {
    return Command::new("parse")
        .about("Parses a single recommendation and prints the product record as YAML.")
        .arg(
            clap::Arg::new("file")
                .short('f')
                .long("file")
                .help("File containing the recommendation text. Reads from stdin when omitted.")
                .num_args(1),
        );
}

fn subcommand_print() -> Command {
    return Command::new("print")
        .about("Prints the conversation to stdout without starting the interface.")
        .arg(
            clap::Arg::new("width")
                .short('w')
                .long("width")
                .help("Width in columns to wrap chat bubbles at.")
                .num_args(1)
                .default_value("80")
                .value_parser(value_parser!(usize)),
        );
}

fn arg_config(key: ConfigKey, help: &str) -> Arg {
    let env_name = format!(
        "CURATOR_{}",
        key.to_string().replace('-', "_").to_uppercase()
    );

    let mut help = help.to_string();
    let default_value = Config::default(key);
    if !default_value.is_empty() {
        help = format!("{help} [default: {default_value}]");
    }

    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env_name)
        .num_args(1)
        .help(help)
        .global(true);
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    let hotkeys_text = HOTKEYS_TEXT
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            return Paint::new(line).underline().bold().to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    return Command::new("curator")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("view").about("Opens the conversation in the terminal interface."))
        .subcommand(subcommand_print())
        .subcommand(subcommand_parse())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("CURATOR_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            arg_config(ConfigKey::Conversation, "Path to a YAML or JSON conversation log to display.")
                .short('l'),
        )
        .arg(arg_config(ConfigKey::AppName, "Title shown at the top of the conversation."))
        .arg(arg_config(ConfigKey::AssistantName, "Name displayed on the assistant's chat bubbles."))
        .arg(arg_config(ConfigKey::Username, "Your name displayed on your own chat bubbles."))
        .arg(arg_config(ConfigKey::ImageDir, "Directory product images are resolved against."))
        .arg(arg_config(ConfigKey::ProductURL, "Link opened by the product page button."))
        .arg(arg_config(ConfigKey::StockStatusWarning, "Stock status that triggers the low stock advisory."))
        .arg(arg_config(ConfigKey::StockStatusOutOfStock, "Stock status that triggers the out of stock advisory."))
        .arg(arg_config(ConfigKey::StockWarningMessage, "Message shown for products with a low stock status."))
        .arg(arg_config(ConfigKey::StockOutOfStockMessage, "Message shown for products that are out of stock."));
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = debug_log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("parse", subcmd_matches)) => {
            print_product(subcmd_matches.get_one::<String>("file")).await?;
            return Ok(false);
        }
        Some(("print", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            let width = subcmd_matches
                .get_one::<usize>("width")
                .copied()
                .unwrap_or(80);
            print_conversation(width).await?;
            return Ok(false);
        }
        Some(("view", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
