mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use flickboard::config::Config;
use flickboard::keyboard::{get_default_layout_yaml, load_default_layout};
use flickboard::session::{Script, Session};
use flickboard::TextComposer;

use cli::{CliArgs, CliCommand};

fn load_config(args: &CliArgs) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::load()),
    }
}

fn main() -> Result<()> {
    flickboard::tracing::init();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    match &args.command {
        CliCommand::Replay {
            script,
            layout,
            json,
        } => {
            let lockable = config.lockable()?;
            let layout = load_default_layout(layout.as_deref()).with_lockable_modifiers(&lockable);
            let script = Script::load(script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;

            let mut session = Session::new(config, layout, TextComposer::new());
            session.run(&script)?;

            let composer = session.sink();
            if *json {
                for event in composer.events() {
                    println!("{}", serde_json::to_string(event)?);
                }
            } else {
                for event in composer.events() {
                    println!("{:?}", event);
                }
            }
            println!("{}", serde_json::to_string(&composer.text())?);
        }
        CliCommand::Config => {
            print!("{}", config.to_yaml()?);
        }
        CliCommand::Layout => {
            print!("{}", get_default_layout_yaml());
        }
    }

    Ok(())
}
