use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mindhub::providers::openrouter::OpenRouterProvider;
use mindhub::Inference;

mod commands;
mod configuration;
mod error;

use configuration::Settings;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a careful assistant for a shared knowledge base.";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the models inference accepts
    Models,

    /// Send one message and print the raw completion
    Complete {
        /// Message text
        message: String,

        /// Ranked models to route to; repeat for fallbacks
        #[arg(short, long = "model")]
        models: Vec<String>,

        #[arg(long, default_value_t = mindhub::inference::DEFAULT_MAX_TOKENS)]
        max_tokens: u32,

        #[arg(long, default_value_t = mindhub::inference::DEFAULT_TEMPERATURE)]
        temperature: f32,
    },

    /// Ask a yes-or-no question
    YesOrNo {
        question: String,

        /// System prompt framing the question
        #[arg(short, long, default_value = DEFAULT_SYSTEM_PROMPT)]
        prompt: String,
    },

    /// Pick one of several choices
    Choose {
        question: String,

        /// An allowed answer; repeat for each choice
        #[arg(short, long = "choice", required = true)]
        choices: Vec<String>,

        /// System prompt framing the question
        #[arg(short, long, default_value = DEFAULT_SYSTEM_PROMPT)]
        prompt: String,
    },

    /// Score a knowledge-base entry for accuracy, clarity and actionability
    Assess {
        /// Short summary of the entry
        #[arg(short, long)]
        summary: String,

        /// Full entry text
        #[arg(short, long)]
        context: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Ok(path) = dotenv::dotenv() {
        eprintln!("Loaded environment from {:?}", path);
    }
    let settings = Settings::new().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(settings.log.env_filter()?)
        .with_writer(std::io::stderr)
        .init();

    if let Command::Models = cli.command {
        return commands::models::execute();
    }

    let provider = OpenRouterProvider::new(settings.provider.into_config())?;
    let engine = Inference::new(provider);

    match cli.command {
        Command::Models => Ok(()),
        Command::Complete {
            message,
            models,
            max_tokens,
            temperature,
        } => commands::complete::execute(&engine, message, models, max_tokens, temperature).await,
        Command::YesOrNo { question, prompt } => {
            commands::decide::yes_or_no(&engine, &prompt, question).await
        }
        Command::Choose {
            question,
            choices,
            prompt,
        } => commands::decide::choose(&engine, &prompt, question, &choices).await,
        Command::Assess { summary, context } => {
            commands::decide::assess(&engine, &summary, &context).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choose() {
        let cli = Cli::parse_from([
            "mindhub", "choose", "Keep it?", "-c", "Yes", "-c", "No",
        ]);
        match cli.command {
            Command::Choose {
                question,
                choices,
                prompt,
            } => {
                assert_eq!(question, "Keep it?");
                assert_eq!(choices, vec!["Yes", "No"]);
                assert_eq!(prompt, DEFAULT_SYSTEM_PROMPT);
            }
            _ => panic!("Expected choose command"),
        }
    }

    #[test]
    fn test_choose_requires_choices() {
        assert!(Cli::try_parse_from(["mindhub", "choose", "Keep it?"]).is_err());
    }

    #[test]
    fn test_parse_complete_defaults() {
        let cli = Cli::parse_from(["mindhub", "complete", "hello"]);
        match cli.command {
            Command::Complete {
                models,
                max_tokens,
                temperature,
                ..
            } => {
                assert!(models.is_empty());
                assert_eq!(max_tokens, 4096);
                assert_eq!(temperature, 1.0);
            }
            _ => panic!("Expected complete command"),
        }
    }
}
