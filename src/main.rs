use clap::{Parser, Subcommand};
use liftoff::commands;
use liftoff::core::error::{LiftError, print_error};

/// Scripted, rollback-aware release automation
#[derive(Parser)]
#[command(name = "liftoff")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct LiftoffCli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write a commented starter liftoff.toml
  Init,

  /// Show the pipeline that `run` would execute
  Plan {
    /// Output the pipeline in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Execute the release pipeline
  Run {
    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    yes: bool,
    /// Release this version instead of prompting for one
    #[arg(long, value_name = "VERSION")]
    set_version: Option<String>,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Cyan))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = LiftoffCli::parse();

  let workdir = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let result = match cli.command {
    Commands::Init => commands::run_init(&workdir),
    Commands::Plan { json } => commands::run_plan(&workdir, json),
    Commands::Run { yes, set_version } => commands::run_release(&workdir, yes, set_version),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: LiftError) -> ! {
  print_error(&err);
  std::process::exit(1);
}
