//! Command-line front end for Dragon Nest.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use nest_config::Config;
use nest_domain::{
    DragonMood, GoalRange, Nest, NestKind, NestMood, NestProgress, ProgressionState,
};

use crate::{
    app::DragonNest,
    errors::{AppError, Result},
};

#[derive(Parser, Debug)]
#[command(name = "dragon_nest_cli")]
#[command(about = "Track spending in nests and raise your dragon", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base directory for configuration and data files
    #[arg(long, global = true, env = "DRAGON_NEST_HOME")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the dragon's level, XP and mood
    Status {
        /// Print the progression as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count today's visit (once per day)
    CheckIn,
    /// Manage nests
    Nest {
        #[command(subcommand)]
        action: NestCommand,
    },
    /// List nests with their progress and mood
    Nests,
    /// File an amount into a nest; expense nests earn XP
    #[command(alias = "log")]
    Expense {
        nest: String,
        amount: f64,
        /// A receipt photo was attached
        #[arg(long)]
        photo: bool,
        #[arg(long)]
        note: Option<String>,
    },
    /// Run the budget check and update the dragon's mood
    Evaluate,
    /// Override the dragon's mood
    Mood { mood: DragonMood },
}

#[derive(Subcommand, Debug)]
pub enum NestCommand {
    /// Create a nest
    Add {
        name: String,
        #[arg(long, default_value = "expense")]
        kind: NestKind,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        goal_min: Option<f64>,
        #[arg(long)]
        goal_max: Option<f64>,
    },
    /// Delete a nest and its transactions
    Remove { name: String },
}

/// Executes a parsed command against the application rooted at the chosen
/// data directory.
pub fn run_cli(cli: Cli) -> Result<()> {
    let base_dir = cli.data_dir.unwrap_or_else(Config::default_base_dir);
    let mut app = DragonNest::open(&base_dir)?;

    match cli.command {
        Command::Status { json } => {
            let state = app.progression();
            if json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print_progression(&state);
            }
        }
        Command::CheckIn => {
            let before = app.progression().last_login_day();
            let state = app.check_in()?;
            if state.last_login_day() == before {
                println!("Already checked in today.");
            } else {
                println!("Checked in. The dragon appreciates the visit.");
            }
            print_progression(&state);
        }
        Command::Nest { action } => run_nest_command(&mut app, action)?,
        Command::Nests => {
            let rows = app.overview();
            if rows.is_empty() {
                println!("No nests yet. Create one with `nest add <name>`.");
            }
            for row in rows {
                print_nest(&row, &app.config().currency);
            }
        }
        Command::Expense {
            nest,
            amount,
            photo,
            note,
        } => {
            let nest_id = app.find_nest(&nest)?.id;
            let logged = app.log_transaction(nest_id, amount, note, photo)?;
            println!(
                "Filed {:.2} {} into {}.",
                amount,
                app.config().currency,
                logged.nest.name
            );
            print_nest(&logged.nest, &app.config().currency);
            if let Some(state) = logged.progression {
                print_progression(&state);
            }
        }
        Command::Evaluate => {
            match app.evaluate_budgets()? {
                Some(state) => {
                    println!("Budgets evaluated.");
                    print_progression(&state);
                }
                None => {
                    println!("Budgets already evaluated today.");
                    print_progression(&app.progression());
                }
            }
        }
        Command::Mood { mood } => {
            let state = app.set_mood(mood)?;
            print_progression(&state);
        }
    }
    Ok(())
}

fn run_nest_command(app: &mut DragonNest, action: NestCommand) -> Result<()> {
    match action {
        NestCommand::Add {
            name,
            kind,
            budget,
            goal_min,
            goal_max,
        } => {
            let mut nest = Nest::new(name, kind);
            nest.budget = budget;
            nest.goal = match (goal_min, goal_max) {
                (Some(min), Some(max)) => Some(GoalRange::new(min, max)),
                (None, None) => None,
                _ => {
                    return Err(AppError::Input(
                        "--goal-min and --goal-max must be given together".into(),
                    ))
                }
            };
            let label = nest.name.clone();
            app.create_nest(nest)?;
            println!("Created {} nest `{}`.", kind, label);
        }
        NestCommand::Remove { name } => {
            let id = app.find_nest(&name)?.id;
            let removed = app.remove_nest(id)?;
            println!("Removed nest `{}`.", removed.name);
        }
    }
    Ok(())
}

fn print_progression(state: &ProgressionState) {
    println!(
        "Level {} ({}/{} XP, {} total)",
        state.level(),
        state.xp_into_level(),
        state.xp_per_level(),
        state.total_xp()
    );
    println!(
        "Mood: {} (score {})",
        paint_dragon_mood(state.mood()),
        state.mood_score()
    );
    println!("Last check-in: {}", state.last_login_day());
}

fn print_nest(row: &NestProgress, currency: &str) {
    let budget = row
        .budget
        .map(|amount| format!("{:.2} {}", amount, currency))
        .unwrap_or_else(|| "no budget".into());
    println!(
        "{:<20} spent {:>10.2} of {:<16} {:>5.1}%  {}",
        row.name,
        row.spent,
        budget,
        row.progress * 100.0,
        paint_nest_mood(row.mood)
    );
}

fn paint_dragon_mood(mood: DragonMood) -> colored::ColoredString {
    match mood {
        DragonMood::Happy => mood.label().green(),
        DragonMood::Neutral => mood.label().yellow(),
        DragonMood::Angry => mood.label().red(),
    }
}

fn paint_nest_mood(mood: NestMood) -> colored::ColoredString {
    let label = mood.to_string();
    match mood {
        NestMood::Positive => label.as_str().green(),
        NestMood::Neutral => label.as_str().yellow(),
        NestMood::Negative => label.as_str().red(),
    }
}
