/// Main entry point for the FitTrack interactive client
///
/// This file sets up logging, parses command line arguments, resolves the
/// database location and runs the terminal front-end. The front-end is a thin
/// collaborator: every action funnels into the library's FitTracker facade.

use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use fittrack::{
    ExerciseDraft, FitTracker, SetDraft, SqliteRepository, TriggerResult, WorkoutDraft,
    WorkoutType,
};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        // 1. User's home directory (preferred)
        dirs::home_dir().map(|mut p| {
            p.push(".fittrack");
            p
        }),
        // 2. User's data directory (platform-specific)
        dirs::data_dir().map(|mut p| {
            p.push("fittrack");
            p
        }),
        // 3. Current working directory (last resort)
        std::env::current_dir().ok().map(|mut p| {
            p.push(".fittrack");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            let mut db_path = potential_path.clone();
            db_path.push("history.db");
            return Ok(db_path);
        }
    }

    // Ultimate fallback: use a temporary directory
    let mut temp_path = std::env::temp_dir();
    temp_path.push("fittrack");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push("history.db");

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the FitTrack client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long)]
    database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up logging based on command line flags
    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("fittrack={}", log_level))
        .with_writer(std::io::stderr) // Keep the terminal clean for the UI
        .init();

    info!("Starting FitTrack client");

    // Determine database path
    let db_path = match args.database {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            path
        }
        None => get_default_database_path()?,
    };

    info!("Using database at: {}", db_path.display());

    let app = FitTracker::open(db_path)?;
    run_console(app).await?;

    info!("FitTrack client shutdown complete");
    Ok(())
}

/// Line-oriented terminal front-end
///
/// Reads one command per line from stdin. All mutation and the single
/// in-flight analysis go through the FitTracker facade; this loop only
/// formats prompts and output.
async fn run_console(mut app: FitTracker<SqliteRepository>) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    println!("FitTrack AI - acompanhamento de treinos");

    loop {
        println!();
        println!("  1) Visão geral");
        println!("  2) Registrar peso");
        println!("  3) Registrar treino");
        println!("  4) Gerar análise com IA");
        println!("  5) Nova análise (limpar atual)");
        println!("  q) Sair");
        print_prompt("Escolha");

        let Some(choice) = lines.next_line().await? else {
            break; // stdin closed
        };

        match choice.trim() {
            "1" => show_overview(&app),
            "2" => log_weight(&mut app, &mut lines).await?,
            "3" => log_workout(&mut app, &mut lines).await?,
            "4" => analyze(&mut app).await,
            "5" => app.reset_insight(),
            "q" | "sair" => break,
            "" => {}
            other => println!("Opção desconhecida: {}", other),
        }
    }

    Ok(())
}

/// Print the dashboard: headline stats plus both chart series as text
fn show_overview(app: &FitTracker<SqliteRepository>) {
    let summary = app.summary();
    let profile = app.store().profile();

    println!();
    println!("Bem-vindo de volta, {}!", profile.name);
    println!("  Total de treinos: {}", summary.total_workouts);
    println!(
        "  Peso atual: {} kg ({}{:.1} kg desde o início)",
        summary.current_weight,
        if summary.weight_delta > 0.0 { "+" } else { "" },
        summary.weight_delta
    );
    println!("  Treinos/mês: {:.1}", summary.monthly_average);
    match &summary.last_workout {
        Some(last) => println!(
            "  Último treino: {} ({})",
            last.date.format("%d/%m/%Y"),
            last.workout_type
        ),
        None => println!("  Último treino: N/A"),
    }

    println!();
    println!("Evolução de peso:");
    for point in app.weight_series() {
        println!("  {}  {:.1} kg", point.label, point.value);
    }

    println!();
    println!("Volume de exercícios (últimos 7 treinos):");
    let volume = app.exercise_volume_series();
    if volume.is_empty() {
        println!("  Nenhum treino registrado. Comece hoje!");
    }
    for point in volume {
        println!("  {}  {} exercícios", point.label, point.value as usize);
    }
}

/// Prompt for and record a weight measurement
async fn log_weight(
    app: &mut FitTracker<SqliteRepository>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Box<dyn std::error::Error>> {
    print_prompt("Novo peso (kg)");
    let Some(input) = lines.next_line().await? else {
        return Ok(());
    };

    // Non-numeric input never reaches the store
    let Ok(weight) = input.trim().replace(',', ".").parse::<f64>() else {
        println!("Valor inválido: {}", input.trim());
        return Ok(());
    };

    match app.log_weight(weight) {
        Ok(()) => println!("Peso registrado: {} kg", weight),
        Err(e) => println!("Não foi possível registrar: {}", e),
    }

    Ok(())
}

/// Prompt for and record a workout with its exercises and sets
async fn log_workout(
    app: &mut FitTracker<SqliteRepository>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Tipo de atividade:");
    for (i, workout_type) in WorkoutType::all().iter().enumerate() {
        println!("  {}) {}", i + 1, workout_type);
    }
    print_prompt("Tipo");

    let Some(type_input) = lines.next_line().await? else {
        return Ok(());
    };
    let workout_type = match type_input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| WorkoutType::all().get(n.wrapping_sub(1)))
    {
        Some(t) => *t,
        None => {
            println!("Tipo inválido.");
            return Ok(());
        }
    };

    let mut exercises = Vec::new();
    loop {
        print_prompt("Nome do exercício (vazio para finalizar)");
        let Some(name) = lines.next_line().await? else {
            break;
        };
        let name = name.trim().to_string();
        if name.is_empty() {
            break;
        }

        let mut sets = Vec::new();
        loop {
            print_prompt("  Série: reps peso (vazio para finalizar)");
            let Some(set_line) = lines.next_line().await? else {
                break;
            };
            let set_line = set_line.trim().to_string();
            if set_line.is_empty() {
                break;
            }

            match parse_set(&set_line) {
                Some(set) => sets.push(set),
                None => println!("  Formato inválido, use por exemplo: 10 60.5"),
            }
        }

        exercises.push(ExerciseDraft { name, sets });
    }

    match app.log_workout(WorkoutDraft::new(workout_type, exercises)) {
        Ok(()) => println!("Treino salvo!"),
        Err(e) => println!("Não foi possível salvar: {}", e),
    }

    Ok(())
}

/// Parse a "reps weight" set line
fn parse_set(line: &str) -> Option<SetDraft> {
    let mut parts = line.split_whitespace();
    let reps = parts.next()?.parse::<u32>().ok()?;
    let weight = parts
        .next()
        .map_or(Some(0.0), |w| w.replace(',', ".").parse::<f64>().ok())?;
    Some(SetDraft { reps, weight })
}

/// Trigger the AI analysis and print the outcome
async fn analyze(app: &mut FitTracker<SqliteRepository>) {
    println!("Analisando seu esforço...");
    match app.analyze_progress().await {
        TriggerResult::Refused(guidance) => println!("{}", guidance),
        TriggerResult::Ignored => {}
        TriggerResult::Completed => {
            if let Some(text) = app.insight_state().text() {
                println!();
                println!("{}", text);
            }
        }
    }
}

/// Print an input prompt without a trailing newline
fn print_prompt(label: &str) {
    use std::io::Write;
    print!("{}> ", label);
    let _ = std::io::stdout().flush();
}
