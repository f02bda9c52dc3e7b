use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use engine::MatrixEvalMethod;
use log::debug;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tabcalc::adapter::{MathEngine, SymbolicAdapter};
use tabcalc::config::{DEFAULT_MAX_DIMENSION, Settings};
use tabcalc::error::{AppError, FormatError};
use tabcalc::format;
use tabcalc::keypad::Keypad;
use tabcalc::layout;
use tabcalc::session::Session;

#[derive(Parser)]
#[command(name = "tabcalc")]
#[command(about = "Four-tab calculator: keypad, symbolic math, linear solver and matrices", long_about = None)]
struct Cli {
    /// How determinants and inverses are evaluated (symbolic or numeric)
    #[arg(long, global = true, default_value = "symbolic")]
    matrix_eval: MatrixEvalMethod,

    /// Largest matrix side offered by the page
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the page as an HTML document
    Html,

    /// Evaluate an expression (scalars, matrices, calls)
    Eval { expr: String },

    /// Simplify an expression
    Simplify { expr: String },

    /// Differentiate an expression
    Diff {
        expr: String,
        #[arg(long)]
        var: Option<String>,
    },

    /// Integrate an expression
    Integrate {
        expr: String,
        #[arg(long)]
        var: Option<String>,
    },

    /// Solve a linear system, one equation per argument
    Solve {
        #[arg(required = true)]
        equations: Vec<String>,
    },

    /// Determinant of a matrix literal like [[1,2],[3,4]]
    Det { matrix: String },

    /// Inverse of a matrix literal
    Inv { matrix: String },

    /// Sum of two matrix literals
    Add { a: String, b: String },

    /// Product of two matrix literals
    Mul { a: String, b: String },

    /// Press keypad buttons and print the display
    Keys {
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Drive the page with line commands from a script or stdin
    Session {
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tabcalc::init_logger();

    let cli = Cli::parse();
    let settings = Settings {
        matrix_eval: cli.matrix_eval,
        max_dimension: cli.max_dimension,
        ..Settings::default()
    };
    settings.validate()?;

    let adapter = SymbolicAdapter::new(settings.engine_settings());
    tabcalc::check_engine(adapter.engine());

    match cli.command {
        Command::Html => print!("{}", layout::document(&settings)),
        Command::Eval { expr } => {
            let value = adapter.engine().evaluate(&expr).map_err(AppError::from);
            println!("{}", checked(&expr, value)?);
        }
        Command::Simplify { expr } => println!("{}", checked(&expr, adapter.simplify(&expr))?),
        Command::Diff { expr, var } => {
            let var = var.unwrap_or_else(|| settings.default_variable.clone());
            println!("{}", checked(&expr, adapter.differentiate(&expr, &var))?);
        }
        Command::Integrate { expr, var } => {
            let var = var.unwrap_or_else(|| settings.default_variable.clone());
            println!("{}", checked(&expr, adapter.integrate(&expr, &var))?);
        }
        Command::Solve { equations } => {
            let equations = format::collect_equations(&equations);
            if equations.is_empty() {
                return Err(AppError::from(FormatError::NoEquations).into());
            }
            let solution = adapter.solve_system(&equations)?;
            println!("{}", format::format_solution(&solution));
        }
        Command::Det { matrix } => {
            let a = square_matrix(&matrix)?;
            println!("{}", adapter.determinant(&a)?);
        }
        Command::Inv { matrix } => {
            let a = square_matrix(&matrix)?;
            println!("{}", adapter.inverse(&a)?);
        }
        Command::Add { a, b } => {
            let (a, b) = (normalize_matrix(&a)?.0, normalize_matrix(&b)?.0);
            println!("{}", adapter.matrix_add(&a, &b)?);
        }
        Command::Mul { a, b } => {
            let (a, b) = (normalize_matrix(&a)?.0, normalize_matrix(&b)?.0);
            println!("{}", adapter.matrix_multiply(&a, &b)?);
        }
        Command::Keys { tokens } => {
            let mut keypad = Keypad::new();
            for token in &tokens {
                keypad.press_str(token)?;
            }
            debug!("keypad buffer: {}", keypad.buffer());
            println!("{}", keypad.display());
        }
        Command::Session { script } => {
            let mut session = Session::new(settings);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("cannot open script {}", path.display()))?;
                    session.run(BufReader::new(file), &mut out)?;
                }
                None => session.run(io::stdin().lock(), &mut out)?,
            }
        }
    }

    Ok(())
}

/// On failure, print an Ariadne report when the input does not parse.
/// Colors only go to a terminal.
fn checked(source: &str, result: Result<impl ToString, AppError>) -> Result<String> {
    match result {
        Ok(value) => Ok(value.to_string()),
        Err(err) => {
            if let Err(errors) = parser::parse_expression(source) {
                if io::stderr().is_terminal() {
                    parser::error::report_errors("<input>", source, &errors);
                } else {
                    eprint!("{}", parser::error::render_errors("<input>", source, &errors));
                }
            }
            bail!(err)
        }
    }
}

/// Re-read a matrix literal the way the page formats its grids
fn normalize_matrix(text: &str) -> Result<(String, usize, usize), FormatError> {
    let rows = format::read_matrix(text)?;
    let (r, c) = (rows.len(), rows.first().map(|row| row.len()).unwrap_or(0));
    let cells: Vec<String> = rows.into_iter().flatten().collect();
    Ok((format::format_matrix(&cells, r, c), r, c))
}

fn square_matrix(text: &str) -> Result<String, FormatError> {
    let (formatted, rows, cols) = normalize_matrix(text)?;
    if rows != cols {
        return Err(FormatError::NotSquare { rows, cols });
    }
    Ok(formatted)
}
