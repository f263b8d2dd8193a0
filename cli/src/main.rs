use clap::Parser;
use jsonata_bridge::{
    CasePolicy, ErrorKind, HostValue, Options, evaluate_with, render_error,
    render_error_to_string_no_color,
};
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use std::io::Read;
use tracing::debug;

/// jsonata - Query and transform JSON documents
#[derive(Parser, Debug)]
#[command(name = "jsonata")]
#[command(about = "Evaluate JSONata expressions against JSON input", long_about = None)]
struct Args {
    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Input document, or `-` for stdin. Defaults to stdin when it is piped
    #[arg(short, long, value_name = "FILE")]
    data: Option<String>,

    /// Bind a variable, as NAME=VALUE. VALUE is read as JSON when it parses
    #[arg(short, long = "bind", value_name = "NAME=VALUE")]
    bindings: Vec<String>,

    /// Evaluation time budget in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Maximum evaluation depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Names under which bindings are visible
    #[arg(long, default_value_t = CasePolicy::Both)]
    case_policy: CasePolicy,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Expression to evaluate
    expression: String,
}

fn read_data(path: Option<&str>) -> Result<HostValue> {
    let text = match path {
        Some("-") => read_stdin()?,
        Some(path) => std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path))?,
        // Nothing piped in: evaluate against no input.
        None if atty::is(atty::Stream::Stdin) => return Ok(HostValue::Null),
        None => read_stdin()?,
    };
    // Pass the text through as-is so the bridge decides whether it is JSON.
    Ok(HostValue::String(text))
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .into_diagnostic()
        .wrap_err("Failed to read stdin")?;
    Ok(text)
}

fn build_options(args: &Args) -> Result<Options> {
    let mut options = Options::default().with_case_policy(args.case_policy);
    for binding in &args.bindings {
        let Some((name, value)) = binding.split_once('=') else {
            return Err(miette!("Invalid binding '{}', expected NAME=VALUE", binding));
        };
        let value = match serde_json::from_str(value) {
            Ok(json) => HostValue::from_json(json),
            Err(_) => HostValue::from(value),
        };
        options = options.with_binding(name.trim(), value);
    }
    options.timeout_ms = args.timeout;
    options.max_depth = args.max_depth;
    Ok(options)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if args.debug_parse {
        if let Ok(expression) = jsonata_core::compile(&args.expression) {
            println!("=== Parsed AST ===");
            println!("{:#?}", expression.ast());
            println!();
        }
    }

    let data = read_data(args.data.as_deref())?;
    let options = build_options(&args)?;
    debug!(?options, "Options");

    match evaluate_with(&args.expression, &data, &options) {
        Ok(result) => {
            let json = result.to_json();
            let text = if args.compact {
                serde_json::to_string(&json)
            } else {
                serde_json::to_string_pretty(&json)
            };
            println!("{}", text.into_diagnostic()?);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::Compile => {
            if atty::is(atty::Stream::Stderr) {
                render_error(&e);
            } else {
                eprint!("{}", render_error_to_string_no_color(&e));
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
