use clap::{Parser, Subcommand};
use dotenv::dotenv;
use gatekeeper_rs::condition::{break_long_expression, parse, WrapConfig};
use gatekeeper_rs::workflow::compiler::ConditionCompiler;
use gatekeeper_rs::workflow::loader::WorkflowLoader;
use gatekeeper_rs::LogSink;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a condition and print it re-rendered
    Parse {
        /// The condition expression
        expression: String,

        /// Print the parsed tree as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Wrap a long condition across lines
    Wrap {
        /// The condition expression
        expression: String,

        /// Maximum line length before wrapping
        #[arg(long)]
        max_line_length: Option<usize>,

        /// Line length after which the next operator breaks the line
        #[arg(long)]
        break_threshold: Option<usize>,
    },
    /// Compile the job conditions of a workflow file
    Compile {
        /// Path to the workflow file
        #[arg(short, long)]
        file: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse { expression, json } => {
            let tree = parse(&expression)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                println!("{}", tree);
            }
        }
        Commands::Wrap {
            expression,
            max_line_length,
            break_threshold,
        } => {
            let mut config = WrapConfig::from_env()?;
            if let Some(max) = max_line_length {
                config.max_line_length = max;
            }
            if let Some(threshold) = break_threshold {
                config.break_threshold = threshold;
            }
            log::debug!("Wrapping with {:?}", config);

            for line in break_long_expression(&expression, &config) {
                println!("{}", line);
            }
        }
        Commands::Compile { file } => {
            let frontmatter = WorkflowLoader::new().load(&file)?;
            let compiler = ConditionCompiler::new(WrapConfig::from_env()?);
            let compiled = compiler.compile(&frontmatter, &mut LogSink);
            print!("{}", compiled.to_yaml());
        }
    }

    Ok(())
}
