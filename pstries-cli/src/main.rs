use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use pstries::{
    emit::CppEmitter,
    import::{compile_definitions, parse_definitions},
    Key, TrieCompiler,
};
use std::{error::Error, path::PathBuf};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Increases the log verbosity, may be repeated
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: usize,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compiles table definitions into a C++ source file
    Compile {
        #[clap(short, long)]
        input: PathBuf,
        /// Writes to stdout when omitted
        #[clap(short, long)]
        output: Option<PathBuf>,
        /// Named namespace wrapping the generated arrays
        #[clap(long)]
        namespace: Option<String>,
        /// Header to include, guarded by the given macro
        #[clap(long, requires = "guard")]
        include: Option<String>,
        #[clap(long)]
        guard: Option<String>,
        /// Maximum number of entries per trie
        #[clap(long)]
        entry_limit: Option<usize>,
        /// Prints statistics for every compiled trie
        #[clap(long)]
        stats: bool,
    },

    /// Compiles a single table and looks up the given keys
    Lookup {
        #[clap(short, long)]
        input: PathBuf,
        #[clap(short, long)]
        table: String,
        keys: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder().filter_level(level).parse_default_env().init();

    match cli.command {
        Commands::Compile {
            input,
            output,
            namespace,
            include,
            guard,
            entry_limit,
            stats,
        } => {
            let content = std::fs::read_to_string(&input)?;

            let mut compiler = TrieCompiler::new();
            if let Some(limit) = entry_limit {
                compiler.entry_limit(limit);
            }

            let tries = compile_definitions(&content, &compiler)?;
            info!("compiled {} tries from {}", tries.len(), input.display());

            if stats {
                for trie in tries.iter() {
                    eprintln!("{}\n{}", trie.name(), trie.stats());
                }
            }

            let mut emitter = CppEmitter::new();
            if let Some(namespace) = namespace {
                emitter.namespace(namespace);
            }
            if let (Some(header), Some(guard)) = (include, guard) {
                emitter.guarded_include(guard, header);
            }

            // Rendered completely before anything is written
            let source = emitter.source(&tries).to_string();

            match output {
                Some(path) => std::fs::write(path, source)?,
                None => print!("{source}"),
            }
        }
        Commands::Lookup { input, table, keys } => {
            let content = std::fs::read_to_string(input)?;
            let definition = parse_definitions(&content)?
                .into_iter()
                .find(|definition| definition.name == table)
                .ok_or_else(|| format!("no table named {table}"))?;

            let trie = definition.compile(&TrieCompiler::new())?;

            for key in keys {
                let bytes = Key::try_from(key.as_str())?;
                match trie.lookup(bytes.as_bytes()) {
                    Some(value) => println!("{key} => {value}"),
                    None => println!("{key} => no match"),
                }
            }
        }
    }

    Ok(())
}
