use std::{fmt, fs, io};

use first_follow::{Grammar, GrammarDefinition, InvalidGrammarError};

fn print_help() {
    println!("Usage: first-follow [outputs] [options] [grammar definition]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  ff: FIRST and FOLLOW sets (default)");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!("grammar definition:");
    println!("  a JSON file such as");
    println!("  {{\"rules\": [{{\"lhs\": \"S\", \"rhs\": [[\"A\", \"B\"]]}}, ...]}}");
    println!("  without one, the grammar S -> A B, A -> a | ε, B -> b | c is used");
}

fn demo_grammar() -> GrammarDefinition {
    GrammarDefinition::new()
        .rule("S", &[&["A", "B"]])
        .rule("A", &[&["a"], &["ε"]])
        .rule("B", &[&["b"], &["c"]])
}

#[derive(Debug)]
enum LoadError {
    Io(String, io::Error),
    Grammar(InvalidGrammarError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(path, e) => write!(f, "cannot read {}: {}", path, e),
            LoadError::Grammar(e) => write!(f, "{}", e),
        }
    }
}

impl From<InvalidGrammarError> for LoadError {
    fn from(e: InvalidGrammarError) -> Self {
        LoadError::Grammar(e)
    }
}

fn load(path: Option<&String>) -> Result<Grammar, LoadError> {
    let definition = match path {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| LoadError::Io(path.clone(), e))?;
            GrammarDefinition::from_json(&text)?
        }
        None => demo_grammar(),
    };
    Ok(definition.build()?)
}

fn main() {
    env_logger::init();

    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "ff"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }
    if outputs.is_empty() {
        outputs.push("ff");
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        JSON,
    }
    let mut output_format = OutputFormat::Plain;

    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 < args.len() {
        print_help();
        return;
    }

    let g = match load(args.get(i)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "ff" {
            let (first, follow) = g.first_follow();
            let t = g.to_first_follow_output(&first, &follow);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
    }
}
