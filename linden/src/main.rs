//! Parse an HTML file and dump the resulting DOM tree.

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser as ArgumentParser;
use string_interner::InternedString;
use web::{
    dom::NodeKind,
    html::{IgnoreParseErrors, LogParseErrors, ParseErrorHandler, Parser},
};

#[derive(ArgumentParser, Debug)]
#[command(about = "Parse an HTML document and print its DOM tree")]
struct Arguments {
    /// The file to parse; stdin if omitted
    file: Option<PathBuf>,

    /// Parse as a fragment inside the given context element
    #[arg(long)]
    fragment: Option<String>,

    /// Report the document's quirks mode
    #[arg(long)]
    quirks: bool,

    /// Enable the scripting flag (changes how <noscript> parses)
    #[arg(long)]
    scripting: bool,

    /// Report parse errors on stderr
    #[arg(long)]
    report_errors: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let arguments = Arguments::parse();

    let source = match read_source(arguments.file.as_deref()) {
        Ok(source) => source,
        Err(error) => {
            log::error!("failed to read input: {error}");
            return ExitCode::FAILURE;
        },
    };

    // Parsing itself cannot fail; every input produces a tree.
    if arguments.report_errors {
        run::<LogParseErrors>(&arguments, &source);
    } else {
        run::<IgnoreParseErrors>(&arguments, &source);
    }

    ExitCode::SUCCESS
}

fn run<P: ParseErrorHandler>(arguments: &Arguments, source: &str) {
    let root = match &arguments.fragment {
        Some(context) => {
            Parser::<P>::parse_fragment(source, InternedString::new(context))
        },
        None => {
            let mut parser = Parser::<P>::new(source);
            parser.set_scripting(arguments.scripting);
            parser.parse()
        },
    };

    print!("{root:?}");

    if arguments.quirks {
        if let NodeKind::Document(document) = root.borrow().kind() {
            println!("quirks mode: {:?}", document.quirks_mode());
        }
    }
}

fn read_source(file: Option<&std::path::Path>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        },
    }
}
