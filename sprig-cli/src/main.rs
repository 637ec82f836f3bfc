//! sprig CLI - template tokenizing and parsing tool
//!
//! Usage:
//!   sprig <file>                Parse and display the tree outline
//!   sprig <file> --tokens       Show the token stream
//!   sprig <file> --json         Output the tree (or tokens) as JSON
//!   sprig <file> --lenient      Close elements without checking tag names
//!
//! Examples:
//!   sprig templates/list.tpl
//!   sprig --source '<h1>Hello</h1>' --tokens

use std::fs;
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sprig_common::{CodeFrame, LineIndex, Span, warning};
use sprig_syntax::{ParseOptions, Root, Token, TreeBuilder, print_tree, tokenize};

/// Trees nested deeper than this are written as compact JSON.
const PRETTY_JSON_MAX_DEPTH: usize = 64;

/// Stack reserved for the JSON writer thread, plus an allowance per level
/// of nesting since serialization recurses.
const JSON_BASE_STACK: usize = 1 << 20;
const JSON_STACK_PER_LEVEL: usize = 8 << 10;

#[derive(Parser, Debug)]
#[command(name = "sprig", version, about = "Tokenize and parse sprig templates")]
struct Args {
    /// Template file to read
    #[arg(required_unless_present = "source", conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Inline template text, instead of a file
    #[arg(long)]
    source: Option<String>,

    /// Show the token stream instead of the tree
    #[arg(short, long)]
    tokens: bool,

    /// Output JSON
    #[arg(short, long)]
    json: bool,

    /// Close elements without checking closing tag names
    #[arg(long)]
    lenient: bool,
}

/// A template and the name used to refer to it in messages.
struct Input {
    name: String,
    text: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let input = read_input(&args)?;
    let index = LineIndex::new(&input.text);
    warning::clear_warnings();

    let tokens =
        tokenize(&input.text).map_err(|err| located(&input, &index, &err, err.span()))?;
    if args.tokens {
        return print_tokens(&tokens, args.json);
    }

    let options = if args.lenient {
        ParseOptions::lenient()
    } else {
        ParseOptions::default()
    };
    let (root, issues) = TreeBuilder::new(&tokens)
        .with_options(options)
        .run_with_issues()
        .map_err(|err| located(&input, &index, &err, err.span()))?;

    for issue in &issues {
        let at = index.line_col(issue.span.start);
        let _ = warning::warn_once("parser", &format!("{}:{at}: {}", input.name, issue.message));
    }

    if args.json {
        println!("{}", tree_json(&root)?);
    } else {
        print_tree(&root);
    }
    Ok(())
}

fn read_input(args: &Args) -> Result<Input> {
    if let Some(source) = &args.source {
        return Ok(Input {
            name: "<source>".to_string(),
            text: source.clone(),
        });
    }
    let Some(path) = &args.file else {
        bail!("no template file or --source given");
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    Ok(Input {
        name: path.display().to_string(),
        text,
    })
}

/// Attach the `file:line:column` locator and a code frame to a syntax error.
fn located(
    input: &Input,
    index: &LineIndex<'_>,
    err: &dyn std::error::Error,
    span: Span,
) -> anyhow::Error {
    let at = index.line_col(span.start);
    let frame = CodeFrame::with_index(index, span).render();
    anyhow!(
        "{err}\n  {} {}:{at}\n\n{}",
        "-->".blue().bold(),
        input.name,
        frame.red()
    )
}

/// Serialize the tree on a thread whose stack grows with the tree's depth.
fn tree_json(root: &Root) -> Result<String> {
    let depth = root.depth();
    let stack_size = JSON_BASE_STACK + depth * JSON_STACK_PER_LEVEL;
    thread::scope(|scope| -> Result<String> {
        let handle = thread::Builder::new()
            .name("json-writer".to_string())
            .stack_size(stack_size)
            .spawn_scoped(scope, || {
                if depth <= PRETTY_JSON_MAX_DEPTH {
                    serde_json::to_string_pretty(root)
                } else {
                    serde_json::to_string(root)
                }
            })
            .context("failed to start the JSON writer")?;
        let json = handle
            .join()
            .map_err(|_| anyhow!("JSON writer panicked"))??;
        Ok(json)
    })
}

fn print_tokens(tokens: &[Token], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tokens)?);
        return Ok(());
    }
    println!("=== Tokens ({}) ===", tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        println!(
            "  {i:3}: {:<9} {:<10} {:?}",
            token.kind_name(),
            token.span().to_string(),
            token.to_string()
        );
    }
    Ok(())
}
