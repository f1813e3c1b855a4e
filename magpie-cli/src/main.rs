//! Magpie command-line front end.
//!
//! Three subcommands over the parsing and scraping crates: `parse` dumps
//! a document's tree, token stream, or JSON form; `scrape` extracts
//! lesson records from a page; `search` looks lessons up by topic or by
//! exact number. Input is a file path or an http(s) URL everywhere.

use std::fs;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;

use magpie_common::net;
use magpie_common::warning::clear_warnings;
use magpie_dom::{Document, NodeId, NodeType};
use magpie_html::{Lexer, parse_str, tree_to_string};
use magpie_scrape::{Lesson, Searcher, extract_lessons};

#[derive(Parser)]
#[command(name = "magpie", version, about = "Tolerant HTML parsing and lesson scraping")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a document and print its tree.
    Parse {
        /// File path or http(s) URL of the document.
        input: Option<String>,
        /// Parse this HTML string instead of reading from `input`.
        #[arg(long)]
        html: Option<String>,
        /// Print the token stream instead of the tree.
        #[arg(long)]
        tokens: bool,
        /// Print the tree as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Extract lesson records from a page.
    Scrape {
        /// File path or http(s) URL of the lesson page.
        input: String,
        /// Print the records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Search a page's lessons by topic.
    Search {
        /// File path or http(s) URL of the lesson page.
        input: String,
        /// Topic text, or a lesson number with `--number`.
        query: String,
        /// Look the query up as an exact lesson number.
        #[arg(long)]
        number: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Parse {
            input,
            html,
            tokens,
            json,
        } => {
            let html = match (html, input) {
                (Some(inline), _) => inline,
                (None, Some(source)) => load(&source)?,
                (None, None) => bail!("either an input path/URL or --html is required"),
            };
            clear_warnings();
            if tokens {
                dump_tokens(&html)?;
            } else {
                let doc = parse_str(&html)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&document_to_json(&doc))?);
                } else {
                    print!("{}", tree_to_string(&doc));
                }
            }
        }
        Command::Scrape { input, json } => {
            let lessons = load_lessons(&input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&lessons)?);
            } else {
                print_lessons(&lessons);
            }
        }
        Command::Search {
            input,
            query,
            number,
        } => {
            let searcher = Searcher::new(load_lessons(&input)?);
            let found = if number {
                searcher.by_number(&query)
            } else {
                searcher.by_topic(&query)
            };
            if found.is_empty() {
                println!("{}", "no matching lessons".yellow());
            } else {
                print_lessons(&found);
            }
        }
    }
    Ok(())
}

/// Read a document from a file path or an http(s) URL.
fn load(input: &str) -> Result<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        Ok(net::fetch_text(input)?)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read `{input}`"))
    }
}

/// Load, parse, and extract a page's lesson records.
fn load_lessons(input: &str) -> Result<Vec<Lesson>> {
    let html = load(input)?;
    clear_warnings();
    let doc = parse_str(&html)?;
    Ok(extract_lessons(&doc))
}

/// Print the lexer's token stream, one token per line.
fn dump_tokens(html: &str) -> Result<()> {
    let mut lexer = Lexer::new(html);
    while let Some(token) = lexer.next_token()? {
        println!("{token}");
    }
    Ok(())
}

/// Print lesson records as an aligned, highlighted listing.
fn print_lessons(lessons: &[Lesson]) {
    for lesson in lessons {
        match lesson.match_percent {
            Some(percent) => println!(
                "{} {} {}",
                lesson.number.green().bold(),
                lesson.topic,
                format!("(~{percent}% match)").yellow()
            ),
            None => println!("{} {}", lesson.number.green().bold(), lesson.topic),
        }
        println!("    video:    {}", lesson.video_url.dimmed());
        if let Some(url) = &lesson.practice_url {
            println!("    practice: {}", url.dimmed());
        }
        if let Some(url) = &lesson.textbook_url {
            println!("    textbook: {}", url.dimmed());
        }
    }
}

/// Render the tree as JSON: elements carry their tag, attributes, and
/// children; text, comment, and CDATA nodes are tagged leaves.
fn document_to_json(doc: &Document) -> serde_json::Value {
    let children: Vec<serde_json::Value> = doc
        .children(doc.root())
        .iter()
        .map(|&child| node_to_json(doc, child))
        .collect();
    serde_json::Value::Array(children)
}

fn node_to_json(doc: &Document, id: NodeId) -> serde_json::Value {
    use serde_json::{Map, Value, json};

    let Some(node) = doc.get(id) else {
        return Value::Null;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            let mut attrs = Map::new();
            for attr in &data.attrs {
                let _ = attrs.insert(attr.name.clone(), Value::String(attr.value.clone()));
            }
            let children: Vec<Value> = node
                .children
                .iter()
                .map(|&child| node_to_json(doc, child))
                .collect();
            json!({
                "tag": data.tag_name,
                "attrs": attrs,
                "children": children,
            })
        }
        NodeType::Text(text) => json!({ "text": text }),
        NodeType::Comment(text) => json!({ "comment": text }),
        NodeType::CData(text) => json!({ "cdata": text }),
    }
}
