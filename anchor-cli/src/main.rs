//! Anchor positioning CLI
//!
//! Loads a JSON page fixture and runs anchor validation, selection, or the
//! whole polyfill against it.

use std::fs;
use std::path::PathBuf;

use anchor_css::{
    AnchorName, AnchorValidity, ApplyReport, ContainingBlock, InsetRecord, LayoutHost,
    Polyfill, StaticDocument, check_anchor, containing_block, position_type, select_anchor,
};
use anchor_dom::{NodeId, NodeType};
use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;
use owo_colors::{OwoColorize, Style};
use serde_json::{Value, json};

/// Anchor positioning polyfill driver
#[derive(Parser, Debug)]
#[command(name = "anchor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Is #a an acceptable anchor for #t?
    anchor page.json validate --anchor a --target t

    # Which element does #t resolve --menu to?
    anchor page.json select --target t --name --menu

    # Resolve every anchor() inset and print what was written
    anchor page.json apply --json

    # Show the tree with positioning schemes and containing blocks
    anchor page.json tree
"#)]
struct Cli {
    /// Path to a JSON page fixture
    #[arg(value_name = "FIXTURE")]
    fixture: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG also works
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether one element is an acceptable anchor for another
    Validate {
        /// `id` of the anchor element
        #[arg(long)]
        anchor: String,
        /// `id` of the positioned element
        #[arg(long)]
        target: String,
    },
    /// Resolve an anchor name the way a target would
    Select {
        /// `id` of the positioned element
        #[arg(long)]
        target: String,
        /// Anchor name, including the leading `--`
        #[arg(long, allow_hyphen_values = true)]
        name: String,
    },
    /// Apply the polyfill and print the insets it wrote
    Apply,
    /// Print the document tree
    Tree,
}

/// Output styles, all plain when color is off.
struct Palette {
    good: Style,
    bad: Style,
    element: Style,
    dim: Style,
}

impl Palette {
    fn new(color: bool) -> Self {
        if color {
            Self {
                good: Style::new().green().bold(),
                bad: Style::new().red().bold(),
                element: Style::new().cyan(),
                dim: Style::new().dimmed(),
            }
        } else {
            Self {
                good: Style::new(),
                bad: Style::new(),
                element: Style::new(),
                dim: Style::new(),
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = fs::read_to_string(&cli.fixture)
        .with_context(|| format!("failed to read {}", cli.fixture.display()))?;
    let mut document = StaticDocument::from_json(&text)
        .with_context(|| format!("failed to load {}", cli.fixture.display()))?;
    let palette = Palette::new(!cli.no_color);

    match &cli.command {
        Command::Validate { anchor, target } => {
            let anchor = lookup(&document, anchor)?;
            let target = lookup(&document, target)?;
            validate(&document, anchor, target, cli.json, &palette)
        }
        Command::Select { target, name } => {
            let target = lookup(&document, target)?;
            let name = AnchorName::new(name)
                .ok_or_else(|| anyhow!("anchor names start with `--`, got '{name}'"))?;
            select(&document, target, &name, cli.json, &palette)
        }
        Command::Apply => {
            let report = Polyfill::default().apply(&mut document);
            print_report(&document, &report, cli.json, &palette)
        }
        Command::Tree => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tree_json(&document, document.tree().root()))?);
            } else {
                print_tree(&document, document.tree().root(), 0, &palette);
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    let _ = builder.format_timestamp(None);
    match verbose {
        0 => {}
        1 => {
            let _ = builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            let _ = builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn lookup(document: &StaticDocument, id: &str) -> Result<NodeId> {
    document
        .element_by_id(id)
        .ok_or_else(|| anyhow!("no element with id '{id}'"))
}

/// `<div#menu>`, or `<div>@7` for elements without an `id`.
fn label(document: &StaticDocument, node: NodeId) -> String {
    match document.tree().as_element(node) {
        Some(element) => match element.id() {
            Some(id) => format!("<{}#{id}>", element.tag_name),
            None => format!("<{}>@{}", element.tag_name, node.0),
        },
        None => format!("@{}", node.0),
    }
}

fn describe_containing_block(document: &StaticDocument, cb: ContainingBlock) -> String {
    match cb {
        ContainingBlock::Element(id) => label(document, id),
        ContainingBlock::Initial => "initial containing block".to_string(),
    }
}

fn describe_validity(document: &StaticDocument, verdict: AnchorValidity) -> String {
    match verdict {
        AnchorValidity::Valid => "acceptable anchor".to_string(),
        AnchorValidity::NotRendered => "anchor or target is not rendered".to_string(),
        AnchorValidity::OutsideContainingBlock => {
            "anchor is outside the target's containing block".to_string()
        }
        AnchorValidity::AbsolutelyPositionedSibling => {
            "anchor shares the target's containing block but is absolutely positioned".to_string()
        }
        AnchorValidity::AbsolutelyPositionedChain(id) => format!(
            "{} is absolutely positioned and sits between the anchor and the target's containing block",
            label(document, id)
        ),
        AnchorValidity::EscapesContainingBlock => {
            "anchor's containing blocks never reach the target's".to_string()
        }
    }
}

fn validate(
    document: &StaticDocument,
    anchor: NodeId,
    target: NodeId,
    as_json: bool,
    palette: &Palette,
) -> Result<()> {
    let verdict = check_anchor(document, anchor, target);
    let reason = describe_validity(document, verdict);
    if as_json {
        let value = json!({
            "anchor": anchor,
            "target": target,
            "valid": verdict.is_valid(),
            "reason": reason,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mark = if verdict.is_valid() {
        "valid".style(palette.good).to_string()
    } else {
        "invalid".style(palette.bad).to_string()
    };
    println!(
        "{mark}: {} for {}",
        label(document, anchor).style(palette.element),
        label(document, target).style(palette.element)
    );
    println!("  {}", reason.style(palette.dim));
    for (role, node) in [("anchor", anchor), ("target", target)] {
        println!(
            "  {role} containing block: {}",
            describe_containing_block(document, containing_block(document, node))
        );
    }
    Ok(())
}

fn select(
    document: &StaticDocument,
    target: NodeId,
    name: &AnchorName,
    as_json: bool,
    palette: &Palette,
) -> Result<()> {
    let selected = select_anchor(document, target, name);
    if as_json {
        let value = json!({ "target": target, "name": name, "anchor": selected });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    match selected {
        Some(anchor) => println!(
            "{} resolves {name} to {}",
            label(document, target).style(palette.element),
            label(document, anchor).style(palette.good)
        ),
        None => println!(
            "{} resolves {name} to {}",
            label(document, target).style(palette.element),
            "nothing".style(palette.bad)
        ),
    }
    Ok(())
}

fn format_insets(record: &InsetRecord) -> String {
    if record.is_empty() {
        return "no insets".to_string();
    }
    record
        .iter()
        .map(|(side, value)| format!("{side}: {value}px"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn print_report(
    document: &StaticDocument,
    report: &ApplyReport,
    as_json: bool,
    palette: &Palette,
) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for positioned in &report.positioned {
        println!(
            "{} -> {} via {}: {}",
            label(document, positioned.target).style(palette.element),
            label(document, positioned.anchor).style(palette.good),
            positioned.name,
            format_insets(&document.inline_insets(positioned.target))
        );
    }
    for unresolved in &report.unresolved {
        let name = unresolved
            .name
            .as_ref()
            .map_or_else(|| "(no anchor name)".to_string(), ToString::to_string);
        let fallbacks = if unresolved.fallbacks.is_empty() {
            "no fallback".to_string()
        } else {
            let sides: Vec<_> = unresolved.fallbacks.iter().map(ToString::to_string).collect();
            format!("fallback for {}", sides.join(", "))
        };
        println!(
            "{} {} {name} ({fallbacks})",
            label(document, unresolved.target).style(palette.element),
            "unresolved".style(palette.bad)
        );
    }
    println!(
        "{}",
        format!(
            "{} positioned, {} unresolved",
            report.positioned.len(),
            report.unresolved.len()
        )
        .style(palette.dim)
    );
    Ok(())
}

fn print_tree(document: &StaticDocument, node: NodeId, indent: usize, palette: &Palette) {
    let prefix = "  ".repeat(indent);
    let tree = document.tree();
    match tree.get(node).map(|n| &n.node_type) {
        Some(NodeType::Document) => println!("{prefix}Document"),
        Some(NodeType::Element(_)) => {
            let display = document
                .display(node)
                .map_or_else(String::new, |d| d.to_string());
            let names = LayoutHost::style(document, node)
                .map(|style| {
                    style
                        .anchor_names
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            let mut details = format!(
                "{} {display}, cb {}",
                position_type(document, node),
                describe_containing_block(document, containing_block(document, node))
            );
            if !names.is_empty() {
                details.push_str(&format!(", anchor-name {names}"));
            }
            println!(
                "{prefix}{} {}",
                label(document, node).style(palette.element),
                details.style(palette.dim)
            );
        }
        Some(NodeType::Text(text)) => {
            let text = text.trim();
            if !text.is_empty() {
                println!("{prefix}\"{text}\"");
            }
        }
        None => return,
    }
    for &child in tree.children(node) {
        print_tree(document, child, indent + 1, palette);
    }
}

fn tree_json(document: &StaticDocument, node: NodeId) -> Value {
    let tree = document.tree();
    let children: Vec<Value> = tree
        .children(node)
        .iter()
        .map(|&child| tree_json(document, child))
        .collect();
    match tree.get(node).map(|n| &n.node_type) {
        Some(NodeType::Element(element)) => json!({
            "node": node,
            "tag": element.tag_name,
            "id": element.id(),
            "position": position_type(document, node).to_string(),
            "display": document.display(node).map(|d| d.to_string()),
            "containing_block": containing_block(document, node).element(),
            "rect": document.bounding_rect(node),
            "children": children,
        }),
        Some(NodeType::Text(text)) => json!({ "node": node, "text": text }),
        _ => json!({ "node": node, "children": children }),
    }
}
