use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};
use ztc_catalog::{
    CartStore, CatalogPage, Config, FileStore, FilterState, HtmlTable, RenderedTable,
    Selection, SourceResolver,
};

const USAGE: &str = "usage: ztc_catalog <command>
  list [--term TERM] [--search TEXT]   show the catalog
  terms                                list available terms
  add <course> <section>               add a row to the cart
  cart                                 show the cart
  clear                                empty the cart";

enum Command {
    List(FilterState),
    Terms,
    Add { course: String, section: String },
    Cart,
    Clear,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let cmd = args.next().unwrap_or_else(|| "list".to_string());
    match cmd.as_str() {
        "list" => {
            let mut filter = FilterState::default();
            while let Some(flag) = args.next() {
                let value = args
                    .next()
                    .with_context(|| format!("{} needs a value", flag))?;
                match flag.as_str() {
                    "--term" => filter.term = value,
                    "--search" => filter.text = value,
                    other => bail!("unknown flag {}\n{}", other, USAGE),
                }
            }
            Ok(Command::List(filter))
        }
        "terms" => Ok(Command::Terms),
        "add" => {
            let course = args.next().context("add needs <course> <section>")?;
            let section = args.next().context("add needs <course> <section>")?;
            Ok(Command::Add { course, section })
        }
        "cart" => Ok(Command::Cart),
        "clear" => Ok(Command::Clear),
        other => bail!("unknown command {}\n{}", other, USAGE),
    }
}

fn print_table(columns: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };
    println!("{}", line(columns).trim_end());
    for row in rows {
        println!("{}", line(row).trim_end());
    }
}

fn print_rendered(table: &RenderedTable) {
    let mut columns = table.columns.clone();
    columns.push("Add".to_string());
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| {
            let mut cells = r.cells.clone();
            cells.resize(table.columns.len(), String::new());
            cells.push(r.action_label().to_string());
            cells
        })
        .collect();
    print_table(&columns, &rows);
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let command = parse_args(env::args().skip(1))?;

    // ─── 2) configure cart storage ───────────────────────────────────
    let config = Config::from_env();
    let store = FileStore::new(&config.cart_dir)
        .with_context(|| format!("opening cart storage {}", config.cart_dir.display()))?;
    debug!(dir = %store.dir().display(), "cart storage opened");
    let cart = CartStore::new(store, config.cart_key.clone());
    debug!(key = cart.key(), items = cart.list().len(), "cart loaded");

    // ─── 3) cart-only commands skip the catalog ──────────────────────
    match command {
        Command::Cart => {
            let items = cart.list();
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|i| {
                    vec![
                        i.course.clone(),
                        i.term.clone(),
                        i.section.clone(),
                        i.instructor.clone(),
                        i.units.clone(),
                        i.days.clone(),
                        i.time.clone(),
                        i.location.clone(),
                    ]
                })
                .collect();
            let columns: Vec<String> = [
                "Course", "Term", "Section", "Instructor", "Units", "Days", "Time", "Location",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect();
            print_table(&columns, &rows);
            println!("{} item(s)", items.len());
            return Ok(());
        }
        Command::Clear => {
            cart.clear().context("clearing cart")?;
            println!("cart cleared");
            return Ok(());
        }
        _ => {}
    }

    // ─── 4) resolve the catalog ──────────────────────────────────────
    let client = Client::new();
    let resolver = SourceResolver::from_config(&client, &config);
    let fallback = HtmlTable::new(&config.fallback_html, config.table_selector.clone());
    let page = CatalogPage::open(&resolver, Some(&fallback), cart).await;
    info!(status = %page.origin(), rows = page.table().rows.len(), "catalog ready");

    // ─── 5) run the command ──────────────────────────────────────────
    match command {
        Command::List(filter) => {
            let view = page.view(&filter);
            print_rendered(&view);
            println!("{} row(s); {}", view.len(), page.origin());
        }
        Command::Terms => {
            for term in page.terms() {
                println!("{}", term);
            }
        }
        Command::Add { course, section } => {
            let Some(record) = page.find(&course, &section) else {
                bail!("{} section {} is not in the catalog", course, section);
            };
            match page.select(&record).context("adding to cart")? {
                Selection::Added => println!("added {} {}", course, section),
                Selection::AlreadyInCart => println!("{} {} is already in the cart", course, section),
            }
        }
        Command::Cart | Command::Clear => {}
    }

    Ok(())
}
