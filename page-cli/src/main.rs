//! # Page Builder
//!
//! Interactive editing session driven from standard input.

use clap::Parser;
use page_cli::render::{document_listing, notice_line};
use page_cli::{parse_line, spawn_editor, CliArgs, HostSettings, Line, Reply, Request};
use page_core::Session;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing on stderr with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: warn,page_core=info,page_cli=info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,page_core=info,page_cli=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = args.editor_config()?;
    let host = HostSettings::from(&args);
    tracing::info!(?config, ?host, "Starting page builder");

    let mut session = Session::new(config)?;
    let json = host.json;
    session.set_on_change(move |elements| {
        if json {
            match serde_json::to_string(elements) {
                Ok(doc) => println!("{doc}"),
                Err(e) => tracing::error!("Failed to serialize document: {e}"),
            }
        } else {
            println!("{}", document_listing(elements, None));
        }
    });
    session.set_on_notice(|notice| println!("{}", notice_line(notice)));

    let (editor, task) = spawn_editor(session);
    println!("Page builder ready. Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parsed = match parse_line(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                println!("! {e}");
                continue;
            }
        };
        match parsed {
            Line::Empty => {}
            Line::Help => println!("{}", page_cli::repl::HELP),
            Line::Quit => break,
            Line::Show => {
                if let Reply::Document {
                    document,
                    selection,
                } = editor.request(Request::Inspect).await??
                {
                    println!("{}", document_listing(document.elements(), selection));
                }
            }
            Line::Generate(request) => {
                println!("… generating");
                // Fire and forget; completion re-enters the editor on its own
                drop(editor.generate(request, host.generation_delay));
            }
            Line::Request(request) => match editor.request(request).await? {
                Ok(Reply::Created(id)) => println!("→ {id}"),
                Ok(Reply::Previewed(Some(kind))) => println!("→ playing {kind}"),
                Ok(Reply::Ignored) => println!("! Nothing is being dragged"),
                // The session already reported the outcome through its notice sink
                Ok(_) | Err(_) => {}
            },
        }
    }

    drop(editor);
    task.abort();
    tracing::info!("Page builder exited");
    Ok(())
}
