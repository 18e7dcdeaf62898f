use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use glog::cli::{Cli, Command, ViewArgs, ViewLastArgs};
use glog_core::time::format_stamp;
use glog_core::{Query, StateFile, TimeResolver};
use glog_feed::{HttpTransport, PollLoop};
use glog_view::{Highlight, Presenter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        None => show(&cli.config),
        Some(Command::View(args)) => view(&cli.config, args).await,
        Some(Command::Viewlast(args)) => view_last(&cli.config, args).await,
    }
}

fn init_tracing(debug: bool) {
    if !debug && std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "warn,glog=debug,glog_core=debug,glog_feed=debug,glog_view=debug",
                )
            }),
        )
        .init();
    tracing::info!("glog debug log started");
}

async fn view(config: &str, args: ViewArgs) -> anyhow::Result<()> {
    let opts = args.options();
    let resolver = TimeResolver::local();
    let query = Query::from_options(&opts, &resolver)?;

    let Some(file) = open_state(config, args.output.yes)? else {
        return Ok(());
    };
    let state = file.load_configured()?;

    if query.all && !query.filters.is_active() && query.limit.is_none() && !args.output.yes {
        let prompt = "You didn't set a filter. Do you really want to show everything [y/n]> ";
        if !confirm(prompt)? {
            return Ok(());
        }
    }

    let transport = HttpTransport::new(&state.host, state.ignore_cert)?;
    let presenter = Presenter::new(
        io::stdout().lock(),
        Highlight::detect(args.output.no_color),
        opts.raw,
    );
    let follow = query.follow;
    let mut poll = PollLoop::new(transport, presenter, query, state, file);

    if follow {
        tokio::select! {
            result = poll.run() => result?,
            _ = tokio::signal::ctrl_c() => tracing::debug!("follow interrupted"),
        }
    } else {
        poll.run().await?;
    }
    Ok(())
}

async fn view_last(config: &str, args: ViewLastArgs) -> anyhow::Result<()> {
    let opts = args.options();
    let resolver = TimeResolver::local();
    opts.validate()?;

    let Some(file) = open_state(config, args.output.yes)? else {
        return Ok(());
    };
    let state = file.load_configured()?;

    let transport = HttpTransport::new(&state.host, state.ignore_cert)?;
    let presenter = Presenter::new(
        io::stdout().lock(),
        Highlight::detect(args.output.no_color),
        opts.raw,
    );
    glog_feed::view_last(transport, presenter, &state, &opts, &resolver).await?;
    Ok(())
}

/// Print the loaded state without the token.
fn show(config: &str) -> anyhow::Result<()> {
    let Some(file) = open_state(config, false)? else {
        return Ok(());
    };
    let state = file.load_configured()?;
    println!("config:    {}", file.path().display());
    println!("host:      {}", state.host);
    println!("ignore tls: {}", state.ignore_cert);
    if state.last_view > 0 {
        println!("last view: {}", format_stamp(state.last_view, &chrono::Local));
    }
    if state.has_history() {
        println!(
            "last window: {} to {}",
            format_stamp(state.last_start, &chrono::Local),
            format_stamp(state.last_end, &chrono::Local)
        );
    }
    Ok(())
}

/// Open the named state file, offering to create it when missing. Returns
/// `None` when there is nothing to poll with yet.
fn open_state(name: &str, yes: bool) -> anyhow::Result<Option<StateFile>> {
    let file = StateFile::named(name);
    if file.exists() {
        return Ok(Some(file));
    }
    let prompt =
        format!("Config \"{name}\" doesn't exist. Do you want to create a new config [y/n]> ");
    if !yes && !confirm(&prompt)? {
        return Ok(None);
    }
    file.create()
        .with_context(|| format!("creating {}", file.path().display()))?;
    println!(
        "Config created successfully: \"{}\". You need to set \"host\" and \"token\"",
        file.path().display()
    );
    Ok(None)
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
