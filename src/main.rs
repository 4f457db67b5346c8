// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! retgate CLI
//!
//! Runs the interceptor chain against a simulated page so the request
//! augmentation and retcode decisions can be inspected from a shell.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;

use retgate::guard::RequestAugmenter;
use retgate::{
    Catalog, GuardConfig, GuardedClient, Localizer, NavigationContext, OutboundRequest,
    PageContext, RecordingNavigator, RecordingNotifier, RedirectPolicy, ResponseClassifier,
    StatusEnvelope, WarningExtractor,
};

/// Options shared by every command
struct Options {
    config: GuardConfig,
    locale: Option<String>,
    positional: Vec<String>,
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut config = GuardConfig::default();
    let mut locale = None;
    let mut positional = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config requires a file path")?;
                config = GuardConfig::from_json_file(path)
                    .with_context(|| format!("failed to load config from {}", path))?;
            }
            "--locale" | "-l" => {
                let tag = iter.next().context("--locale requires a tag")?;
                if !Catalog::supported_locales().contains(&tag.as_str()) {
                    tracing::warn!(locale = %tag, "No built-in messages for locale, using zh-CN");
                }
                locale = Some(tag.clone());
            }
            flag if flag.starts_with('-') => bail!("unknown option: {}", flag),
            value => positional.push(value.to_string()),
        }
    }

    config.validate()?;

    Ok(Options {
        config,
        locale,
        positional,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "retgate=info".parse::<tracing_subscriber::filter::Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "classify" => run_with(&args[2..], "classify <page-url> <json-body>", classify),
        "augment" => run_with(&args[2..], "augment <page-url> <api-url>", augment),
        "fetch" => match parse_command(&args[2..], "fetch <page-url> <api-url>") {
            Ok(options) => fetch(options).await,
            Err(e) => Err(e),
        },
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("retgate {}", retgate::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn parse_command(args: &[String], usage: &str) -> anyhow::Result<Options> {
    let options = parse_options(args)?;
    if options.positional.len() < 2 {
        bail!("Usage: retgate {}", usage);
    }
    Ok(options)
}

fn run_with(
    args: &[String],
    usage: &str,
    command: fn(Options) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    command(parse_command(args, usage)?)
}

fn print_usage() {
    println!(
        r#"retgate - Retcode interceptors for browser-hosted apps

USAGE:
    retgate <COMMAND> [OPTIONS]

COMMANDS:
    classify <page-url> <json-body>   Show the decision and warning for a response body
    augment <page-url> <api-url>      Show the request as the interceptors send it
    fetch <page-url> <api-url>        Perform a guarded GET and show the outcome
    help                              Show this help message
    version                           Show version information

OPTIONS:
    -c, --config <file.json>          Load guard configuration from a JSON file
    -l, --locale <tag>                Active locale (en-US, zh-CN)

EXAMPLES:
    retgate classify "https://app.example.com/list?a=1" '{{"retcode":4005,"message":"未登录"}}'
    retgate augment "https://app.example.com/list?token=abc" https://api.example.com/items
    retgate fetch "https://app.example.com/list?token=abc" https://api.example.com/items --locale en-US
"#
    );
}

fn catalog(options: &Options) -> Arc<Catalog> {
    match &options.locale {
        Some(locale) => Arc::new(Catalog::new(locale.clone())),
        None => Arc::new(Catalog::default()),
    }
}

fn classify(options: Options) -> anyhow::Result<()> {
    let navigator = RecordingNavigator::at(&options.positional[0]).context("invalid page URL")?;
    let envelope = StatusEnvelope::from_body(options.positional[1].as_bytes());

    let classifier = ResponseClassifier::new(RedirectPolicy::new(&options.config)?);
    let location = navigator.current_location();
    let decision = classifier.classify(&envelope, &location, Utc::now().timestamp_millis());

    let localizer = catalog(&options);
    let warning = WarningExtractor::new(localizer.clone()).extract(&envelope);

    println!("=== Envelope ===");
    println!("Retcode: {}", envelope.retcode);
    println!("Message: {}", envelope.message_text());
    if let Some(redirect) = envelope.redirect_url() {
        println!("Redirect: {}", redirect);
    }

    println!("\n=== Decision ===");
    println!("Outcome: {}", decision.label());
    if let Some(target) = decision.navigation_target() {
        println!("Navigate to: {}", target);
    }

    println!("\n=== Warning ({}) ===", localizer.current_locale());
    if warning.is_empty() {
        println!("(none)");
    } else if location.is_on(&options.config.login_redirect_path) {
        println!("{} (suppressed on login-redirect page)", warning);
    } else {
        println!("{}", warning);
    }

    Ok(())
}

fn augment(options: Options) -> anyhow::Result<()> {
    let navigator = Arc::new(
        RecordingNavigator::at(&options.positional[0]).context("invalid page URL")?,
    );
    let request = OutboundRequest::get(&options.positional[1]).context("invalid API URL")?;

    let request = RequestAugmenter::new(navigator).augment(request);

    println!("=== Request ===");
    println!("{} {}", request.method, request.full_url());
    println!("Credentials: {:?}", request.credentials);
    for (name, value) in &request.headers {
        println!("  {}: {}", name, value.to_str().unwrap_or("<binary>"));
    }

    Ok(())
}

async fn fetch(options: Options) -> anyhow::Result<()> {
    let navigator = Arc::new(
        RecordingNavigator::at(&options.positional[0]).context("invalid page URL")?,
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let context = PageContext::new(navigator.clone(), catalog(&options), notifier.clone());
    let api_url = options.positional[1].clone();

    let client = GuardedClient::new(options.config, context)?;

    println!("Fetching: {}", api_url);
    let outcome = client.get(&api_url).await;

    println!("\n=== Outcome ===");
    match &outcome {
        Ok(response) => {
            println!("Status: {}", response.status);
            println!("Retcode: {}", response.envelope().retcode);
            println!("Size: {} bytes", response.body_len());
            println!("Time: {}ms", response.response_time_ms);
        }
        Err(e) if e.is_abandoned() => println!("Abandoned: page navigated away"),
        Err(e) => println!("Rejected: {}", e),
    }

    let navigations = navigator.navigations();
    if !navigations.is_empty() {
        println!("\n=== Navigations ({}) ===", navigations.len());
        for target in &navigations {
            println!("  - {}", target);
        }
    }

    let warnings = notifier.warnings();
    if !warnings.is_empty() {
        println!("\n=== Warnings ({}) ===", warnings.len());
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    match outcome {
        Err(e) if e.is_transport() => Err(e.into()),
        _ => Ok(()),
    }
}
