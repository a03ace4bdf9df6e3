use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use smoke_tester::runner::{Call, Flow};
use smoke_tester::steps::auth;
use smoke_tester::utils::ReportStyle;
use smoke_tester::{flows, Harness, HarnessConfig, HttpTransport};

#[derive(Parser)]
#[command(name = "smoke-tester")]
#[command(version)]
#[command(about = "Sequential end-to-end smoke tests for the Roors HTTP API", long_about = None)]
struct Cli {
    #[command(flatten)]
    target: TargetArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the built-in defaults and SMOKE_* environment variables
#[derive(Args)]
struct TargetArgs {
    /// Base URL of the API under test
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Auth controller prefix (/auth or /api/auth)
    #[arg(long, global = true)]
    auth_prefix: Option<String>,

    /// Test account username
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Test account password
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Test account email
    #[arg(short, long, global = true)]
    email: Option<String>,

    /// Report style (defaults to compact for `catalog`, detailed otherwise)
    #[arg(long, value_enum, global = true)]
    style: Option<ReportStyle>,

    /// Run only these steps of the flow (comma-separated step names)
    #[arg(long, value_delimiter = ',', global = true)]
    only: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every auth and password test, negative cases included
    Suite,

    /// Run the basic flow: welcome, register, login, change password
    Basic,

    /// Walk the whole endpoint catalogue, public to admin
    Catalog,

    /// Request a password reset email, then pause
    ResetRequest {
        /// Address to send the reset email to (defaults to the test email)
        #[arg(long = "to")]
        to: Option<String>,
    },

    /// Finish a password reset with the token from the email
    ResetComplete {
        /// Reset token from the email
        #[arg(long)]
        token: String,

        /// Password to set
        #[arg(long)]
        new_password: Option<String>,
    },

    /// Resend the verification email, then pause
    VerifyRequest,

    /// Verify the account email with the token from the email
    VerifyComplete {
        /// Verification token from the email
        #[arg(long)]
        token: String,
    },

    /// List flows and their steps
    List,

    /// Make a single call outside any flow
    Call {
        /// HTTP method (GET, POST, PUT, PATCH, DELETE)
        method: String,

        /// Path relative to the base URL, e.g. /api/menu
        path: String,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,

        /// Status code that counts as a pass (default: any 2xx)
        #[arg(long)]
        expect: Option<u16>,

        /// Log in first so the call carries a bearer token
        #[arg(long)]
        login: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.target.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = build_config(&cli.target, &cli.command)?;

    let flow = match cli.command {
        Commands::Suite => flows::full_suite(),
        Commands::Basic => flows::basic_flow(),
        Commands::Catalog => flows::api_catalog(),
        Commands::ResetRequest { to } => flows::password_reset_flow(to),
        Commands::ResetComplete {
            token,
            new_password,
        } => flows::complete_password_reset(Some(token), new_password),
        Commands::VerifyRequest => flows::email_verification_flow(),
        Commands::VerifyComplete { token } => flows::complete_email_verification(Some(token)),
        Commands::List => {
            list_flows();
            return Ok(());
        }
        Commands::Call {
            method,
            path,
            body,
            expect,
            login,
        } => {
            return single_call(config, &method, &path, body.as_deref(), expect, login);
        }
    };

    let flow = select_steps(flow, &cli.target.only)?;
    let transport = HttpTransport::new().context("Failed to create HTTP client")?;
    let mut harness = Harness::new(config, Box::new(transport));
    flow.run(&mut harness);

    Ok(())
}

fn build_config(target: &TargetArgs, command: &Commands) -> anyhow::Result<HarnessConfig> {
    let mut config = HarnessConfig::default().with_env();

    if let Some(ref base_url) = target.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(ref prefix) = target.auth_prefix {
        config.auth_prefix = prefix.clone();
    }
    if let Some(ref username) = target.username {
        config.username = username.clone();
    }
    if let Some(ref password) = target.password {
        config.password = password.clone();
    }
    if let Some(ref email) = target.email {
        config.email = email.clone();
    }

    config.report_style = match (target.style, command) {
        (Some(style), _) => style,
        (None, Commands::Catalog) => ReportStyle::Compact,
        (None, _) => ReportStyle::Detailed,
    };

    config.validate()?;
    Ok(config)
}

fn select_steps(flow: Flow, only: &[String]) -> anyhow::Result<Flow> {
    let known = flow.step_names().join(", ");
    let unknown: Vec<&String> = only
        .iter()
        .filter(|name| !flow.step_names().contains(&name.as_str()))
        .collect();
    if !unknown.is_empty() {
        anyhow::bail!(
            "Unknown step(s) for {}: {:?}. Available: {}",
            flow.name,
            unknown,
            known
        );
    }
    Ok(flow.only(only))
}

fn list_flows() {
    println!("\n{} Available flows:", "📋".blue());
    for (command, flow) in flows::catalogue() {
        println!(
            "\n  {} - {} ({} steps)",
            command.cyan().bold(),
            flow.name,
            flow.len()
        );
        for step in flow.steps() {
            if let Some(ref section) = step.section {
                println!("    {}", section.dimmed());
            }
            println!("      {}", step.name);
        }
    }
    println!(
        "\n💡 Quick start: smoke-tester suite --base-url http://localhost:8080"
    );
}

fn single_call(
    config: HarnessConfig,
    method: &str,
    path: &str,
    body: Option<&str>,
    expect: Option<u16>,
    login: bool,
) -> anyhow::Result<()> {
    let body = body
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("--body is not valid JSON")?;

    let url = config.url(path);
    let transport = HttpTransport::new().context("Failed to create HTTP client")?;
    let mut harness = Harness::new(config, Box::new(transport));

    if login {
        auth::login(&mut harness);
    }

    let mut call = Call::new(method, url)
        .describe(format!("{} {}", method.to_uppercase(), path))
        .summarize();
    if let Some(body) = body {
        call = call.body(body);
    }
    if let Some(code) = expect {
        call = call.expect(code);
    }

    let outcome = harness.call(call);
    log::debug!("Ad-hoc call finished: {:?}", outcome.status);
    Ok(())
}
