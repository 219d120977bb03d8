use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use vle_cli::commands::{self, CliContext, CourseArgs, FormReport, LoginArgs, RegisterArgs};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Base URL of the VLE API
    #[arg(long, global = true, env = vle_config::API_BASE_URL_ENV)]
    api_url: Option<String>,
    /// Where the session token and profile are kept
    #[arg(long, global = true, env = vle_config::SESSION_FILE_ENV)]
    session_file: Option<Utf8PathBuf>,
    /// Report the redirect destination without waiting for it
    #[arg(long, global = true)]
    no_wait: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value = "student")]
        role: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        remember_me: bool,
    },
    /// Manage courses (requires a session)
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },
    /// Inspect the stored session
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    Logout,
}

#[derive(Subcommand)]
enum CourseCommands {
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "beginner")]
        level: String,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    Show,
}

fn finish(report: FormReport) -> anyhow::Result<()> {
    if !report.is_success() {
        anyhow::bail!("submission did not succeed ({:?})", report.outcome);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    let mut ctx = CliContext::new(cli.api_url.as_deref(), cli.session_file)?;
    ctx.follow_redirects = !cli.no_wait;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
            role,
        } => {
            let args = RegisterArgs {
                name,
                email,
                password,
                confirm_password,
                role,
            };
            finish(commands::cmd_register(&ctx, args).await?)?;
        }
        Commands::Login {
            email,
            password,
            remember_me,
        } => {
            let args = LoginArgs {
                email,
                password,
                remember_me,
            };
            finish(commands::cmd_login(&ctx, args).await?)?;
        }
        Commands::Course { command } => match command {
            CourseCommands::Create {
                title,
                description,
                category,
                level,
            } => {
                let args = CourseArgs {
                    title,
                    description,
                    category,
                    level,
                };
                finish(commands::cmd_create_course(&ctx, args).await?)?;
            }
        },
        Commands::Session { command } => match command {
            SessionCommands::Show => commands::cmd_session_show(&ctx)?,
        },
        Commands::Logout => commands::cmd_logout(&ctx)?,
    }

    Ok(())
}
