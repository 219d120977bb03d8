use std::sync::Arc;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use vle_app_core::{clear_session, load_session, SubmissionController, SubmitOutcome};
use vle_core::{
    CourseForm, FieldValue, FormDefinition, FormState, LoginForm, MessageKind, RegisterForm,
};
use vle_infra::{FileStorage, HttpApiTransport};

use crate::CliNavigator;

/// Everything a form command needs: where the API lives and where the
/// session is kept.
pub struct CliContext {
    transport: Arc<HttpApiTransport>,
    storage: Arc<FileStorage>,
    /// Wait out the redirect delay instead of just reporting the destination.
    pub follow_redirects: bool,
}

impl CliContext {
    pub fn new(api_url: Option<&str>, session_file: Option<Utf8PathBuf>) -> Result<Self> {
        let base = vle_config::resolve_api_base_url(api_url);
        let client = vle_infra::default_http_client().context("Failed to build HTTP client")?;
        let transport = HttpApiTransport::new(client, &base)?;
        let path = match session_file {
            Some(path) => path,
            None => FileStorage::default_path()?,
        };
        Ok(Self {
            transport: Arc::new(transport),
            storage: Arc::new(FileStorage::new(path)),
            follow_redirects: true,
        })
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }
}

#[derive(Debug)]
pub struct FormReport {
    pub outcome: SubmitOutcome,
    pub state: FormState,
    /// Where the form sends the user next, if anywhere.
    pub redirect: Option<String>,
}

impl FormReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

pub struct LoginArgs {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

pub struct CourseArgs {
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
}

pub async fn cmd_register(ctx: &CliContext, args: RegisterArgs) -> Result<FormReport> {
    println!(":: Creating account for {}", args.email);
    run_form(
        ctx,
        RegisterForm,
        vec![
            ("name", args.name.into()),
            ("email", args.email.into()),
            ("password", args.password.into()),
            ("confirmPassword", args.confirm_password.into()),
            ("role", args.role.into()),
        ],
    )
    .await
}

pub async fn cmd_login(ctx: &CliContext, args: LoginArgs) -> Result<FormReport> {
    println!(":: Signing in as {}", args.email);
    run_form(
        ctx,
        LoginForm,
        vec![
            ("email", args.email.into()),
            ("password", args.password.into()),
            ("rememberMe", args.remember_me.into()),
        ],
    )
    .await
}

pub async fn cmd_create_course(ctx: &CliContext, args: CourseArgs) -> Result<FormReport> {
    println!(":: Creating course \"{}\"", args.title);
    run_form(
        ctx,
        CourseForm,
        vec![
            ("title", args.title.into()),
            ("description", args.description.into()),
            ("category", args.category.into()),
            ("level", args.level.into()),
        ],
    )
    .await
}

async fn run_form<D: FormDefinition>(
    ctx: &CliContext,
    definition: D,
    values: Vec<(&str, FieldValue)>,
) -> Result<FormReport> {
    let navigator = Arc::new(CliNavigator::new());
    let controller = SubmissionController::mount(
        definition,
        ctx.transport.clone(),
        ctx.storage.clone(),
        navigator.clone(),
    );
    controller.load_session_prefill();
    for (name, value) in values {
        controller
            .set_field(name, value)
            .with_context(|| format!("Invalid value for {name}"))?;
    }

    let outcome = controller.submit().await;
    let state = controller.state();
    print_state(&state);

    let redirect = if ctx.follow_redirects {
        controller.navigation().settle().await;
        navigator.last_destination()
    } else {
        let pending = controller.navigation().pending();
        if let Some(path) = &pending {
            println!(":: Next: {path}");
        }
        pending
    };

    Ok(FormReport {
        outcome,
        state,
        redirect,
    })
}

fn print_state(state: &FormState) {
    match state.api_message.kind {
        MessageKind::Success => println!("[ok] {}", state.api_message.text),
        MessageKind::Error => eprintln!("[error] {}", state.api_message.text),
        MessageKind::None => {}
    }
    for (field, message) in &state.errors {
        eprintln!("   {field}: {message}");
    }
}

pub fn cmd_session_show(ctx: &CliContext) -> Result<()> {
    let session = load_session(ctx.storage());
    println!(":: Session file: {}", ctx.storage().path());
    if !session.is_active() {
        println!("   Not signed in.");
        return Ok(());
    }
    println!("   Signed in (token present)");
    if let Some(user) = &session.user {
        println!("{}", serde_json::to_string_pretty(user)?);
    }
    Ok(())
}

pub fn cmd_logout(ctx: &CliContext) -> Result<()> {
    clear_session(ctx.storage()).context("Failed to clear session")?;
    println!(":: Signed out.");
    Ok(())
}
