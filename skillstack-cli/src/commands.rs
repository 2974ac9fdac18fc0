//! Subcommand implementations.

use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use fieldcheck::error::ConfigError;
use fieldcheck::field::{AsyncFieldValidator, FieldConfig, FieldValidationState, RemoteStatus};
use fieldcheck::gate::SubmitGate;
use fieldcheck::view::{PreviewText, ProjectStatus, is_previewable_url, status_badge};
use skillstack_api::SkillStackClient;
use skillstack_api::api::UsernameCheck;
use skillstack_api::config::ClientConfig;
use skillstack_api::poll::{PollConfig, UnreadPoller};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::Command;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] skillstack_api::error::Error),

    #[error(transparent)]
    Field(#[from] ConfigError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

pub async fn run(command: Command, config: &ClientConfig) -> Result<ExitCode, CliError> {
    let client = config.build_client()?;
    log::info!("using {}", client.base_url());

    match command {
        Command::CheckUsername { names, debounce_ms } if names.is_empty() => {
            interactive_username(client, Duration::from_millis(debounce_ms)).await
        }
        Command::CheckUsername { names, .. } => check_usernames(&client, &names).await,
        Command::Unread { watch: false, .. } => {
            println!("{}", client.unread_count().await?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Unread {
            watch: true,
            interval,
        } => watch_unread(client, Duration::from_secs(interval)).await,
        Command::Preview { url } => preview(&client, &url).await,
        Command::MarkRead { id } => {
            client.mark_read(&id).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Status { project_id, status } => {
            let status: ProjectStatus = status.parse().map_err(CliError::Usage)?;
            client.update_status(&project_id, status).await?;
            println!("{}", status_badge(status.as_str()).text);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Local rules of the registration form's username input. The pattern is
/// Django's default username validator.
fn username_config(debounce: Duration) -> Result<FieldConfig, ConfigError> {
    Ok(FieldConfig::new("username")
        .min_local_length(3, "Username must be at least 3 characters.")
        .max_local_length(150, "Username must be at most 150 characters.")
        .local_pattern_str(
            r"^[\w.@+-]+$",
            "Letters, digits and @/./+/-/_ only.",
        )?
        .debounce(debounce))
}

async fn check_usernames(client: &SkillStackClient, names: &[String]) -> Result<ExitCode, CliError> {
    let rules = username_config(Duration::ZERO)?.rules;
    let mut all_free = true;

    for name in names {
        let name = rules.normalize(name);
        if let Err(e) = rules.check(name) {
            println!("{name}: {e}");
            all_free = false;
            continue;
        }
        if client.check_username(name).await? {
            println!("{name}: taken");
            all_free = false;
        } else {
            println!("{name}: available");
        }
    }

    Ok(if all_free {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn describe(state: &FieldValidationState) -> String {
    if let Some(error) = &state.error {
        return format!("x {error}");
    }
    match state.remote_status {
        RemoteStatus::Pending => "... checking availability".to_string(),
        RemoteStatus::Confirmed { valid: true } => "ok available".to_string(),
        RemoteStatus::Confirmed { valid: false } => "x taken".to_string(),
        RemoteStatus::Unchecked if state.check_failed => {
            "? could not check, the server will decide".to_string()
        }
        RemoteStatus::Unchecked => String::new(),
    }
}

async fn interactive_username(client: SkillStackClient, debounce: Duration) -> Result<ExitCode, CliError> {
    let last = Mutex::new(String::new());
    let field = AsyncFieldValidator::attach(
        username_config(debounce)?
            .remote_check(UsernameCheck::new(client))
            .on_state_change(move |state| {
                let line = describe(state);
                if let Ok(mut last) = last.lock()
                    && *last != line
                {
                    eprintln!("[{}] {line}", state.raw_value.trim());
                    *last = line;
                }
            }),
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        field.on_input(line);
    }

    match SubmitGate::new().field(&field).submit().await {
        Ok(()) => {
            println!("{}: available", field.state().raw_value.trim());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            for error in e.result().errors() {
                println!("{}: {}", error.field_name, error.message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn watch_unread(client: SkillStackClient, interval: Duration) -> Result<ExitCode, CliError> {
    let poller = UnreadPoller::new(client).with_config(PollConfig::new().interval(interval));
    let task = poller.spawn();
    let mut shown: Option<u64> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = tokio::time::sleep(Duration::from_millis(200)) => {}
        }
        if !poller.count().is_dirty() {
            continue;
        }
        poller.count().clear_dirty();

        let count = poller.count().ready();
        if count.is_some() && count != shown {
            let badge = poller.badge();
            if badge.visible {
                println!("{} unread", badge.text);
            } else {
                println!("no unread messages");
            }
            shown = count;
        }
    }

    poller.stop();
    let _ = task.await;
    Ok(ExitCode::SUCCESS)
}

async fn preview(client: &SkillStackClient, url: &str) -> Result<ExitCode, CliError> {
    if !is_previewable_url(url) {
        return Err(CliError::Usage(format!("not an http(s) link: {url}")));
    }

    let link = client.link_preview(url.trim()).await?;
    let text = PreviewText::render(
        link.title.as_deref().unwrap_or_default(),
        url.trim(),
        link.image_url.as_deref(),
    );
    println!("{}", text.title);
    println!("{}", text.url);
    println!("{}", text.thumbnail.as_deref().unwrap_or("(no image)"));
    Ok(ExitCode::SUCCESS)
}
