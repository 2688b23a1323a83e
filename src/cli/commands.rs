use std::path::Path;

use anyhow::{Context, bail};
use dialoguer::{Input, Password};
use tracing::warn;

use classwatch_auth::{Action, InitOutcome};
use classwatch_core::{Permission, PermissionSet, Role};
use classwatch_models::{Credentials, MenuGroup};

use crate::menu::load_menu;
use crate::state::AppState;

pub async fn login(
    state: &AppState,
    username: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new()
            .with_prompt("Username")
            .interact_text()
            .context("failed to read username")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .interact()
            .context("failed to read password")?,
    };

    let user = state
        .session
        .login(&Credentials::new(username, password))
        .await?;

    println!("✅ Signed in as {} ({})", user.display_name, user.role.title());
    Ok(())
}

pub async fn logout(state: &AppState) -> anyhow::Result<()> {
    state.session.logout();
    println!("Signed out");
    Ok(())
}

pub async fn whoami(state: &AppState) -> anyhow::Result<()> {
    restore(state).await;

    match state.session.user() {
        Some(user) => {
            println!("User:        {} (id {})", user.display_name, user.id);
            println!("Role:        {}", user.role.title());
            println!("Permissions: {}", user.role.permissions().len());
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

pub async fn menu(state: &AppState, file: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let groups = match file {
        Some(path) => load_menu(path)?,
        None => state.menu(),
    };

    restore(state).await;
    if !state.session.session().is_authenticated() {
        bail!("not signed in; run `classwatch login` first");
    }

    let visible = state.session.filter_menu(&groups);
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        print_menu(&visible);
    }
    Ok(())
}

pub async fn check(state: &AppState, path: &str) -> anyhow::Result<()> {
    let Some(route) = state.routes.lookup(path) else {
        bail!("no dashboard route matches {}", path);
    };

    restore(state).await;

    let action = match &route.requirement {
        None => Action::Allow,
        Some(requirement) => state.session.decide(requirement, path),
    };

    println!("{} → {}", path, describe(&action));
    Ok(())
}

pub fn permissions(role: Option<Role>) -> anyhow::Result<()> {
    let granted: PermissionSet = match role {
        Some(role) => role.permissions().clone(),
        None => PermissionSet::all(),
    };

    if let Some(role) = role {
        println!("{} ({} of {})", role.title(), granted.len(), Permission::ALL.len());
    }

    let mut current_area = None;
    for permission in granted.iter() {
        let area = permission.area();
        if current_area != Some(area) {
            println!("{}", area.title());
            current_area = Some(area);
        }
        println!("  {}", permission);
    }
    Ok(())
}

async fn restore(state: &AppState) {
    match state.session.initialize().await {
        InitOutcome::NetworkError => {
            warn!(api = %state.api_config.base_url, "Could not reach the API; signed out");
        }
        InitOutcome::StaleCredential => eprintln!("Session expired, please sign in again"),
        _ => {}
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::Allow => "allow".to_string(),
        Action::ShowLoading => "loading".to_string(),
        Action::RedirectTo {
            path,
            from: Some(from),
        } => format!("redirect to {} (return to {})", path, from),
        Action::RedirectTo { path, from: None } => format!("redirect to {}", path),
    }
}

fn print_menu(groups: &[MenuGroup]) {
    if groups.is_empty() {
        println!("(no menu entries)");
        return;
    }

    for group in groups {
        println!("{}", group.title);
        for entry in &group.entries {
            println!("  {:<16} {}", entry.label, entry.target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_redirects() {
        let action = Action::RedirectTo {
            path: "/login".to_string(),
            from: Some("/grades".to_string()),
        };
        assert_eq!(describe(&action), "redirect to /login (return to /grades)");
        assert_eq!(describe(&Action::Allow), "allow");
    }
}
