//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            url,
            storage,
            key,
            origin,
        } => {
            let changes = Profile {
                api_url: url,
                storage_url: storage,
                api_key: key,
                share_origin: origin,
            };
            set_profile(config, name, changes, formatter)
        }
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    let mut names: Vec<&String> = config.profiles.keys().collect();
    names.sort();

    println!("Available profiles:");
    for name in names {
        let profile = &config.profiles[name];
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        print_profile(profile, "    ");
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    print_profile(profile, "  ");

    Ok(())
}

fn print_profile(profile: &Profile, indent: &str) {
    for line in describe(profile) {
        println!("{}{}", indent, line);
    }
}

/// Human-readable profile fields; the API key is never shown.
fn describe(profile: &Profile) -> Vec<String> {
    vec![
        format!("API: {}", profile.api_url.as_deref().unwrap_or("(simulated)")),
        format!("Storage: {}", profile.storage_url.as_deref().unwrap_or("(none)")),
        format!("API key: {}", if profile.api_key.is_some() { "set" } else { "not set" }),
        format!("Share origin: {}", profile.share_origin()),
    ]
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!("{}", formatter.success(&format!("Switched to profile '{}'", name)));
    Ok(())
}

/// Create a profile, or update the given fields of an existing one.
fn set_profile(config: &mut Config, name: String, changes: Profile, formatter: &Formatter) -> Result<()> {
    let (action, profile) = match config.profiles.get(&name) {
        Some(existing) => (
            "Updated",
            Profile {
                api_url: changes.api_url.or_else(|| existing.api_url.clone()),
                storage_url: changes.storage_url.or_else(|| existing.storage_url.clone()),
                api_key: changes.api_key.or_else(|| existing.api_key.clone()),
                share_origin: changes.share_origin.or_else(|| existing.share_origin.clone()),
            },
        ),
        None => ("Created", changes),
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!("{}", formatter.success(&format!("{} profile '{}'", action, name)));

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted("Cannot delete the active profile".to_string()));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!("{}", formatter.success(&format!("Deleted profile '{}'", name)));
    } else {
        println!("{}", formatter.warning(&format!("Profile '{}' does not exist", name)));
    }

    Ok(())
}
