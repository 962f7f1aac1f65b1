use crate::app::command_support::{load_app_config, map_profile_err, profile_manager};
use crate::app::output::{render_profiles, OutputFormat, TABLE_FORMAT};
use crate::config::write_config_file;
use crate::profile::{active_profile_name, use_profile, CreateOptions};

pub fn cmd_profiles(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: profiles <create|delete|list|use|show> ...".to_string());
    }

    match args[0].as_str() {
        "create" => cmd_create(&args[1..]),
        "delete" => cmd_delete(&args[1..]),
        "list" => cmd_list(&args[1..]),
        "use" => cmd_use(&args[1..]),
        "show" => cmd_show(&args[1..]),
        other => Err(format!("unknown profiles subcommand `{other}`")),
    }
}

fn cmd_create(args: &[String]) -> Result<String, String> {
    let mut name = None;
    let mut from = None;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--from" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --from".to_string());
                }
                from = Some(args[i + 1].clone());
                i += 2;
            }
            other if other.starts_with("--") => return Err(format!("unknown option `{other}`")),
            other => {
                if name.is_some() {
                    return Err(format!("unexpected argument `{other}`"));
                }
                name = Some(other.to_string());
                i += 1;
            }
        }
    }
    let Some(name) = name else {
        return Err("create requires an argument".to_string());
    };

    let manager = profile_manager()?;
    let mut options = CreateOptions::new(name.clone());
    if let Some(from) = from.clone() {
        options = options.from_profile(from);
    }
    manager.create_profile(&options).map_err(|err| match &from {
        Some(from) => format!("error creating profile {name} from profile {from}: {err}"),
        None => format!("error creating profile {name}: {err}"),
    })?;

    Ok(match from {
        Some(from) => format!("Created profile {name} from {from}."),
        None => format!("Created profile {name}."),
    })
}

fn cmd_delete(args: &[String]) -> Result<String, String> {
    if args.len() != 1 {
        return Err("delete requires an argument".to_string());
    }
    let name = &args[0];
    let manager = profile_manager()?;
    let config = load_app_config(manager.locations())?;
    if config.current_profile() == name.as_str() {
        return Err(format!(
            "error deleting profile: profile `{name}` is the active profile; select another one with `profiles use` first"
        ));
    }
    manager
        .delete_profile(name)
        .map_err(|err| format!("error deleting profile: {err}"))?;
    Ok(format!("Deleted profile {name}"))
}

fn cmd_list(args: &[String]) -> Result<String, String> {
    let mut format = TABLE_FORMAT.to_string();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --format".to_string());
                }
                format = args[i + 1].clone();
                i += 2;
            }
            other => return Err(format!("unknown option `{other}`")),
        }
    }
    let format = OutputFormat::parse(&format).map_err(|err| err.to_string())?;

    let manager = profile_manager()?;
    let listing = manager
        .fetch_all_profiles()
        .map_err(|err| format!("error listing all profiles: {err}"))?;
    let mut lines = Vec::new();
    if listing.profiles.is_empty() {
        lines.push("There are no profiles yet.".to_string());
    } else {
        lines.push(
            render_profiles(&listing.profiles, format)
                .map_err(|err| format!("error listing all profiles: {err}"))?,
        );
    }
    if format == OutputFormat::Table {
        for skipped in &listing.skipped {
            lines.push(format!(
                "warning: skipped profile directory `{}`: {}",
                skipped.name, skipped.reason
            ));
        }
    }
    Ok(lines.join("\n"))
}

fn cmd_use(args: &[String]) -> Result<String, String> {
    if args.len() != 1 {
        return Err("use requires an argument".to_string());
    }
    let name = &args[0];
    let manager = profile_manager()?;
    let mut config = load_app_config(manager.locations())?;
    let locations = manager.locations();
    use_profile(&manager, &mut config, name, |config| {
        write_config_file(locations, config).map(|_| ())
    })
    .map_err(|err| format!("cannot use profile {name:?}: {err}"))?;
    Ok(format!("Now using profile {name}."))
}

fn cmd_show(args: &[String]) -> Result<String, String> {
    if args.len() > 1 {
        return Err("usage: profiles show [<name>]".to_string());
    }
    let manager = profile_manager()?;
    let config = load_app_config(manager.locations())?;
    let active = active_profile_name(None, &config);
    let name = args.first().cloned().unwrap_or_else(|| active.clone());
    let profile = manager.load_profile(&name).map_err(map_profile_err)?;
    let settings = profile.config().map_err(map_profile_err)?;

    let metadata = &profile.metadata;
    let mut lines = vec![
        format!("name={}", metadata.name),
        format!("active={}", active == metadata.name),
        format!("date_created={}", metadata.date_created.to_rfc3339()),
        format!("user={}", metadata.user),
        format!("version={}", metadata.version),
        format!("path={}", profile.path.display()),
    ];
    lines.extend(settings.iter().map(|(key, value)| format!("config.{key}={value}")));
    Ok(lines.join("\n"))
}
