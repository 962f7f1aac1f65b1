#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Setup,
    Profiles,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "setup" => CliVerb::Setup,
        "profiles" => CliVerb::Profiles,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  setup                                Create the state root and the default profile"
            .to_string(),
        "  profiles create <name> [--from <p>]  Create a profile, optionally cloned from <p>"
            .to_string(),
        "  profiles delete <name>               Delete a profile and all of its files".to_string(),
        "  profiles list [--format table|json]  List available profiles".to_string(),
        "  profiles use <name>                  Set the profile used when none is specified"
            .to_string(),
        "  profiles show [<name>]               Show a profile (default: the active one)"
            .to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push(
        "Profiles live in $STACKCTL_DATA_HOME/profiles (default ~/.stackctl/profiles).".to_string(),
    );
    lines.push(
        "$STACKCTL_PROFILE overrides the active profile for a single invocation.".to_string(),
    );
    lines.join("\n")
}
