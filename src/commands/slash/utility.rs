//! Utility slash commands: /ping, /help, /version, /uptime

use serenity::builder::CreateApplicationCommand;

/// Creates utility commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_ping_command(),
        create_help_command(),
        create_version_command(),
        create_uptime_command(),
    ]
}

/// Creates the ping command
fn create_ping_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ping")
        .description("봇 응답 확인")
        .to_owned()
}

/// Creates the help command
fn create_help_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("help")
        .description("명령어 안내")
        .to_owned()
}

/// Creates the version command
fn create_version_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("version")
        .description("봇 버전 정보")
        .to_owned()
}

/// Creates the uptime command
fn create_uptime_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("uptime")
        .description("봇 가동 시간")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_utility_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 4);
    }
}
