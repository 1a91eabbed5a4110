//! Admin slash commands: /set_time, /clear_time, /list_users

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;
use serenity::model::permissions::Permissions;

/// Creates admin commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_set_time_command(),
        create_clear_time_command(),
        create_list_users_command(),
    ]
}

/// Creates the set_time command (admin) - freezes the bot clock for schedule testing
fn create_set_time_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("set_time")
        .description("테스트용 시간을 설정합니다 (Admin)")
        .default_member_permissions(Permissions::ADMINISTRATOR);

    let options = [
        ("year", "연도", 2000, 3000),
        ("month", "월 (1-12)", 1, 12),
        ("day", "일 (1-31)", 1, 31),
        ("hour", "시 (0-23)", 0, 23),
        ("minute", "분 (0-59)", 0, 59),
        ("second", "초 (0-59)", 0, 59),
    ];
    for (name, description, min, max) in options {
        command.create_option(|option| {
            option
                .name(name)
                .description(description)
                .kind(CommandOptionType::Integer)
                .required(true)
                .min_int_value(min)
                .max_int_value(max)
        });
    }
    command
}

/// Creates the clear_time command (admin) - returns to the system clock
fn create_clear_time_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("clear_time")
        .description("시간 설정을 초기화합니다 (Admin)")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .to_owned()
}

/// Creates the list_users command (admin) - lists non-bot guild members
fn create_list_users_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("list_users")
        .description("서버의 유저 목록을 보여줍니다 (Admin)")
        .default_member_permissions(Permissions::ADMINISTRATOR)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_admin_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_set_time_has_six_required_options() {
        let command = create_set_time_command();
        let options = command.0.get("options").unwrap().as_array().unwrap();
        assert_eq!(options.len(), 6);
        for option in options {
            assert_eq!(option.get("required").unwrap().as_bool(), Some(true));
        }
    }
}
