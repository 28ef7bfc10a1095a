use rsvp_bot::bot::commands::Command;
use teloxide::utils::command::BotCommands;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    #[test]
    fn test_start_command_parsing() {
        let result = Command::parse("/start", "rsvp_test_bot");
        assert_eq!(result.unwrap(), Command::Start(String::new()));
    }

    #[test]
    fn test_start_command_with_deep_link() {
        let result = Command::parse("/start inv_1", "rsvp_test_bot");
        assert_eq!(result.unwrap(), Command::Start("inv_1".to_string()));
    }

    #[test]
    fn test_command_with_bot_mention() {
        let result = Command::parse("/stats@rsvp_test_bot", "rsvp_test_bot");
        assert_eq!(result.unwrap(), Command::Stats);
    }

    #[test]
    fn test_simple_commands_parsing() {
        let cases = [
            ("/help", Command::Help),
            ("/new", Command::New),
            ("/stats", Command::Stats),
            ("/list", Command::List),
            ("/cancel", Command::Cancel),
        ];
        for (input, expected) in cases {
            assert_eq!(Command::parse(input, "rsvp_test_bot").unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_invalid_command_parsing() {
        assert!(Command::parse("/invalidcommand", "rsvp_test_bot").is_err());
        assert!(Command::parse("just text", "rsvp_test_bot").is_err());
    }

    #[test]
    fn test_admin_only_commands() {
        for cmd in [Command::New, Command::Stats, Command::List, Command::Cancel] {
            assert!(cmd.requires_admin(), "{cmd:?}");
            assert!(!cmd.allowed_for(false), "{cmd:?} allowed for a guest");
            assert!(cmd.allowed_for(true));
        }
    }

    #[test]
    fn test_public_commands() {
        for cmd in [Command::Start(String::new()), Command::Help] {
            assert!(!cmd.requires_admin(), "{cmd:?}");
            assert!(cmd.allowed_for(false));
            assert!(cmd.allowed_for(true));
        }
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let descriptions = Command::descriptions().to_string();
        for name in ["/start", "/help", "/new", "/stats", "/list", "/cancel"] {
            assert!(descriptions.contains(name), "missing {name}");
        }
    }
}
