//! Console commands and their parser.

use std::num::ParseIntError;
use std::str::FromStr;

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `light on` / `light off`
    Light(bool),
    /// `lock lock` / `lock unlock` (or `door ...`)
    Lock(bool),
    /// `thermostat <degrees>` (or `temp <degrees>`)
    Thermostat(i32),
    /// `mode <name>`; the name is passed through untouched.
    Mode(String),
    Status,
    Help,
    Quit,
}

/// Input that could not be turned into a [`Command`].
///
/// These never reach the controller; the panel reports them and keeps the
/// device state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("expected `{yes}` or `{no}`, got `{actual}`")]
    UnexpectedArgument {
        yes: &'static str,
        no: &'static str,
        actual: String,
    },

    #[error("please enter a valid temperature (number), got `{input}`")]
    InvalidTemperature {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let argument = words.collect::<Vec<_>>().join(" ");

        match verb.as_str() {
            "light" => switch(&argument, "light", ("on", "off")).map(Self::Light),
            "lock" | "door" => switch(&argument, "lock", ("lock", "unlock")).map(Self::Lock),
            "thermostat" | "temp" => temperature(&argument).map(Self::Thermostat),
            "mode" if argument.is_empty() => Err(CommandError::MissingArgument("mode")),
            "mode" => Ok(Self::Mode(argument)),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(verb)),
        }
    }
}

fn switch(
    argument: &str,
    verb: &'static str,
    (yes, no): (&'static str, &'static str),
) -> Result<bool, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument(verb));
    }
    if argument.eq_ignore_ascii_case(yes) {
        Ok(true)
    } else if argument.eq_ignore_ascii_case(no) {
        Ok(false)
    } else {
        Err(CommandError::UnexpectedArgument {
            yes,
            no,
            actual: argument.to_string(),
        })
    }
}

fn temperature(argument: &str) -> Result<i32, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument("thermostat"));
    }
    argument
        .parse::<i32>()
        .map_err(|source| CommandError::InvalidTemperature {
            input: argument.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_light_switches() {
        assert_eq!("light on".parse::<Command>(), Ok(Command::Light(true)));
        assert_eq!("LIGHT Off".parse::<Command>(), Ok(Command::Light(false)));
    }

    #[test]
    fn should_parse_lock_aliases() {
        assert_eq!("lock lock".parse::<Command>(), Ok(Command::Lock(true)));
        assert_eq!("door unlock".parse::<Command>(), Ok(Command::Lock(false)));
    }

    #[test]
    fn should_parse_negative_temperature() {
        assert_eq!("temp -3".parse::<Command>(), Ok(Command::Thermostat(-3)));
        assert_eq!("thermostat 21".parse::<Command>(), Ok(Command::Thermostat(21)));
    }

    #[test]
    fn should_report_non_numeric_temperature() {
        let result = "thermostat warm".parse::<Command>();
        assert!(matches!(
            result,
            Err(CommandError::InvalidTemperature { ref input, .. }) if input == "warm"
        ));
    }

    #[test]
    fn should_keep_mode_name_verbatim() {
        assert_eq!("mode Sleep".parse::<Command>(), Ok(Command::Mode("Sleep".to_string())));
        assert_eq!(
            "mode  movie night ".parse::<Command>(),
            Ok(Command::Mode("movie night".to_string()))
        );
    }

    #[test]
    fn should_require_arguments() {
        assert_eq!(
            "mode".parse::<Command>(),
            Err(CommandError::MissingArgument("mode"))
        );
        assert_eq!(
            "light".parse::<Command>(),
            Err(CommandError::MissingArgument("light"))
        );
    }

    #[test]
    fn should_reject_unexpected_switch_argument() {
        assert!(matches!(
            "light dim".parse::<Command>(),
            Err(CommandError::UnexpectedArgument { yes: "on", no: "off", .. })
        ));
    }

    #[test]
    fn should_reject_blank_and_unknown_input() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandError::Unknown("dance".to_string()))
        );
    }

    #[test]
    fn should_parse_session_commands() {
        assert_eq!("status".parse::<Command>(), Ok(Command::Status));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }
}
